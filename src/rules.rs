use crate::dsl::Expr;
use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct Rules<T>(pub(crate) Vec<Rule<T>>);

impl<T> Default for Rules<T> {
    fn default() -> Self {
        Rules(Vec::new())
    }
}

impl<T> Rules<T> {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn add(&mut self, premise: Expr<T>, consequence: Expr<T>) {
        self.0.push(Rule {
            premise,
            consequence,
            weight: 1.,
        });
    }

    /// Like [`Rules::add`], but the rule's firing strength is scaled by `weight`
    pub fn add_weighted(&mut self, premise: Expr<T>, consequence: Expr<T>, weight: f64) -> Result<()> {
        if !(0. ..=1.).contains(&weight) {
            return Err(Error::InvalidWeight(weight));
        }

        self.0.push(Rule {
            premise,
            consequence,
            weight,
        });

        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<T>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct Rule<T> {
    pub(crate) premise: Expr<T>,
    pub(crate) consequence: Expr<T>,
    pub(crate) weight: f64,
}

impl<T> Rule<T> {
    pub fn premise(&self) -> &Expr<T> {
        &self.premise
    }

    pub fn consequence(&self) -> &Expr<T> {
        &self.consequence
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

#[test]
fn test_weight_range() {
    use crate::variable::VariableKey;

    let key = VariableKey::default();
    let mut rules = Rules::new();

    assert!(matches!(
        rules.add_weighted(Expr::Is(key, 0), Expr::Is(key, 1), 1.5),
        Err(Error::InvalidWeight(w)) if w == 1.5
    ));
    assert!(matches!(
        rules.add_weighted(Expr::Is(key, 0), Expr::Is(key, 1), -0.1),
        Err(Error::InvalidWeight(_))
    ));
    assert!(rules.add_weighted(Expr::Is(key, 0), Expr::Is(key, 1), f64::NAN).is_err());
    assert!(rules.is_empty());

    rules.add_weighted(Expr::Is(key, 0), Expr::Is(key, 1), 0.).unwrap();
    rules.add_weighted(Expr::Is(key, 0), Expr::Is(key, 1), 1.).unwrap();

    assert_eq!(rules.iter().map(Rule::weight).collect::<Vec<_>>(), vec![0., 1.]);
}
