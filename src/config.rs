use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::dsl::Expr;
use crate::error::{Error, Result};
use crate::inference::Mamdani;
use crate::membership::MembershipFunction;
use crate::ops::{AndOp, DefuzzificationOp, ImplicationOp, OrOp, ProductionLink};
use crate::rules::Rules;
use crate::system::FuzzySystem;
use crate::variable::{VariableKey, Variables};

/// A whole fuzzy system as written in a TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub variables: Vec<VariableConfig>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// Operator selection; anything left out takes the classic Mamdani choice
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InferenceConfig {
    #[serde(rename = "and")]
    pub and_op: Option<AndOp>,
    #[serde(rename = "or")]
    pub or_op: Option<OrOp>,
    pub implication: Option<ImplicationOp>,
    pub aggregation: Option<ProductionLink>,
    pub defuzzification: Option<DefuzzificationOp>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableConfig {
    pub name: String,
    pub range: [f64; 2],
    pub step: Option<f64>,
    #[serde(default)]
    pub terms: BTreeMap<String, TermConfig>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Triangular,
    Trapezoidal,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TermConfig {
    pub shape: Shape,
    pub points: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub premise: PremiseConfig,
    pub then: Vec<(String, String)>,
    pub weight: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiseConfig {
    /// `{ is = ["variable", "term"] }`
    Is(String, String),
    Not(Box<PremiseConfig>),
    All(Vec<PremiseConfig>),
    Any(Vec<PremiseConfig>),
}

impl SystemConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;

        tracing::debug!(
            ?path,
            variables = config.variables.len(),
            rules = config.rules.len(),
            "Loaded fuzzy system definition"
        );

        Ok(config)
    }

    pub fn build(&self) -> Result<FuzzySystem> {
        let mut variables = Variables::new();
        let mut keys = HashMap::with_capacity(self.variables.len());

        for var in &self.variables {
            let terms = var
                .terms
                .iter()
                .map(|(label, term)| Ok((label.clone(), term.membership()?)))
                .collect::<Result<Vec<_>>>()?;
            let [min, max] = var.range;
            let key = variables.add_terms(var.name.as_str(), min..=max, terms, var.step)?;

            keys.insert(var.name.as_str(), key);
        }

        let mut rules = Rules::with_capacity(self.rules.len());

        for rule in &self.rules {
            let premise = rule.premise.to_expr(&variables, &keys)?;
            let mut consequence = rule
                .then
                .iter()
                .map(|(var, term)| proposition(&variables, &keys, var, term))
                .collect::<Result<Vec<_>>>()?;
            let consequence = if consequence.len() == 1 {
                consequence.remove(0)
            } else {
                Expr::And(consequence)
            };

            rules.add_weighted(premise, consequence, rule.weight.unwrap_or(1.))?;
        }

        let model = Mamdani::new(
            self.inference.and_op.unwrap_or_default(),
            self.inference.or_op.unwrap_or_default(),
            self.inference.implication.unwrap_or_default(),
            self.inference.aggregation.unwrap_or_default(),
            self.inference.defuzzification.unwrap_or_default(),
        );

        tracing::debug!(
            variables = variables.len(),
            rules = rules.len(),
            ?model,
            "Built fuzzy system"
        );

        Ok(FuzzySystem::new(variables, rules, model))
    }
}

impl TermConfig {
    pub fn membership(&self) -> Result<MembershipFunction> {
        match (self.shape, self.points.as_slice()) {
            (Shape::Triangular, &[a, b, c]) => MembershipFunction::triangular(a, b, c),
            (Shape::Trapezoidal, &[a, b, c, d]) => MembershipFunction::trapezoidal(a, b, c, d),
            (Shape::Triangular, points) => Err(Error::InvalidShape {
                shape: "triangular",
                expected: 3,
                got: points.len(),
            }),
            (Shape::Trapezoidal, points) => Err(Error::InvalidShape {
                shape: "trapezoidal",
                expected: 4,
                got: points.len(),
            }),
        }
    }
}

impl PremiseConfig {
    fn to_expr(&self, vars: &Variables<String>, keys: &HashMap<&str, VariableKey>) -> Result<Expr<String>> {
        let all = |premises: &[PremiseConfig]| {
            premises
                .iter()
                .map(|premise| premise.to_expr(vars, keys))
                .collect::<Result<Vec<_>>>()
        };

        Ok(match self {
            Self::Is(var, term) => proposition(vars, keys, var, term)?,
            Self::Not(premise) => premise.to_expr(vars, keys)?.not(),
            Self::All(premises) => Expr::And(all(premises)?),
            Self::Any(premises) => Expr::Or(all(premises)?),
        })
    }
}

fn proposition(
    vars: &Variables<String>,
    keys: &HashMap<&str, VariableKey>,
    var: &str,
    term: &str,
) -> Result<Expr<String>> {
    let key = *keys.get(var).ok_or_else(|| Error::UnknownVariable(var.to_owned()))?;
    let has_term = vars.get(key).is_some_and(|v| v.term(&term.to_owned()).is_some());

    if !has_term {
        return Err(Error::UnknownTerm {
            variable: var.to_owned(),
            term: term.to_owned(),
        });
    }

    Ok(Expr::Is(key, term.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIP: &str = r#"
        [inference]
        implication = "prod"
        defuzzification = "mom"

        [[variables]]
        name = "service"
        range = [0.0, 10.0]
        step = 1.0
        terms.poor = { shape = "triangular", points = [0.0, 0.0, 5.0] }
        terms.good = { shape = "trapezoidal", points = [5.0, 8.0, 10.0, 10.0] }

        [[variables]]
        name = "tip"
        range = [0.0, 30.0]
        step = 1.0
        terms.low = { shape = "triangular", points = [0.0, 5.0, 10.0] }
        terms.high = { shape = "triangular", points = [15.0, 25.0, 30.0] }

        [[rules]]
        premise = { is = ["service", "poor"] }
        then = [["tip", "low"]]

        [[rules]]
        premise = { not = { is = ["service", "poor"] } }
        then = [["tip", "high"]]
        weight = 0.5
    "#;

    #[test]
    fn test_parse_and_build() {
        let config = SystemConfig::from_toml_str(TIP).unwrap();

        assert_eq!(config.variables.len(), 2);
        assert_eq!(config.rules.len(), 2);
        assert_eq!(config.inference.implication, Some(ImplicationOp::Prod));
        assert_eq!(config.inference.and_op, None);
        assert!(matches!(config.rules[1].premise, PremiseConfig::Not(_)));

        let system = config.build().unwrap();

        assert_eq!(system.rules().len(), 2);
        assert_eq!(system.variable("tip").unwrap().universe().len(), 31);

        // Service 10 is not poor at all, so only the half-weighted high tip fires
        let outputs = system.compute([("service", 10.)]).unwrap();

        assert_eq!(outputs["tip"], 25.);
    }

    #[test]
    fn test_shape_arity() {
        let term = TermConfig {
            shape: Shape::Triangular,
            points: vec![0., 1.],
        };

        assert!(matches!(
            term.membership(),
            Err(Error::InvalidShape { expected: 3, got: 2, .. })
        ));

        let term = TermConfig {
            shape: Shape::Trapezoidal,
            points: vec![0., 2., 1., 3.],
        };

        assert!(matches!(term.membership(), Err(Error::InvalidParameters { .. })));
    }

    #[test]
    fn test_unknown_references() {
        let config = SystemConfig::from_toml_str(&TIP.replace(r#"["tip", "low"]"#, r#"["tip", "medium"]"#)).unwrap();

        assert!(matches!(config.build(), Err(Error::UnknownTerm { term, .. }) if term == "medium"));

        let config = SystemConfig::from_toml_str(&TIP.replace(r#"["service", "poor"] }"#, r#"["food", "poor"] }"#)).unwrap();

        assert!(matches!(config.build(), Err(Error::UnknownVariable(name)) if name == "food"));
    }

    #[test]
    fn test_duplicate_variable() {
        let config = SystemConfig::from_toml_str(&TIP.replace(r#"name = "tip""#, r#"name = "service""#)).unwrap();

        assert!(matches!(config.build(), Err(Error::DuplicateVariable(name)) if name == "service"));
    }

    #[test]
    fn test_universe_too_fine() {
        let config = SystemConfig::from_toml_str("[[variables]]\nname = \"x\"\nrange = [0.0, 10.0]\nstep = 1e-18\n").unwrap();

        assert!(matches!(config.build(), Err(Error::InvalidUniverse { .. })));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(matches!(
            SystemConfig::from_toml_str("[inference]\nimplication = \"rx\"\n"),
            Err(Error::Config(_))
        ));
        assert!(SystemConfig::from_toml_str("colour = 1\n").is_err());
    }
}
