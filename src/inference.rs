use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::dsl::Expr;
use crate::error::{Error, Result};
use crate::inputs::Inputs;
use crate::math::{meshgrid, Matrix};
use crate::ops::*;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::variable::{LinguisticVariable, VariableKey, Variables};

/// Mamdani inference: rule premises are reduced to a firing strength, which
/// shapes each consequent term over its universe; the shaped terms are
/// aggregated per output variable and defuzzificated to a crisp value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mamdani {
    and_op: AndOp,
    or_op: OrOp,
    imp_op: ImplicationOp,
    prod_link: ProductionLink,
    defuzz_op: DefuzzificationOp,
}

impl Mamdani {
    pub fn new(
        and_op: AndOp,
        or_op: OrOp,
        imp_op: ImplicationOp,
        prod_link: ProductionLink,
        defuzz_op: DefuzzificationOp,
    ) -> Self {
        Self {
            and_op,
            or_op,
            imp_op,
            prod_link,
            defuzz_op,
        }
    }

    pub fn with_and_op(self, and_op: AndOp) -> Self {
        Self { and_op, ..self }
    }

    pub fn with_or_op(self, or_op: OrOp) -> Self {
        Self { or_op, ..self }
    }

    pub fn with_implication(self, imp_op: ImplicationOp) -> Self {
        Self { imp_op, ..self }
    }

    pub fn with_production_link(self, prod_link: ProductionLink) -> Self {
        Self { prod_link, ..self }
    }

    pub fn with_defuzzification(self, defuzz_op: DefuzzificationOp) -> Self {
        Self { defuzz_op, ..self }
    }

    pub fn eval<T: Eq + Hash + Debug>(&self, vars: &Variables<T>, rules: &Rules<T>, inputs: &Inputs) -> Result<Outputs> {
        let mut firing_strengths = Vec::with_capacity(rules.len());
        let mut aggregated_memberships: HashMap<VariableKey, Vec<f64>> = HashMap::new();

        for (i, rule) in rules.0.iter().enumerate() {
            if !rule.consequence.is_conjunction() {
                return Err(Error::InvalidConsequence { rule: i });
            }

            let strength = self.premise_degree(&rule.premise, vars, inputs)? * rule.weight;

            tracing::debug!(rule = i, strength, "Rule fired");

            for (var_key, term) in rule.consequence.propositions() {
                let var = lookup(vars, var_key)?;
                let mf = var.term(term).ok_or_else(|| unknown_term(&var.name, term))?;
                let implication = self
                    .imp_op
                    .call(std::iter::repeat(strength), mf.eval_all(var.universe.iter().copied()));

                match aggregated_memberships.get_mut(&var_key) {
                    Some(agg) => {
                        *agg = self.prod_link.call(agg.iter().copied(), implication).collect();
                    },
                    None => {
                        aggregated_memberships.insert(var_key, implication.collect());
                    },
                }
            }

            firing_strengths.push(strength);
        }

        // Defuzzificate
        let mut defuzzificated_inferred_memberships = HashMap::with_capacity(aggregated_memberships.len());

        for (var_key, aggregated_membership) in &aggregated_memberships {
            let var = lookup(vars, *var_key)?;

            if aggregated_membership.iter().all(|m| *m == 0.) {
                let mean = var.universe.iter().sum::<f64>() / var.universe.len() as f64;

                tracing::warn!(
                    variable = %var.name,
                    mean,
                    "No rule fired for output; falling back to the mean of its universe"
                );

                defuzzificated_inferred_memberships.insert(*var_key, mean);
            } else {
                let defuzzed = self.defuzz_op.call(&var.universe, aggregated_membership);

                defuzzificated_inferred_memberships.insert(*var_key, defuzzed);
            }
        }

        Ok(Outputs::new(
            defuzzificated_inferred_memberships,
            aggregated_memberships,
            firing_strengths,
        ))
    }

    fn premise_degree<T: Eq + Hash + Debug>(&self, expr: &Expr<T>, vars: &Variables<T>, inputs: &Inputs) -> Result<f64> {
        match expr {
            Expr::Is(var_key, term) => {
                let var = lookup(vars, *var_key)?;
                let input = inputs.get(*var_key).ok_or_else(|| Error::MissingInput {
                    variable: var.name.clone(),
                })?;
                let x = var.clip(input);

                if x != input {
                    tracing::debug!(variable = %var.name, input, clipped = x, "Input outside universe");
                }

                var.membership(term, x).ok_or_else(|| unknown_term(&var.name, term))
            },
            Expr::Not(expr) => Ok(1. - self.premise_degree(expr, vars, inputs)?),
            Expr::And(exprs) => {
                let mut degrees = exprs.iter().map(|expr| self.premise_degree(expr, vars, inputs));
                let first = degrees.next().unwrap_or(Ok(1.))?;

                degrees.try_fold(first, |acc, degree| Ok(self.and_op.apply(acc, degree?)))
            },
            Expr::Or(exprs) => {
                let mut degrees = exprs.iter().map(|expr| self.premise_degree(expr, vars, inputs));
                let first = degrees.next().unwrap_or(Ok(0.))?;

                degrees.try_fold(first, |acc, degree| Ok(self.or_op.apply(acc, degree?)))
            },
        }
    }

    /// Samples the crisp value of `output` over every combination of `xs` and
    /// `ys`. Any other antecedent keeps the value it has in `base_inputs`.
    pub fn surface<T: Eq + Hash + Debug>(
        &self,
        vars: &Variables<T>,
        rules: &Rules<T>,
        base_inputs: &Inputs,
        (x_key, xs): (VariableKey, &[f64]),
        (y_key, ys): (VariableKey, &[f64]),
        output: VariableKey,
    ) -> Result<Surface> {
        let (x, y) = meshgrid(xs, ys);
        let output_name = &lookup(vars, output)?.name;
        let mut inputs = base_inputs.clone();
        let mut z = Vec::with_capacity(xs.len() * ys.len());

        for (&xv, &yv) in x.as_slice().iter().zip(y.as_slice()) {
            inputs.insert(x_key, xv);
            inputs.insert(y_key, yv);

            let outputs = self.eval(vars, rules, &inputs)?;
            let zv = outputs.get(output).ok_or_else(|| Error::NoOutput {
                variable: output_name.clone(),
            })?;

            z.push(zv);
        }

        tracing::debug!(output = %output_name, shape = ?x.shape(), "Sampled control surface");

        let z = Matrix::new(z, x.shape());

        Ok(Surface { x, y, z })
    }
}

/// A control surface: `z[(i, j)]` is the output for `x[(i, j)]` and `y[(i, j)]`
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub x: Matrix,
    pub y: Matrix,
    pub z: Matrix,
}

fn lookup<T: Eq + Hash>(vars: &Variables<T>, key: VariableKey) -> Result<&LinguisticVariable<T>> {
    vars.get(key).ok_or_else(|| Error::UnknownVariable(format!("{key:?}")))
}

fn unknown_term<T: Debug>(variable: &str, term: &T) -> Error {
    Error::UnknownTerm {
        variable: variable.to_owned(),
        term: format!("{term:?}"),
    }
}

#[test]
fn test_bank_loan() {
    use crate::membership::MembershipFunction;
    use crate::terms::{Key, Terms};

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
    enum Score {
        High,
        Low,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
    enum Ratio {
        Good,
        Bad,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
    enum Decision {
        Approve,
        Reject,
    }

    #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
    enum VarTerms {
        Score(Score),
        Ratio(Ratio),
        Decision(Decision),
    }

    impl From<Decision> for VarTerms {
        fn from(d: Decision) -> Self {
            Self::Decision(d)
        }
    }

    impl From<Score> for VarTerms {
        fn from(s: Score) -> Self {
            Self::Score(s)
        }
    }

    impl From<Ratio> for VarTerms {
        fn from(r: Ratio) -> Self {
            Self::Ratio(r)
        }
    }

    let tri = |a: f64, b: f64, c: f64| MembershipFunction::triangular(a, b, c).unwrap();
    let trap = |a: f64, b: f64, c: f64, d: f64| MembershipFunction::trapezoidal(a, b, c, d).unwrap();

    let score_terms = Terms::new()
        .with(Score::High, trap(175., 190., 200., 200.))
        .with(Score::Low, trap(150., 150., 160., 175.));
    let ratio_terms = Terms::new()
        .with(Ratio::Good, trap(0.1, 0.1, 0.3, 0.42))
        .with(Ratio::Bad, trap(0.44, 0.7, 1., 1.));
    let decision_terms = Terms::new()
        .with(Decision::Approve, tri(5., 10., 10.))
        .with(Decision::Reject, tri(0., 0., 5.));

    let mut vars = Variables::<VarTerms>::new();
    let score = vars.add("score", 150. ..=200., score_terms, None).unwrap();
    let ratio = vars.add("ratio", 0.1..=1., ratio_terms, Some(0.01)).unwrap();
    let decision = vars.add("decision", 0. ..=10., decision_terms, Some(1.)).unwrap();
    let mut rules = Rules::new();

    rules.add(
        score.is(Score::High).and(ratio.is(Ratio::Good)),
        decision.is(Decision::Approve),
    );
    rules.add(
        score.is(Score::Low).or(ratio.is(Ratio::Bad)),
        decision.is(Decision::Reject),
    );

    let mut inputs = Inputs::new();

    inputs.add(score, 190.);
    inputs.add(ratio, 0.3);

    let model = Mamdani::default();
    let outputs = model.eval(&vars, &rules, &inputs).unwrap();

    // Only the approval rule fires, fully, so the output is the centroid of
    // the right-angled approval triangle
    assert_eq!(outputs.firing_strengths(), &[1., 0.]);
    assert_eq!(outputs.aggregated(decision.key()).unwrap(), &[0., 0., 0., 0., 0., 0., 0.2, 0.4, 0.6, 0.8, 1.]);

    let approval = outputs.get_inferred_membership(decision).unwrap();

    assert!((approval - 25. / 3.).abs() < 1e-9, "{approval}");

    inputs.add(score, 155.);
    inputs.add(ratio, 0.8);

    let outputs = model.eval(&vars, &rules, &inputs).unwrap();
    let rejection = outputs.get_inferred_membership(decision).unwrap();

    assert_eq!(outputs.firing_strengths(), &[0., 1.]);
    assert!((rejection - 5. / 3.).abs() < 1e-9, "{rejection}");
}
