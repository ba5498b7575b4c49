use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::inference::{Mamdani, Surface};
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::variable::{LinguisticVariable, VariableKey, Variables};

/// A Mamdani system whose variables and terms are addressed by name
pub struct FuzzySystem {
    variables: Variables<String>,
    rules: Rules<String>,
    model: Mamdani,
}

impl FuzzySystem {
    pub fn new(variables: Variables<String>, rules: Rules<String>, model: Mamdani) -> Self {
        Self {
            variables,
            rules,
            model,
        }
    }

    pub fn variables(&self) -> &Variables<String> {
        &self.variables
    }

    pub fn rules(&self) -> &Rules<String> {
        &self.rules
    }

    pub fn model(&self) -> Mamdani {
        self.model
    }

    pub fn variable(&self, name: &str) -> Option<&LinguisticVariable<String>> {
        self.variables.by_name(name).map(|(_, var)| var)
    }

    pub fn key(&self, name: &str) -> Result<VariableKey> {
        self.variables
            .by_name(name)
            .map(|(key, _)| key)
            .ok_or_else(|| Error::UnknownVariable(name.to_owned()))
    }

    pub fn inputs<'n>(&self, values: impl IntoIterator<Item = (&'n str, f64)>) -> Result<Inputs> {
        let mut inputs = Inputs::new();

        for (name, value) in values {
            inputs.insert(self.key(name)?, value);
        }

        Ok(inputs)
    }

    pub fn eval(&self, inputs: &Inputs) -> Result<Outputs> {
        self.model.eval(&self.variables, &self.rules, inputs)
    }

    /// Crisp value of every output variable, by name
    pub fn compute<'n>(&self, values: impl IntoIterator<Item = (&'n str, f64)>) -> Result<HashMap<String, f64>> {
        let outputs = self.eval(&self.inputs(values)?)?;

        Ok(outputs
            .iter()
            .filter_map(|(key, value)| Some((self.variables.get(key)?.name().to_owned(), value)))
            .collect())
    }

    /// Samples `output` over the grid of `x` and `y` input values. Every
    /// antecedent of the rule base must be one of the two axes.
    pub fn surface(&self, (x, xs): (&str, &[f64]), (y, ys): (&str, &[f64]), output: &str) -> Result<Surface> {
        self.model.surface(
            &self.variables,
            &self.rules,
            &Inputs::new(),
            (self.key(x)?, xs),
            (self.key(y)?, ys),
            self.key(output)?,
        )
    }
}
