use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

#[derive(Debug)]
pub struct Outputs {
    defuzzificated_inferred_memberships: HashMap<VariableKey, f64>,
    aggregated_memberships: HashMap<VariableKey, Vec<f64>>,
    firing_strengths: Vec<f64>,
}

impl Outputs {
    pub(crate) fn new(
        defuzzificated_inferred_memberships: HashMap<VariableKey, f64>,
        aggregated_memberships: HashMap<VariableKey, Vec<f64>>,
        firing_strengths: Vec<f64>,
    ) -> Self {
        Self {
            defuzzificated_inferred_memberships,
            aggregated_memberships,
            firing_strengths,
        }
    }

    pub fn get_inferred_membership<I>(&self, var: Variable<I>) -> Option<f64> {
        self.get(var.0)
    }

    /// Crisp value of a consequent variable
    pub fn get(&self, key: VariableKey) -> Option<f64> {
        self.defuzzificated_inferred_memberships.get(&key).copied()
    }

    /// The aggregated membership curve of a consequent variable, sampled over its universe
    pub fn aggregated(&self, key: VariableKey) -> Option<&[f64]> {
        self.aggregated_memberships.get(&key).map(Vec::as_slice)
    }

    /// Firing strength of each rule, in rule order
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, f64)> + '_ {
        self.defuzzificated_inferred_memberships.iter().map(|(k, v)| (*k, *v))
    }
}
