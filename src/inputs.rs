use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// Crisp input values, one per antecedent variable
#[derive(Clone, Debug, Default)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add<I>(&mut self, var: Variable<I>, val: f64) {
        self.0.insert(var.0, val);
    }

    pub fn insert(&mut self, key: VariableKey, val: f64) {
        self.0.insert(key, val);
    }

    pub fn get(&self, key: VariableKey) -> Option<f64> {
        self.0.get(&key).copied()
    }
}
