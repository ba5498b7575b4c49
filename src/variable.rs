use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use slotmap::{new_key_type, SlotMap};

use crate::error::{Error, Result};
use crate::linspace::Linspace;
use crate::membership::MembershipFunction;
use crate::terms::{Term, Terms};

/// Upper bound on the number of evenly spaced samples in a universe
pub const MAX_UNIVERSE_LEN: usize = 1 << 20;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Typed handle to a variable whose terms are `I`
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Variable<I> {
    pub fn key(self) -> VariableKey {
        self.0
    }
}

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Variable<I> {}

#[derive(Default)]
pub struct Variables<T>(pub(crate) SlotMap<VariableKey, LinguisticVariable<T>>);

impl<T: Eq + Hash> Variables<T> {
    pub fn new() -> Self {
        Self(SlotMap::with_key())
    }

    /// If the step value is not provided, it defaults to 0.1
    pub fn add<I: Into<T> + Term>(
        &mut self,
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        terms: Terms<I>,
        step: Option<f64>,
    ) -> Result<Variable<I>> {
        let key = self.add_terms(
            name,
            universe_range,
            terms.0.iter().map(|(term, mf)| (term.into(), *mf)),
            step,
        )?;

        Ok(Variable(key, PhantomData))
    }

    /// Untyped counterpart of [`Variables::add`], for term labels that are not
    /// known at compile time.
    pub fn add_terms(
        &mut self,
        name: impl Into<String>,
        universe_range: RangeInclusive<f64>,
        terms: impl IntoIterator<Item = (T, MembershipFunction)>,
        step: Option<f64>,
    ) -> Result<VariableKey> {
        let name = name.into();

        if self.by_name(&name).is_some() {
            return Err(Error::DuplicateVariable(name));
        }

        let var = LinguisticVariable::new(name, universe_range, terms, step.unwrap_or(0.1))?;

        Ok(self.0.insert(var))
    }

    pub fn get(&self, key: VariableKey) -> Option<&LinguisticVariable<T>> {
        self.0.get(key)
    }

    pub fn by_name(&self, name: &str) -> Option<(VariableKey, &LinguisticVariable<T>)> {
        self.0.iter().find(|(_, var)| var.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, &LinguisticVariable<T>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A named set of terms sharing one sampled universe of discourse
#[derive(Clone, Debug)]
pub struct LinguisticVariable<T> {
    pub(crate) name: String,
    pub(crate) universe: Vec<f64>,
    pub(crate) min_u: f64,
    pub(crate) max_u: f64,
    pub(crate) terms: HashMap<T, MembershipFunction>,
}

impl<T: Eq + Hash> LinguisticVariable<T> {
    fn new(
        name: String,
        universe_range: RangeInclusive<f64>,
        terms: impl IntoIterator<Item = (T, MembershipFunction)>,
        step: f64,
    ) -> Result<Self> {
        let min_u = *universe_range.start();
        let max_u = *universe_range.end();

        let invalid = || Error::InvalidUniverse {
            min: min_u,
            max: max_u,
            step,
        };

        if !(min_u.is_finite() && max_u.is_finite() && min_u < max_u && step > 0.) {
            return Err(invalid());
        }

        let len = Linspace::step_count(min_u, max_u, step)
            .filter(|&len| len <= MAX_UNIVERSE_LEN)
            .ok_or_else(invalid)?;
        let universe = Linspace::new(min_u, max_u, len).collect();
        let mut this = Self {
            name,
            universe,
            min_u,
            max_u,
            terms: HashMap::new(),
        };

        for (term, membership) in terms {
            this.add_points_to_universe(membership.breakpoints());
            this.terms.insert(term, membership);
        }

        Ok(this)
    }

    // Breakpoints land on the universe so sampled curves keep their exact corners
    fn add_points_to_universe(&mut self, points: impl IntoIterator<Item = f64>) {
        let iter = points.into_iter().map(|p| p.clamp(self.min_u, self.max_u));

        self.universe.extend(iter);
        self.universe.sort_unstable_by(f64::total_cmp);
        self.universe.dedup();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> &[f64] {
        &self.universe
    }

    pub fn range(&self) -> RangeInclusive<f64> {
        self.min_u..=self.max_u
    }

    pub fn term(&self, term: &T) -> Option<&MembershipFunction> {
        self.terms.get(term)
    }

    pub fn terms(&self) -> impl Iterator<Item = (&T, &MembershipFunction)> {
        self.terms.iter()
    }

    /// Clamps a crisp value into the universe range
    pub fn clip(&self, x: f64) -> f64 {
        x.clamp(self.min_u, self.max_u)
    }

    /// Degree to which `x` belongs to `term`
    pub fn membership(&self, term: &T, x: f64) -> Option<f64> {
        self.terms.get(term).map(|mf| mf.eval(x))
    }

    /// Degree of `x` in every term
    pub fn fuzzify(&self, x: f64) -> Vec<(&T, f64)> {
        self.terms.iter().map(|(term, mf)| (term, mf.eval(x))).collect()
    }

    /// `term` sampled over the universe
    pub fn curve(&self, term: &T) -> Option<Vec<f64>> {
        let mf = self.terms.get(term)?;

        Some(mf.eval_all(self.universe.iter().copied()))
    }

    /// Every term sampled over the universe
    pub fn curves(&self) -> Vec<(&T, Vec<f64>)> {
        self.terms
            .iter()
            .map(|(term, mf)| (term, mf.eval_all(self.universe.iter().copied())))
            .collect()
    }
}
