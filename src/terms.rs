pub use fixed_map::Key as Term;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::membership::MembershipFunction;

/// The term set of one linguistic variable, keyed by a fieldless enum
#[derive(Default)]
pub struct Terms<K: Term>(pub(crate) FixedMap<K, MembershipFunction>);

impl<K: Term> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn insert(&mut self, key: K, value: MembershipFunction) {
        self.0.insert(key, value);
    }

    /// Builder-style [`Terms::insert`]
    pub fn with(mut self, key: K, value: MembershipFunction) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: K) -> Option<&MembershipFunction> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
