use std::collections::BTreeSet;
use std::collections::btree_set;

use super::CanonicalValueSet;
use crate::ranges::{Real, RealInterval};

/// Discrete members that live outside the range stores: isolated
/// (non-integer) reals, booleans, strings and nested sets.
#[derive(Clone, Debug, Default)]
pub struct ScalarRegistry {
    reals: BTreeSet<Real>,
    booleans: BTreeSet<bool>,
    strings: BTreeSet<String>,
    /// Deduplicated by structural equality, sorted by structural key.
    sets: Vec<CanonicalValueSet>,
}

impl ScalarRegistry {
    pub fn len(&self) -> u64 {
        (self.reals.len() + self.booleans.len() + self.strings.len() + self.sets.len()) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.reals.is_empty() && self.booleans.is_empty() && self.strings.is_empty() && self.sets.is_empty()
    }

    pub fn clear(&mut self) {
        self.reals.clear();
        self.booleans.clear();
        self.strings.clear();
        self.sets.clear();
    }

    // reals

    pub fn reals(&self) -> btree_set::Iter<'_, Real> { self.reals.iter() }
    pub fn contains_real(&self, value: Real) -> bool { self.reals.contains(&value) }
    pub(crate) fn insert_real(&mut self, value: Real) -> bool { self.reals.insert(value) }
    pub(crate) fn remove_real(&mut self, value: Real) -> bool { self.reals.remove(&value) }

    /// Detaches every isolated real inside `interval`'s bounds.
    pub(crate) fn take_reals_within(&mut self, interval: &RealInterval) -> Vec<Real> {
        let inside: Vec<Real> = self.reals.range(interval.start()..=interval.end()).copied().collect();
        for value in &inside {
            self.reals.remove(value);
        }
        inside
    }

    /// Drops isolated reals that `interval` actually contains (exclusions kept).
    pub(crate) fn remove_reals_in(&mut self, interval: &RealInterval) {
        self.reals.retain(|value| !interval.contains(*value));
    }

    // booleans, strings

    pub fn booleans(&self) -> btree_set::Iter<'_, bool> { self.booleans.iter() }
    pub fn contains_boolean(&self, value: bool) -> bool { self.booleans.contains(&value) }
    pub(crate) fn insert_boolean(&mut self, value: bool) { self.booleans.insert(value); }
    pub(crate) fn remove_boolean(&mut self, value: bool) { self.booleans.remove(&value); }

    pub fn strings(&self) -> btree_set::Iter<'_, String> { self.strings.iter() }
    pub fn contains_string(&self, value: &str) -> bool { self.strings.contains(value) }
    pub(crate) fn insert_string(&mut self, value: String) { self.strings.insert(value); }
    pub(crate) fn remove_string(&mut self, value: &str) { self.strings.remove(value); }

    // nested sets

    pub fn sets(&self) -> std::slice::Iter<'_, CanonicalValueSet> { self.sets.iter() }

    pub fn contains_set(&self, value: &CanonicalValueSet) -> bool {
        self.sets.iter().any(|set| set == value)
    }

    pub(crate) fn insert_set(&mut self, value: CanonicalValueSet) {
        if !self.contains_set(&value) {
            self.sets.push(value);
            self.sets.sort_by_cached_key(CanonicalValueSet::structural_key);
        }
    }

    pub(crate) fn remove_set(&mut self, value: &CanonicalValueSet) {
        self.sets.retain(|set| set != value);
    }
}
