use std::collections::BTreeMap;
use std::collections::btree_map;

use super::{Real, RealInterval};

/// Sorted real intervals that neither overlap nor touch.
///
/// Each interval carries its own exclusions; a point is a member iff some
/// interval's bounds cover it and that interval does not exclude it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RealRangeStore {
    intervals: BTreeMap<Real, RealInterval>,
}

pub type RealIntervals<'a> = btree_map::Values<'a, Real, RealInterval>;

impl RealRangeStore {
    pub fn new() -> Self { Self::default() }

    pub fn is_empty(&self) -> bool { self.intervals.is_empty() }

    pub fn len(&self) -> usize { self.intervals.len() }

    pub fn iter(&self) -> RealIntervals<'_> { self.intervals.values() }

    pub fn clear(&mut self) { self.intervals.clear() }

    /// The interval whose bounds cover `value` (exclusions ignored).
    pub fn covering(&self, value: Real) -> Option<&RealInterval> {
        self.intervals
            .range(..=value)
            .next_back()
            .map(|(_, interval)| interval)
            .filter(|interval| interval.would_contain(value))
    }

    pub(crate) fn covering_mut(&mut self, value: Real) -> Option<&mut RealInterval> {
        self.intervals
            .range_mut(..=value)
            .next_back()
            .map(|(_, interval)| interval)
            .filter(|interval| interval.would_contain(value))
    }

    pub fn contains(&self, value: Real) -> bool {
        self.covering(value).is_some_and(|interval| interval.contains(value))
    }

    /// Stored intervals whose closed bounds meet `[start, end]`, descending.
    /// Ends ascend with starts, so the walk stops at the first interval
    /// ending before `start`.
    pub fn overlapping(&self, start: Real, end: Real) -> impl Iterator<Item = &RealInterval> + '_ {
        self.intervals
            .range(..=end)
            .rev()
            .map(|(_, interval)| interval)
            .take_while(move |interval| interval.end() >= start)
    }

    pub(crate) fn overlapping_mut(&mut self, start: Real, end: Real) -> impl Iterator<Item = &mut RealInterval> + '_ {
        self.intervals
            .range_mut(..=end)
            .rev()
            .map(|(_, interval)| interval)
            .take_while(move |interval| interval.end() >= start)
    }

    fn touching(&self, start: Real, end: Real) -> Vec<Real> {
        self.overlapping(start, end).map(|interval| interval.start()).collect()
    }

    /// Inserts `interval`, merging with every stored interval that overlaps
    /// or touches it until no further merge applies.
    pub fn insert(&mut self, interval: RealInterval) {
        if interval.is_empty() {
            return;
        }
        let mut merged = interval;
        loop {
            let touching = self.touching(merged.start(), merged.end());
            if touching.is_empty() {
                break;
            }
            for key in touching {
                let Some(existing) = self.intervals.remove(&key) else { continue };
                match merged.combine(&existing) {
                    Some(next) => merged = next,
                    None => {
                        self.intervals.insert(key, existing);
                    }
                }
            }
        }
        tracing::trace!(%merged, "insert real interval");
        self.intervals.insert(merged.start(), merged);
    }

    /// Detaches every interval sharing more than a boundary point with
    /// `(start, end)`.
    pub(crate) fn take_intersecting(&mut self, start: Real, end: Real) -> Vec<RealInterval> {
        let keys: Vec<Real> = self.intervals
            .range(..end)
            .rev()
            .take_while(|(_, interval)| interval.end() > start)
            .map(|(key, _)| *key)
            .collect();
        keys.into_iter().rev().filter_map(|key| self.intervals.remove(&key)).collect()
    }
}

// ------------------------------- Tests ------------------------------------ //
