use std::collections::BTreeMap;
use std::collections::btree_map;

use super::IntRange;

/// Sorted, pairwise non-overlapping closed integer ranges.
///
/// Ranges that merely touch (`1..3`, `4..6`) are kept apart; only ranges
/// sharing at least one integer are merged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntegerRangeStore {
    /// `first -> last`; `first` is unique because ranges never overlap.
    ranges: BTreeMap<i64, i64>,
}

/// Ascending iterator over the stored ranges.
#[derive(Clone, Debug)]
pub struct IntRanges<'a>(btree_map::Iter<'a, i64, i64>);

impl Iterator for IntRanges<'_> {
    type Item = IntRange;
    fn next(&mut self) -> Option<IntRange> {
        self.0.next().map(|(&first, &last)| IntRange::new(first, last))
    }
}

impl IntegerRangeStore {
    pub fn new() -> Self { Self::default() }

    pub fn is_empty(&self) -> bool { self.ranges.is_empty() }

    /// Number of stored ranges (not integers, see [`count`](Self::count)).
    pub fn len(&self) -> usize { self.ranges.len() }

    /// Number of integers covered by all ranges.
    pub fn count(&self) -> u64 {
        self.iter().fold(0u64, |acc, r| acc.saturating_add(r.len()))
    }

    pub fn iter(&self) -> IntRanges<'_> { IntRanges(self.ranges.iter()) }

    pub fn clear(&mut self) { self.ranges.clear() }

    /// The stored range covering `value`, if any.
    pub fn covering(&self, value: i64) -> Option<IntRange> {
        self.ranges
            .range(..=value)
            .next_back()
            .map(|(&first, &last)| IntRange::new(first, last))
            .filter(|r| r.contains(value))
    }

    pub fn contains(&self, value: i64) -> bool { self.covering(value).is_some() }

    /// Stored ranges sharing at least one integer with `span`, ascending.
    pub fn overlapping(&self, span: IntRange) -> Vec<IntRange> {
        if span.is_empty() {
            return Vec::new();
        }
        // Lasts ascend with firsts, so walk back from `span.last` until a
        // range ends before `span.first`.
        let mut found: Vec<IntRange> = self.ranges
            .range(..=span.last)
            .rev()
            .map(|(&first, &last)| IntRange::new(first, last))
            .take_while(|r| r.last >= span.first)
            .collect();
        found.reverse();
        found
    }

    /// Inserts `range`, merging with every range it overlaps. The merged
    /// range may reach ranges the original did not, so scan until stable.
    pub fn insert(&mut self, range: IntRange) {
        if range.is_empty() {
            return;
        }
        let mut merged = range;
        loop {
            let overlapping = self.overlapping(merged);
            if overlapping.is_empty() {
                break;
            }
            for existing in overlapping {
                self.ranges.remove(&existing.first);
                if let Some(next) = merged.combine(&existing) {
                    merged = next;
                }
            }
        }
        tracing::trace!(%range, %merged, "insert integer range");
        self.ranges.insert(merged.first, merged.last);
    }

    /// Removes every integer in `span`, splitting ranges that straddle its
    /// ends. Returns the portions that were actually removed.
    pub fn remove_span(&mut self, span: IntRange) -> Vec<IntRange> {
        let mut removed = Vec::new();
        for existing in self.overlapping(span) {
            self.ranges.remove(&existing.first);
            removed.push(IntRange::new(existing.first.max(span.first), existing.last.min(span.last)));
            let (left, right) = existing.split(span.first, span.last);
            for survivor in left.into_iter().chain(right) {
                self.insert(survivor);
            }
        }
        if !removed.is_empty() {
            tracing::trace!(%span, pieces = removed.len(), "remove integer span");
        }
        removed
    }
}

// ------------------------------- Tests ------------------------------------ //
