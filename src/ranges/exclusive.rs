use std::collections::BTreeSet;
use std::fmt;
use itertools::Itertools;

use super::{as_int, IntRange, Point, Real};
use crate::error::{Result, SetError};

/// Closed interval `[start, end]` minus a set of excluded points.
///
/// Excluding an endpoint gives the open/half-open forms without changing
/// the stored bounds, so `(a, b)` is `[a, b]` with `a` and `b` excluded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExclusiveInterval<T> {
    start: T,
    end: T,
    exclusions: BTreeSet<T>,
}

pub type IntInterval = ExclusiveInterval<i64>;
pub type RealInterval = ExclusiveInterval<Real>;

impl<T: Point> ExclusiveInterval<T> {
    pub fn closed(start: impl Into<T>, end: impl Into<T>) -> Self {
        Self { start: start.into(), end: end.into(), exclusions: BTreeSet::new() }
    }

    /// `(start, end)`
    pub fn open(start: impl Into<T>, end: impl Into<T>) -> Result<Self> {
        let (start, end) = (start.into(), end.into());
        Self::closed(start, end).excluding([start, end])
    }

    /// `(start, end]`
    pub fn open_left(start: impl Into<T>, end: impl Into<T>) -> Result<Self> {
        let start = start.into();
        Self::closed(start, end).excluding([start])
    }

    /// `[start, end)`
    pub fn open_right(start: impl Into<T>, end: impl Into<T>) -> Result<Self> {
        let end = end.into();
        Self::closed(start, end).excluding([end])
    }

    pub fn start(&self) -> T { self.start }
    pub fn end(&self) -> T { self.end }
    pub fn exclusions(&self) -> &BTreeSet<T> { &self.exclusions }

    pub fn is_start_excluded(&self) -> bool { self.exclusions.contains(&self.start) }
    pub fn is_end_excluded(&self) -> bool { self.exclusions.contains(&self.end) }

    /// Punctures `value`. Idempotent; fails if `value` is outside the bounds.
    pub fn exclude(&mut self, value: impl Into<T>) -> Result<()> {
        let value = value.into();
        if !self.would_contain(value) {
            return Err(SetError::OutOfRangeExclusion {
                value: value.render(),
                start: self.start.render(),
                end: self.end.render(),
            });
        }
        self.exclusions.insert(value);
        Ok(())
    }

    /// Builder form of [`exclude`](Self::exclude).
    pub fn excluding<V: Into<T>>(mut self, values: impl IntoIterator<Item = V>) -> Result<Self> {
        for value in values {
            self.exclude(value)?;
        }
        Ok(self)
    }

    /// Bounds check only, ignoring exclusions.
    pub fn would_contain(&self, value: T) -> bool { self.start <= value && value <= self.end }

    pub fn contains(&self, value: T) -> bool {
        self.would_contain(value) && !self.exclusions.contains(&value)
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end || (self.start == self.end && self.exclusions.contains(&self.start))
    }

    /// A single-point interval (`start == end`).
    pub fn is_degenerate(&self) -> bool { self.start == self.end }

    // Callers guarantee `value` is within bounds.
    pub(crate) fn puncture(&mut self, value: T) {
        debug_assert!(self.would_contain(value));
        self.exclusions.insert(value);
    }

    /// Un-punctures `value`; returns whether it had been excluded.
    pub(crate) fn include(&mut self, value: T) -> bool { self.exclusions.remove(&value) }

    pub(crate) fn retain_exclusions(&mut self, keep: impl FnMut(&T) -> bool) {
        self.exclusions.retain(keep);
    }

    /// Interior exclusions, i.e. those that are not an endpoint.
    fn interior_exclusions(&self) -> impl Iterator<Item = &T> + '_ {
        self.exclusions.iter().filter(move |x| **x != self.start && **x != self.end)
    }
}

// -------------------------------- Integers -------------------------------- //

impl IntInterval {
    /// Expands `self` minus its exclusions into ascending disjoint ranges:
    /// `1..5` excluding `1, 3` becomes `2..2, 4..5`.
    pub fn to_canonical_ranges(&self) -> Vec<IntRange> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut ranges = Vec::with_capacity(self.exclusions.len() + 1);
        let mut cursor = Some(self.start);
        for &excluded in self.exclusions.range(self.start..=self.end) {
            let Some(from) = cursor else { break };
            if excluded > from {
                ranges.push(IntRange::new(from, excluded - 1));
            }
            cursor = excluded.checked_add(1);
        }
        if let Some(from) = cursor.filter(|from| *from <= self.end) {
            ranges.push(IntRange::new(from, self.end));
        }
        ranges
    }
}

impl From<IntRange> for IntInterval {
    fn from(range: IntRange) -> Self { IntInterval::closed(range.first, range.last) }
}

// --------------------------------- Reals ---------------------------------- //

impl RealInterval {
    /// First integer actually contained, e.g. `[2.3, 4.6] -> 3`, `(2.0, 7.0) -> 3`.
    pub fn first_int(&self) -> i64 {
        match as_int(self.start.0) {
            Some(i) if self.is_start_excluded() => i.saturating_add(1),
            Some(i) => i,
            None => self.start.0.ceil() as i64,
        }
    }

    /// Last integer actually contained, e.g. `[2.3, 4.6] -> 4`, `(2.0, 7.0) -> 6`.
    pub fn last_int(&self) -> i64 {
        match as_int(self.end.0) {
            Some(i) if self.is_end_excluded() => i.saturating_sub(1),
            Some(i) => i,
            None => self.end.0.floor() as i64,
        }
    }

    /// Integers between the bounds, ignoring exclusions.
    pub fn int_bounds(&self) -> IntRange {
        IntRange::new(self.start.0.ceil() as i64, self.end.0.floor() as i64)
    }

    /// Integers this interval covers, with its integral exclusions punched out.
    pub fn int_coverage(&self) -> Vec<IntRange> {
        let (first, last) = (self.first_int(), self.last_int());
        let mut coverage = IntInterval::closed(first, last);
        for excluded in &self.exclusions {
            if let Some(i) = as_int(excluded.0).filter(|i| first <= *i && *i <= last) {
                coverage.puncture(i);
            }
        }
        coverage.to_canonical_ranges()
    }

    /// Merge of two intervals that overlap or touch. A point excluded by one
    /// side stays excluded only if the other side does not contain it.
    pub fn combine(&self, other: &RealInterval) -> Option<RealInterval> {
        if !(other.start <= self.end && self.start <= other.end) {
            return None;
        }
        let mut merged = RealInterval::closed(self.start.min(other.start), self.end.max(other.end));
        merged.exclusions.extend(self.exclusions.iter().filter(|x| !other.contains(**x)));
        merged.exclusions.extend(other.exclusions.iter().filter(|x| !self.contains(**x)));
        Some(merged)
    }

    /// Cuts the span `[from, to]` out of `self`: left keeps `[start, from]`,
    /// right keeps `[to, end]`, each with the exclusions that fall inside it.
    /// Empty remainders are dropped.
    pub fn split(&self, from: Real, to: Real) -> (Option<RealInterval>, Option<RealInterval>) {
        let carve = |start: Real, end: Real| {
            let mut part = RealInterval::closed(start, end);
            part.exclusions.extend(self.exclusions.range(start..=end));
            Some(part).filter(|p| !p.is_empty())
        };
        let left = if self.start <= from { carve(self.start, from) } else { None };
        let right = if to <= self.end { carve(to, self.end) } else { None };
        (left, right)
    }
}

// -------------------------------- Display --------------------------------- //

impl<T: Point> fmt::Display for ExclusiveInterval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.is_start_excluded() { '(' } else { '[' };
        let close = if self.is_end_excluded() { ')' } else { ']' };
        write!(f, "{open}{}, {}{close}", self.start.render(), self.end.render())?;
        let mut others = self.interior_exclusions().peekable();
        if others.peek().is_some() {
            write!(f, "-{{{}}}", others.map(|x| x.render()).join(", "))?;
        }
        Ok(())
    }
}

// ------------------------------- Tests ------------------------------------ //
