//! Range primitives shared by the integer and real stores.
//!
//! - `IntRange` is a plain closed integer range (no exclusions).
//! - `ExclusiveInterval<T>` is a closed interval with punctured points.
//! - `IntegerRangeStore` / `RealRangeStore` keep them disjoint and sorted.
pub mod exclusive;
pub mod int_store;
pub mod real_store;

use std::fmt;
use std::ops::RangeInclusive;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

pub use exclusive::{ExclusiveInterval, IntInterval, RealInterval};
pub use int_store::IntegerRangeStore;
pub use real_store::RealRangeStore;

/// Totally ordered `f64`, so reals can key ordered collections.
pub type Real = OrderedFloat<f64>;

// ------------------------------- Points ---------------------------------- //

/// Numeric domain an [`ExclusiveInterval`] ranges over.
pub trait Point: Ord + Copy + fmt::Debug {
    /// Canonical text form used by the set rendering.
    fn render(&self) -> String;
}

impl Point for i64 {
    fn render(&self) -> String { self.to_string() }
}

impl Point for Real {
    // `{:?}` keeps the trailing `.0` on integral reals (`11.0`, not `11`).
    fn render(&self) -> String { format!("{:?}", self.0) }
}

/// The integer `x` denotes, if it is integral and fits in `i64`.
pub fn as_int(x: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it overflows.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if x.is_finite() && x.fract() == 0.0 && x >= -LIMIT && x < LIMIT {
        Some(x as i64)
    } else {
        None
    }
}

pub fn is_int(x: f64) -> bool { as_int(x).is_some() }

// ------------------------------ IntRange --------------------------------- //

/// Closed integer range `first..=last`. Empty when `first > last`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntRange {
    pub first: i64,
    pub last: i64,
}

impl IntRange {
    pub const fn new(first: i64, last: i64) -> Self { Self { first, last } }

    pub const fn single(value: i64) -> Self { Self { first: value, last: value } }

    pub fn is_empty(&self) -> bool { self.first > self.last }

    /// Number of integers covered (saturates for the full `i64` span).
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let span = self.last as i128 - self.first as i128 + 1;
        u64::try_from(span).unwrap_or(u64::MAX)
    }

    pub fn contains(&self, value: i64) -> bool { self.first <= value && value <= self.last }

    pub fn intersects(&self, other: &IntRange) -> bool {
        !self.is_empty() && !other.is_empty() && self.first <= other.last && other.first <= self.last
    }

    /// Merge of two overlapping ranges, `None` when they are disjoint.
    pub fn combine(&self, other: &IntRange) -> Option<IntRange> {
        self.intersects(other).then(|| {
            IntRange::new(self.first.min(other.first), self.last.max(other.last))
        })
    }

    /// Cuts `left..=right` out of `self`, returning the non-empty remainders:
    /// `1..5` split by `2..3` gives `(1..1, 4..5)`, split by `0..1` gives `(_, 2..5)`.
    pub fn split(&self, left: i64, right: i64) -> (Option<IntRange>, Option<IntRange>) {
        let lower = left
            .checked_sub(1)
            .map(|end| IntRange::new(self.first, end.min(self.last)))
            .filter(|r| !r.is_empty());
        let upper = right
            .checked_add(1)
            .map(|start| IntRange::new(start.max(self.first), self.last))
            .filter(|r| !r.is_empty());
        (lower, upper)
    }

    /// `self` minus `other`, as up to two disjoint remainders.
    pub fn subtract(&self, other: &IntRange) -> Vec<IntRange> {
        if other.is_empty() || !self.intersects(other) {
            return vec![*self];
        }
        let (lower, upper) = self.split(other.first, other.last);
        lower.into_iter().chain(upper).collect()
    }

    pub fn iter(&self) -> RangeInclusive<i64> { self.first..=self.last }
}

impl From<RangeInclusive<i64>> for IntRange {
    fn from(range: RangeInclusive<i64>) -> Self { IntRange::new(*range.start(), *range.end()) }
}

impl From<RangeInclusive<i32>> for IntRange {
    fn from(range: RangeInclusive<i32>) -> Self {
        IntRange::new(i64::from(*range.start()), i64::from(*range.end()))
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.first, self.last)
    }
}

// ------------------------------- Tests ------------------------------------ //
