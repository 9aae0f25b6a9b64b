//! Ascending iteration over a [`CanonicalValueSet`].
//!
//! Numbers come from three sorted streams (integer ranges, isolated reals,
//! real intervals) merged by smallest head; discrete scalars follow in
//! store order: booleans, strings, nested sets.
use std::collections::btree_set;
use std::iter::Peekable;
use std::ops::RangeInclusive;

use super::CanonicalValueSet;
use crate::element::Member;
use crate::error::Result;
use crate::ranges::int_store::IntRanges;
use crate::ranges::real_store::RealIntervals;
use crate::ranges::Real;

// -------------------------------- Ints ------------------------------------ //

/// Integers of the integer store, range by range.
#[derive(Clone, Debug)]
pub struct Ints<'a> {
    ranges: IntRanges<'a>,
    current: RangeInclusive<i64>,
}

impl<'a> Ints<'a> {
    fn new(ranges: IntRanges<'a>) -> Self {
        #[allow(clippy::reversed_empty_ranges)]
        let current = 1..=0;
        Self { ranges, current }
    }
}

impl Iterator for Ints<'_> {
    type Item = i64;
    fn next(&mut self) -> Option<i64> {
        loop {
            if let Some(value) = self.current.next() {
                return Some(value);
            }
            self.current = self.ranges.next()?.iter();
        }
    }
}

// ------------------------------ NumMembers -------------------------------- //

#[derive(Clone, Copy, PartialEq, Eq)]
enum Stream { Int, Real, Interval }

/// Three-way merge of the numeric streams. Equal heads resolve in stream
/// order (integer, real, interval); canonical stores never produce them.
pub struct NumMembers<'a> {
    ints: Peekable<Ints<'a>>,
    reals: Peekable<btree_set::Iter<'a, Real>>,
    intervals: Peekable<RealIntervals<'a>>,
}

impl<'a> NumMembers<'a> {
    fn new(set: &'a CanonicalValueSet) -> Self {
        Self {
            ints: Ints::new(set.ints.iter()).peekable(),
            reals: set.scalars.reals().peekable(),
            intervals: set.reals.iter().peekable(),
        }
    }

    fn next_stream(&mut self) -> Option<Stream> {
        let heads = [
            self.ints.peek().map(|i| (Stream::Int, *i as f64)),
            self.reals.peek().map(|x| (Stream::Real, x.0)),
            self.intervals.peek().map(|r| (Stream::Interval, r.start().0)),
        ];
        // min_by keeps the first of equal elements
        heads
            .into_iter()
            .flatten()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(stream, _)| stream)
    }
}

impl<'a> Iterator for NumMembers<'a> {
    type Item = Member<'a>;
    fn next(&mut self) -> Option<Member<'a>> {
        match self.next_stream()? {
            Stream::Int => self.ints.next().map(Member::Integer),
            Stream::Real => self.reals.next().map(|x| Member::Real(x.0)),
            Stream::Interval => self.intervals.next().map(Member::Interval),
        }
    }
}

// ------------------------------- Members ---------------------------------- //

/// Every member in ascending order: numbers first, then booleans, strings
/// and nested sets.
pub struct Members<'a> {
    nums: NumMembers<'a>,
    booleans: btree_set::Iter<'a, bool>,
    strings: btree_set::Iter<'a, String>,
    sets: std::slice::Iter<'a, CanonicalValueSet>,
}

impl<'a> Iterator for Members<'a> {
    type Item = Member<'a>;
    fn next(&mut self) -> Option<Member<'a>> {
        self.nums
            .next()
            .or_else(|| self.booleans.next().map(|b| Member::Boolean(*b)))
            .or_else(|| self.strings.next().map(|s| Member::String(s.as_str())))
            .or_else(|| self.sets.next().map(Member::Set))
    }
}

// ------------------------------ Accessors --------------------------------- //

impl CanonicalValueSet {
    /// Enumerates every member. Fails with `InfiniteSetIteration` when a
    /// continuous interval is present.
    pub fn iter(&self) -> Result<Members<'_>> {
        self.check_finite()?;
        Ok(self.finite_iter())
    }

    /// Like [`iter`](Self::iter) but never fails: continuous intervals are
    /// yielded whole as [`Member::Interval`].
    pub fn finite_iter(&self) -> Members<'_> {
        Members {
            nums: NumMembers::new(self),
            booleans: self.scalars.booleans(),
            strings: self.scalars.strings(),
            sets: self.scalars.sets(),
        }
    }

    /// Integers of the integer store. Integers covered by a real interval
    /// are not included.
    pub fn ints(&self) -> Ints<'_> { Ints::new(self.ints.iter()) }

    /// Every number in ascending order; fails on infinite sets.
    pub fn nums(&self) -> Result<impl Iterator<Item = f64> + '_> {
        self.check_finite()?;
        Ok(self.finite_nums().filter_map(|member| member.as_f64()))
    }

    /// Numbers in ascending order with intervals yielded whole.
    pub fn finite_nums(&self) -> NumMembers<'_> { NumMembers::new(self) }

    pub fn booleans(&self) -> impl Iterator<Item = bool> + '_ { self.scalars.booleans().copied() }

    pub fn strings(&self) -> impl Iterator<Item = &str> + '_ { self.scalars.strings().map(String::as_str) }

    pub fn sets(&self) -> impl Iterator<Item = &CanonicalValueSet> + '_ { self.scalars.sets() }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::error::SetError;
    use crate::ranges::RealInterval;

    #[test]
    fn merges_numeric_streams_in_order() {
        let set = CanonicalValueSet::of([
            Element::from(3..=4),
            Element::from(0.5),
            Element::from(3.5),
            Element::from(-1),
        ])
        .unwrap();
        let nums: Vec<f64> = set.nums().unwrap().collect();
        assert_eq!(nums, vec![-1.0, 0.5, 3.0, 3.5, 4.0]);
    }

    #[test]
    fn ints_walk_ranges() {
        let set = CanonicalValueSet::of([1..=3, 7..=8]).unwrap();
        assert_eq!(set.ints().collect::<Vec<_>>(), vec![1, 2, 3, 7, 8]);
        assert_eq!(CanonicalValueSet::new().ints().next(), None);
    }

    #[test]
    fn infinite_set_refuses_full_iteration() {
        let set = CanonicalValueSet::of([Element::from(1), Element::from(2.0..=3.0)]).unwrap();
        assert!(matches!(set.iter().err(), Some(SetError::InfiniteSetIteration)));
        assert!(set.nums().is_err());

        let members: Vec<Member> = set.finite_iter().collect();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0], Member::Integer(1));
        assert!(matches!(members[1], Member::Interval(r) if *r == RealInterval::closed(2.0, 3.0)));
    }

    #[test]
    fn scalars_follow_numbers() {
        let set = CanonicalValueSet::of([
            Element::from("z"),
            Element::from(false),
            Element::from(CanonicalValueSet::new()),
            Element::from(9),
        ])
        .unwrap();
        let rendered: Vec<String> = set.iter().unwrap().map(|m| m.to_string()).collect();
        assert_eq!(rendered, vec!["9", "false", "z", "{}"]);
        assert_eq!(set.booleans().collect::<Vec<_>>(), vec![false]);
        assert_eq!(set.strings().collect::<Vec<_>>(), vec!["z"]);
        assert_eq!(set.sets().count(), 1);
    }

    #[test]
    fn intervals_interleave_by_start() {
        let set = CanonicalValueSet::of([
            Element::from(RealInterval::open(5.5, 6.5).unwrap()),
            Element::from(1..=2),
            Element::from(10),
        ])
        .unwrap();
        let rendered: Vec<String> = set.finite_nums().map(|m| m.to_string()).collect();
        assert_eq!(rendered, vec!["1", "2", "(5.5, 6.5)", "10"]);
    }
}
