//! The canonical mixed-domain set.
//!
//! Integers live in an `IntegerRangeStore`, continuous reals in a
//! `RealRangeStore`, and everything discrete that fits neither (isolated
//! reals, booleans, strings, nested sets) in a `ScalarRegistry`.
//!
//! Cross-store invariant: an integer is held in exactly one place, either
//! inside an integer range or covered (un-excluded) by a real interval.
//! A non-integer real is either isolated or inside one interval's bounds.
//! Every mutation below restores this before returning.
pub mod iter;
pub mod scalars;
pub mod snapshot;

use std::fmt;
use std::ops::{BitAnd, BitOr, Sub, AddAssign, SubAssign};
use itertools::Itertools;

use crate::element::Element;
use crate::error::{Result, SetError};
use crate::ranges::{as_int, IntRange, IntegerRangeStore, Real, RealInterval, RealRangeStore};

pub use iter::{Ints, Members, NumMembers};
pub use scalars::ScalarRegistry;
pub use snapshot::{IntervalSnapshot, Snapshot};

#[derive(Clone, Debug, Default)]
pub struct CanonicalValueSet {
    ints: IntegerRangeStore,
    reals: RealRangeStore,
    scalars: ScalarRegistry,
}

impl CanonicalValueSet {
    pub fn new() -> Self { Self::default() }

    /// Builds a set by adding each element in turn.
    pub fn of<I, E>(elements: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Element>,
    {
        let mut set = Self::new();
        set.add_all(elements)?;
        Ok(set)
    }

    // ------------------------------ Queries -------------------------------- //

    /// Countable members: integers, isolated reals, booleans, strings and
    /// nested sets. Meaningless for infinite sets; check [`is_finite`](Self::is_finite).
    pub fn size(&self) -> u64 { self.ints.count().saturating_add(self.scalars.len()) }

    pub fn is_empty(&self) -> bool {
        self.ints.is_empty() && self.reals.is_empty() && self.scalars.is_empty()
    }

    /// A degenerate interval holds one point at most, so it does not make
    /// the set infinite.
    pub fn is_finite(&self) -> bool { self.reals.iter().all(RealInterval::is_degenerate) }

    pub fn is_infinite(&self) -> bool { !self.is_finite() }

    pub fn integer_store(&self) -> &IntegerRangeStore { &self.ints }
    pub fn real_store(&self) -> &RealRangeStore { &self.reals }
    pub fn scalars(&self) -> &ScalarRegistry { &self.scalars }

    pub fn contains(&self, element: impl Into<Element>) -> Result<bool> {
        let element = element.into();
        element.validate()?;
        Ok(self.contains_element(&element))
    }

    pub fn contains_all<E: Into<Element>>(&self, elements: impl IntoIterator<Item = E>) -> Result<bool> {
        for element in elements {
            if !self.contains(element)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Every member of `other` is a member of `self`. Works on infinite
    /// operands since `other` is walked range by range.
    pub fn includes(&self, other: &CanonicalValueSet) -> bool {
        other.elements().iter().all(|element| self.contains_element(element))
    }

    pub fn included_in(&self, other: &CanonicalValueSet) -> bool { other.includes(self) }

    /// The stored pieces as owned elements: integer ranges, real intervals,
    /// isolated reals, booleans, strings, nested sets.
    pub fn elements(&self) -> Vec<Element> {
        let mut out = Vec::with_capacity(self.ints.len() + self.reals.len() + self.scalars.len() as usize);
        out.extend(self.ints.iter().map(Element::IntRange));
        out.extend(self.reals.iter().cloned().map(Element::ExclusiveRealRange));
        out.extend(self.scalars.reals().map(|x| Element::Real(x.0)));
        out.extend(self.scalars.booleans().map(|b| Element::Boolean(*b)));
        out.extend(self.scalars.strings().cloned().map(Element::String));
        out.extend(self.scalars.sets().cloned().map(Element::Set));
        out
    }

    // ------------------------------ Mutation ------------------------------- //

    pub fn add(&mut self, element: impl Into<Element>) -> Result<()> {
        let element = element.into();
        element.validate()?;
        tracing::debug!(kind = element.kind(), %element, "add");
        self.insert_element(element);
        Ok(())
    }

    pub fn add_all<E: Into<Element>>(&mut self, elements: impl IntoIterator<Item = E>) -> Result<()> {
        elements.into_iter().try_for_each(|element| self.add(element))
    }

    pub fn remove(&mut self, element: impl Into<Element>) -> Result<()> {
        let element = element.into();
        element.validate()?;
        tracing::debug!(kind = element.kind(), %element, "remove");
        self.remove_element(&element);
        Ok(())
    }

    pub fn remove_all<E: Into<Element>>(&mut self, elements: impl IntoIterator<Item = E>) -> Result<()> {
        elements.into_iter().try_for_each(|element| self.remove(element))
    }

    pub fn clear(&mut self) {
        self.ints.clear();
        self.reals.clear();
        self.scalars.clear();
    }

    // ------------------------------ Algebra -------------------------------- //

    pub fn union(&self, other: &CanonicalValueSet) -> CanonicalValueSet {
        let mut out = self.clone();
        out.union_assign(other);
        out
    }

    /// `self \ (self \ other)`: two differences, no dedicated intersect path.
    pub fn intersection(&self, other: &CanonicalValueSet) -> CanonicalValueSet {
        let only_self = self.difference(other);
        let mut out = self.clone();
        out.difference_assign(&only_self);
        out
    }

    pub fn difference(&self, other: &CanonicalValueSet) -> CanonicalValueSet {
        let mut out = self.clone();
        out.difference_assign(other);
        out
    }

    pub fn union_assign(&mut self, other: &CanonicalValueSet) {
        let pieces = other.elements();
        tracing::debug!(pieces = pieces.len(), "union");
        for element in pieces {
            self.insert_element(element);
        }
    }

    pub fn difference_assign(&mut self, other: &CanonicalValueSet) {
        let pieces = other.elements();
        tracing::debug!(pieces = pieces.len(), "difference");
        for element in pieces {
            self.remove_element(&element);
        }
    }

    /// Order key for nested sets. Equal sets key equally however their
    /// integer ranges are split; strings are quoted so they cannot pass
    /// for other members.
    pub(crate) fn structural_key(&self) -> String {
        let mut runs: Vec<IntRange> = Vec::new();
        for range in self.ints.iter() {
            match runs.last_mut() {
                Some(run) if run.last.checked_add(1) == Some(range.first) => run.last = range.last,
                _ => runs.push(range),
            }
        }
        runs.iter()
            .map(ToString::to_string)
            .chain(self.reals.iter().map(ToString::to_string))
            .chain(self.scalars.reals().map(|x| format!("{:?}", x.0)))
            .chain(self.scalars.booleans().map(ToString::to_string))
            .chain(self.scalars.strings().map(|s| format!("{s:?}")))
            .chain(self.scalars.sets().map(|set| format!("{{{}}}", set.structural_key())))
            .join(", ")
    }

    pub(crate) fn check_finite(&self) -> Result<()> {
        if self.is_finite() { Ok(()) } else { Err(SetError::InfiniteSetIteration) }
    }

    // ---------------------------- Dispatch (add) --------------------------- //

    // Elements reaching here are validated.
    fn insert_element(&mut self, element: Element) {
        match element {
            Element::Integer(i) => self.add_int_range(IntRange::single(i)),
            Element::Real(x) => self.add_real(Real::from(x)),
            Element::Boolean(b) => self.scalars.insert_boolean(b),
            Element::String(s) => self.scalars.insert_string(s),
            Element::Set(s) => self.scalars.insert_set(s),
            Element::IntRange(r) => self.add_int_range(r),
            Element::ExclusiveIntRange(r) => {
                for piece in r.to_canonical_ranges() {
                    self.add_int_range(piece);
                }
            }
            Element::RealRange(r) => self.add_interval(RealInterval::closed(*r.start(), *r.end())),
            Element::ExclusiveRealRange(r) => self.add_interval(r),
        }
    }

    fn add_real(&mut self, value: Real) {
        if let Some(i) = as_int(value.0) {
            return self.add_int_range(IntRange::single(i));
        }
        match self.reals.covering_mut(value) {
            // Already inside an interval's bounds: un-puncture instead of storing twice.
            Some(interval) => {
                interval.include(value);
            }
            None => {
                self.scalars.insert_real(value);
            }
        }
    }

    /// Integer coverage of a real interval wins over a plain integer range:
    /// the overlap is handed to the interval (clearing any exclusions it had
    /// there) and only the remainders reach the integer store.
    fn add_int_range(&mut self, range: IntRange) {
        if range.is_empty() {
            return;
        }
        let (low, high) = int_window(range);
        let cut = self.reals
            .overlapping_mut(low, high)
            .find(|interval| interval.int_bounds().intersects(&range))
            .map(|interval| {
                interval.retain_exclusions(|x| !as_int(x.0).is_some_and(|i| range.contains(i)));
                (interval.first_int(), interval.last_int())
            });
        match cut {
            Some((first, last)) => {
                let (left, right) = range.split(first, last);
                for piece in left.into_iter().chain(right) {
                    self.add_int_range(piece);
                }
            }
            None => self.ints.insert(range),
        }
    }

    fn add_interval(&mut self, interval: RealInterval) {
        if interval.is_empty() {
            return;
        }
        if interval.is_degenerate() {
            return self.add_real(interval.start());
        }
        self.absorb_interval(interval);
    }

    fn absorb_interval(&mut self, mut interval: RealInterval) {
        // isolated reals under the new bounds stay members
        for value in self.scalars.take_reals_within(&interval) {
            interval.include(value);
        }
        // so do stored integers the new interval would exclude
        for range in self.ints.overlapping(interval.int_bounds()) {
            interval.retain_exclusions(|x| !as_int(x.0).is_some_and(|i| range.contains(i)));
        }
        // the interval now covers every stored integer in its span
        self.ints.remove_span(IntRange::new(interval.first_int(), interval.last_int()));
        self.reals.insert(interval);
    }

    // -------------------------- Dispatch (remove) -------------------------- //

    fn remove_element(&mut self, element: &Element) {
        match element {
            Element::Integer(i) => self.remove_int_range(IntRange::single(*i)),
            Element::Real(x) => self.remove_point(Real::from(*x)),
            Element::Boolean(b) => self.scalars.remove_boolean(*b),
            Element::String(s) => self.scalars.remove_string(s),
            Element::Set(s) => self.scalars.remove_set(s),
            Element::IntRange(r) => self.remove_int_range(*r),
            Element::ExclusiveIntRange(r) => {
                for piece in r.to_canonical_ranges() {
                    self.remove_int_range(piece);
                }
            }
            Element::RealRange(r) => self.punch(RealInterval::closed(*r.start(), *r.end())),
            Element::ExclusiveRealRange(r) => self.punch(r.clone()),
        }
    }

    fn remove_point(&mut self, value: Real) {
        if let Some(i) = as_int(value.0) {
            self.ints.remove_span(IntRange::single(i));
        }
        if let Some(interval) = self.reals.covering_mut(value) {
            interval.puncture(value);
        }
        self.scalars.remove_real(value);
    }

    fn remove_int_range(&mut self, range: IntRange) {
        if range.is_empty() {
            return;
        }
        self.ints.remove_span(range);
        let (low, high) = int_window(range);
        for interval in self.reals.overlapping_mut(low, high) {
            let first = interval.first_int().max(range.first);
            let last = interval.last_int().min(range.last);
            if first > last {
                continue;
            }
            for i in first..=last {
                interval.puncture(Real::from(i as f64));
            }
        }
    }

    /// Removes everything `punch` contains. Points `punch` excludes but the
    /// set held are left in place, re-entering as scalars where the
    /// interval that held them gets cut away.
    fn punch(&mut self, punch: RealInterval) {
        if punch.is_empty() {
            return;
        }
        if punch.is_degenerate() {
            return self.remove_point(punch.start());
        }
        tracing::trace!(%punch, "punch");
        self.scalars.remove_reals_in(&punch);
        if !punch.is_start_excluded() {
            self.remove_point(punch.start());
        }
        if !punch.is_end_excluded() {
            self.remove_point(punch.end());
        }

        let span = IntRange::new(punch.first_int(), punch.last_int());
        let spared: Vec<i64> = punch
            .exclusions()
            .iter()
            .filter_map(|x| as_int(x.0))
            .filter(|i| span.contains(*i) && self.ints.contains(*i))
            .collect();
        self.ints.remove_span(span);
        for i in spared {
            self.ints.insert(IntRange::single(i));
        }

        let mut readd = Vec::new();
        for stored in self.reals.take_intersecting(punch.start(), punch.end()) {
            readd.extend(punch.exclusions().iter().copied().filter(|x| stored.contains(*x)));
            let (left, right) = stored.split(punch.start(), punch.end());
            for part in left.into_iter().chain(right) {
                if part.is_degenerate() {
                    readd.push(part.start());
                } else {
                    self.reals.insert(part);
                }
            }
        }
        for value in readd {
            self.add_real(value);
        }
    }

    // ------------------------- Dispatch (contains) ------------------------- //

    fn contains_element(&self, element: &Element) -> bool {
        match element {
            Element::Integer(i) => self.contains_int(*i),
            Element::Real(x) => match as_int(*x) {
                Some(i) => self.contains_int(i),
                None => {
                    let x = Real::from(*x);
                    self.reals.contains(x) || self.scalars.contains_real(x)
                }
            },
            Element::Boolean(b) => self.scalars.contains_boolean(*b),
            Element::String(s) => self.scalars.contains_string(s),
            Element::Set(s) => self.scalars.contains_set(s),
            Element::IntRange(r) => self.contains_int_range(*r),
            Element::ExclusiveIntRange(r) => {
                r.to_canonical_ranges().into_iter().all(|piece| self.contains_int_range(piece))
            }
            Element::RealRange(r) => self.contains_interval(&RealInterval::closed(*r.start(), *r.end())),
            Element::ExclusiveRealRange(r) => self.contains_interval(r),
        }
    }

    fn contains_int(&self, value: i64) -> bool {
        self.ints.contains(value) || self.reals.contains(Real::from(value as f64))
    }

    /// Subtracts integer ranges first, then each interval's integer
    /// coverage, from a working copy of `range`; covered iff nothing is left.
    fn contains_int_range(&self, range: IntRange) -> bool {
        if range.is_empty() {
            return true;
        }
        let mut pending = vec![range];
        let (low, high) = int_window(range);
        let covers = self.ints
            .overlapping(range)
            .into_iter()
            .chain(self.reals.overlapping(low, high).flat_map(|interval| interval.int_coverage()));
        for cover in covers {
            pending = pending.iter().flat_map(|piece| piece.subtract(&cover)).collect();
            if pending.is_empty() {
                return true;
            }
        }
        false
    }

    /// Stored intervals never touch, so a continuous query must sit inside
    /// a single one, and may only skip points the query excludes itself.
    fn contains_interval(&self, query: &RealInterval) -> bool {
        if query.is_empty() {
            return true;
        }
        if query.is_degenerate() {
            return self.contains_element(&Element::Real(query.start().0));
        }
        self.reals.covering(query.start()).is_some_and(|stored| {
            stored.end() >= query.end()
                && stored
                    .exclusions()
                    .iter()
                    .all(|x| query.exclusions().contains(x) || !query.would_contain(*x))
        })
    }
}

/// Real bounds of an integer range, for interval lookups. Rounding is
/// monotonic, so any interval holding one of the integers meets the window.
fn int_window(range: IntRange) -> (Real, Real) {
    (Real::from(range.first as f64), Real::from(range.last as f64))
}

// ------------------------------ Equality --------------------------------- //

/// Structural: mutual inclusion, regardless of how the stores are split.
impl PartialEq for CanonicalValueSet {
    fn eq(&self, other: &Self) -> bool { self.includes(other) && other.includes(self) }
}

impl Eq for CanonicalValueSet {}

// ------------------------------ Operators -------------------------------- //

impl BitOr for &CanonicalValueSet {
    type Output = CanonicalValueSet;
    fn bitor(self, rhs: Self) -> CanonicalValueSet { self.union(rhs) }
}

impl BitAnd for &CanonicalValueSet {
    type Output = CanonicalValueSet;
    fn bitand(self, rhs: Self) -> CanonicalValueSet { self.intersection(rhs) }
}

impl Sub for &CanonicalValueSet {
    type Output = CanonicalValueSet;
    fn sub(self, rhs: Self) -> CanonicalValueSet { self.difference(rhs) }
}

impl AddAssign<&CanonicalValueSet> for CanonicalValueSet {
    fn add_assign(&mut self, rhs: &CanonicalValueSet) { self.union_assign(rhs) }
}

impl SubAssign<&CanonicalValueSet> for CanonicalValueSet {
    fn sub_assign(&mut self, rhs: &CanonicalValueSet) { self.difference_assign(rhs) }
}

/// Comma-separated members in ascending order, intervals in bracket form:
/// `1, 2, (5.5, 6.5), 7, [11.0, 15.0)`.
impl fmt::Display for CanonicalValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.finite_iter().join(", "))
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranges::IntInterval;

    fn ranges(set: &CanonicalValueSet) -> Vec<(i64, i64)> {
        set.integer_store().iter().map(|r| (r.first, r.last)).collect()
    }

    #[test]
    fn integer_points_merge_into_ranges() {
        let set = CanonicalValueSet::of([Element::from(1..=5), Element::from(3..=8), Element::from(20)]).unwrap();
        assert_eq!(ranges(&set), vec![(1, 8), (20, 20)]);
        assert_eq!(set.size(), 9);
    }

    #[test]
    fn integral_real_is_an_integer() {
        let mut set = CanonicalValueSet::new();
        set.add(4.0).unwrap();
        assert_eq!(ranges(&set), vec![(4, 4)]);
        assert!(set.contains(4).unwrap());
        assert_eq!(set.scalars().reals().count(), 0);
    }

    #[test]
    fn integer_inside_interval_clears_exclusion() {
        let mut set = CanonicalValueSet::of([RealInterval::closed(1.0, 10.0).excluding([5.0]).unwrap()]).unwrap();
        assert!(!set.contains(5).unwrap());
        set.add(5).unwrap();
        assert!(set.contains(5).unwrap());
        assert!(set.integer_store().is_empty());
        assert_eq!(set.to_string(), "[1.0, 10.0]");
    }

    #[test]
    fn interval_absorbs_covered_integers_and_reals() {
        let mut set = CanonicalValueSet::of([Element::from(1..=10), Element::from(2.5)]).unwrap();
        set.add(RealInterval::open(2.0, 7.0).unwrap()).unwrap();
        assert_eq!(ranges(&set), vec![(1, 1), (8, 10)]);
        assert_eq!(set.scalars().reals().count(), 0);
        // 2 and 7 were members already, so the interval keeps them
        assert_eq!(set.finite_iter().join(", "), "1, [2.0, 7.0], 8, 9, 10");
        assert!(set.contains(2).unwrap() && set.contains(7).unwrap() && set.contains(2.5).unwrap());
    }

    #[test]
    fn interval_excluding_absent_integer_keeps_exclusion() {
        let set = CanonicalValueSet::of([RealInterval::open(2.0, 7.0).unwrap()]).unwrap();
        assert!(!set.contains(2).unwrap());
        assert!(set.contains(3).unwrap());
        assert!(set.contains(6.999).unwrap());
    }

    #[test]
    fn fractional_real_inside_interval_unpunctures() {
        let mut set = CanonicalValueSet::of([RealInterval::open(0.5, 1.5).unwrap()]).unwrap();
        set.add(0.5).unwrap();
        assert_eq!(set.to_string(), "[0.5, 1.5)");
        assert_eq!(set.scalars().reals().count(), 0);
    }

    #[test]
    fn degenerate_interval_becomes_a_point() {
        let mut set = CanonicalValueSet::new();
        set.add(2.5..=2.5).unwrap();
        assert!(set.is_finite());
        assert_eq!(set.to_string(), "2.5");
        set.add(RealInterval::closed(3.5, 3.5).excluding([3.5]).unwrap()).unwrap();
        assert_eq!(set.size(), 1);
    }

    #[test]
    fn removing_integer_punctures_interval() {
        let mut set = CanonicalValueSet::of([0.0..=10.0]).unwrap();
        set.remove(5).unwrap();
        assert!(!set.contains(5).unwrap());
        assert!(set.contains(4.5).unwrap());
        assert_eq!(set.to_string(), "[0.0, 10.0]-{5.0}");

        set.remove(3..=4).unwrap();
        assert_eq!(set.to_string(), "[0.0, 10.0]-{3.0, 4.0, 5.0}");
    }

    #[test]
    fn punch_splits_interval() {
        let mut set = CanonicalValueSet::of([0.0..=10.0]).unwrap();
        set.remove(2.0..=4.0).unwrap();
        assert_eq!(set.to_string(), "[0.0, 2.0), (4.0, 10.0]");
        assert!(!set.contains(3.0).unwrap());
        assert!(set.contains(1.9).unwrap());
    }

    #[test]
    fn open_punch_leaves_its_endpoints() {
        let mut set = CanonicalValueSet::of([0.0..=10.0]).unwrap();
        set.remove(RealInterval::open(2.0, 4.0).unwrap()).unwrap();
        assert_eq!(set.to_string(), "[0.0, 2.0], [4.0, 10.0]");
    }

    #[test]
    fn punch_exclusions_reenter_as_scalars() {
        let mut set = CanonicalValueSet::of([0.0..=10.0]).unwrap();
        set.remove(RealInterval::closed(1.0, 9.0).excluding([5.0, 5.5]).unwrap()).unwrap();
        assert_eq!(set.to_string(), "[0.0, 1.0), 5, 5.5, (9.0, 10.0]");
        assert_eq!(ranges(&set), vec![(5, 5)]);
    }

    #[test]
    fn punch_spares_excluded_integers_in_store() {
        let mut set = CanonicalValueSet::of([1..=10]).unwrap();
        set.remove(RealInterval::open(0.5, 10.5).unwrap().excluding([5.0]).unwrap()).unwrap();
        assert_eq!(ranges(&set), vec![(5, 5)]);
    }

    #[test]
    fn punch_removes_isolated_reals_but_not_excluded_ones() {
        let mut set = CanonicalValueSet::of([1.5, 2.5, 3.5]).unwrap();
        set.remove(RealInterval::closed(1.0, 4.0).excluding([2.5]).unwrap()).unwrap();
        assert_eq!(set.to_string(), "2.5");
    }

    #[test]
    fn punch_collapsing_to_a_point_yields_scalar() {
        let mut set = CanonicalValueSet::of([0.5..=10.0]).unwrap();
        set.remove(RealInterval::open_left(0.5, 10.0).unwrap()).unwrap();
        assert!(set.is_finite());
        assert_eq!(set.to_string(), "0.5");
    }

    #[test]
    fn integer_range_containment_spans_stores() {
        let set = CanonicalValueSet::of([
            Element::from(1..=3),
            Element::from(RealInterval::open(3.0, 6.5).unwrap()),
            Element::from(7),
        ])
        .unwrap();
        assert!(set.contains(1..=7).unwrap());
        assert!(!set.contains(1..=8).unwrap());
        assert!(set.contains(IntInterval::closed(0, 7).excluding([0]).unwrap()).unwrap());
    }

    #[test]
    fn integer_range_containment_sees_interior_exclusions() {
        let set = CanonicalValueSet::of([RealInterval::closed(1.0, 10.0).excluding([5.0]).unwrap()]).unwrap();
        assert!(!set.contains(1..=10).unwrap());
        assert!(set.contains(1..=4).unwrap());
    }

    #[test]
    fn integer_updates_reach_the_right_interval() {
        let mut set = CanonicalValueSet::of([
            RealInterval::closed(0.5, 1.5),
            RealInterval::closed(10.5, 12.5).excluding([11.0]).unwrap(),
            RealInterval::closed(20.5, 21.5),
        ])
        .unwrap();
        set.add(11).unwrap();
        assert!(set.contains(11..=12).unwrap());
        assert!(set.integer_store().is_empty());

        set.remove(21).unwrap();
        assert_eq!(set.to_string(), "[0.5, 1.5], [10.5, 12.5], [20.5, 21.5]-{21.0}");
        assert!(!set.contains(1..=21).unwrap());
        assert!(set.contains(1..=1).unwrap());

        set.add(12..=15).unwrap();
        assert_eq!(set.integer_store().iter().collect::<Vec<_>>(), vec![IntRange::new(13, 15)]);
    }

    #[test]
    fn interval_containment() {
        let set = CanonicalValueSet::of([RealInterval::closed(0.0, 10.0).excluding([5.0]).unwrap()]).unwrap();
        assert!(set.contains(1.0..=4.0).unwrap());
        assert!(!set.contains(1.0..=6.0).unwrap());
        assert!(set.contains(RealInterval::closed(1.0, 6.0).excluding([5.0]).unwrap()).unwrap());
        assert!(!set.contains(9.0..=11.0).unwrap());
    }

    #[test]
    fn unsupported_values_are_rejected() {
        let mut set = CanonicalValueSet::new();
        assert!(matches!(set.add(f64::NAN), Err(SetError::UnsupportedValueKind(_))));
        assert!(matches!(set.remove(f64::INFINITY), Err(SetError::UnsupportedValueKind(_))));
        assert!(set.contains(f64::NEG_INFINITY..=0.0).is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn discrete_scalars() {
        let mut set = CanonicalValueSet::of([Element::from(true), Element::from("b"), Element::from("a")]).unwrap();
        set.add(true).unwrap();
        assert_eq!(set.size(), 3);
        assert_eq!(set.to_string(), "true, a, b");
        set.remove("a").unwrap();
        assert!(!set.contains("a").unwrap());
        assert!(set.contains(true).unwrap());
    }

    #[test]
    fn nested_sets_compare_by_value() {
        let inner = CanonicalValueSet::of([1, 2]).unwrap();
        let mut outer = CanonicalValueSet::of([Element::from(inner.clone()), Element::from(0)]).unwrap();
        assert_eq!(outer.to_string(), "0, {1, 2}");

        let same = CanonicalValueSet::of([1..=2]).unwrap();
        assert!(outer.contains(same.clone()).unwrap());
        outer.add(same).unwrap();
        assert_eq!(outer.size(), 2);

        // the stored copy is independent of the original
        let mut inner = inner;
        inner.add(3).unwrap();
        assert!(!outer.contains(inner).unwrap());
    }

    #[test]
    fn nested_sets_render_canonically() {
        let a = CanonicalValueSet::of([1..=3, 4..=6]).unwrap();
        let b = CanonicalValueSet::of(["x"]).unwrap();
        assert_eq!(a.structural_key(), CanonicalValueSet::of([1..=6]).unwrap().structural_key());
        assert_eq!(a.structural_key(), "1..6");
        assert_eq!(b.structural_key(), "\"x\"");

        let ab = CanonicalValueSet::of([Element::from(a.clone()), Element::from(b.clone())]).unwrap();
        let ba = CanonicalValueSet::of([Element::from(b), Element::from(a)]).unwrap();
        assert_eq!(ab.to_string(), ba.to_string());
        assert_eq!(ab.to_string(), "{x}, {1, 2, 3, 4, 5, 6}");
        assert_eq!(ab, ba);
    }

    #[test]
    fn algebra_on_integers() {
        let a = CanonicalValueSet::of([1..=10]).unwrap();
        let b = CanonicalValueSet::of([3..=5]).unwrap();
        let diff = &a - &b;
        assert_eq!(ranges(&diff), vec![(1, 2), (6, 10)]);
        assert_eq!(diff.size(), 7);
        assert_eq!(&a & &b, b);
        assert_eq!(&a | &b, a);
    }

    #[test]
    fn intersection_across_domains() {
        let a = CanonicalValueSet::of([0.0..=10.0]).unwrap();
        let b = CanonicalValueSet::of([Element::from(5), Element::from(20), Element::from(8.5..=12.0)]).unwrap();
        let both = &a & &b;
        assert_eq!(both.to_string(), "5, [8.5, 10.0]");
        assert!(both.included_in(&a) && both.included_in(&b));
    }

    #[test]
    fn intersection_of_overlapping_intervals() {
        let a = CanonicalValueSet::of([1.0..=5.0]).unwrap();
        let b = CanonicalValueSet::of([3.0..=10.0]).unwrap();
        assert_eq!((&a & &b).to_string(), "[3.0, 5.0]");
        assert_eq!((&a - &b).to_string(), "[1.0, 3.0)");
    }

    #[test]
    fn assign_operators() {
        let mut a = CanonicalValueSet::of([1..=3]).unwrap();
        a += &CanonicalValueSet::of([7]).unwrap();
        a -= &CanonicalValueSet::of([2]).unwrap();
        assert_eq!(a.to_string(), "1, 3, 7");
    }

    #[test]
    fn equality_ignores_internal_split() {
        let split = CanonicalValueSet::of([1..=3, 4..=6]).unwrap();
        let whole = CanonicalValueSet::of([1..=6]).unwrap();
        assert_eq!(ranges(&split).len(), 2);
        assert_eq!(split, whole);
        assert_ne!(whole, CanonicalValueSet::of([1..=7]).unwrap());
    }

    #[test]
    fn empty_versus_zero_size() {
        let set = CanonicalValueSet::of([0.0..=1.0]).unwrap();
        assert_eq!(set.size(), 0);
        assert!(!set.is_empty());
        assert!(set.is_infinite());
        let mut set = set;
        set.clear();
        assert!(set.is_empty() && set.is_finite());
    }
}
