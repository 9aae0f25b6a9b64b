//! Values going into a set (`Element`) and members coming out (`Member`).
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::{Result, SetError};
use crate::ranges::{IntInterval, IntRange, Point, Real, RealInterval};
use crate::set::CanonicalValueSet;

// ------------------------------- Element --------------------------------- //

/// Anything a [`CanonicalValueSet`] can add, remove or test for.
///
/// Scalars (`Integer`, `Real`, `Boolean`, `String`, `Set`) plus the four
/// range flavors. Nested sets are owned, never shared.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Integer(i64),
    Real(f64),
    Boolean(bool),
    String(String),
    Set(CanonicalValueSet),
    IntRange(IntRange),
    ExclusiveIntRange(IntInterval),
    RealRange(RangeInclusive<f64>),
    ExclusiveRealRange(RealInterval),
}

impl Element {
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Integer(_) => "integer",
            Element::Real(_) => "real",
            Element::Boolean(_) => "boolean",
            Element::String(_) => "string",
            Element::Set(_) => "set",
            Element::IntRange(_) => "integer range",
            Element::ExclusiveIntRange(_) => "exclusive integer range",
            Element::RealRange(_) => "real range",
            Element::ExclusiveRealRange(_) => "exclusive real range",
        }
    }

    /// Rejects reals the stores cannot order or count: NaN and ±inf.
    pub(crate) fn validate(&self) -> Result<()> {
        let check = |x: f64| {
            if x.is_finite() {
                Ok(())
            } else {
                Err(SetError::UnsupportedValueKind(format!("non-finite {} {x}", self.kind())))
            }
        };
        match self {
            Element::Real(x) => check(*x),
            Element::RealRange(r) => check(*r.start()).and(check(*r.end())),
            Element::ExclusiveRealRange(r) => check(r.start().0).and(check(r.end().0)),
            _ => Ok(()),
        }
    }
}

impl From<i64> for Element {
    fn from(value: i64) -> Self { Element::Integer(value) }
}

impl From<i32> for Element {
    fn from(value: i32) -> Self { Element::Integer(i64::from(value)) }
}

impl From<f64> for Element {
    fn from(value: f64) -> Self { Element::Real(value) }
}

impl From<Real> for Element {
    fn from(value: Real) -> Self { Element::Real(value.0) }
}

impl From<bool> for Element {
    fn from(value: bool) -> Self { Element::Boolean(value) }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self { Element::String(value.to_owned()) }
}

impl From<String> for Element {
    fn from(value: String) -> Self { Element::String(value) }
}

impl From<CanonicalValueSet> for Element {
    fn from(value: CanonicalValueSet) -> Self { Element::Set(value) }
}

impl From<IntRange> for Element {
    fn from(value: IntRange) -> Self { Element::IntRange(value) }
}

impl From<RangeInclusive<i64>> for Element {
    fn from(value: RangeInclusive<i64>) -> Self { Element::IntRange(value.into()) }
}

impl From<RangeInclusive<i32>> for Element {
    fn from(value: RangeInclusive<i32>) -> Self { Element::IntRange(value.into()) }
}

impl From<IntInterval> for Element {
    fn from(value: IntInterval) -> Self { Element::ExclusiveIntRange(value) }
}

impl From<RangeInclusive<f64>> for Element {
    fn from(value: RangeInclusive<f64>) -> Self { Element::RealRange(value) }
}

impl From<RealInterval> for Element {
    fn from(value: RealInterval) -> Self { Element::ExclusiveRealRange(value) }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Integer(i) => write!(f, "{i}"),
            Element::Real(x) => write!(f, "{x:?}"),
            Element::Boolean(b) => write!(f, "{b}"),
            Element::String(s) => f.write_str(s),
            Element::Set(s) => write!(f, "{{{s}}}"),
            Element::IntRange(r) => write!(f, "[{}, {}]", r.first, r.last),
            Element::ExclusiveIntRange(r) => write!(f, "{r}"),
            Element::RealRange(r) => write!(f, "[{:?}, {:?}]", r.start(), r.end()),
            Element::ExclusiveRealRange(r) => write!(f, "{r}"),
        }
    }
}

// -------------------------------- Member ---------------------------------- //

/// A member yielded by set iteration, borrowing from the set.
///
/// `Interval` only appears from the finite-form iterators, standing in for
/// the uncountable contents of a continuous interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Member<'a> {
    Integer(i64),
    Real(f64),
    Interval(&'a RealInterval),
    Boolean(bool),
    String(&'a str),
    Set(&'a CanonicalValueSet),
}

impl Member<'_> {
    /// Numeric value, for integers and isolated reals.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Member::Integer(i) => Some(*i as f64),
            Member::Real(x) => Some(*x),
            Member::Interval(r) if r.is_degenerate() && !r.is_empty() => Some(r.start().0),
            _ => None,
        }
    }

    pub fn to_element(&self) -> Element {
        match *self {
            Member::Integer(i) => Element::Integer(i),
            Member::Real(x) => Element::Real(x),
            Member::Interval(r) => Element::ExclusiveRealRange(r.clone()),
            Member::Boolean(b) => Element::Boolean(b),
            Member::String(s) => Element::String(s.to_owned()),
            Member::Set(s) => Element::Set(s.clone()),
        }
    }
}

impl fmt::Display for Member<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Integer(i) => write!(f, "{i}"),
            Member::Real(x) => f.write_str(&Real::from(*x).render()),
            Member::Interval(r) => write!(f, "{r}"),
            Member::Boolean(b) => write!(f, "{b}"),
            Member::String(s) => f.write_str(s),
            Member::Set(s) => write!(f, "{{{s}}}"),
        }
    }
}
