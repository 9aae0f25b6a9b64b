//! Canonical mixed-domain value sets.
//!
//! A [`CanonicalValueSet`] holds integers, reals, booleans, strings and
//! nested sets, with integers and reals stored as disjoint ranges and
//! intervals (with punctured points) instead of element by element.
//!
//! ```
//! use canon_set::{cset, RealInterval};
//!
//! let mut set = cset![1..=5, RealInterval::open(5.5, 6.5)?, 7..=10]?;
//! set.add(RealInterval::open_right(11.0, 15.0)?)?;
//! assert_eq!(set.size(), 9);
//! assert_eq!(set.to_string(), "1, 2, 3, 4, 5, (5.5, 6.5), 7, 8, 9, 10, [11.0, 15.0)");
//! assert!(!set.contains(1..=15)?);
//! # Ok::<(), canon_set::SetError>(())
//! ```
pub mod console;
pub mod element;
pub mod error;
pub mod ranges;
pub mod set;

pub use element::{Element, Member};
pub use error::{Result, SetError};
pub use ranges::{IntInterval, IntRange, Real, RealInterval};
pub use set::CanonicalValueSet;

/// Builds a [`CanonicalValueSet`] from mixed literals, returning
/// `Result<CanonicalValueSet, SetError>`.
///
/// ```
/// use canon_set::cset;
///
/// let set = cset![1, 2.5, "x", true].unwrap();
/// assert_eq!(set.to_string(), "1, 2.5, true, x");
/// assert!(cset![].unwrap().is_empty());
/// ```
#[macro_export]
macro_rules! cset {
    () => {
        $crate::CanonicalValueSet::of(::std::iter::empty::<$crate::Element>())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::CanonicalValueSet::of([$($crate::Element::from($value)),+])
    };
}
