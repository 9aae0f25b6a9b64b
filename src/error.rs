use thiserror::Error;

/// Contract violations raised by the set algebra.
///
/// None of these are transient: they mean the caller handed the set
/// something it cannot represent, or asked for something it cannot do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetError {
    /// Excluding a point that lies outside the interval's bounds.
    #[error("cannot exclude {value}: not in range {start}..{end}")]
    OutOfRangeExclusion {
        value: String,
        start: String,
        end: String,
    },
    /// Full enumeration requested on a set holding a continuous interval.
    #[error("unable to iterate over infinite set")]
    InfiniteSetIteration,
    /// A value the stores have no representation for (NaN, ±inf).
    #[error("unsupported value kind: {0}")]
    UnsupportedValueKind(String),
}

pub type Result<T, E = SetError> = std::result::Result<T, E>;
