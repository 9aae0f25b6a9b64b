//! Serializable view of the three stores, used by the console `dump`
//! command.
use serde::{Deserialize, Serialize};

use super::CanonicalValueSet;
use crate::error::Result;
use crate::ranges::{IntRange, RealInterval};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSnapshot {
    pub start: f64,
    pub end: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub size: u64,
    pub finite: bool,
    pub integers: Vec<IntRange>,
    pub intervals: Vec<IntervalSnapshot>,
    pub reals: Vec<f64>,
    pub booleans: Vec<bool>,
    pub strings: Vec<String>,
    pub sets: Vec<Snapshot>,
}

impl From<&RealInterval> for IntervalSnapshot {
    fn from(interval: &RealInterval) -> Self {
        IntervalSnapshot {
            start: interval.start().0,
            end: interval.end().0,
            exclusions: interval.exclusions().iter().map(|x| x.0).collect(),
        }
    }
}

impl CanonicalValueSet {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            size: self.size(),
            finite: self.is_finite(),
            integers: self.ints.iter().collect(),
            intervals: self.reals.iter().map(IntervalSnapshot::from).collect(),
            reals: self.scalars.reals().map(|x| x.0).collect(),
            booleans: self.booleans().collect(),
            strings: self.strings().map(str::to_owned).collect(),
            sets: self.sets().map(CanonicalValueSet::snapshot).collect(),
        }
    }

    /// Rebuilds a set by re-adding every stored piece. `size` and `finite`
    /// are derived and ignored.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let mut set = CanonicalValueSet::new();
        for range in &snapshot.integers {
            set.add(*range)?;
        }
        for interval in &snapshot.intervals {
            set.add(RealInterval::closed(interval.start, interval.end).excluding(interval.exclusions.iter().copied())?)?;
        }
        set.add_all(snapshot.reals.iter().copied())?;
        set.add_all(snapshot.booleans.iter().copied())?;
        set.add_all(snapshot.strings.iter().cloned())?;
        for nested in &snapshot.sets {
            set.add(CanonicalValueSet::from_snapshot(nested)?)?;
        }
        Ok(set)
    }
}
