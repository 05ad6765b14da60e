//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a vertex of the graph being laid out.
///
/// Stable for the whole run. Carried on the wire as a 64-bit signed
/// integer, so the full `i64` range is valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub i64);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for VertexId {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

/// Monotonically increasing superstep counter.
///
/// Superstep `N` reads only what was finalized at the barrier that
/// closed superstep `N - 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SuperstepId(pub u64);

impl SuperstepId {
    /// The superstep that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Whether this is the first superstep of a run.
    pub fn is_first(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for SuperstepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for SuperstepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies a worker partition of the vertex set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(pub u32);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for WorkerId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
