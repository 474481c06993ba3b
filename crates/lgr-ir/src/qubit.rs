//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a wire in a circuit register.
///
/// Wires are addressed by a contiguous, 0-based index. Routing produces
/// circuits whose `QubitId`s are physical positions in the routing graph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The wire index as a `usize`, for indexing register-sized tables.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl From<QubitId> for u32 {
    fn from(id: QubitId) -> Self {
        id.0
    }
}
