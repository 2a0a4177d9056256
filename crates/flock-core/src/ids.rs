//! Agent identity.
//!
//! Agents have no identity beyond their slot in the store: `AgentId(i)`
//! addresses element `i` of every per-agent array, and spawning assigns
//! slots in global spawn order.

use std::fmt;

/// Slot of an agent in the `AgentStore`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentId(pub u32);

impl AgentId {
    /// Slot as a slice index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for AgentId {
    type Error = std::num::TryFromIntError;

    fn try_from(slot: usize) -> Result<Self, Self::Error> {
        u32::try_from(slot).map(AgentId)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent #{}", self.0)
    }
}
