use flock_core::AgentId;
use thiserror::Error;

/// Lifecycle misuse and out-of-range access on an [`AgentStore`](crate::AgentStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("agent store is already allocated")]
    AlreadyAllocated,

    #[error("agent store has been released")]
    Released,

    #[error("agent store is not allocated")]
    NotAllocated,

    #[error("{agent} out of range for store of {len} agents")]
    OutOfRange { agent: AgentId, len: usize },

    #[error("population of {0} agents exceeds the AgentId range")]
    TooManyAgents(usize),
}

pub type StoreResult<T> = Result<T, StoreError>;
