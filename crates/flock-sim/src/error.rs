use flock_agent::StoreError;
use flock_core::FlockError;
use flock_query::QueryError;
use flock_spawn::SpawnError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] FlockError),

    #[error("agent store: {0}")]
    Store(#[from] StoreError),

    #[error("obstacle query failed: {0}")]
    Query(#[from] QueryError),

    #[error("spawning failed: {0}")]
    Spawn(#[from] SpawnError),

    #[error("record {index}: {source}")]
    InvalidRecord {
        index:  usize,
        #[source]
        source: FlockError,
    },

    #[error("could not build worker thread pool: {0}")]
    ThreadPool(String),
}

pub type SimResult<T> = Result<T, SimError>;
