use flock_core::FlockError;
use flock_query::QueryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("spawner table parse error: {0}")]
    Parse(String),

    #[error("invalid spawner settings: {0}")]
    Config(#[from] FlockError),

    #[error("obstacle query failed during spawn: {0}")]
    Query(#[from] QueryError),

    #[error("total population {0} exceeds the AgentId range")]
    PopulationTooLarge(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpawnResult<T> = Result<T, SpawnError>;
