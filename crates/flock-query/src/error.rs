//! Query error type.

use thiserror::Error;

/// Errors produced by a [`QueryProvider`](crate::QueryProvider).
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid query input: {0}")]
    InvalidInput(String),

    #[error("query provider unavailable: {0}")]
    Unavailable(String),
}

pub type QueryResult<T> = Result<T, QueryError>;
