//! `flock-query` — the spatial query capability used by the collision probe
//! and by spawn-time obstacle clearance.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`provider`]  | `QueryProvider` trait, `CastHit`, `NoObstacles`       |
//! | [`field`]     | `ObstacleField` (R-tree of spherical obstacles), builder |
//! | [`error`]     | `QueryError`, `QueryResult<T>`                        |
//!
//! The kernel never reaches for a global physics service: the provider is
//! passed in explicitly, and any implementation that is `Send + Sync` will do.

pub mod error;
pub mod field;
pub mod provider;


pub use error::{QueryError, QueryResult};
pub use field::{Obstacle, ObstacleField, ObstacleFieldBuilder};
pub use provider::{CastHit, NoObstacles, QueryProvider};
