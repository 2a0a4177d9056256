//! `flock-agent` — agent records and the fixed-capacity `AgentStore`.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`record`]   | `Body`, `Perception`, `FlockAccumulators`, `Avoidance`, `AgentRecord` |
//! | [`store`]    | `AgentStore` lifecycle, `FlockView`, `ProbeView`, `MotionView` |
//! | [`error`]    | `StoreError`, `StoreResult<T>`                             |
//!
//! # Layout
//!
//! Records come in as one struct per agent (what the spawner produces) and
//! are split into parallel arrays on allocation.  The split lets a step hold
//! `&[Body]` for every task while each task writes only its own
//! `FlockAccumulators` slot.

pub mod error;
pub mod record;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{StoreError, StoreResult};
pub use record::{AgentRecord, Avoidance, Body, FlockAccumulators, Perception};
pub use store::{AgentStore, FlockView, MotionView, ProbeView};
