//! `flock-core` — foundational types for the flock steering kernel.
//!
//! This crate is a dependency of every other `flock-*` crate.  It has no
//! `flock-*` dependencies and few external ones (`glam`, `rand`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`mask`]        | `LayerMask` obstacle-layer bitmask                    |
//! | [`settings`]    | `FlockSettings`, `SteeringWeights`, `SteerClamp`, `SimConfig` |
//! | [`time`]        | `StepIndex`, `StepClock`                              |
//! | [`rng`]         | `AgentRng` (per-agent, seeded from the run seed)      |
//! | [`error`]       | `FlockError`, `FlockResult`                           |
//!
//! Vector types are re-exported from `glam` so downstream crates agree on a
//! single `Vec3`/`Quat`.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod mask;
pub mod rng;
pub mod settings;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use glam::{Quat, Vec3};

pub use error::{FlockError, FlockResult};
pub use ids::AgentId;
pub use mask::LayerMask;
pub use rng::AgentRng;
pub use settings::{FlockSettings, SimConfig, SteerClamp, SteeringWeights};
pub use time::{StepClock, StepIndex};
