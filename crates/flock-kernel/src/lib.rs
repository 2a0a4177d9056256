//! `flock-kernel` — the per-agent computations of one simulation step.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`neighbor`]  | `scan_neighbors` — exhaustive O(n) scan for one agent      |
//! | [`steering`]  | `steer_towards`, `steering_forces`, `steering_acceleration` |
//! | [`probe`]     | `is_heading_for_collision`, `probe_agent`, `run_collision_pass` |
//! | [`pass`]      | `flock_slot` — scan + steer for one slot                   |
//!
//! # Design notes
//!
//! Every function here reads a shared snapshot and writes at most one
//! agent's output.  Nothing holds state between calls, so the driver can run
//! [`flock_slot`] for all indices in any order, on any thread, and get the
//! same result.

pub mod neighbor;
pub mod pass;
pub mod probe;
pub mod steering;

#[cfg(test)]
mod tests;

pub use neighbor::scan_neighbors;
pub use pass::flock_slot;
pub use probe::{is_heading_for_collision, probe_agent, run_collision_pass};
pub use steering::{steer_towards, steering_acceleration, steering_forces, SteeringForces};
