//! `flock-sim` — step executor and driver for the flock steering kernel.
//!
//! # Step
//!
//! ```text
//! step(dt):
//!   ① Flocking  — per agent: reset accumulators, scan every other agent,
//!                 derive the steering acceleration (parallel with the
//!                 `parallel` feature).
//!   ② Barrier   — accelerations copied from the accumulator slots into the
//!                 bodies once every task has returned.
//!   ③ Probe     — sphere-cast along each agent's forward axis; hits record
//!                 the avoidance direction.
//!   ④ Integrate — the injected `Integrator` moves the bodies.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | (default) Runs the flocking pass on Rayon's thread pool. |
//! | `serde`    | Forwards `serde` derives to the config and record types. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use flock_core::{SimConfig, Vec3};
//! use flock_query::NoObstacles;
//! use flock_sim::{EulerIntegrator, NoopObserver, SimBuilder};
//! use flock_spawn::SpawnerInfo;
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), NoObstacles)
//!     .spawners(vec![SpawnerInfo::new(Vec3::ZERO, 10.0, 2_000)])
//!     .integrator(EulerIntegrator)
//!     .build()?;
//! sim.finalize_population()?;
//! sim.run_steps(100, 1.0 / 60.0, &mut NoopObserver)?;
//! sim.shutdown();
//! ```

pub mod builder;
pub mod error;
pub mod executor;
pub mod integrator;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use executor::{StepExecutor, StepStats};
pub use integrator::{EulerIntegrator, Integrator, NoopIntegrator};
pub use observer::{FlockObserver, LogObserver, NoopObserver};
pub use sim::FlockSim;
