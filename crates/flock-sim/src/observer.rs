//! Observer hooks for progress reporting and data collection.

use log::{debug, info};

use flock_agent::AgentStore;
use flock_core::StepIndex;

use crate::StepStats;

/// Callbacks invoked by [`FlockSim`](crate::FlockSim) while it spawns and
/// steps.
///
/// All methods default to no-ops.
///
/// # Example — centroid tracker
///
/// ```rust,ignore
/// struct Centroid(Vec<Vec3>);
///
/// impl FlockObserver for Centroid {
///     fn on_step_end(&mut self, _step: StepIndex, _stats: &StepStats, store: &AgentStore) {
///         if let Ok(bodies) = store.bodies() {
///             let sum: Vec3 = bodies.iter().map(|b| b.position).sum();
///             self.0.push(sum / bodies.len().max(1) as f32);
///         }
///     }
/// }
/// ```
pub trait FlockObserver {
    /// After each spawn batch.  `total` counts every record produced so far.
    fn on_spawn_batch(&mut self, _spawned: usize, _total: usize) {}

    /// Before the step's flocking pass.
    fn on_step_start(&mut self, _step: StepIndex) {}

    /// After the step has been integrated.  `store` is read-only here.
    fn on_step_end(&mut self, _step: StepIndex, _stats: &StepStats, _store: &AgentStore) {}

    /// Once after the last step of a [`run_steps`](crate::FlockSim::run_steps)
    /// call.  `next_step` is the step that would run next.
    fn on_run_end(&mut self, _next_step: StepIndex) {}
}

/// Does nothing.
pub struct NoopObserver;

impl FlockObserver for NoopObserver {}

/// Reports progress through the `log` facade.
///
/// Step statistics go to `info!` every `interval` steps (every step when
/// `interval` is 0 or 1); spawn batches go to `debug!`.
pub struct LogObserver {
    pub interval: u64,
}

impl LogObserver {
    pub fn new(interval: u64) -> Self {
        Self { interval }
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(1)
    }
}

impl FlockObserver for LogObserver {
    fn on_spawn_batch(&mut self, spawned: usize, total: usize) {
        debug!("spawned {spawned} agents ({total} total)");
    }

    fn on_step_end(&mut self, step: StepIndex, stats: &StepStats, _store: &AgentStore) {
        if self.interval <= 1 || step.0.is_multiple_of(self.interval) {
            info!(
                "{step}: {} agents, {} flockmate links, {} probe hits",
                stats.agents, stats.flockmates, stats.probe_hits
            );
        }
    }

    fn on_run_end(&mut self, next_step: StepIndex) {
        info!("run finished before {next_step}");
    }
}
