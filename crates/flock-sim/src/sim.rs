//! The `FlockSim` driver and its population lifecycle.

use log::{debug, info};

use flock_agent::{AgentRecord, AgentStore, StoreError};
use flock_core::{FlockError, SimConfig, StepClock};
use flock_query::QueryProvider;
use flock_spawn::{SpawnCursor, SpawnPlan};

use crate::{FlockObserver, Integrator, SimResult, StepExecutor, StepStats};

/// Owns the agent store, the obstacle provider, and the integrator, and
/// drives them through an explicit lifecycle:
///
/// ```text
/// SimBuilder::build ─▶ spawn_next_batch* ─▶ finalize_population ─▶ step* ─▶ shutdown
/// ```
///
/// Create via [`SimBuilder`](crate::SimBuilder).
pub struct FlockSim<P: QueryProvider, I: Integrator> {
    /// Settings, seed, and worker count.  Validated at build time.
    pub config: SimConfig,

    /// Steps run so far and simulated seconds covered.
    pub clock: StepClock,

    /// Empty until [`finalize_population`](Self::finalize_population).
    pub store: AgentStore,

    pub provider:   P,
    pub integrator: I,

    pub(crate) executor: StepExecutor,
    pub(crate) plan:     Option<SpawnPlan>,
    pub(crate) cursor:   SpawnCursor,
    /// Records produced but not yet moved into the store.
    pub(crate) pending:  Vec<AgentRecord>,
}

impl<P: QueryProvider, I: Integrator> FlockSim<P, I> {
    // ── Population ────────────────────────────────────────────────────────

    /// Produce the next spawn batch into the pending population.
    ///
    /// Returns `true` if a batch was produced, `false` once every spawner is
    /// exhausted (or if the sim was built without spawners).
    ///
    /// # Errors
    ///
    /// [`SimError::Store`](crate::SimError::Store) once the population has
    /// been finalised or the sim shut down; spawn/query errors otherwise.
    pub fn spawn_next_batch(&mut self) -> SimResult<bool> {
        Ok(self.next_spawn_batch()?.is_some())
    }

    /// Run spawn batches until every spawner is exhausted, reporting each
    /// one to `observer`.  Returns the size of the pending population.
    pub fn spawn_all<O: FlockObserver>(&mut self, observer: &mut O) -> SimResult<usize> {
        while let Some(spawned) = self.next_spawn_batch()? {
            observer.on_spawn_batch(spawned, self.pending.len());
        }
        Ok(self.pending.len())
    }

    /// Finish any remaining spawn batches and move the population into the
    /// store.  Returns the final agent count.
    ///
    /// # Errors
    ///
    /// [`StoreError::AlreadyAllocated`] on a second call and
    /// [`StoreError::Released`] after [`shutdown`](Self::shutdown).
    pub fn finalize_population(&mut self) -> SimResult<usize> {
        while self.next_spawn_batch()?.is_some() {}
        let records = std::mem::take(&mut self.pending);
        let count = records.len();
        self.store.allocate(records)?;
        self.plan = None;
        info!("population finalised: {count} agents");
        Ok(count)
    }

    /// Records waiting for [`finalize_population`](Self::finalize_population).
    pub fn pending(&self) -> &[AgentRecord] {
        &self.pending
    }

    pub fn is_finalized(&self) -> bool {
        self.store.is_allocated()
    }

    /// `Some(n)` spawned; `None` when there is nothing left to spawn.
    fn next_spawn_batch(&mut self) -> SimResult<Option<usize>> {
        self.ensure_unallocated()?;
        let Some(plan) = &self.plan else {
            return Ok(None);
        };

        let batch = plan.next_batch(self.cursor, &self.provider)?;
        let spawned = batch.records.len();
        self.pending.extend(batch.records);
        self.cursor = batch.next;
        if !batch.more {
            debug!("spawning complete: {} agents pending", self.pending.len());
            self.plan = None;
        }
        Ok(if spawned > 0 || batch.more { Some(spawned) } else { None })
    }

    fn ensure_unallocated(&self) -> SimResult<()> {
        if self.store.is_allocated() {
            return Err(StoreError::AlreadyAllocated.into());
        }
        if self.store.is_released() {
            return Err(StoreError::Released.into());
        }
        Ok(())
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Run one step of `delta_secs` simulated seconds: flocking pass,
    /// barrier, probe pass, then the integrator.
    ///
    /// # Errors
    ///
    /// [`FlockError::InvalidSetting`] for a negative or non-finite
    /// `delta_secs`; [`StoreError::NotAllocated`] before
    /// [`finalize_population`](Self::finalize_population); provider errors
    /// from the probe pass.  The clock only advances on success.
    pub fn step(&mut self, delta_secs: f32) -> SimResult<StepStats> {
        if !delta_secs.is_finite() || delta_secs < 0.0 {
            return Err(FlockError::InvalidSetting { name: "delta_secs", value: delta_secs }.into());
        }

        let weights = self.config.settings.weights();
        let stats = self.executor.run(&mut self.store, &weights, &self.provider)?;
        self.integrator.integrate(self.store.motion_view()?, &self.config.settings, delta_secs);

        debug!("{} done: {} agents, {} probe hits", self.clock.current_step, stats.agents, stats.probe_hits);
        self.clock.advance(delta_secs);
        Ok(stats)
    }

    /// Run exactly `n` steps, calling observer hooks around each.
    pub fn run_steps<O: FlockObserver>(&mut self, n: u64, delta_secs: f32, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_step;
            observer.on_step_start(now);
            let stats = self.step(delta_secs)?;
            observer.on_step_end(now, &stats, &self.store);
        }
        observer.on_run_end(self.clock.current_step);
        Ok(())
    }

    // ── Teardown ──────────────────────────────────────────────────────────

    /// Release the store.  Idempotent; a sim whose population was never
    /// finalised can still be finalised afterwards.
    pub fn shutdown(&mut self) {
        if self.store.is_allocated() {
            info!("shutting down after {}", self.clock);
        }
        self.store.release();
    }
}
