//! Fluent builder for constructing a [`FlockSim`].

use flock_agent::{AgentRecord, AgentStore};
use flock_core::{SimConfig, StepClock};
use flock_query::QueryProvider;
use flock_spawn::{SpawnCursor, SpawnPlan, SpawnerInfo};

use crate::{FlockSim, Integrator, NoopIntegrator, SimError, SimResult, StepExecutor};

/// Fluent builder for [`FlockSim<P, I>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: shared settings, seed, worker count, spawn batch size
/// - `P: QueryProvider`: obstacle queries for spawning and the probe pass
///   (e.g. [`flock_query::ObstacleField`] or [`flock_query::NoObstacles`])
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                          |
/// |--------------------|----------------------------------|
/// | `.spawners(v)`     | No spawners                      |
/// | `.records(v)`      | No pre-built records             |
/// | `.integrator(i)`   | [`NoopIntegrator`]               |
///
/// Pre-built records come first in slot order, spawned agents after them.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, field)
///     .spawners(load_spawners_csv(path, &config.settings)?)
///     .integrator(EulerIntegrator)
///     .build()?;
/// sim.spawn_all(&mut LogObserver::default())?;
/// sim.finalize_population()?;
/// sim.run_steps(600, 1.0 / 60.0, &mut NoopObserver)?;
/// sim.shutdown();
/// ```
pub struct SimBuilder<P: QueryProvider, I: Integrator = NoopIntegrator> {
    config:     SimConfig,
    provider:   P,
    integrator: I,
    spawners:   Option<Vec<SpawnerInfo>>,
    records:    Vec<AgentRecord>,
}

impl<P: QueryProvider> SimBuilder<P, NoopIntegrator> {
    pub fn new(config: SimConfig, provider: P) -> Self {
        Self {
            config,
            provider,
            integrator: NoopIntegrator,
            spawners:   None,
            records:    Vec::new(),
        }
    }
}

impl<P: QueryProvider, I: Integrator> SimBuilder<P, I> {
    /// Spawners to run through the batch producer.
    pub fn spawners(mut self, spawners: Vec<SpawnerInfo>) -> Self {
        self.spawners = Some(spawners);
        self
    }

    /// Already-initialised records, bypassing the spawners.
    pub fn records(mut self, records: Vec<AgentRecord>) -> Self {
        self.records = records;
        self
    }

    /// Replace the integrator.
    pub fn integrator<J: Integrator>(self, integrator: J) -> SimBuilder<P, J> {
        SimBuilder {
            config:   self.config,
            provider: self.provider,
            integrator,
            spawners: self.spawners,
            records:  self.records,
        }
    }

    /// Validate the configuration, pre-built records, and spawners, build
    /// the worker pool, and return a sim ready to spawn.
    pub fn build(self) -> SimResult<FlockSim<P, I>> {
        self.config.validate()?;
        for (index, record) in self.records.iter().enumerate() {
            record
                .perception
                .validate()
                .map_err(|source| SimError::InvalidRecord { index, source })?;
        }

        let plan = match self.spawners {
            Some(spawners) => Some(SpawnPlan::new(
                spawners,
                self.config.seed,
                self.config.max_spawn_per_batch,
            )?),
            None => None,
        };
        let executor = StepExecutor::new(self.config.num_threads)?;

        Ok(FlockSim {
            clock:      StepClock::new(),
            config:     self.config,
            store:      AgentStore::new(),
            provider:   self.provider,
            integrator: self.integrator,
            executor,
            plan,
            cursor:     SpawnCursor::START,
            pending:    self.records,
        })
    }
}
