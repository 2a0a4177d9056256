//! One simulation step over the whole population.
//!
//! ```text
//! ① flocking pass   every slot: reset → scan → steer     (parallel)
//! ② barrier         accelerations copied into the bodies
//! ③ probe pass      sphere-cast along forward per agent   (sequential)
//! ```
//!
//! Phase ① reads a `&[Body]` snapshot that nothing mutates until the fan-out
//! has returned, and each task owns exactly one accumulator slot.  The result
//! for agent `i` is a pure function of `(i, snapshot, weights)`, so thread
//! count and scheduling order cannot change it.

use log::{debug, warn};

use flock_agent::{AgentStore, FlockView};
use flock_core::SteeringWeights;
use flock_kernel::{flock_slot, run_collision_pass};
use flock_query::QueryProvider;

use crate::SimResult;
#[cfg(feature = "parallel")]
use crate::SimError;

/// Counters gathered while running one step.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct StepStats {
    /// Agents processed.
    pub agents: usize,
    /// Sum of every agent's flockmate count.
    pub flockmates: u64,
    /// Agents whose probe hit an obstacle.
    pub probe_hits: usize,
}

/// Runs the three phases of a step against an allocated [`AgentStore`].
pub struct StepExecutor {
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl StepExecutor {
    /// `Some(n)` builds a dedicated pool of `n` workers; `None` uses Rayon's
    /// global pool.  Ignored without the `parallel` feature.
    pub fn new(num_threads: Option<usize>) -> SimResult<Self> {
        #[cfg(feature = "parallel")]
        {
            let pool = match num_threads {
                Some(n) => Some(
                    rayon::ThreadPoolBuilder::new()
                        .num_threads(n)
                        .thread_name(|i| format!("flock-worker-{i}"))
                        .build()
                        .map_err(|e| SimError::ThreadPool(e.to_string()))?,
                ),
                None => None,
            };
            debug!("step executor: {} worker threads", match &pool {
                Some(p) => p.current_num_threads(),
                None    => rayon::current_num_threads(),
            });
            Ok(Self { pool })
        }

        #[cfg(not(feature = "parallel"))]
        {
            if let Some(n) = num_threads {
                debug!("step executor: sequential build, ignoring num_threads = {n}");
            }
            Ok(Self {})
        }
    }

    /// Run one step: flocking pass, barrier, probe pass.
    ///
    /// # Errors
    ///
    /// [`SimError::Store`](crate::SimError::Store) if the store is not
    /// allocated, [`SimError::Query`](crate::SimError::Query) if the provider
    /// fails during the probe pass.  Accelerations from the flocking pass have
    /// already been committed when a probe error is returned.
    pub fn run<P: QueryProvider + ?Sized>(
        &self,
        store:    &mut AgentStore,
        weights:  &SteeringWeights,
        provider: &P,
    ) -> SimResult<StepStats> {
        // ① flocking pass
        self.flocking_pass(store.flock_view()?, weights);

        // ② barrier
        store.commit_accelerations()?;
        let flockmates = store
            .accumulators()?
            .iter()
            .map(|acc| acc.flockmates as u64)
            .sum();

        // ③ probe pass
        let probe_hits = run_collision_pass(store.probe_view()?, provider).map_err(|e| {
            warn!("collision probe aborted: {e}");
            e
        })?;

        Ok(StepStats { agents: store.len(), flockmates, probe_hits })
    }

    fn flocking_pass(&self, view: FlockView<'_>, weights: &SteeringWeights) {
        let FlockView { bodies, perception, accumulators } = view;

        #[cfg(not(feature = "parallel"))]
        {
            for (i, slot) in accumulators.iter_mut().enumerate() {
                slot.reset();
                flock_slot(i, bodies, perception, weights, slot);
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            match &self.pool {
                Some(pool) => pool.install(|| {
                    accumulators.par_iter_mut().enumerate().for_each(|(i, slot)| {
                        slot.reset();
                        flock_slot(i, bodies, perception, weights, slot);
                    })
                }),
                None => accumulators.par_iter_mut().enumerate().for_each(|(i, slot)| {
                    slot.reset();
                    flock_slot(i, bodies, perception, weights, slot);
                }),
            }
        }
    }
}
