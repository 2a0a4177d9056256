//! Fixed-capacity agent storage with an explicit allocate/release lifecycle.
//!
//! # Lifecycle
//!
//! ```text
//! Unallocated ──allocate()──▶ Allocated ──release()──▶ Released
//!      │                                                  ▲
//!      └──────────────────release() (no-op)───────────────┘
//! ```
//!
//! `allocate` may succeed at most once.  `release` is idempotent and never
//! fails.  Every accessor on a store that is not `Allocated` returns
//! [`StoreError::NotAllocated`] (or [`StoreError::Released`]).
//!
//! # Why separate arrays?
//!
//! The flocking pass needs `&[Body]` (every task reads every agent) and
//! `&mut [FlockAccumulators]` (each task writes one slot) at the same time.
//! Keeping them in different boxed slices lets [`AgentStore::flock_view`]
//! hand out both borrows without `unsafe`:
//!
//! ```ignore
//! let view = store.flock_view()?;
//! view.accumulators
//!     .par_iter_mut()
//!     .enumerate()
//!     .for_each(|(i, slot)| scan(i, view.bodies, view.perception, slot));
//! ```
//!
//! The slices are `Box<[T]>`, so nothing can push onto them once allocated.

use log::info;

use flock_core::{AgentId, Vec3};

use crate::{AgentRecord, Avoidance, Body, FlockAccumulators, Perception, StoreError, StoreResult};

// ── Borrow views ──────────────────────────────────────────────────────────────

/// Borrows for the flocking pass: shared snapshot + exclusive accumulators.
pub struct FlockView<'a> {
    pub bodies:       &'a [Body],
    pub perception:   &'a [Perception],
    pub accumulators: &'a mut [FlockAccumulators],
}

/// Borrows for the collision probe: shared snapshot + exclusive avoidance.
pub struct ProbeView<'a> {
    pub bodies:     &'a [Body],
    pub perception: &'a [Perception],
    pub avoidance:  &'a mut [Avoidance],
}

/// Borrows for the integrator: exclusive kinematics + shared probe results.
pub struct MotionView<'a> {
    pub bodies:    &'a mut [Body],
    pub avoidance: &'a [Avoidance],
    pub targets:   &'a [Option<Vec3>],
}

// ── Arrays ────────────────────────────────────────────────────────────────────

/// The per-agent arrays.  Every slice has the same length.
struct AgentArrays {
    bodies:       Box<[Body]>,
    perception:   Box<[Perception]>,
    accumulators: Box<[FlockAccumulators]>,
    avoidance:    Box<[Avoidance]>,
    targets:      Box<[Option<Vec3>]>,
}

impl AgentArrays {
    fn from_records(records: Vec<AgentRecord>) -> Self {
        let n = records.len();
        let mut bodies       = Vec::with_capacity(n);
        let mut perception   = Vec::with_capacity(n);
        let mut accumulators = Vec::with_capacity(n);
        let mut avoidance    = Vec::with_capacity(n);
        let mut targets      = Vec::with_capacity(n);

        for r in records {
            bodies.push(r.body);
            perception.push(r.perception);
            accumulators.push(r.flock);
            avoidance.push(r.avoidance);
            targets.push(r.target);
        }

        Self {
            bodies:       bodies.into_boxed_slice(),
            perception:   perception.into_boxed_slice(),
            accumulators: accumulators.into_boxed_slice(),
            avoidance:    avoidance.into_boxed_slice(),
            targets:      targets.into_boxed_slice(),
        }
    }
}

enum StoreState {
    Unallocated,
    Allocated(AgentArrays),
    Released,
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Contiguous storage for every agent in the flock.
///
/// Exclusively owned by the simulation driver.  `AgentId(i)` addresses slot
/// `i` of every array.
pub struct AgentStore {
    state: StoreState,
}

impl Default for AgentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentStore {
    /// An unallocated store.
    pub fn new() -> Self {
        Self { state: StoreState::Unallocated }
    }

    /// Take ownership of a finalised population.
    ///
    /// # Errors
    ///
    /// [`StoreError::AlreadyAllocated`] on a second call,
    /// [`StoreError::Released`] after [`release`](Self::release), and
    /// [`StoreError::TooManyAgents`] if the population does not fit `AgentId`.
    pub fn allocate(&mut self, records: Vec<AgentRecord>) -> StoreResult<()> {
        match self.state {
            StoreState::Allocated(_) => return Err(StoreError::AlreadyAllocated),
            StoreState::Released     => return Err(StoreError::Released),
            StoreState::Unallocated  => {}
        }
        if u32::try_from(records.len()).is_err() {
            return Err(StoreError::TooManyAgents(records.len()));
        }

        info!("allocating agent store for {} agents", records.len());
        self.state = StoreState::Allocated(AgentArrays::from_records(records));
        Ok(())
    }

    /// Drop the arrays.  Safe to call on an unallocated or already released
    /// store.
    pub fn release(&mut self) {
        match std::mem::replace(&mut self.state, StoreState::Released) {
            StoreState::Allocated(arrays) => {
                info!("released agent store of {} agents", arrays.bodies.len());
            }
            StoreState::Unallocated => {
                // Never allocated: nothing to free, and allocate stays legal.
                self.state = StoreState::Unallocated;
            }
            StoreState::Released => {}
        }
    }

    // ── State queries ─────────────────────────────────────────────────────

    pub fn is_allocated(&self) -> bool {
        matches!(self.state, StoreState::Allocated(_))
    }

    pub fn is_released(&self) -> bool {
        matches!(self.state, StoreState::Released)
    }

    /// Number of agents; zero unless allocated.
    pub fn len(&self) -> usize {
        match &self.state {
            StoreState::Allocated(a) => a.bodies.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterator over all `AgentId`s in ascending slot order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.len() as u32).map(AgentId)
    }

    // ── Access ────────────────────────────────────────────────────────────

    fn arrays(&self) -> StoreResult<&AgentArrays> {
        match &self.state {
            StoreState::Allocated(a) => Ok(a),
            StoreState::Unallocated  => Err(StoreError::NotAllocated),
            StoreState::Released     => Err(StoreError::Released),
        }
    }

    fn arrays_mut(&mut self) -> StoreResult<&mut AgentArrays> {
        match &mut self.state {
            StoreState::Allocated(a) => Ok(a),
            StoreState::Unallocated  => Err(StoreError::NotAllocated),
            StoreState::Released     => Err(StoreError::Released),
        }
    }

    pub fn bodies(&self) -> StoreResult<&[Body]> {
        Ok(&self.arrays()?.bodies)
    }

    pub fn perception(&self) -> StoreResult<&[Perception]> {
        Ok(&self.arrays()?.perception)
    }

    pub fn accumulators(&self) -> StoreResult<&[FlockAccumulators]> {
        Ok(&self.arrays()?.accumulators)
    }

    pub fn avoidance(&self) -> StoreResult<&[Avoidance]> {
        Ok(&self.arrays()?.avoidance)
    }

    pub fn targets(&self) -> StoreResult<&[Option<Vec3>]> {
        Ok(&self.arrays()?.targets)
    }

    /// Targets are never computed by a step; callers set them here for
    /// integrators to read through [`MotionView`].
    pub fn targets_mut(&mut self) -> StoreResult<&mut [Option<Vec3>]> {
        Ok(&mut self.arrays_mut()?.targets)
    }

    /// Split borrow for the flocking pass.
    pub fn flock_view(&mut self) -> StoreResult<FlockView<'_>> {
        let a = self.arrays_mut()?;
        Ok(FlockView {
            bodies:       &a.bodies,
            perception:   &a.perception,
            accumulators: &mut a.accumulators,
        })
    }

    /// Split borrow for the collision probe.
    pub fn probe_view(&mut self) -> StoreResult<ProbeView<'_>> {
        let a = self.arrays_mut()?;
        Ok(ProbeView {
            bodies:     &a.bodies,
            perception: &a.perception,
            avoidance:  &mut a.avoidance,
        })
    }

    /// Split borrow for the integrator.
    pub fn motion_view(&mut self) -> StoreResult<MotionView<'_>> {
        let a = self.arrays_mut()?;
        Ok(MotionView {
            bodies:    &mut a.bodies,
            avoidance: &a.avoidance,
            targets:   &a.targets,
        })
    }

    /// Copy every slot's steering result into its body.
    ///
    /// Called once per step, after every flocking task has completed.
    pub fn commit_accelerations(&mut self) -> StoreResult<()> {
        let a = self.arrays_mut()?;
        for (body, acc) in a.bodies.iter_mut().zip(a.accumulators.iter()) {
            body.acceleration = acc.acceleration;
        }
        Ok(())
    }

    /// Reassemble the full record for one agent.
    pub fn record(&self, agent: AgentId) -> StoreResult<AgentRecord> {
        let a = self.arrays()?;
        let i = agent.index();
        if i >= a.bodies.len() {
            return Err(StoreError::OutOfRange { agent, len: a.bodies.len() });
        }
        Ok(AgentRecord {
            body:       a.bodies[i],
            perception: a.perception[i],
            flock:      a.accumulators[i],
            avoidance:  a.avoidance[i],
            target:     a.targets[i],
        })
    }
}
