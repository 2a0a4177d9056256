//! Resumable spawn batches.

use log::{debug, trace};

use flock_agent::{AgentRecord, Body, Perception};
use flock_core::{AgentId, AgentRng};
use flock_query::QueryProvider;

use crate::{SpawnError, SpawnResult, SpawnerInfo};

// ── SpawnCursor ───────────────────────────────────────────────────────────────

/// Position in a [`SpawnPlan`]: which spawner, how far into it, and how many
/// agents have been produced overall.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct SpawnCursor {
    pub spawner:  usize,
    pub offset:   u32,
    pub produced: u32,
}

impl SpawnCursor {
    pub const START: SpawnCursor = SpawnCursor { spawner: 0, offset: 0, produced: 0 };
}

// ── SpawnBatch ────────────────────────────────────────────────────────────────

/// Output of one [`SpawnPlan::next_batch`] call.
#[derive(Debug)]
pub struct SpawnBatch {
    /// Initialised records, in global agent order.
    pub records: Vec<AgentRecord>,
    /// Where the following batch starts.
    pub next: SpawnCursor,
    /// `false` once every spawner is exhausted.
    pub more: bool,
}

// ── SpawnPlan ─────────────────────────────────────────────────────────────────

/// Validated spawners plus the run seed and batch bound.
pub struct SpawnPlan {
    spawners:      Vec<SpawnerInfo>,
    seed:          u64,
    max_per_batch: usize,
    total:         u32,
}

impl SpawnPlan {
    /// Validate every spawner and the combined population.
    ///
    /// A `max_per_batch` of zero is treated as one.
    pub fn new(spawners: Vec<SpawnerInfo>, seed: u64, max_per_batch: usize) -> SpawnResult<Self> {
        for s in &spawners {
            s.validate()?;
        }
        let total: u64 = spawners.iter().map(|s| s.population as u64).sum();
        let total = u32::try_from(total).map_err(|_| SpawnError::PopulationTooLarge(total))?;

        debug!("spawn plan: {} spawners, {total} agents, batches of {max_per_batch}", spawners.len());
        Ok(Self {
            spawners,
            seed,
            max_per_batch: max_per_batch.max(1),
            total,
        })
    }

    pub fn spawners(&self) -> &[SpawnerInfo] {
        &self.spawners
    }

    /// Sum of every spawner's population.
    pub fn total_population(&self) -> usize {
        self.total as usize
    }

    /// Produce up to `max_per_batch` records starting at `cursor`.
    ///
    /// # Errors
    ///
    /// Returns the first obstacle-query failure.  The cursor passed in is
    /// still valid, so the caller may retry the same batch.
    pub fn next_batch<P: QueryProvider + ?Sized>(
        &self,
        cursor:   SpawnCursor,
        provider: &P,
    ) -> SpawnResult<SpawnBatch> {
        let remaining = self.total.saturating_sub(cursor.produced) as usize;
        let mut records = Vec::with_capacity(remaining.min(self.max_per_batch));
        let mut cur = self.skip_exhausted(cursor);

        while records.len() < self.max_per_batch {
            let Some(spawner) = self.spawners.get(cur.spawner) else {
                break;
            };
            records.push(spawn_one(spawner, self.seed, AgentId(cur.produced), provider)?);
            cur.offset += 1;
            cur.produced += 1;
            cur = self.skip_exhausted(cur);
        }

        let more = cur.spawner < self.spawners.len();
        trace!("spawned batch of {} agents ({} so far, more: {more})", records.len(), cur.produced);
        Ok(SpawnBatch { records, next: cur, more })
    }

    /// Run every batch back to back.
    pub fn spawn_all<P: QueryProvider + ?Sized>(&self, provider: &P) -> SpawnResult<Vec<AgentRecord>> {
        let mut all = Vec::with_capacity(self.total_population());
        let mut cursor = SpawnCursor::START;
        loop {
            let batch = self.next_batch(cursor, provider)?;
            all.extend(batch.records);
            if !batch.more {
                return Ok(all);
            }
            cursor = batch.next;
        }
    }

    /// Advance past spawners with nothing left to produce.
    fn skip_exhausted(&self, mut cur: SpawnCursor) -> SpawnCursor {
        while let Some(s) = self.spawners.get(cur.spawner) {
            if cur.offset < s.population {
                break;
            }
            cur.spawner += 1;
            cur.offset = 0;
        }
        cur
    }
}

/// Place one agent inside `spawner`'s sphere.
///
/// If the segment from the spawner origin to the sampled point crosses an
/// obstacle, the agent is pulled back to one unit short of the contact point.
fn spawn_one<P: QueryProvider + ?Sized>(
    spawner:  &SpawnerInfo,
    seed:     u64,
    agent:    AgentId,
    provider: &P,
) -> SpawnResult<AgentRecord> {
    let mut rng = AgentRng::new(seed, agent);
    let mut position = spawner.origin + rng.inside_unit_sphere() * spawner.spawn_radius;
    let direction = rng.inside_unit_sphere();

    if let Some(hit) = provider.linecast(spawner.origin, position, spawner.obstacle_mask)? {
        position = hit.point + (hit.point - position).normalize_or_zero();
    }

    Ok(AgentRecord::new(
        Body::new(position, direction),
        Perception::from_settings(&spawner.settings, spawner.obstacle_mask),
    ))
}
