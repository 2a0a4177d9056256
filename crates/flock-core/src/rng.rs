//! Seeded randomness for spawning.
//!
//! Every agent draws from its own `SmallRng`, seeded from the run seed and
//! the agent's slot:
//!
//! ```text
//! seed(i) = run_seed ^ (i * 0x9e37_79b9_7f4a_7c15)
//! ```
//!
//! The multiplier is the golden-ratio constant, so neighbouring slots land
//! far apart in seed space.  Since nothing else feeds the stream, an agent's
//! spawn position is fixed by `(run_seed, slot)` alone, whatever batch it
//! was produced in.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// Random stream owned by one agent slot.
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(run_seed: u64, agent: AgentId) -> Self {
        let mixed = run_seed ^ u64::from(agent.0).wrapping_mul(GOLDEN_GAMMA);
        AgentRng(SmallRng::seed_from_u64(mixed))
    }

    /// Uniform point inside the unit ball (rejection sampling).
    pub fn inside_unit_sphere(&mut self) -> Vec3 {
        loop {
            let p = Vec3::new(
                self.0.gen_range(-1.0..=1.0),
                self.0.gen_range(-1.0..=1.0),
                self.0.gen_range(-1.0..=1.0),
            );
            if p.length_squared() <= 1.0 {
                return p;
            }
        }
    }
}
