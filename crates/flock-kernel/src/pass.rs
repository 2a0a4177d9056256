//! One unit of work in the flocking pass.

use flock_agent::{Body, FlockAccumulators, Perception};
use flock_core::SteeringWeights;

use crate::{scan_neighbors, steering_acceleration};

/// Scan neighbours for agent `index` and store its steering acceleration in
/// `slot.acceleration`.
///
/// Reads `bodies` and `perception` only; writes `slot` only.  `slot` must
/// have been reset for this step.
#[inline]
pub fn flock_slot(
    index:      usize,
    bodies:     &[Body],
    perception: &[Perception],
    weights:    &SteeringWeights,
    slot:       &mut FlockAccumulators,
) {
    scan_neighbors(index, bodies, &perception[index], slot);
    slot.acceleration = steering_acceleration(slot, &bodies[index], weights);
}
