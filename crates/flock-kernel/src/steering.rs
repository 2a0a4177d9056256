//! Steering model: turns neighbour sums into one bounded acceleration.

use flock_agent::{Body, FlockAccumulators};
use flock_core::{SteerClamp, SteeringWeights, Vec3};

/// Steering needed to turn `velocity` toward `target` at full speed.
///
/// `normalize(target) * max_speed - velocity`, then bounded according to
/// `weights.clamp`:
///
/// * [`SteerClamp::Axiswise`]: each component clamped into
///   `[0, max_steer_force]`.  Negative components become zero.
/// * [`SteerClamp::Magnitude`]: length limited to `max_steer_force`.
///
/// A zero `target` normalises to zero, leaving `-velocity` to be clamped.
#[inline]
pub fn steer_towards(target: Vec3, velocity: Vec3, weights: &SteeringWeights) -> Vec3 {
    let v = target.normalize_or_zero() * weights.max_speed - velocity;
    match weights.clamp {
        SteerClamp::Axiswise  => v.clamp(Vec3::ZERO, Vec3::splat(weights.max_steer_force)),
        SteerClamp::Magnitude => v.clamp_length_max(weights.max_steer_force),
    }
}

/// The three weighted force terms for one agent.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct SteeringForces {
    pub alignment:  Vec3,
    pub cohesion:   Vec3,
    pub separation: Vec3,
}

impl SteeringForces {
    #[inline]
    pub fn total(&self) -> Vec3 {
        self.alignment + self.cohesion + self.separation
    }
}

/// Weighted alignment, cohesion, and separation forces.
///
/// Returns `None` when the agent has no flockmates.
pub fn steering_forces(
    acc:     &FlockAccumulators,
    body:    &Body,
    weights: &SteeringWeights,
) -> Option<SteeringForces> {
    if acc.flockmates == 0 {
        return None;
    }

    let center = acc.flock_center / acc.flockmates as f32;
    let offset_to_center = center - body.position;

    Some(SteeringForces {
        alignment:  steer_towards(acc.flock_heading, body.velocity, weights) * weights.align_weight,
        cohesion:   steer_towards(offset_to_center, body.velocity, weights) * weights.cohesion_weight,
        separation: steer_towards(acc.separation_heading, body.velocity, weights) * weights.separate_weight,
    })
}

/// Sum of [`steering_forces`], or zero for an agent with no flockmates.
#[inline]
pub fn steering_acceleration(acc: &FlockAccumulators, body: &Body, weights: &SteeringWeights) -> Vec3 {
    steering_forces(acc, body, weights).map_or(Vec3::ZERO, |f| f.total())
}
