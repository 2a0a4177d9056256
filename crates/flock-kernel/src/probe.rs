//! Forward collision probe.
//!
//! Independent of the flocking pass: it reads position, forward axis, and
//! perception only.  A hit records the agent's own forward axis as its
//! avoidance direction.  No steering-away vector is derived and nothing is
//! added to the acceleration; integrators decide what to do with it.

use flock_agent::{Avoidance, Body, Perception, ProbeView};
use flock_query::{QueryProvider, QueryResult};

/// Sweep the agent's bounding sphere along `forward` out to
/// `collision_avoid_dst`, filtered by its obstacle mask.
#[inline]
pub fn is_heading_for_collision<P: QueryProvider + ?Sized>(
    body:       &Body,
    perception: &Perception,
    provider:   &P,
) -> QueryResult<bool> {
    let hit = provider.sphere_cast(
        body.position,
        perception.bounds_radius,
        body.forward,
        perception.collision_avoid_dst,
        perception.obstacle_mask,
    )?;
    Ok(hit.is_some())
}

/// Probe one agent.  On a hit, `avoidance.direction = forward`; otherwise
/// `avoidance` is left as it was.  Returns whether it hit.
pub fn probe_agent<P: QueryProvider + ?Sized>(
    body:       &Body,
    perception: &Perception,
    avoidance:  &mut Avoidance,
    provider:   &P,
) -> QueryResult<bool> {
    let hit = is_heading_for_collision(body, perception, provider)?;
    if hit {
        avoidance.direction = body.forward;
    }
    Ok(hit)
}

/// Probe every agent in slot order.  Stops at the first provider error.
///
/// Returns the number of agents that hit something.
pub fn run_collision_pass<P: QueryProvider + ?Sized>(view: ProbeView<'_>, provider: &P) -> QueryResult<usize> {
    let mut hits = 0;
    for ((body, perception), avoidance) in view
        .bodies
        .iter()
        .zip(view.perception.iter())
        .zip(view.avoidance.iter_mut())
    {
        if probe_agent(body, perception, avoidance, provider)? {
            hits += 1;
        }
    }
    Ok(hits)
}
