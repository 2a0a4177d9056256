//! Exhaustive neighbour scan.
//!
//! There is no spatial index: agent `i` looks at every other agent, so a
//! full step costs O(n²).  All range tests compare squared distances.

use flock_agent::{Body, FlockAccumulators, Perception};

/// Fold every other agent's contribution into `acc` for agent `index`.
///
/// For each `j != index` with `offset = pos(j) - pos(index)` and
/// `sqr = offset · offset`:
///
/// * `sqr < view_radius²`: one more flockmate; its `direction` adds to the
///   heading sum and its `position` to the centre sum.
/// * additionally `sqr < avoid_radius²`: `offset / sqr` is subtracted from
///   the separation sum, so repulsion grows as `1 / distance`.
///
/// Coincident agents (`sqr == 0`) still count as flockmates but contribute
/// no separation, since the repulsion term is undefined there.
///
/// `acc` is not cleared first.  The caller resets it once per step.
pub fn scan_neighbors(index: usize, bodies: &[Body], perception: &Perception, acc: &mut FlockAccumulators) {
    let me = bodies[index].position;
    let view_sq  = perception.view_radius * perception.view_radius;
    let avoid_sq = perception.avoid_radius * perception.avoid_radius;

    for (j, other) in bodies.iter().enumerate() {
        if j == index {
            continue;
        }

        let offset = other.position - me;
        let sqr_dst = offset.length_squared();

        if sqr_dst < view_sq {
            acc.flockmates += 1;
            acc.flock_heading += other.direction;
            acc.flock_center += other.position;

            if sqr_dst < avoid_sq && sqr_dst > 0.0 {
                acc.separation_heading -= offset / sqr_dst;
            }
        }
    }
}
