//! Unit tests for flock-kernel.

use flock_agent::{Body, FlockAccumulators, Perception};
use flock_core::{FlockSettings, LayerMask, SteerClamp, SteeringWeights, Vec3};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn weights() -> SteeringWeights {
    FlockSettings::default().weights()
}

fn perception(view: f32, avoid: f32) -> Perception {
    Perception {
        view_radius: view,
        avoid_radius: avoid,
        ..Perception::default()
    }
}

fn body_at(x: f32, y: f32, z: f32) -> Body {
    Body::new(Vec3::new(x, y, z), Vec3::Z)
}

fn approx_vec(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

/// Run `flock_slot` for every index in `order`, returning slots by index.
fn flock_all(bodies: &[Body], perception: &[Perception], order: &[usize]) -> Vec<FlockAccumulators> {
    let mut slots = vec![FlockAccumulators::ZERO; bodies.len()];
    for &i in order {
        crate::flock_slot(i, bodies, perception, &weights(), &mut slots[i]);
    }
    slots
}

// ── NeighborScan ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod neighbor {
    use super::*;
    use crate::scan_neighbors;

    #[test]
    fn three_agent_scenario() {
        let bodies = [body_at(0.0, 0.0, 0.0), body_at(1.0, 0.0, 0.0), body_at(10.0, 0.0, 0.0)];
        let p = perception(5.0, 2.0);

        let mut acc0 = FlockAccumulators::ZERO;
        let mut acc1 = FlockAccumulators::ZERO;
        let mut acc2 = FlockAccumulators::ZERO;
        scan_neighbors(0, &bodies, &p, &mut acc0);
        scan_neighbors(1, &bodies, &p, &mut acc1);
        scan_neighbors(2, &bodies, &p, &mut acc2);

        assert_eq!(acc0.flockmates, 1);
        assert_eq!(acc1.flockmates, 1);
        assert_eq!(acc2.flockmates, 0);

        assert_eq!(acc0.flock_center, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(acc1.flock_center, Vec3::ZERO);
        // Mutual separation, each pointing away from the other.
        assert_eq!(acc0.separation_heading, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(acc1.separation_heading, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(acc2, FlockAccumulators::ZERO);
    }

    #[test]
    fn separation_scales_with_inverse_distance() {
        let p = perception(10.0, 5.0);
        let magnitude_at = |d: f32| {
            let bodies = [body_at(0.0, 0.0, 0.0), body_at(d, 0.0, 0.0)];
            let mut acc = FlockAccumulators::ZERO;
            scan_neighbors(0, &bodies, &p, &mut acc);
            assert!(acc.separation_heading.x < 0.0, "must point away from the neighbour");
            acc.separation_heading.length()
        };
        let near = magnitude_at(0.5);
        let far = magnitude_at(1.0);
        assert!((near - 2.0).abs() < 1e-6);
        assert!((far - 1.0).abs() < 1e-6);
        // Halving the distance doubles the push (1/d, not 1/d²).
        assert!((near / far - 2.0).abs() < 1e-5);
    }

    #[test]
    fn view_but_not_avoid_range() {
        let bodies = [body_at(0.0, 0.0, 0.0), body_at(0.0, 3.0, 0.0)];
        let mut acc = FlockAccumulators::ZERO;
        scan_neighbors(0, &bodies, &perception(5.0, 2.0), &mut acc);
        assert_eq!(acc.flockmates, 1);
        assert_eq!(acc.separation_heading, Vec3::ZERO);
    }

    #[test]
    fn boundary_is_exclusive() {
        let bodies = [body_at(0.0, 0.0, 0.0), body_at(5.0, 0.0, 0.0)];
        let mut acc = FlockAccumulators::ZERO;
        scan_neighbors(0, &bodies, &perception(5.0, 2.0), &mut acc);
        assert_eq!(acc.flockmates, 0);
    }

    #[test]
    fn heading_sums_neighbour_directions() {
        let mut a = body_at(1.0, 0.0, 0.0);
        a.direction = Vec3::new(0.0, 2.0, 0.0);
        let mut b = body_at(-1.0, 0.0, 0.0);
        b.direction = Vec3::new(1.0, 0.0, 0.0);
        let bodies = [body_at(0.0, 0.0, 0.0), a, b];
        let mut acc = FlockAccumulators::ZERO;
        scan_neighbors(0, &bodies, &perception(5.0, 0.0), &mut acc);
        assert_eq!(acc.flock_heading, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(acc.flock_center, Vec3::ZERO);
    }

    #[test]
    fn coincident_agents_stay_finite() {
        let bodies = [body_at(2.0, 2.0, 2.0), body_at(2.0, 2.0, 2.0)];
        let mut acc = FlockAccumulators::ZERO;
        scan_neighbors(0, &bodies, &perception(5.0, 2.0), &mut acc);
        assert_eq!(acc.flockmates, 1);
        assert!(acc.separation_heading.is_finite());
    }

    #[test]
    fn single_agent_has_no_neighbours() {
        let bodies = [body_at(0.0, 0.0, 0.0)];
        let mut acc = FlockAccumulators::ZERO;
        scan_neighbors(0, &bodies, &perception(5.0, 2.0), &mut acc);
        assert_eq!(acc, FlockAccumulators::ZERO);
    }
}

// ── SteeringModel ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod steering {
    use super::*;
    use crate::{steer_towards, steering_acceleration, steering_forces};

    #[test]
    fn axiswise_output_is_within_bounds() {
        let w = weights();
        let samples = [-7.5f32, -1.0, -0.1, 0.0, 0.3, 2.0, 11.0];
        for &tx in &samples {
            for &ty in &samples {
                for &vz in &samples {
                    let target = Vec3::new(tx, ty, -tx);
                    let velocity = Vec3::new(ty, vz, tx * 0.5);
                    let s = steer_towards(target, velocity, &w);
                    for c in s.to_array() {
                        assert!(
                            (0.0..=w.max_steer_force).contains(&c),
                            "component {c} out of bounds for target {target} velocity {velocity}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn axiswise_clips_negative_components() {
        let s = steer_towards(-Vec3::X, Vec3::ZERO, &weights());
        assert_eq!(s, Vec3::ZERO);
    }

    #[test]
    fn axiswise_does_not_bound_magnitude() {
        let w = weights();
        let s = steer_towards(Vec3::ONE, -Vec3::splat(10.0), &w);
        assert_eq!(s, Vec3::splat(w.max_steer_force));
        assert!(s.length() > w.max_steer_force);
    }

    #[test]
    fn magnitude_clamp_bounds_length() {
        let w = SteeringWeights { clamp: SteerClamp::Magnitude, ..weights() };
        let s = steer_towards(-Vec3::X, Vec3::new(0.0, 4.0, 0.0), &w);
        assert!((s.length() - w.max_steer_force).abs() < 1e-5);
        // Negative components survive under the magnitude clamp.
        assert!(s.x < 0.0 && s.y < 0.0);
    }

    #[test]
    fn zero_target_falls_back_to_negated_velocity() {
        let s = steer_towards(Vec3::ZERO, Vec3::new(1.0, -1.0, 0.0), &weights());
        assert_eq!(s, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn no_flockmates_means_zero_acceleration() {
        let acc = FlockAccumulators { flock_heading: Vec3::X, ..FlockAccumulators::ZERO };
        let body = body_at(3.0, 0.0, 0.0).with_velocity(Vec3::new(-4.0, 0.0, 0.0));
        assert!(steering_forces(&acc, &body, &weights()).is_none());
        assert_eq!(steering_acceleration(&acc, &body, &weights()), Vec3::ZERO);
    }

    #[test]
    fn worked_example() {
        // One neighbour at +X heading +Z; agent at rest at the origin.
        let acc = FlockAccumulators {
            flock_heading:      Vec3::Z,
            flock_center:       Vec3::X,
            separation_heading: -Vec3::X,
            flockmates:         1,
            acceleration:       Vec3::ZERO,
        };
        let body = body_at(0.0, 0.0, 0.0);
        let forces = steering_forces(&acc, &body, &weights()).unwrap();
        assert_eq!(forces.alignment, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(forces.cohesion, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(forces.separation, Vec3::ZERO);
        assert_eq!(forces.total(), Vec3::new(3.0, 0.0, 3.0));
    }

    #[test]
    fn weights_scale_each_term() {
        let acc = FlockAccumulators {
            flock_heading: Vec3::Z,
            flock_center:  Vec3::X * 2.0,
            flockmates:    2,
            ..FlockAccumulators::ZERO
        };
        let w = SteeringWeights { align_weight: 0.5, cohesion_weight: 2.0, ..weights() };
        let a = steering_acceleration(&acc, &body_at(0.0, 0.0, 0.0), &w);
        assert!(approx_vec(a, Vec3::new(6.0, 0.0, 1.5)), "got {a}");
    }
}

// ── Flocking pass ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod pass {
    use super::*;

    fn cluster() -> (Vec<Body>, Vec<Perception>) {
        let positions = [
            (0.0, 0.0, 0.0),
            (0.6, 0.1, -0.2),
            (1.5, -0.4, 0.3),
            (-0.8, 0.9, 0.0),
            (2.2, 1.1, -1.0),
            (30.0, 0.0, 0.0),
        ];
        let bodies = positions
            .iter()
            .enumerate()
            .map(|(i, &(x, y, z))| {
                let dir = Vec3::new((i as f32).sin(), (i as f32).cos(), 0.3);
                Body::new(Vec3::new(x, y, z), dir).with_velocity(dir * 2.0)
            })
            .collect();
        (bodies, vec![perception(2.5, 1.0); positions.len()])
    }

    #[test]
    fn order_does_not_matter() {
        let (bodies, perception) = cluster();
        let forward: Vec<usize> = (0..bodies.len()).collect();
        let reverse: Vec<usize> = forward.iter().rev().copied().collect();
        let shuffled = [3, 0, 5, 1, 4, 2];
        let a = flock_all(&bodies, &perception, &forward);
        assert_eq!(a, flock_all(&bodies, &perception, &reverse));
        assert_eq!(a, flock_all(&bodies, &perception, &shuffled));
    }

    #[test]
    fn isolated_agent_gets_zero_acceleration() {
        let (bodies, perception) = cluster();
        let slots = flock_all(&bodies, &perception, &[5]);
        assert_eq!(slots[5].flockmates, 0);
        assert_eq!(slots[5].acceleration, Vec3::ZERO);
    }

    #[test]
    fn clustered_agents_steer() {
        let (bodies, perception) = cluster();
        let slots = flock_all(&bodies, &perception, &[0, 1, 2]);
        assert!(slots[0].flockmates >= 2);
        assert_ne!(slots[0].acceleration, Vec3::ZERO);
    }
}

// ── CollisionProbe ────────────────────────────────────────────────────────────

#[cfg(test)]
mod probe {
    use super::*;
    use flock_agent::{AgentRecord, AgentStore, Avoidance};
    use flock_query::{CastHit, NoObstacles, ObstacleFieldBuilder, QueryError, QueryProvider, QueryResult};

    use crate::{is_heading_for_collision, probe_agent, run_collision_pass};

    struct BrokenProvider;

    impl QueryProvider for BrokenProvider {
        fn sphere_cast(&self, _: Vec3, _: f32, _: Vec3, _: f32, _: LayerMask) -> QueryResult<Option<CastHit>> {
            Err(QueryError::Unavailable("physics scene unloaded".into()))
        }
    }

    fn wall_at_z(z: f32) -> flock_query::ObstacleField {
        let mut b = ObstacleFieldBuilder::new();
        b.add_sphere(Vec3::new(0.0, 0.0, z), 1.0, 0);
        b.build()
    }

    #[test]
    fn obstacle_ahead_sets_direction_to_forward() {
        let field = wall_at_z(4.0);
        let body = body_at(0.0, 0.0, 0.0);
        let p = Perception { collision_avoid_dst: 5.0, ..Perception::default() };
        let mut avoidance = Avoidance::default();
        assert!(probe_agent(&body, &p, &mut avoidance, &field).unwrap());
        assert_eq!(avoidance.direction, body.forward);
        assert_eq!(avoidance.force, Vec3::ZERO);
    }

    #[test]
    fn no_obstacle_leaves_direction_unchanged() {
        let field = wall_at_z(40.0);
        let body = body_at(0.0, 0.0, 0.0);
        let p = Perception { collision_avoid_dst: 5.0, ..Perception::default() };
        let before = Avoidance { direction: Vec3::new(0.25, 0.5, 0.0), force: Vec3::ZERO };
        let mut avoidance = before;
        assert!(!probe_agent(&body, &p, &mut avoidance, &field).unwrap());
        assert_eq!(avoidance, before);
    }

    #[test]
    fn mask_excludes_other_layers() {
        let field = wall_at_z(4.0);
        let p = Perception {
            collision_avoid_dst: 5.0,
            obstacle_mask: LayerMask::from_layer(3),
            ..Perception::default()
        };
        assert!(!is_heading_for_collision(&body_at(0.0, 0.0, 0.0), &p, &field).unwrap());
    }

    #[test]
    fn pass_counts_hits_over_store() {
        let field = wall_at_z(4.0);
        let p = Perception { collision_avoid_dst: 5.0, ..Perception::default() };
        let records = vec![
            AgentRecord::new(body_at(0.0, 0.0, 0.0), p),
            AgentRecord::new(Body::new(Vec3::ZERO, -Vec3::Z), p),
            AgentRecord::new(body_at(0.0, 0.0, -3.0), p),
        ];
        let mut store = AgentStore::new();
        store.allocate(records).unwrap();

        let hits = run_collision_pass(store.probe_view().unwrap(), &field).unwrap();
        assert_eq!(hits, 1);
        let avoidance = store.avoidance().unwrap();
        assert_eq!(avoidance[0].direction, store.bodies().unwrap()[0].forward);
        assert_eq!(avoidance[1].direction, Vec3::ZERO);
        // Agent 2's sweep would first touch the wall 5.73 units out; beyond range.
        assert_eq!(avoidance[2].direction, Vec3::ZERO);
    }

    #[test]
    fn provider_errors_propagate() {
        let mut avoidance = Avoidance::default();
        let err = probe_agent(&body_at(0.0, 0.0, 0.0), &Perception::default(), &mut avoidance, &BrokenProvider);
        assert!(matches!(err, Err(QueryError::Unavailable(_))));
    }

    #[test]
    fn empty_store_pass_is_noop() {
        let mut store = AgentStore::new();
        store.allocate(Vec::new()).unwrap();
        assert_eq!(run_collision_pass(store.probe_view().unwrap(), &NoObstacles).unwrap(), 0);
    }

    #[test]
    fn dyn_provider_is_accepted() {
        let field = wall_at_z(4.0);
        let provider: &dyn QueryProvider = &field;
        let p = Perception { collision_avoid_dst: 5.0, ..Perception::default() };
        assert!(is_heading_for_collision(&body_at(0.0, 0.0, 0.0), &p, provider).unwrap());
    }
}
