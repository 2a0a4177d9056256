//! Unit tests for flock-agent.

#[cfg(test)]
mod record {
    use flock_core::{FlockError, FlockSettings, LayerMask, Vec3};

    use crate::{AgentRecord, Body, FlockAccumulators, Perception};

    #[test]
    fn perception_validation() {
        Perception::default().validate().unwrap();
        let wide_avoid = Perception { view_radius: 1.0, avoid_radius: 3.0, ..Perception::default() };
        wide_avoid.validate().unwrap();

        let bad = Perception { collision_avoid_dst: f32::NAN, ..Perception::default() };
        match bad.validate() {
            Err(FlockError::InvalidSetting { name, .. }) => assert_eq!(name, "collision_avoid_dst"),
            other => panic!("expected InvalidSetting, got {other:?}"),
        }
    }

    #[test]
    fn body_faces_direction() {
        let b = Body::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        assert!((b.forward - Vec3::X).length() < 1e-5);
        assert_eq!(b.direction, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(b.velocity, Vec3::ZERO);
    }

    #[test]
    fn zero_direction_keeps_default_facing() {
        let b = Body::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(b.forward, Vec3::Z);
    }

    #[test]
    fn perception_copies_settings() {
        let s = FlockSettings { view_radius: 7.0, ..FlockSettings::default() };
        let p = Perception::from_settings(&s, LayerMask::from_layer(2));
        assert_eq!(p.view_radius, 7.0);
        assert_eq!(p.collision_avoid_dst, s.collision_avoid_dst);
        assert_eq!(p.obstacle_mask, LayerMask(0b100));
    }

    #[test]
    fn accumulators_reset() {
        let mut acc = FlockAccumulators {
            flock_heading: Vec3::ONE,
            flockmates: 3,
            acceleration: Vec3::X,
            ..FlockAccumulators::default()
        };
        acc.reset();
        assert_eq!(acc, FlockAccumulators::ZERO);
    }

    #[test]
    fn new_record_has_no_target() {
        let r = AgentRecord::new(Body::default(), Perception::default());
        assert!(r.target.is_none());
        assert_eq!(r.flock, FlockAccumulators::ZERO);
    }
}

#[cfg(test)]
mod store {
    use flock_core::{AgentId, Vec3};

    use crate::{AgentRecord, AgentStore, Body, Perception, StoreError};

    fn records(n: usize) -> Vec<AgentRecord> {
        (0..n)
            .map(|i| AgentRecord::new(Body::new(Vec3::new(i as f32, 0.0, 0.0), Vec3::X), Perception::default()))
            .collect()
    }

    #[test]
    fn allocate_sets_len() {
        let mut store = AgentStore::new();
        store.allocate(records(4)).unwrap();
        assert!(store.is_allocated());
        assert_eq!(store.len(), 4);
        assert_eq!(store.bodies().unwrap()[3].position.x, 3.0);
    }

    #[test]
    fn double_allocate_fails() {
        let mut store = AgentStore::new();
        store.allocate(records(2)).unwrap();
        assert!(matches!(store.allocate(records(2)), Err(StoreError::AlreadyAllocated)));
        // The original population is untouched.
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn release_unallocated_is_noop() {
        let mut store = AgentStore::new();
        store.release();
        store.release();
        assert!(!store.is_released());
        // Still allocatable afterwards.
        store.allocate(records(1)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn release_is_idempotent() {
        let mut store = AgentStore::new();
        store.allocate(records(3)).unwrap();
        store.release();
        store.release();
        assert!(store.is_released());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn access_after_release_fails() {
        let mut store = AgentStore::new();
        store.allocate(records(3)).unwrap();
        store.release();
        assert!(matches!(store.bodies(), Err(StoreError::Released)));
        assert!(matches!(store.allocate(records(1)), Err(StoreError::Released)));
    }

    #[test]
    fn access_before_allocate_fails() {
        let mut store = AgentStore::new();
        assert!(matches!(store.flock_view(), Err(StoreError::NotAllocated)));
        assert!(store.agent_ids().next().is_none());
    }

    #[test]
    fn empty_population_is_valid() {
        let mut store = AgentStore::new();
        store.allocate(Vec::new()).unwrap();
        assert!(store.is_allocated());
        assert!(store.is_empty());
        assert!(store.flock_view().unwrap().accumulators.is_empty());
    }

    #[test]
    fn record_roundtrip_and_range() {
        let mut store = AgentStore::new();
        let mut input = records(2);
        input[1].target = Some(Vec3::ONE);
        store.allocate(input.clone()).unwrap();
        assert_eq!(store.record(AgentId(1)).unwrap(), input[1]);
        assert!(matches!(
            store.record(AgentId(2)),
            Err(StoreError::OutOfRange { len: 2, .. })
        ));
    }

    #[test]
    fn views_share_length() {
        let mut store = AgentStore::new();
        store.allocate(records(5)).unwrap();
        let view = store.flock_view().unwrap();
        assert_eq!(view.bodies.len(), view.accumulators.len());
        assert_eq!(view.perception.len(), 5);
    }

    #[test]
    fn commit_copies_accelerations() {
        let mut store = AgentStore::new();
        store.allocate(records(2)).unwrap();
        store.flock_view().unwrap().accumulators[1].acceleration = Vec3::Y;
        store.commit_accelerations().unwrap();
        let bodies = store.bodies().unwrap();
        assert_eq!(bodies[0].acceleration, Vec3::ZERO);
        assert_eq!(bodies[1].acceleration, Vec3::Y);
    }

    #[test]
    fn motion_view_writes_bodies() {
        let mut store = AgentStore::new();
        let mut input = records(2);
        input[0].target = Some(Vec3::Z);
        store.allocate(input).unwrap();
        let view = store.motion_view().unwrap();
        assert_eq!(view.targets[0], Some(Vec3::Z));
        view.bodies[1].position = Vec3::splat(7.0);
        assert_eq!(store.bodies().unwrap()[1].position, Vec3::splat(7.0));
    }

    #[test]
    fn targets_set_by_caller_reach_motion_view() {
        let mut store = AgentStore::new();
        assert!(matches!(store.targets_mut(), Err(StoreError::NotAllocated)));
        store.allocate(records(3)).unwrap();
        store.targets_mut().unwrap()[2] = Some(Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(store.targets().unwrap(), &[None, None, Some(Vec3::new(0.0, 5.0, 0.0))]);
        assert_eq!(store.motion_view().unwrap().targets[2], Some(Vec3::new(0.0, 5.0, 0.0)));
        store.release();
        assert!(matches!(store.targets_mut(), Err(StoreError::Released)));
    }

    #[test]
    fn agent_ids_iterator() {
        let mut store = AgentStore::new();
        store.allocate(records(3)).unwrap();
        let ids: Vec<AgentId> = store.agent_ids().collect();
        assert_eq!(ids, vec![AgentId(0), AgentId(1), AgentId(2)]);
    }
}
