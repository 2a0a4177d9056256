//! Per-agent record types.

use flock_core::{FlockError, FlockResult, FlockSettings, LayerMask, Quat, Vec3};

// ── Body ──────────────────────────────────────────────────────────────────────

/// Kinematic state.  Read by every task during the flocking pass; written
/// only at the barrier (acceleration) and by the integrator.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    pub position:     Vec3,
    /// Facing axis; the collision probe is cast along it.
    pub forward:      Vec3,
    /// Direction of travel; summed into flockmates' heading.
    pub direction:    Vec3,
    pub velocity:     Vec3,
    /// Steering acceleration produced by the last step.
    pub acceleration: Vec3,
    pub rotation:     Quat,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            position:     Vec3::ZERO,
            forward:      Vec3::Z,
            direction:    Vec3::ZERO,
            velocity:     Vec3::ZERO,
            acceleration: Vec3::ZERO,
            rotation:     Quat::IDENTITY,
        }
    }
}

impl Body {
    /// Body at `position` facing and travelling along `direction`.
    ///
    /// `forward` is the unit facing axis; a zero `direction` keeps the
    /// default +Z facing.
    pub fn new(position: Vec3, direction: Vec3) -> Self {
        let facing = direction.normalize_or_zero();
        let rotation = if facing == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(Vec3::Z, facing)
        };
        Self {
            position,
            forward: rotation * Vec3::Z,
            direction,
            rotation,
            ..Self::default()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }
}

// ── Perception ────────────────────────────────────────────────────────────────

/// Perception parameters, copied from the shared settings at spawn time.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Perception {
    pub bounds_radius:       f32,
    pub view_radius:         f32,
    pub avoid_radius:        f32,
    pub collision_avoid_dst: f32,
    pub obstacle_mask:       LayerMask,
}

impl Perception {
    /// Every radius and distance must be finite and non-negative.
    pub fn validate(&self) -> FlockResult<()> {
        let scalars = [
            ("bounds_radius",       self.bounds_radius),
            ("view_radius",         self.view_radius),
            ("avoid_radius",        self.avoid_radius),
            ("collision_avoid_dst", self.collision_avoid_dst),
        ];
        for (name, value) in scalars {
            if !value.is_finite() || value < 0.0 {
                return Err(FlockError::InvalidSetting { name, value });
            }
        }
        Ok(())
    }

    pub fn from_settings(settings: &FlockSettings, obstacle_mask: LayerMask) -> Self {
        Self {
            bounds_radius:       settings.bounds_radius,
            view_radius:         settings.view_radius,
            avoid_radius:        settings.avoid_radius,
            collision_avoid_dst: settings.collision_avoid_dst,
            obstacle_mask,
        }
    }
}

impl Default for Perception {
    fn default() -> Self {
        Self::from_settings(&FlockSettings::default(), LayerMask::ALL)
    }
}

// ── FlockAccumulators ─────────────────────────────────────────────────────────

/// Per-step neighbour sums plus the steering result derived from them.
///
/// Owned by exactly one task during the flocking pass.  Zeroed at the start
/// of every step.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlockAccumulators {
    /// Sum of flockmates' `direction`.
    pub flock_heading:      Vec3,
    /// Sum of flockmates' `position` (not yet averaged).
    pub flock_center:       Vec3,
    /// Sum of `-offset / sqr_dst` over neighbours inside `avoid_radius`.
    pub separation_heading: Vec3,
    pub flockmates:         u32,
    /// Steering result for this step; copied into `Body::acceleration` once
    /// every task has finished.
    pub acceleration:       Vec3,
}

impl FlockAccumulators {
    pub const ZERO: FlockAccumulators = FlockAccumulators {
        flock_heading:      Vec3::ZERO,
        flock_center:       Vec3::ZERO,
        separation_heading: Vec3::ZERO,
        flockmates:         0,
        acceleration:       Vec3::ZERO,
    };

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::ZERO;
    }
}

// ── Avoidance ─────────────────────────────────────────────────────────────────

/// Collision-probe output, consumed by the kinematic integrator.
///
/// The probe only ever writes `direction`; `force` is carried for
/// integrators that derive one.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Avoidance {
    pub direction: Vec3,
    pub force:     Vec3,
}

// ── AgentRecord ───────────────────────────────────────────────────────────────

/// Everything the store holds for one agent, as a single value.
///
/// This is the unit the spawner produces and [`AgentStore::record`]
/// reassembles; inside the store the fields live in separate arrays.
///
/// [`AgentStore::record`]: crate::AgentStore::record
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentRecord {
    pub body:       Body,
    pub perception: Perception,
    pub flock:      FlockAccumulators,
    pub avoidance:  Avoidance,
    /// Reserved for goal seeking; never read or written by the kernel.
    pub target:     Option<Vec3>,
}

impl AgentRecord {
    pub fn new(body: Body, perception: Perception) -> Self {
        Self {
            body,
            perception,
            ..Self::default()
        }
    }
}
