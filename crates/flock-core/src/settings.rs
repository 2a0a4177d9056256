//! Shared flock settings and top-level simulation configuration.
//!
//! `FlockSettings` plays the role of the settings asset every spawner points
//! at: perception parameters are copied from it into each agent record at
//! spawn time, and the steering weights are read from it once per step.

use crate::{FlockError, FlockResult};

// ── SteerClamp ────────────────────────────────────────────────────────────────

/// How `steer_towards` bounds its output.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SteerClamp {
    /// Clamp every component independently into `[0, max_steer_force]`.
    ///
    /// Negative components are clipped to zero and the overall magnitude may
    /// reach `sqrt(3) * max_steer_force`.  This is the reference behaviour.
    #[default]
    Axiswise,

    /// Scale the vector down so its length is at most `max_steer_force`.
    ///
    /// The conventional boids formulation.  Opt-in deviation from the
    /// reference behaviour.
    Magnitude,
}

// ── SteeringWeights ───────────────────────────────────────────────────────────

/// The subset of [`FlockSettings`] consumed by the steering model.
///
/// Copied out once per step so the parallel pass shares a small `Copy` value
/// instead of the whole settings struct.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteeringWeights {
    pub align_weight:    f32,
    pub cohesion_weight: f32,
    pub separate_weight: f32,
    pub max_speed:       f32,
    pub max_steer_force: f32,
    pub clamp:           SteerClamp,
}

// ── FlockSettings ─────────────────────────────────────────────────────────────

/// Per-flock tuning shared by every agent spawned from the same spawner.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlockSettings {
    /// Radius of the sphere swept by the collision probe.
    pub bounds_radius: f32,
    /// Flockmate detection range.
    pub view_radius: f32,
    /// Separation trigger range.  Only meaningful up to `view_radius`.
    pub avoid_radius: f32,
    /// How far ahead the collision probe looks.
    pub collision_avoid_dst: f32,

    pub align_weight:    f32,
    pub cohesion_weight: f32,
    pub separate_weight: f32,

    /// Lower speed bound used by kinematic integrators.
    pub min_speed: f32,
    pub max_speed: f32,
    pub max_steer_force: f32,

    pub steer_clamp: SteerClamp,
}

impl Default for FlockSettings {
    fn default() -> Self {
        Self {
            bounds_radius:       0.27,
            view_radius:         2.5,
            avoid_radius:        1.0,
            collision_avoid_dst: 5.0,
            align_weight:        1.0,
            cohesion_weight:     1.0,
            separate_weight:     1.0,
            min_speed:           2.0,
            max_speed:           5.0,
            max_steer_force:     3.0,
            steer_clamp:         SteerClamp::Axiswise,
        }
    }
}

impl FlockSettings {
    /// Check every scalar is finite and non-negative and that
    /// `min_speed <= max_speed`.
    ///
    /// `avoid_radius` may exceed `view_radius`; separation is only applied
    /// to flockmates, so the effective avoid range is capped at the view
    /// range.
    pub fn validate(&self) -> FlockResult<()> {
        let scalars = [
            ("bounds_radius",       self.bounds_radius),
            ("view_radius",         self.view_radius),
            ("avoid_radius",        self.avoid_radius),
            ("collision_avoid_dst", self.collision_avoid_dst),
            ("align_weight",        self.align_weight),
            ("cohesion_weight",     self.cohesion_weight),
            ("separate_weight",     self.separate_weight),
            ("min_speed",           self.min_speed),
            ("max_speed",           self.max_speed),
            ("max_steer_force",     self.max_steer_force),
        ];
        for (name, value) in scalars {
            if !value.is_finite() || value < 0.0 {
                return Err(FlockError::InvalidSetting { name, value });
            }
        }

        if self.min_speed > self.max_speed {
            return Err(FlockError::Config(format!(
                "min_speed {} exceeds max_speed {}",
                self.min_speed, self.max_speed
            )));
        }
        Ok(())
    }

    /// Steering weights for one step.
    #[inline]
    pub fn weights(&self) -> SteeringWeights {
        SteeringWeights {
            align_weight:    self.align_weight,
            cohesion_weight: self.cohesion_weight,
            separate_weight: self.separate_weight,
            max_speed:       self.max_speed,
            max_steer_force: self.max_steer_force,
            clamp:           self.steer_clamp,
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a TOML/JSON file by the application crate (with the
/// `serde` feature) and passed to the simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Shared steering weights and default perception parameters.
    pub settings: FlockSettings,

    /// Master RNG seed.  The same seed always produces the same population.
    pub seed: u64,

    /// Worker thread count for the parallel pass.  `None` uses all logical
    /// cores via Rayon's global pool.
    pub num_threads: Option<usize>,

    /// Upper bound on agents produced by one spawn batch.
    pub max_spawn_per_batch: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            settings:            FlockSettings::default(),
            seed:                0,
            num_threads:         None,
            max_spawn_per_batch: 1000,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> FlockResult<()> {
        self.settings.validate()?;
        if self.max_spawn_per_batch == 0 {
            return Err(FlockError::Config("max_spawn_per_batch must be at least 1".into()));
        }
        if self.num_threads == Some(0) {
            return Err(FlockError::Config("num_threads must be at least 1 when set".into()));
        }
        Ok(())
    }
}
