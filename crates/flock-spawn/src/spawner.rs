//! Spawner definitions.

use flock_core::{FlockError, FlockResult, FlockSettings, LayerMask, Vec3};

/// One spawn volume: `population` agents placed uniformly inside a sphere.
///
/// Each agent copies its perception parameters from `settings` and tests
/// obstacles on `obstacle_mask`, both at spawn time and when probing.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnerInfo {
    pub origin:        Vec3,
    pub spawn_radius:  f32,
    pub population:    u32,
    pub settings:      FlockSettings,
    pub obstacle_mask: LayerMask,
}

impl SpawnerInfo {
    /// Spawner with default settings that collides with every layer.
    pub fn new(origin: Vec3, spawn_radius: f32, population: u32) -> Self {
        Self {
            origin,
            spawn_radius,
            population,
            settings:      FlockSettings::default(),
            obstacle_mask: LayerMask::ALL,
        }
    }

    pub fn with_settings(mut self, settings: FlockSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_obstacle_mask(mut self, mask: LayerMask) -> Self {
        self.obstacle_mask = mask;
        self
    }

    pub fn validate(&self) -> FlockResult<()> {
        if !self.origin.is_finite() {
            return Err(FlockError::Config(format!("spawner origin {} is not finite", self.origin)));
        }
        if !self.spawn_radius.is_finite() || self.spawn_radius < 0.0 {
            return Err(FlockError::InvalidSetting { name: "spawn_radius", value: self.spawn_radius });
        }
        self.settings.validate()
    }
}
