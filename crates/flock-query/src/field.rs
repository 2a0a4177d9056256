//! Reference obstacle geometry: spheres on layers, indexed by an R-tree.
//!
//! # Spatial index
//!
//! Each obstacle is stored in an `rstar` R-tree under its axis-aligned
//! bounding box.  A cast first asks the tree for every box intersecting the
//! swept volume's bounding box, then runs the exact ray-vs-sphere test on
//! those candidates only.
//!
//! # Sweep test
//!
//! Sweeping a sphere of radius `r` against an obstacle of radius `R` is the
//! same as casting a ray against the obstacle inflated to `R + r`.  Only the
//! entering intersection counts; obstacles that already contain the origin
//! are skipped.

use rstar::{RTree, RTreeObject, AABB};

use flock_core::{LayerMask, Vec3};

use crate::{CastHit, QueryError, QueryProvider, QueryResult};

// ── Obstacle ──────────────────────────────────────────────────────────────────

/// A solid sphere on one obstacle layer.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub center: Vec3,
    pub radius: f32,
    pub layer:  u8,
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct ObstacleEntry {
    min:   [f32; 3],
    max:   [f32; 3],
    index: usize,
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

// ── ObstacleField ─────────────────────────────────────────────────────────────

/// Static obstacle geometry answering [`QueryProvider`] casts.
///
/// Build with [`ObstacleFieldBuilder`].
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    index:     RTree<ObstacleEntry>,
}

impl ObstacleField {
    /// A field with no obstacles.
    pub fn empty() -> Self {
        ObstacleFieldBuilder::new().build()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    fn candidates(&self, lo: Vec3, hi: Vec3) -> impl Iterator<Item = &Obstacle> + '_ {
        let query = AABB::from_corners(lo.to_array(), hi.to_array());
        self.index
            .locate_in_envelope_intersecting(&query)
            .map(|entry| &self.obstacles[entry.index])
    }
}

impl QueryProvider for ObstacleField {
    fn sphere_cast(
        &self,
        origin:       Vec3,
        radius:       f32,
        direction:    Vec3,
        max_distance: f32,
        mask:         LayerMask,
    ) -> QueryResult<Option<CastHit>> {
        if !origin.is_finite() || !direction.is_finite() {
            return Err(QueryError::InvalidInput(format!(
                "non-finite cast origin {origin} or direction {direction}"
            )));
        }
        if !(radius.is_finite() && radius >= 0.0) || !(max_distance.is_finite() && max_distance >= 0.0) {
            return Err(QueryError::InvalidInput(format!(
                "cast radius {radius} and max_distance {max_distance} must be finite and non-negative"
            )));
        }

        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO || mask.is_empty() || self.obstacles.is_empty() {
            return Ok(None);
        }

        let end = origin + dir * max_distance;
        let pad = Vec3::splat(radius);
        let lo = origin.min(end) - pad;
        let hi = origin.max(end) + pad;

        let mut best: Option<CastHit> = None;
        for obstacle in self.candidates(lo, hi) {
            if !mask.contains_layer(obstacle.layer) {
                continue;
            }
            let Some(t) = entry_distance(origin, dir, obstacle.center, obstacle.radius + radius) else {
                continue;
            };
            if t > max_distance || best.is_some_and(|b| b.distance <= t) {
                continue;
            }
            let sweep_center = origin + dir * t;
            let normal = (sweep_center - obstacle.center).normalize_or_zero();
            best = Some(CastHit {
                point:    obstacle.center + normal * obstacle.radius,
                normal,
                distance: t,
            });
        }
        Ok(best)
    }
}

/// Distance along unit `dir` at which a ray from `origin` enters the sphere
/// (`center`, `radius`).  `None` if it misses or starts inside.
fn entry_distance(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let m = origin - center;
    let c = m.length_squared() - radius * radius;
    if c <= 0.0 {
        return None;
    }
    let b = m.dot(dir);
    if b > 0.0 {
        return None;
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    Some(-b - disc.sqrt())
}

// ── ObstacleFieldBuilder ──────────────────────────────────────────────────────

/// Collects obstacles, then bulk-loads the R-tree once.
#[derive(Default)]
pub struct ObstacleFieldBuilder {
    obstacles: Vec<Obstacle>,
}

impl ObstacleFieldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sphere on `layer`.  Returns its index in [`ObstacleField::obstacles`].
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, layer: u8) -> usize {
        self.obstacles.push(Obstacle { center, radius: radius.max(0.0), layer });
        self.obstacles.len() - 1
    }

    pub fn build(self) -> ObstacleField {
        let entries = self
            .obstacles
            .iter()
            .enumerate()
            .map(|(index, o)| ObstacleEntry {
                min: (o.center - Vec3::splat(o.radius)).to_array(),
                max: (o.center + Vec3::splat(o.radius)).to_array(),
                index,
            })
            .collect();
        ObstacleField {
            obstacles: self.obstacles,
            index:     RTree::bulk_load(entries),
        }
    }
}
