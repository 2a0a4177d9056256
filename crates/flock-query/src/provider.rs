//! The query capability trait.

use flock_core::{LayerMask, Vec3};

use crate::QueryResult;

/// First contact reported by a cast.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastHit {
    /// Contact point on the obstacle surface.
    pub point: Vec3,
    /// Outward surface normal at `point`.
    pub normal: Vec3,
    /// Distance travelled along the cast direction before contact.
    pub distance: f32,
}

/// Spatial queries against obstacle geometry.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one provider can be shared by
/// the simulation driver and any worker thread that needs it.
///
/// # Errors
///
/// A provider reports failures (bad input, backend gone) as `Err`.  Callers
/// in this workspace surface them unchanged; they never retry.
pub trait QueryProvider: Send + Sync {
    /// Sweep a sphere of `radius` from `origin` along `direction` for at most
    /// `max_distance`, reporting the nearest obstacle on a layer in `mask`.
    ///
    /// Obstacles the sphere already overlaps at `origin` are not reported.
    fn sphere_cast(
        &self,
        origin:       Vec3,
        radius:       f32,
        direction:    Vec3,
        max_distance: f32,
        mask:         LayerMask,
    ) -> QueryResult<Option<CastHit>>;

    /// Nearest obstacle on a layer in `mask` crossed by the segment
    /// `start → end`.
    fn linecast(&self, start: Vec3, end: Vec3, mask: LayerMask) -> QueryResult<Option<CastHit>> {
        let delta = end - start;
        let length = delta.length();
        if length == 0.0 {
            return Ok(None);
        }
        self.sphere_cast(start, 0.0, delta / length, length, mask)
    }
}

/// A provider with no geometry at all.  Every query misses.
pub struct NoObstacles;

impl QueryProvider for NoObstacles {
    fn sphere_cast(
        &self,
        _origin:       Vec3,
        _radius:       f32,
        _direction:    Vec3,
        _max_distance: f32,
        _mask:         LayerMask,
    ) -> QueryResult<Option<CastHit>> {
        Ok(None)
    }
}

impl<P: QueryProvider + ?Sized> QueryProvider for &P {
    fn sphere_cast(
        &self,
        origin:       Vec3,
        radius:       f32,
        direction:    Vec3,
        max_distance: f32,
        mask:         LayerMask,
    ) -> QueryResult<Option<CastHit>> {
        (**self).sphere_cast(origin, radius, direction, max_distance, mask)
    }

    fn linecast(&self, start: Vec3, end: Vec3, mask: LayerMask) -> QueryResult<Option<CastHit>> {
        (**self).linecast(start, end, mask)
    }
}
