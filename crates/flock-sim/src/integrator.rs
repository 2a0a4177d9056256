//! Motion integration seam.
//!
//! The step only computes steering accelerations and probe results; how they
//! turn into motion is the integrator's business.  [`NoopIntegrator`] leaves
//! bodies untouched, [`EulerIntegrator`] is a minimal reference.

use flock_agent::MotionView;
use flock_core::{FlockSettings, Quat, Vec3};

/// Advances bodies after each step's passes have completed.
pub trait Integrator: Send {
    fn integrate(&mut self, view: MotionView<'_>, settings: &FlockSettings, delta_secs: f32);
}

/// Leaves every body where it is.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopIntegrator;

impl Integrator for NoopIntegrator {
    fn integrate(&mut self, _view: MotionView<'_>, _settings: &FlockSettings, _delta_secs: f32) {}
}

/// Explicit Euler step with the speed clamped to `[min_speed, max_speed]`.
///
/// ```text
/// v     = velocity + acceleration * dt
/// dir   = v / |v|            (previous forward if |v| == 0)
/// v     = dir * clamp(|v|, min_speed, max_speed)
/// pos  += v * dt
/// forward = direction = dir; rotation looks along dir
/// ```
///
/// Avoidance directions are not read.
#[derive(Copy, Clone, Debug, Default)]
pub struct EulerIntegrator;

impl Integrator for EulerIntegrator {
    fn integrate(&mut self, view: MotionView<'_>, settings: &FlockSettings, delta_secs: f32) {
        for body in view.bodies.iter_mut() {
            let velocity = body.velocity + body.acceleration * delta_secs;
            let speed = velocity.length();
            let dir = if speed > 0.0 { velocity / speed } else { body.forward };
            let speed = speed.clamp(settings.min_speed, settings.max_speed);

            body.velocity = dir * speed;
            body.position += body.velocity * delta_secs;
            body.direction = dir;
            body.rotation = Quat::from_rotation_arc(Vec3::Z, dir);
            body.forward = body.rotation * Vec3::Z;
        }
    }
}
