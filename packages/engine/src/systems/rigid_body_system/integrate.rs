//! Semi-implicit Euler integration, split around the contact solver.

use crate::core::fixed::{FixedPoint, FixedVector2};
use crate::rigid_body::Rigidbody;

/// Accumulated forces and gravity into velocity. Clears the accumulators on
/// every body, so forces added to static or kinematic bodies are dropped.
pub fn integrate_forces(body: &mut Rigidbody, gravity: FixedVector2, dt: FixedPoint) {
    if body.is_dynamic() {
        let mut accel = body.force * body.inverse_mass();
        if body.enable_gravity() {
            accel += gravity;
        }
        body.linear_velocity += accel * dt;
        body.angular_velocity += body.torque * body.inverse_inertia() * dt;
    }
    body.force = FixedVector2::ZERO;
    body.torque = FixedPoint::ZERO;
}

/// Velocity into position for non-static bodies.
///
/// Returns `true` when the transform changed. The angle is left unwrapped
/// so replays see the exact accumulated value.
pub fn integrate_velocity(body: &mut Rigidbody, dt: FixedPoint) -> bool {
    if body.is_static() {
        return false;
    }

    let delta = body.linear_velocity * dt;
    let spin = body.angular_velocity * dt;
    if delta.is_zero() && spin.is_zero() {
        return false;
    }

    body.position += delta;
    body.angle += spin;
    body.mark_transform_dirty();
    true
}
