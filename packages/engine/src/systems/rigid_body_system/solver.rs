//! Impulse-based contact resolution.
//!
//! One pass per manifold: normal impulse with restitution, a Coulomb
//! friction impulse along the contact tangent, then positional correction.

use crate::core::fixed::{FixedPoint, FixedVector2};
use crate::domain::settings::SolverSettings;
use crate::rigid_body::Rigidbody;

use super::collision::Manifold;

/// Velocity of the material point at offset `r` from the center of mass.
#[inline]
fn point_velocity(body: &Rigidbody, r: FixedVector2) -> FixedVector2 {
    body.linear_velocity + FixedVector2::scalar_cross(body.angular_velocity, r)
}

/// Effective mass denominator along `dir` for offsets `ra`/`rb`.
fn impulse_denominator(a: &Rigidbody, b: &Rigidbody, ra: FixedVector2, rb: FixedVector2, dir: FixedVector2) -> FixedPoint {
    let ra_cross = ra.cross(dir);
    let rb_cross = rb.cross(dir);
    a.effective_inverse_mass()
        + b.effective_inverse_mass()
        + ra_cross * ra_cross * a.effective_inverse_inertia()
        + rb_cross * rb_cross * b.effective_inverse_inertia()
}

/// Equal and opposite impulse at the contact offsets (`impulse` acts on B).
fn apply_impulse(a: &mut Rigidbody, b: &mut Rigidbody, ra: FixedVector2, rb: FixedVector2, impulse: FixedVector2) {
    a.add_impulse(-impulse);
    a.add_angular_impulse(-ra.cross(impulse));
    b.add_impulse(impulse);
    b.add_angular_impulse(rb.cross(impulse));
}

/// Apply normal and friction impulses for one contact.
///
/// Returns `false` when the bodies are already separating or the contact
/// has no effective mass, in which case nothing changes.
pub fn resolve_contact(a: &mut Rigidbody, b: &mut Rigidbody, m: &Manifold, settings: &SolverSettings) -> bool {
    let ra = m.point - a.position;
    let rb = m.point - b.position;

    let rel = point_velocity(b, rb) - point_velocity(a, ra);
    let vn = rel.dot(m.normal);
    if vn.is_positive() {
        return false;
    }

    let denom = impulse_denominator(a, b, ra, rb, m.normal);
    if denom <= settings.epsilon {
        return false;
    }

    let e = settings
        .restitution_combine
        .combine(a.material().restitution, b.material().restitution);
    let j = -(FixedPoint::ONE + e) * vn / denom;
    apply_impulse(a, b, ra, rb, m.normal * j);

    // Friction against the post-impulse sliding velocity.
    let rel = point_velocity(b, rb) - point_velocity(a, ra);
    let sliding = rel - m.normal * rel.dot(m.normal);
    let speed = sliding.length();
    if speed <= settings.epsilon {
        return true;
    }
    let tangent = sliding / speed;

    let denom_t = impulse_denominator(a, b, ra, rb, tangent);
    if denom_t <= settings.epsilon {
        return true;
    }

    let mu = if speed < settings.resting_threshold {
        settings
            .friction_combine
            .combine(a.material().static_friction, b.material().static_friction)
    } else {
        settings
            .friction_combine
            .combine(a.material().dynamic_friction, b.material().dynamic_friction)
    };
    let limit = mu * j;
    let jt = (-rel.dot(tangent) / denom_t).clamp(-limit, limit);
    if !jt.is_zero() {
        apply_impulse(a, b, ra, rb, tangent * jt);
    }

    true
}

/// Push overlapping bodies apart along the normal, split by inverse mass.
///
/// Returns `true` when either body moved.
pub fn correct_positions(a: &mut Rigidbody, b: &mut Rigidbody, m: &Manifold, settings: &SolverSettings) -> bool {
    let inv_a = a.effective_inverse_mass();
    let inv_b = b.effective_inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum <= settings.epsilon {
        return false;
    }

    let excess = (m.depth - settings.slop).max(FixedPoint::ZERO);
    if excess.is_zero() {
        return false;
    }

    let correction = m.normal * (excess / inv_sum * settings.correction_percent);
    if !inv_a.is_zero() {
        a.move_to(a.position - correction * inv_a);
    }
    if !inv_b.is_zero() {
        b.move_to(b.position + correction * inv_b);
    }
    true
}
