use crate::core::fixed::{FixedPoint, FixedTransform, FixedVector2};
use crate::domain::material::PhysicalMaterial;

use super::collider::Collider;

/// Identifies the world a body is registered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldId(pub(crate) u32);

/// Rigid Body - moves as a single unit
#[derive(Clone, Debug)]
pub struct Rigidbody {
    // === Physics State ===
    /// World position (center of mass)
    pub(crate) position: FixedVector2,
    /// Rotation angle (radians)
    pub(crate) angle: FixedPoint,
    /// Units per second
    pub(crate) linear_velocity: FixedVector2,
    /// Radians per second
    pub(crate) angular_velocity: FixedPoint,
    /// Force accumulated since the last substep integration
    pub(crate) force: FixedVector2,
    pub(crate) torque: FixedPoint,

    // === Mass Properties ===
    mass: FixedPoint,
    inv_mass: FixedPoint,
    inertia: FixedPoint,
    inv_inertia: FixedPoint,

    // === Shape & Material ===
    pub(crate) collider: Collider,
    material: PhysicalMaterial,

    // === Flags ===
    is_static: bool,
    is_kinematic: bool,
    enable_gravity: bool,

    /// Bumped on every transform change; compared against the box vertex cache.
    pub(crate) transform_epoch: u64,

    // === World bookkeeping ===
    /// Position the broad phase last indexed this body at
    pub(crate) indexed_position: FixedVector2,
    pub(crate) owner: Option<WorldId>,
}

impl Rigidbody {
    /// Create a circular body at the origin. Panics unless `radius > 0`.
    pub fn new_circle(radius: FixedPoint, is_static: bool, material: PhysicalMaterial) -> Self {
        Self::with_collider(Collider::circle(radius), is_static, material)
    }

    /// Create a rectangular body at the origin. Panics unless both sides are positive.
    pub fn new_box(width: FixedPoint, height: FixedPoint, is_static: bool, material: PhysicalMaterial) -> Self {
        Self::with_collider(Collider::rect(width, height), is_static, material)
    }

    fn with_collider(collider: Collider, is_static: bool, material: PhysicalMaterial) -> Self {
        assert!(material.density.is_positive(), "material density must be positive");

        let mass = collider.area() * material.density;
        let inertia = collider.inertia(mass);
        let (inv_mass, inv_inertia) = if is_static {
            (FixedPoint::ZERO, FixedPoint::ZERO)
        } else {
            (invert(mass), invert(inertia))
        };

        Self {
            position: FixedVector2::ZERO,
            angle: FixedPoint::ZERO,
            linear_velocity: FixedVector2::ZERO,
            angular_velocity: FixedPoint::ZERO,
            force: FixedVector2::ZERO,
            torque: FixedPoint::ZERO,
            mass,
            inv_mass,
            inertia,
            inv_inertia,
            collider,
            material,
            is_static,
            is_kinematic: false,
            enable_gravity: true,
            transform_epoch: 1,
            indexed_position: FixedVector2::ZERO,
            owner: None,
        }
    }

    // === Transform ===

    pub fn position(&self) -> FixedVector2 {
        self.position
    }

    pub fn angle(&self) -> FixedPoint {
        self.angle
    }

    /// Teleport. Velocity is untouched.
    pub fn move_to(&mut self, position: FixedVector2) {
        if self.position != position {
            self.position = position;
            self.mark_transform_dirty();
        }
    }

    pub fn rotate_to(&mut self, angle: FixedPoint) {
        if self.angle != angle {
            self.angle = angle;
            self.mark_transform_dirty();
        }
    }

    /// Builder-style placement for freshly created bodies.
    pub fn at(mut self, position: FixedVector2) -> Self {
        self.move_to(position);
        self
    }

    pub fn transform(&self) -> FixedTransform {
        FixedTransform::new(self.position, self.angle)
    }

    pub fn transform_epoch(&self) -> u64 {
        self.transform_epoch
    }

    /// True when the cached world vertices no longer match the transform.
    pub fn is_transform_dirty(&self) -> bool {
        self.collider.is_stale(self.transform_epoch)
    }

    /// World-space box corners, refreshed lazily. `None` for circles.
    pub fn transformed_vertices(&mut self) -> Option<[FixedVector2; 4]> {
        if !self.collider.is_stale(self.transform_epoch) {
            return self.collider.cached_vertices().copied();
        }
        let transform = self.transform();
        self.collider
            .transformed_vertices(&transform, self.transform_epoch)
            .copied()
    }

    pub(crate) fn mark_transform_dirty(&mut self) {
        self.transform_epoch = self.transform_epoch.wrapping_add(1).max(1);
    }

    // === Velocity ===

    pub fn linear_velocity(&self) -> FixedVector2 {
        self.linear_velocity
    }

    pub fn set_linear_velocity(&mut self, velocity: FixedVector2) {
        self.linear_velocity = velocity;
    }

    pub fn angular_velocity(&self) -> FixedPoint {
        self.angular_velocity
    }

    pub fn set_angular_velocity(&mut self, velocity: FixedPoint) {
        self.angular_velocity = velocity;
    }

    /// Accumulate a force applied at the center of mass.
    pub fn add_force(&mut self, force: FixedVector2) {
        self.force += force;
    }

    /// Accumulate a torque (rotational force).
    pub fn add_torque(&mut self, torque: FixedPoint) {
        self.torque += torque;
    }

    /// Instant velocity change at the center of mass.
    ///
    /// No effect on static or kinematic bodies.
    pub fn add_impulse(&mut self, impulse: FixedVector2) {
        self.linear_velocity += impulse * self.effective_inverse_mass();
    }

    pub fn add_angular_impulse(&mut self, impulse: FixedPoint) {
        self.angular_velocity += impulse * self.effective_inverse_inertia();
    }

    // === Flags ===

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_kinematic(&self) -> bool {
        self.is_kinematic
    }

    pub fn set_kinematic(&mut self, kinematic: bool) {
        self.is_kinematic = kinematic;
    }

    pub fn enable_gravity(&self) -> bool {
        self.enable_gravity
    }

    pub fn set_enable_gravity(&mut self, enabled: bool) {
        self.enable_gravity = enabled;
    }

    /// Forces, gravity and impulses only act on dynamic bodies.
    pub fn is_dynamic(&self) -> bool {
        !self.is_static && !self.is_kinematic
    }

    pub fn is_registered(&self) -> bool {
        self.owner.is_some()
    }

    // === Mass Properties ===

    pub fn mass(&self) -> FixedPoint {
        self.mass
    }

    pub fn inverse_mass(&self) -> FixedPoint {
        self.inv_mass
    }

    pub fn inertia(&self) -> FixedPoint {
        self.inertia
    }

    pub fn inverse_inertia(&self) -> FixedPoint {
        self.inv_inertia
    }

    /// Inverse mass as seen by the solver: 0 for static and kinematic bodies.
    pub fn effective_inverse_mass(&self) -> FixedPoint {
        if self.is_dynamic() { self.inv_mass } else { FixedPoint::ZERO }
    }

    pub fn effective_inverse_inertia(&self) -> FixedPoint {
        if self.is_dynamic() { self.inv_inertia } else { FixedPoint::ZERO }
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    pub fn material(&self) -> &PhysicalMaterial {
        &self.material
    }
}

/// `1 / v`, or zero when `v` is too small to invert.
fn invert(v: FixedPoint) -> FixedPoint {
    FixedPoint::ONE.checked_div(v).unwrap_or(FixedPoint::ZERO)
}
