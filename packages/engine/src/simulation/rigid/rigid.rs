use tracing::{debug, warn};

use crate::core::fixed::{FixedPoint, FixedVector2};
use crate::domain::material::PhysicalMaterial;
use crate::rigid_body::Rigidbody;
use crate::rigid_body_system::BodyHandle;

use super::PhysicsWorld;

fn warn_if_oversized(world: &PhysicsWorld, body: &Rigidbody) {
    let extent = body.collider().bounding_radius() * FixedPoint::TWO;
    let cell = world.grid.cell_size();
    if extent > cell {
        warn!(
            extent = %extent,
            cell_size = %cell,
            "collider is larger than a grid cell; broad phase may miss contacts"
        );
    }
}

pub(super) fn create_circle_body(
    world: &PhysicsWorld,
    radius: FixedPoint,
    is_static: bool,
    material: PhysicalMaterial,
) -> Rigidbody {
    let body = Rigidbody::new_circle(radius, is_static, material);
    warn_if_oversized(world, &body);
    body
}

pub(super) fn create_box_body(
    world: &PhysicsWorld,
    width: FixedPoint,
    height: FixedPoint,
    is_static: bool,
    material: PhysicalMaterial,
) -> Rigidbody {
    let body = Rigidbody::new_box(width, height, is_static, material);
    warn_if_oversized(world, &body);
    body
}

pub(super) fn add_body(world: &mut PhysicsWorld, mut body: Rigidbody) -> BodyHandle {
    if let Some(owner) = body.owner {
        panic!("body is already registered in world {}", owner.0);
    }

    body.owner = Some(world.id);
    body.indexed_position = body.position;
    let position = body.position;
    let is_static = body.is_static();

    let handle = world.bodies.insert(body);
    if !world.grid.insert(handle.index(), position) {
        warn!(
            body = handle.index(),
            x = %position.x,
            y = %position.y,
            "body registered outside the grid bounds; it will not collide"
        );
    }
    debug!(body = handle.index(), generation = handle.generation(), is_static, "body added");
    handle
}

pub(super) fn remove_body(world: &mut PhysicsWorld, handle: BodyHandle) -> Option<Rigidbody> {
    let mut body = world.bodies.remove(handle)?;
    world.grid.remove_rigidbody(handle.index(), body.indexed_position);
    body.owner = None;
    debug!(body = handle.index(), generation = handle.generation(), "body removed");
    Some(body)
}

pub(super) fn clear(world: &mut PhysicsWorld) {
    world.bodies.clear();
    world.grid.clear();
    world.contacts.clear();
    world.pairs.clear();
    debug!(world = world.id.0, "world cleared");
}

pub(super) fn move_body(world: &mut PhysicsWorld, handle: BodyHandle, position: FixedVector2) -> bool {
    let Some(body) = world.bodies.get_mut(handle) else {
        return false;
    };
    body.move_to(position);
    let old = body.indexed_position;
    body.indexed_position = position;
    world.grid.update_rigidbody(old, handle.index(), position);
    true
}

pub(super) fn rotate_body(world: &mut PhysicsWorld, handle: BodyHandle, angle: FixedPoint) -> bool {
    match world.bodies.get_mut(handle) {
        Some(body) => {
            body.rotate_to(angle);
            true
        }
        None => false,
    }
}

pub(super) fn get_potential_colliders(world: &mut PhysicsWorld, handle: BodyHandle, result: &mut Vec<BodyHandle>) {
    super::reindex::sync_moved(world);

    let Some(body) = world.bodies.get(handle) else {
        return;
    };
    let position = body.position;

    world.candidates.clear();
    world.grid.get_potential_colliders(position, &mut world.candidates);
    for &index in world.candidates.iter() {
        if index == handle.index() {
            continue;
        }
        if let Some(other) = world.bodies.handle_of(index) {
            result.push(other);
        }
    }
}
