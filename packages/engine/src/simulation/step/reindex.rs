use super::PhysicsWorld;

/// Bring grid membership in line with current positions.
///
/// Covers both integration and external `move_to` calls, since every body
/// remembers where it was last indexed. Returns how many bodies changed cell.
pub(super) fn sync_moved(world: &mut PhysicsWorld) -> u32 {
    let grid = &mut world.grid;
    let mut changed = 0u32;
    world.bodies.for_each_mut(|index, body| {
        if body.position == body.indexed_position {
            return;
        }
        if grid.update_rigidbody(body.indexed_position, index, body.position) {
            changed += 1;
        }
        body.indexed_position = body.position;
    });
    changed
}
