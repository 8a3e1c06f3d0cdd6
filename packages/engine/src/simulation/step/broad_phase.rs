use super::PhysicsWorld;

/// Fill `world.pairs` with candidate pairs `(a, b)`, `a < b` by slot.
///
/// Bodies are visited in insertion order so the pair list is a pure
/// function of the call history. Pairs that cannot exchange impulses
/// (both static or kinematic) are dropped here.
pub(super) fn collect_pairs(world: &mut PhysicsWorld) -> u32 {
    let PhysicsWorld { bodies, grid, candidates, pairs, .. } = world;
    pairs.clear();

    for &a in bodies.order() {
        let Some(body) = bodies.slot(a) else {
            continue;
        };
        let inv_a = body.effective_inverse_mass();

        candidates.clear();
        grid.get_potential_colliders(body.position, candidates);
        for &b in candidates.iter() {
            if b <= a {
                continue;
            }
            let Some(other) = bodies.slot(b) else {
                continue;
            };
            if (inv_a + other.effective_inverse_mass()).is_zero() {
                continue;
            }
            pairs.push((a, b));
        }
    }

    pairs.len() as u32
}
