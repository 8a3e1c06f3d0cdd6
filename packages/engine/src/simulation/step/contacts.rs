use crate::rigid_body_system::{collide, correct_positions, resolve_contact, Contact};

use super::PhysicsWorld;

/// Narrow phase over `world.pairs`. Returns the number of contacts.
pub(super) fn detect(world: &mut PhysicsWorld) -> u32 {
    let PhysicsWorld { bodies, pairs, contacts, settings, .. } = world;
    let epsilon = settings.solver.epsilon;
    contacts.clear();

    for &(a, b) in pairs.iter() {
        let Some((body_a, body_b)) = bodies.pair_mut(a, b) else {
            continue;
        };
        if let Some(manifold) = collide(body_a, body_b, epsilon) {
            contacts.push(Contact { a, b, manifold });
        }
    }

    contacts.len() as u32
}

/// Impulses for every contact, then positional correction.
///
/// Returns the number of contacts that received an impulse.
pub(super) fn resolve(world: &mut PhysicsWorld) -> u32 {
    let PhysicsWorld { bodies, contacts, settings, .. } = world;
    let solver = &settings.solver;
    let mut impulses = 0u32;

    for contact in contacts.iter() {
        if let Some((a, b)) = bodies.pair_mut(contact.a, contact.b) {
            if resolve_contact(a, b, &contact.manifold, solver) {
                impulses += 1;
            }
        }
    }

    for contact in contacts.iter() {
        if let Some((a, b)) = bodies.pair_mut(contact.a, contact.b) {
            correct_positions(a, b, &contact.manifold, solver);
        }
    }

    impulses
}
