//! RigidBodySystem - body storage and the per-substep physics passes.
//!
//! - `system`: generational arena, iterated in insertion order
//! - `integrate`: forces into velocity, velocity into position
//! - `collision`: narrow phase (circle/box manifolds)
//! - `solver`: impulses and positional correction
//!
//! The world in `simulation` drives these in a fixed order per substep.

mod collision;
mod integrate;
mod solver;
mod system;

pub use collision::{box_vs_box, circle_vs_box, circle_vs_circle, collide, Contact, Manifold};
pub use integrate::{integrate_forces, integrate_velocity};
pub use solver::{correct_positions, resolve_contact};
pub use system::{BodyHandle, RigidBodySystem};
