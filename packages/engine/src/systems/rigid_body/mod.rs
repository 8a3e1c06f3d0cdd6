//! Rigidbody - a solid body that moves as a unit
//!
//! The body stores its collider in local coordinates (relative to its
//! center of mass) and maps them to world space with its `FixedTransform`.
//! Box colliders cache their world corners per transform epoch.

mod body;
mod collider;

pub use body::{Rigidbody, WorldId};
pub use collider::{BoxVertices, Collider, ShapeKind};
