//! Systems - bodies and the passes that move them.

pub mod rigid_body;
pub mod rigid_body_system;
