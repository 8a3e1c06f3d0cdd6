//! Fixphys Engine - deterministic fixed-point 2D rigid-body physics
//!
//! Every quantity that feeds the simulation is a Q32.32 integer, so the
//! same call sequence yields bit-identical results on any target.
//!
//! Architecture:
//! - core/       - fixed-point numerics and access macros
//! - domain/     - materials and world configuration
//! - spatial/    - uniform-grid broad phase
//! - systems/    - rigid bodies, narrow phase, solver, integration
//! - simulation/ - PhysicsWorld step loop and the wasm facade

// Utils with safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

// Compatibility re-exports (short paths used across the crate)
pub use spatial::grid;
pub use systems::rigid_body;
pub use systems::rigid_body_system;

use wasm_bindgen::prelude::*;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&format!("fixphys engine {} initialized", version()).into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::fixed::{FixedPoint, FixedTransform, FixedVector2};
pub use domain::material::PhysicalMaterial;
pub use domain::settings::{CombineRule, SolverSettings, WorldSettings};
pub use rigid_body::{Collider, Rigidbody, ShapeKind};
pub use rigid_body_system::{BodyHandle, Manifold};
pub use simulation::{BodyState, PerfStats, PhysicsWorld, World};
