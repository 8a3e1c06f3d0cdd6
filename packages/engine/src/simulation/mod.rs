//! PhysicsWorld - owns the bodies and the broad-phase grid, runs the step.
//!
//! The world only orchestrates. Integration, narrow phase and the contact
//! solver live in `rigid_body_system`; the grid lives in `spatial`.
//!
//! Each substep runs, in order:
//! 0. sync   - re-index bodies teleported since the last index
//! 1. forces - gravity + accumulated force into velocity
//! 2. broad  - candidate pairs from the grid, lower slot first
//! 3. narrow - manifolds for overlapping pairs
//! 4. solve  - impulses, friction, positional correction
//! 5. move   - velocity into position
//! 6. index  - grid membership follows the new positions

use crate::core::fixed::{FixedPoint, FixedVector2};
use crate::domain::material::PhysicalMaterial;
use crate::domain::settings::{SolverSettings, WorldSettings};
use crate::grid::Grid;
use crate::rigid_body::{Rigidbody, WorldId};
use crate::rigid_body_system::{BodyHandle, Contact, RigidBodySystem};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "rigid/rigid.rs"]
mod rigid;
#[path = "step/reindex.rs"]
mod reindex;
#[path = "step/broad_phase.rs"]
mod broad_phase;
#[path = "step/contacts.rs"]
mod contacts;
#[path = "step/step.rs"]
mod step;
#[path = "replay/snapshot.rs"]
mod snapshot;
mod facade;

pub use facade::World;
pub use perf_stats::PerfStats;
pub use snapshot::BodyState;

use perf_timer::PerfTimer;

/// The simulation world
pub struct PhysicsWorld {
    id: WorldId,
    settings: WorldSettings,
    bodies: RigidBodySystem,
    grid: Grid,

    // Per-substep scratch, reused across steps
    candidates: Vec<u32>,
    pairs: Vec<(u32, u32)>,
    contacts: Vec<Contact>,

    // State
    tick: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl PhysicsWorld {
    /// Create a world. Panics when `settings` do not validate.
    pub fn new(settings: WorldSettings) -> Self {
        init::create_world(settings)
    }

    /// Build from a JSON settings document.
    pub fn from_settings_json(json: &str) -> Result<Self, String> {
        let settings = WorldSettings::from_json(json)?;
        Ok(init::create_world(settings))
    }

    pub fn id(&self) -> WorldId { self.id }

    pub fn settings(&self) -> &WorldSettings { &self.settings }

    /// Broad-phase grid as of the last index. Bodies moved through
    /// [`body_mut`](Self::body_mut) stay in their old cell until the next
    /// `step`, `get_potential_colliders` or [`sync_grid`](Self::sync_grid).
    pub fn grid(&self) -> &Grid { &self.grid }

    /// Apply pending `move_to` relocations to the grid. Returns how many
    /// bodies changed cell.
    pub fn sync_grid(&mut self) -> u32 {
        reindex::sync_moved(self)
    }

    pub fn body_count(&self) -> usize { self.bodies.body_count() }

    /// Completed `step` calls.
    pub fn tick(&self) -> u64 { self.tick }

    pub fn set_gravity(&mut self, gravity: FixedVector2) {
        settings::set_gravity(self, gravity);
    }

    pub fn gravity(&self) -> FixedVector2 { self.settings.gravity }

    /// Panics when `solver` does not validate.
    pub fn set_solver_settings(&mut self, solver: SolverSettings) {
        settings::set_solver_settings(self, solver);
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === Bodies ===

    /// Unregistered circle body; warns when it outgrows a grid cell.
    pub fn create_circle_body(&self, radius: FixedPoint, is_static: bool, material: PhysicalMaterial) -> Rigidbody {
        rigid::create_circle_body(self, radius, is_static, material)
    }

    /// Unregistered box body; warns when it outgrows a grid cell.
    pub fn create_box_body(
        &self,
        width: FixedPoint,
        height: FixedPoint,
        is_static: bool,
        material: PhysicalMaterial,
    ) -> Rigidbody {
        rigid::create_box_body(self, width, height, is_static, material)
    }

    /// Register a body. Panics when it already belongs to a world.
    pub fn add_body(&mut self, body: Rigidbody) -> BodyHandle {
        rigid::add_body(self, body)
    }

    /// Unregister a body and drop it from the grid. Stale handles return `None`.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Rigidbody> {
        rigid::remove_body(self, handle)
    }

    /// Remove every body.
    pub fn clear(&mut self) {
        rigid::clear(self);
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Rigidbody> {
        self.bodies.get(handle)
    }

    /// Mutable access. Teleports done through it are re-indexed lazily.
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Rigidbody> {
        self.bodies.get_mut(handle)
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.get(handle).is_some()
    }

    /// Registered bodies in insertion order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Rigidbody)> + '_ {
        self.bodies.iter()
    }

    /// Teleport and re-index immediately. Returns `false` for stale handles.
    pub fn move_body(&mut self, handle: BodyHandle, position: FixedVector2) -> bool {
        rigid::move_body(self, handle, position)
    }

    pub fn rotate_body(&mut self, handle: BodyHandle, angle: FixedPoint) -> bool {
        rigid::rotate_body(self, handle, angle)
    }

    /// Broad-phase neighbours of `handle`, excluding itself.
    pub fn get_potential_colliders(&mut self, handle: BodyHandle, result: &mut Vec<BodyHandle>) {
        rigid::get_potential_colliders(self, handle, result);
    }

    // === Simulation ===

    /// Advance by `delta_time` in `substeps` equal slices. `substeps == 0` does nothing.
    pub fn step(&mut self, delta_time: FixedPoint, substeps: u32) {
        step::step(self, delta_time, substeps);
    }

    /// Step with the configured default substep count.
    pub fn step_default(&mut self, delta_time: FixedPoint) {
        let substeps = self.settings.default_substeps;
        step::step(self, delta_time, substeps);
    }

    // === Replay ===

    /// Per-body state in insertion order.
    pub fn snapshot(&self) -> Vec<BodyState> {
        snapshot::snapshot(self)
    }

    /// Hash of the tick and every body's raw state.
    pub fn state_hash(&self) -> u64 {
        snapshot::state_hash(self)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(WorldSettings::default())
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
