use crate::core::fixed::FixedVector2;
use crate::domain::settings::SolverSettings;

use super::perf_stats::PerfStats;
use super::PhysicsWorld;

pub(super) fn set_gravity(world: &mut PhysicsWorld, gravity: FixedVector2) {
    world.settings.gravity = gravity;
}

pub(super) fn set_solver_settings(world: &mut PhysicsWorld, solver: SolverSettings) {
    if let Err(e) = solver.validate() {
        panic!("invalid solver settings: {e}");
    }
    world.settings.solver = solver;
}

pub(super) fn enable_perf_metrics(world: &mut PhysicsWorld, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(world: &PhysicsWorld) -> PerfStats {
    world.perf_stats.clone()
}
