use std::sync::atomic::{AtomicU32, Ordering};

use tracing::info;

use crate::domain::settings::WorldSettings;
use crate::grid::Grid;
use crate::rigid_body::WorldId;
use crate::rigid_body_system::RigidBodySystem;

use super::perf_stats::PerfStats;
use super::PhysicsWorld;

static NEXT_WORLD_ID: AtomicU32 = AtomicU32::new(1);

pub(super) fn create_world(settings: WorldSettings) -> PhysicsWorld {
    if let Err(e) = settings.validate() {
        panic!("invalid world settings: {e}");
    }

    let grid = Grid::new(settings.bounds_min, settings.bounds_max, settings.cell_size);
    let (cols, rows) = grid.dimensions();
    let id = WorldId(NEXT_WORLD_ID.fetch_add(1, Ordering::Relaxed));
    info!(world = id.0, cols, rows, cell_size = %settings.cell_size, "physics world created");

    PhysicsWorld {
        id,
        settings,
        bodies: RigidBodySystem::new(),
        grid,
        candidates: Vec::with_capacity(64),
        pairs: Vec::with_capacity(256),
        contacts: Vec::with_capacity(256),
        tick: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
