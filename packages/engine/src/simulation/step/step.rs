use tracing::trace;

use crate::core::fixed::FixedPoint;
use crate::rigid_body_system::{integrate_forces, integrate_velocity};

use super::broad_phase::collect_pairs;
use super::contacts::{detect, resolve};
use super::reindex::sync_moved;
use super::{PerfTimer, PhysicsWorld};

#[derive(Default)]
struct Counters {
    candidate_pairs: u32,
    contacts: u32,
    impulses: u32,
    reindexed: u32,
}

pub(super) fn step(world: &mut PhysicsWorld, delta_time: FixedPoint, substeps: u32) {
    if substeps == 0 {
        return;
    }

    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };
    let mut lap = if perf_on { Some(PerfTimer::start()) } else { None };

    let dt = delta_time / FixedPoint::from_int(i32::try_from(substeps).unwrap_or(i32::MAX));
    let mut counters = Counters::default();

    for _ in 0..substeps {
        substep(world, dt, &mut counters, &mut lap);
    }

    world.tick += 1;
    trace!(
        tick = world.tick,
        substeps,
        pairs = counters.candidate_pairs,
        contacts = counters.contacts,
        impulses = counters.impulses,
        "step"
    );

    if perf_on {
        let stats = &mut world.perf_stats;
        stats.substeps = substeps;
        stats.candidate_pairs = counters.candidate_pairs;
        stats.contacts = counters.contacts;
        stats.impulses = counters.impulses;
        stats.reindexed = counters.reindexed;
        stats.body_count = world.bodies.body_count() as u32;
        if let Some(mut start) = step_start {
            stats.step_ms = start.lap_ms();
        }
    }
}

fn substep(world: &mut PhysicsWorld, dt: FixedPoint, counters: &mut Counters, lap: &mut Option<PerfTimer>) {
    // Teleports since the last substep.
    counters.reindexed += sync_moved(world);
    if let Some(t) = lap.as_mut() {
        world.perf_stats.broad_ms += t.lap_ms();
    }

    let gravity = world.settings.gravity;
    world.bodies.for_each_mut(|_, body| integrate_forces(body, gravity, dt));
    if let Some(t) = lap.as_mut() {
        world.perf_stats.integrate_ms += t.lap_ms();
    }

    counters.candidate_pairs += collect_pairs(world);
    if let Some(t) = lap.as_mut() {
        world.perf_stats.broad_ms += t.lap_ms();
    }

    counters.contacts += detect(world);
    if let Some(t) = lap.as_mut() {
        world.perf_stats.narrow_ms += t.lap_ms();
    }

    counters.impulses += resolve(world);
    if let Some(t) = lap.as_mut() {
        world.perf_stats.solve_ms += t.lap_ms();
    }

    world.bodies.for_each_mut(|_, body| {
        integrate_velocity(body, dt);
    });
    if let Some(t) = lap.as_mut() {
        world.perf_stats.integrate_ms += t.lap_ms();
    }

    // Integration and positional correction both move bodies.
    counters.reindexed += sync_moved(world);
    if let Some(t) = lap.as_mut() {
        world.perf_stats.broad_ms += t.lap_ms();
    }
}
