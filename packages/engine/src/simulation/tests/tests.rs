use super::*;

fn fx(v: f64) -> FixedPoint {
    FixedPoint::from_f64(v)
}

fn world() -> PhysicsWorld {
    PhysicsWorld::new(WorldSettings::default())
}

fn ball(world: &PhysicsWorld, x: f64, y: f64) -> Rigidbody {
    world
        .create_circle_body(FixedPoint::HALF, false, PhysicalMaterial::DEFAULT)
        .at(FixedVector2::from_f64(x, y))
}

#[test]
fn add_body_indexes_it_in_the_grid() {
    let mut world = world();
    let h = world.add_body(ball(&world, 1.0, 1.0));

    assert_eq!(world.body_count(), 1);
    assert_eq!(world.grid.occupancy(), 1);
    let cell = world.grid.cell_at(FixedVector2::from_f64(1.0, 1.0)).unwrap();
    assert_eq!(cell, &[h.index()]);
    assert!(world.body(h).unwrap().is_registered());
}

#[test]
#[should_panic(expected = "already registered")]
fn registering_an_owned_body_panics() {
    let mut a = world();
    let mut b = world();
    let h = a.add_body(ball(&a, 0.0, 0.0));
    let copy = a.body(h).unwrap().clone();
    b.add_body(copy);
}

#[test]
fn removed_body_can_join_another_world() {
    let mut a = world();
    let mut b = world();
    let h = a.add_body(ball(&a, 0.0, 0.0));
    let body = a.remove_body(h).unwrap();
    assert!(!body.is_registered());
    assert_eq!(a.grid.occupancy(), 0);

    let h2 = b.add_body(body);
    assert!(b.body(h2).unwrap().is_registered());
    assert!(a.remove_body(h).is_none());
}

#[test]
fn out_of_bounds_bodies_are_simulated_but_not_indexed() {
    let mut world = world();
    let h = world.add_body(ball(&world, 1000.0, 0.0));
    assert_eq!(world.grid.occupancy(), 0);

    world.step(fx(0.1), 2);
    let body = world.body(h).unwrap();
    assert!(body.linear_velocity().y.is_negative());
}

#[test]
fn zero_substeps_is_a_no_op() {
    let mut world = world();
    let h = world.add_body(ball(&world, 0.0, 0.0));
    world.step(fx(0.1), 0);
    assert_eq!(world.tick(), 0);
    assert_eq!(world.body(h).unwrap().linear_velocity(), FixedVector2::ZERO);
}

#[test]
fn free_fall_matches_semi_implicit_euler() {
    let mut world = world();
    world.set_gravity(FixedVector2::from_int(0, -10));
    let h = world.add_body(ball(&world, 0.0, 0.0));

    // dt = 1/4 per substep, 4 substeps: v = -10, y = -(2.5+5+7.5+10)/4.
    world.step(FixedPoint::ONE, 4);
    let body = world.body(h).unwrap();
    assert_eq!(body.linear_velocity(), FixedVector2::from_int(0, -10));
    assert_eq!(body.position(), FixedVector2::from_f64(0.0, -6.25));
    assert_eq!(world.tick(), 1);
}

#[test]
fn forces_are_cleared_after_the_first_substep() {
    let mut world = world();
    world.set_gravity(FixedVector2::ZERO);
    let h = world.add_body(ball(&world, 0.0, 0.0));
    let mass = world.body(h).unwrap().mass();

    world.body_mut(h).unwrap().add_force(FixedVector2::new(mass, FixedPoint::ZERO));
    world.step(FixedPoint::ONE, 2);

    // Only the first half-step sees the force.
    let v = world.body(h).unwrap().linear_velocity();
    assert!((v.x.to_f64() - 0.5).abs() < 1e-6);
}

#[test]
fn external_move_is_reindexed_before_queries() {
    let mut world = world();
    let a = world.add_body(ball(&world, 0.0, 0.0));
    let b = world.add_body(ball(&world, 40.0, 40.0));

    let mut found = Vec::new();
    world.get_potential_colliders(a, &mut found);
    assert!(found.is_empty());

    // Teleport through body_mut; the grid catches up lazily.
    world.body_mut(b).unwrap().move_to(FixedVector2::from_f64(0.5, 0.0));
    world.get_potential_colliders(a, &mut found);
    assert_eq!(found, vec![b]);
}

#[test]
fn sync_grid_applies_pending_moves() {
    let mut world = world();
    let h = world.add_body(ball(&world, 0.0, 0.0));
    world.body_mut(h).unwrap().move_to(FixedVector2::from_int(20, 20));

    // Membership lags until something syncs.
    assert_eq!(world.grid.cell_at(FixedVector2::ZERO).unwrap(), &[h.index()]);

    assert_eq!(world.sync_grid(), 1);
    assert!(world.grid().cell_at(FixedVector2::ZERO).unwrap().is_empty());
    assert_eq!(world.grid().cell_at(FixedVector2::from_int(20, 20)).unwrap(), &[h.index()]);
    assert_eq!(world.sync_grid(), 0);
}

#[test]
fn move_body_updates_grid_immediately() {
    let mut world = world();
    let h = world.add_body(ball(&world, 0.0, 0.0));
    assert!(world.move_body(h, FixedVector2::from_int(20, 20)));

    let cell = world.grid.cell_at(FixedVector2::from_int(20, 20)).unwrap();
    assert_eq!(cell, &[h.index()]);
    assert!(world.grid.cell_at(FixedVector2::ZERO).unwrap().is_empty());
}

#[test]
fn static_pairs_are_not_candidates() {
    let mut world = world();
    let m = PhysicalMaterial::DEFAULT;
    let s1 = world.create_box_body(FixedPoint::ONE, FixedPoint::ONE, true, m);
    let s2 = world.create_box_body(FixedPoint::ONE, FixedPoint::ONE, true, m).at(FixedVector2::from_f64(0.5, 0.0));
    world.add_body(s1);
    world.add_body(s2);
    world.enable_perf_metrics(true);

    world.step(fx(0.1), 1);
    assert_eq!(world.get_perf_stats().candidate_pairs, 0);
}

#[test]
fn perf_stats_count_contacts() {
    let mut world = world();
    world.set_gravity(FixedVector2::ZERO);
    let m = PhysicalMaterial::DEFAULT;
    let ground = world.create_box_body(fx(4.0), FixedPoint::ONE, true, m);
    world.add_body(ground);
    let mut falling = ball(&world, 0.0, 0.9);
    falling.set_linear_velocity(FixedVector2::from_int(0, -1));
    world.add_body(falling);

    world.enable_perf_metrics(true);
    world.step(fx(0.01), 1);

    let stats = world.get_perf_stats();
    assert_eq!(stats.substeps, 1);
    assert_eq!(stats.candidate_pairs, 1);
    assert_eq!(stats.contacts, 1);
    assert_eq!(stats.impulses, 1);
    assert_eq!(stats.body_count, 2);
}

#[test]
fn clear_drops_everything() {
    let mut world = world();
    let h = world.add_body(ball(&world, 0.0, 0.0));
    world.clear();
    assert_eq!(world.body_count(), 0);
    assert_eq!(world.grid.occupancy(), 0);
    assert!(!world.contains(h));
}

#[test]
fn state_hash_tracks_state_and_tick() {
    let mut world = world();
    world.add_body(ball(&world, 0.0, 3.0));
    let before = world.state_hash();
    world.step(fx(1.0 / 60.0), 4);
    assert_ne!(world.state_hash(), before);

    let snapshot = world.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot[0].linear_velocity.y.is_negative());
}
