//! End-to-end behaviour of the step loop.

use fixphys_engine::{BodyHandle, FixedPoint, FixedVector2, PhysicalMaterial, PhysicsWorld, WorldSettings};

fn no_gravity_world() -> PhysicsWorld {
    PhysicsWorld::new(WorldSettings::default().with_gravity(FixedVector2::ZERO))
}

fn dt() -> FixedPoint {
    FixedPoint::from_ratio(1, 60)
}

fn elastic() -> PhysicalMaterial {
    PhysicalMaterial::DEFAULT
        .with_restitution(FixedPoint::ONE)
        .with_friction(FixedPoint::ZERO, FixedPoint::ZERO)
}

fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

#[test]
fn equal_elastic_circles_exchange_velocities() {
    let mut world = no_gravity_world();
    let mut left = world.create_circle_body(FixedPoint::ONE, false, elastic()).at(FixedVector2::from_f64(-0.95, 0.0));
    let mut right = world.create_circle_body(FixedPoint::ONE, false, elastic()).at(FixedVector2::from_f64(0.95, 0.0));
    left.set_linear_velocity(FixedVector2::from_int(1, 0));
    right.set_linear_velocity(FixedVector2::from_int(-1, 0));
    let a = world.add_body(left);
    let b = world.add_body(right);

    for _ in 0..30 {
        world.step(dt(), 4);
    }

    let va = world.body(a).unwrap().linear_velocity();
    let vb = world.body(b).unwrap().linear_velocity();
    assert!((va.x.to_f64() + 1.0).abs() < 1e-6, "left velocity {}", va.x);
    assert!((vb.x.to_f64() - 1.0).abs() < 1e-6, "right velocity {}", vb.x);
    assert!(va.y.abs().to_f64() < 1e-9 && vb.y.abs().to_f64() < 1e-9);

    // Momentum stays at zero.
    assert!((va.x + vb.x).abs().to_f64() < 1e-6);
}

#[test]
fn overlapping_static_and_dynamic_circles_separate() {
    let mut world = no_gravity_world();
    let anchor = world.create_circle_body(FixedPoint::ONE, true, PhysicalMaterial::DEFAULT);
    let anchor = world.add_body(anchor);
    let mover = world
        .create_circle_body(FixedPoint::ONE, false, PhysicalMaterial::DEFAULT)
        .at(FixedVector2::from_f64(1.5, 0.0));
    let mover = world.add_body(mover);

    for _ in 0..60 {
        world.step(dt(), 4);
    }

    let pa = world.body(anchor).unwrap().position();
    let pb = world.body(mover).unwrap().position();
    let slop = world.settings().solver.slop.to_f64();
    let distance = pa.distance(pb).to_f64();
    assert!(distance >= 2.0 - slop - 1e-6, "distance {distance}");
    assert_eq!(pa, FixedVector2::ZERO);
}

#[test]
fn static_bodies_never_move() {
    let mut world = PhysicsWorld::new(WorldSettings::default());
    let ground = world
        .create_box_body(FixedPoint::from_ratio(7, 2), FixedPoint::ONE, true, PhysicalMaterial::STEEL)
        .at(FixedVector2::from_int(0, -2));
    let ground = world.add_body(ground);
    let pillar = world.create_circle_body(FixedPoint::ONE, true, PhysicalMaterial::STEEL).at(FixedVector2::from_int(3, -1));
    let pillar = world.add_body(pillar);

    for i in 0..6 {
        let x = FixedPoint::from_ratio(i as i64 - 3, 2);
        let b = world
            .create_box_body(FixedPoint::ONE, FixedPoint::ONE, false, PhysicalMaterial::WOOD)
            .at(FixedVector2::new(x, FixedPoint::from_int(i + 1)));
        world.add_body(b);
    }

    let before: Vec<_> = [ground, pillar]
        .iter()
        .map(|h| {
            let b = world.body(*h).unwrap();
            (b.position(), b.angle())
        })
        .collect();

    for _ in 0..120 {
        for h in [ground, pillar] {
            let body = world.body_mut(h).unwrap();
            body.add_impulse(FixedVector2::from_int(50, 50));
            body.add_force(FixedVector2::from_int(-100, 0));
            body.add_angular_impulse(FixedPoint::from_int(10));
        }
        world.step(dt(), 4);
    }

    for (h, (pos, angle)) in [ground, pillar].iter().zip(before) {
        let b = world.body(*h).unwrap();
        assert_eq!(b.position(), pos);
        assert_eq!(b.angle(), angle);
        assert_eq!(b.linear_velocity(), FixedVector2::ZERO);
    }
}

#[test]
fn kinematic_bodies_push_without_being_pushed() {
    let mut world = no_gravity_world();
    let mut paddle = world
        .create_box_body(FixedPoint::ONE, FixedPoint::from_int(3), false, PhysicalMaterial::DEFAULT)
        .at(FixedVector2::from_int(3, 0));
    paddle.set_kinematic(true);
    paddle.set_linear_velocity(FixedVector2::from_int(2, 0));
    let paddle = world.add_body(paddle);

    let ball = world
        .create_circle_body(FixedPoint::HALF, false, PhysicalMaterial::DEFAULT)
        .at(FixedVector2::from_f64(4.5, 0.0));
    let ball = world.add_body(ball);

    world.body_mut(paddle).unwrap().add_impulse(FixedVector2::from_int(-100, 0));
    assert_eq!(world.body(paddle).unwrap().linear_velocity(), FixedVector2::from_int(2, 0));

    for _ in 0..60 {
        world.step(dt(), 4);
    }

    let p = world.body(paddle).unwrap();
    assert_eq!(p.linear_velocity(), FixedVector2::from_int(2, 0));
    // Moved from x = 3 to x = 5, across the cell boundary at 4.
    assert!((p.position().x.to_f64() - 5.0).abs() < 1e-6);
    assert!(world.grid().cell_at(p.position()).unwrap().contains(&paddle.index()));

    // Infinite-mass push with restitution 0.2: the ball leaves at 2 + 0.2 * 2.
    let b = world.body(ball).unwrap();
    assert!(b.linear_velocity().x > FixedPoint::from_int(2), "ball velocity {}", b.linear_velocity().x);
    assert!((b.linear_velocity().x.to_f64() - 2.4).abs() < 1e-4, "ball velocity {}", b.linear_velocity().x);
    assert!(b.position().x > p.position().x);
}

#[test]
fn broad_phase_reports_every_true_overlap() {
    let mut world = no_gravity_world();
    let mut rng = 0xDEAD_BEEFu32;
    let mut handles: Vec<BodyHandle> = Vec::new();

    for _ in 0..150 {
        let x = (xorshift32(&mut rng) % 40_000) as i64 - 20_000;
        let y = (xorshift32(&mut rng) % 40_000) as i64 - 20_000;
        let r = 250 + (xorshift32(&mut rng) % 1_750) as i64; // 0.25 ..= 2.0
        let pos = FixedVector2::new(FixedPoint::from_ratio(x, 1000), FixedPoint::from_ratio(y, 1000));
        let body = world
            .create_circle_body(FixedPoint::from_ratio(r, 1000), false, PhysicalMaterial::DEFAULT)
            .at(pos);
        handles.push(world.add_body(body));
    }

    assert!(checked_overlaps(&mut world, &handles) > 0, "scene too sparse to exercise the grid");

    // Let things move around so incremental re-indexing is exercised too.
    for &h in handles.iter() {
        let vx = (xorshift32(&mut rng) % 2000) as i64 - 1000;
        let vy = (xorshift32(&mut rng) % 2000) as i64 - 1000;
        world.body_mut(h).unwrap().set_linear_velocity(FixedVector2::new(
            FixedPoint::from_ratio(vx, 100),
            FixedPoint::from_ratio(vy, 100),
        ));
    }
    for _ in 0..20 {
        world.step(dt(), 2);
    }
    checked_overlaps(&mut world, &handles);
}

/// Asserts every overlapping pair is a broad-phase candidate; returns the
/// number of overlaps checked.
fn checked_overlaps(world: &mut PhysicsWorld, handles: &[BodyHandle]) -> usize {
    let mut found = Vec::new();
    let mut overlaps = 0;
    for &a in handles.iter() {
        found.clear();
        world.get_potential_colliders(a, &mut found);
        let ba = world.body(a).unwrap();
        for &b in handles.iter() {
            if a == b {
                continue;
            }
            let bb = world.body(b).unwrap();
            let reach = ba.collider().bounding_radius() + bb.collider().bounding_radius();
            if ba.position().distance(bb.position()) < reach {
                overlaps += 1;
                assert!(found.contains(&b), "missing overlap {a:?} / {b:?}");
            }
        }
    }
    overlaps
}

#[test]
fn removed_bodies_leave_the_grid() {
    let mut world = no_gravity_world();
    let spots = [(0.0, 0.0), (0.8, 0.0), (0.0, 0.8), (5.0, 0.0)];
    let handles: Vec<BodyHandle> = spots
        .iter()
        .map(|&(x, y)| {
            let body = world
                .create_circle_body(FixedPoint::HALF, false, PhysicalMaterial::DEFAULT)
                .at(FixedVector2::from_f64(x, y));
            world.add_body(body)
        })
        .collect();

    let gone = handles[1];
    let last_position = world.body(gone).unwrap().position();
    assert!(world.remove_body(gone).is_some());
    assert!(world.remove_body(gone).is_none());

    assert!(!world.grid().cell_at(last_position).unwrap().contains(&gone.index()));
    let mut found = Vec::new();
    for &h in handles.iter().filter(|&&h| h != gone) {
        found.clear();
        world.get_potential_colliders(h, &mut found);
        assert!(!found.contains(&gone));
    }

    // A new body reusing the slot gets a fresh handle; the old one stays dead.
    let fresh = world.create_circle_body(FixedPoint::HALF, false, PhysicalMaterial::DEFAULT);
    let fresh = world.add_body(fresh);
    assert_eq!(fresh.index(), gone.index());
    found.clear();
    world.get_potential_colliders(handles[0], &mut found);
    assert!(found.contains(&fresh));
    assert!(!found.contains(&gone));

    world.step(dt(), 4);
    assert!(world.body(gone).is_none());
}
