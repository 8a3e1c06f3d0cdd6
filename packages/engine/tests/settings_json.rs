use fixphys_engine::{CombineRule, FixedPoint, FixedVector2, PhysicsWorld, WorldSettings};

#[test]
fn world_builds_from_json_document() {
    let world = PhysicsWorld::from_settings_json(
        r#"{
            "gravity": [0, -20],
            "boundsMin": [0, 0],
            "boundsMax": [64, 32],
            "cellSize": 2,
            "defaultSubsteps": 8,
            "solver": { "frictionCombine": "average", "correctionPercent": 0.8 }
        }"#,
    )
    .unwrap();

    assert_eq!(world.gravity(), FixedVector2::from_int(0, -20));
    assert_eq!(world.grid().dimensions(), (32, 16));
    assert_eq!(world.settings().default_substeps, 8);
    assert_eq!(world.settings().solver.friction_combine, CombineRule::Average);
    assert_eq!(world.settings().solver.restitution_combine, CombineRule::Minimum);
    assert!((world.settings().solver.correction_percent.to_f64() - 0.8).abs() < 1e-9);
}

#[test]
fn bad_documents_are_errors_not_panics() {
    assert!(PhysicsWorld::from_settings_json("{").is_err());
    assert!(PhysicsWorld::from_settings_json(r#"{ "defaultSubsteps": 0 }"#).is_err());
    assert!(PhysicsWorld::from_settings_json(r#"{ "solver": { "slop": -1 } }"#).is_err());
    assert!(PhysicsWorld::from_settings_json(r#"{ "solver": { "restitutionCombine": "median" } }"#).is_err());
    assert!(PhysicsWorld::from_settings_json(r#"{ "cellSize": 0.0001 }"#).is_err());
    assert!(PhysicsWorld::from_settings_json(
        r#"{ "boundsMin": [-2000000000, -2000000000], "boundsMax": [2000000000, 2000000000], "cellSize": 1 }"#
    )
    .is_err());
}

#[test]
fn to_json_reloads_to_the_same_settings() {
    let settings = WorldSettings::default()
        .with_gravity(FixedVector2::from_int(1, -4))
        .with_cell_size(FixedPoint::from_int(8));
    let reloaded = WorldSettings::from_json(&settings.to_json()).unwrap();
    assert_eq!(reloaded, settings);
}

#[test]
fn step_default_uses_configured_substeps() {
    let mut world = PhysicsWorld::from_settings_json(r#"{ "defaultSubsteps": 3 }"#).unwrap();
    world.enable_perf_metrics(true);
    world.step_default(FixedPoint::from_ratio(1, 60));
    assert_eq!(world.get_perf_stats().substeps(), 3);
}
