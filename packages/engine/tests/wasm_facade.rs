#![cfg(target_arch = "wasm32")]

use fixphys_engine::World;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn facade_steps_and_reports_state() {
    fixphys_engine::init();
    let mut world = World::new(-32.0, -32.0, 32.0, 32.0, 4.0).unwrap();
    world.spawn_box(0.0, -5.0, 3.0, 1.0, true, 1.0, 0.2, 0.5, 0.3);
    let ball = world.spawn_circle(0.0, 0.0, 0.5, false, 1.0, 0.2, 0.5, 0.3);

    for _ in 0..30 {
        world.step(1.0 / 60.0, 4);
    }
    assert!(world.body_y(ball) < 0.0);
    assert_eq!(world.tick(), 30);

    assert!(world.remove_body(ball));
    assert!(world.body_x(ball).is_nan());
    assert!(!world.remove_body(ball));
}

#[wasm_bindgen_test]
fn facade_rejects_bad_settings() {
    assert!(World::from_settings_json("{ \"cellSize\": -1 }".to_string()).is_err());
    assert!(World::new(0.0, 0.0, 0.0, 10.0, 1.0).is_err());
    assert!(World::new(-256.0, -256.0, 256.0, 256.0, 0.0001).is_err());
}
