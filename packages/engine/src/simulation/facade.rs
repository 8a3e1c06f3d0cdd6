use wasm_bindgen::prelude::*;

use crate::core::fixed::{FixedPoint, FixedVector2};
use crate::domain::material::PhysicalMaterial;
use crate::domain::settings::WorldSettings;
use crate::rigid_body_system::BodyHandle;

use super::perf_stats::PerfStats;
use super::PhysicsWorld;

/// JS-facing world. Numbers are converted to fixed point on the way in, so
/// a host feeding identical inputs gets identical trajectories.
#[wasm_bindgen]
pub struct World {
    core: PhysicsWorld,
}

fn fx(v: f64) -> FixedPoint {
    FixedPoint::from_f64(v)
}

fn vec(x: f64, y: f64) -> FixedVector2 {
    FixedVector2::from_f64(x, y)
}

fn material(density: f64, restitution: f64, static_friction: f64, dynamic_friction: f64) -> PhysicalMaterial {
    PhysicalMaterial::new(fx(density), fx(restitution), fx(static_friction), fx(dynamic_friction))
}

impl World {
    fn handle(bits: u64) -> BodyHandle {
        BodyHandle::from_bits(bits)
    }

    fn read<T>(&self, bits: u64, f: impl FnOnce(&crate::rigid_body::Rigidbody) -> T) -> Option<T> {
        self.core.body(Self::handle(bits)).map(f)
    }

    fn write(&mut self, bits: u64, f: impl FnOnce(&mut crate::rigid_body::Rigidbody)) -> bool {
        match self.core.body_mut(Self::handle(bits)) {
            Some(body) => {
                f(body);
                true
            }
            None => false,
        }
    }

    /// Native access to the wrapped world.
    pub fn core(&self) -> &PhysicsWorld {
        &self.core
    }
}

#[wasm_bindgen]
impl World {
    /// World covering `[min, max)` with square grid cells; other settings default.
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64, cell_size: f64) -> Result<World, JsValue> {
        let settings = WorldSettings::default()
            .with_bounds(vec(min_x, min_y), vec(max_x, max_y))
            .with_cell_size(fx(cell_size));
        settings.validate().map_err(|e| JsValue::from_str(&e))?;
        Ok(Self { core: PhysicsWorld::new(settings) })
    }

    #[wasm_bindgen(js_name = fromSettingsJson)]
    pub fn from_settings_json(json: String) -> Result<World, JsValue> {
        let core = PhysicsWorld::from_settings_json(&json).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self { core })
    }

    #[wasm_bindgen(js_name = settingsJson)]
    pub fn settings_json(&self) -> String {
        self.core.settings().to_json()
    }

    pub fn set_gravity(&mut self, x: f64, y: f64) {
        self.core.set_gravity(vec(x, y));
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === BODIES ===

    /// Spawn a circle; returns its handle bits.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        is_static: bool,
        density: f64,
        restitution: f64,
        static_friction: f64,
        dynamic_friction: f64,
    ) -> u64 {
        let mat = material(density, restitution, static_friction, dynamic_friction);
        let body = self.core.create_circle_body(fx(radius), is_static, mat).at(vec(x, y));
        self.core.add_body(body).to_bits()
    }

    /// Spawn a box; returns its handle bits.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_box(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        is_static: bool,
        density: f64,
        restitution: f64,
        static_friction: f64,
        dynamic_friction: f64,
    ) -> u64 {
        let mat = material(density, restitution, static_friction, dynamic_friction);
        let body = self.core.create_box_body(fx(width), fx(height), is_static, mat).at(vec(x, y));
        self.core.add_body(body).to_bits()
    }

    /// Remove a body; `false` when the handle is stale.
    pub fn remove_body(&mut self, handle: u64) -> bool {
        self.core.remove_body(Self::handle(handle)).is_some()
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize {
        self.core.body_count()
    }

    pub fn contains(&self, handle: u64) -> bool {
        self.core.contains(Self::handle(handle))
    }

    // === BODY STATE (NaN for stale handles) ===

    pub fn body_x(&self, handle: u64) -> f64 {
        self.read(handle, |b| b.position().x.to_f64()).unwrap_or(f64::NAN)
    }

    pub fn body_y(&self, handle: u64) -> f64 {
        self.read(handle, |b| b.position().y.to_f64()).unwrap_or(f64::NAN)
    }

    pub fn body_angle(&self, handle: u64) -> f64 {
        self.read(handle, |b| b.angle().to_f64()).unwrap_or(f64::NAN)
    }

    pub fn body_velocity_x(&self, handle: u64) -> f64 {
        self.read(handle, |b| b.linear_velocity().x.to_f64()).unwrap_or(f64::NAN)
    }

    pub fn body_velocity_y(&self, handle: u64) -> f64 {
        self.read(handle, |b| b.linear_velocity().y.to_f64()).unwrap_or(f64::NAN)
    }

    pub fn body_angular_velocity(&self, handle: u64) -> f64 {
        self.read(handle, |b| b.angular_velocity().to_f64()).unwrap_or(f64::NAN)
    }

    // === BODY COMMANDS ===

    pub fn move_body(&mut self, handle: u64, x: f64, y: f64) -> bool {
        self.core.move_body(Self::handle(handle), vec(x, y))
    }

    pub fn rotate_body(&mut self, handle: u64, angle: f64) -> bool {
        self.core.rotate_body(Self::handle(handle), fx(angle))
    }

    pub fn set_velocity(&mut self, handle: u64, x: f64, y: f64) -> bool {
        self.write(handle, |b| b.set_linear_velocity(vec(x, y)))
    }

    pub fn add_force(&mut self, handle: u64, x: f64, y: f64) -> bool {
        self.write(handle, |b| b.add_force(vec(x, y)))
    }

    pub fn add_impulse(&mut self, handle: u64, x: f64, y: f64) -> bool {
        self.write(handle, |b| b.add_impulse(vec(x, y)))
    }

    pub fn set_kinematic(&mut self, handle: u64, kinematic: bool) -> bool {
        self.write(handle, |b| b.set_kinematic(kinematic))
    }

    pub fn set_gravity_enabled(&mut self, handle: u64, enabled: bool) -> bool {
        self.write(handle, |b| b.set_enable_gravity(enabled))
    }

    // === SIMULATION ===

    /// Step the simulation forward by `delta_time` seconds
    pub fn step(&mut self, delta_time: f64, substeps: u32) {
        self.core.step(fx(delta_time), substeps);
    }

    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 {
        self.core.tick()
    }

    /// Bit-exact state digest for lock-step checks.
    pub fn state_hash(&self) -> u64 {
        self.core.state_hash()
    }

    /// JSON array of `BodyState` records.
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.core.snapshot()).unwrap_or_else(|_| "[]".to_string())
    }
}
