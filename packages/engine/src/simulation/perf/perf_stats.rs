use wasm_bindgen::prelude::*;

/// Timings and counters for the last `step` call.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) broad_ms: f64,
    pub(super) narrow_ms: f64,
    pub(super) solve_ms: f64,
    pub(super) substeps: u32,
    pub(super) candidate_pairs: u32,
    pub(super) contacts: u32,
    pub(super) impulses: u32,
    pub(super) reindexed: u32,
    pub(super) body_count: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn broad_ms(&self) -> f64 { self.broad_ms }
    #[wasm_bindgen(getter)]
    pub fn narrow_ms(&self) -> f64 { self.narrow_ms }
    #[wasm_bindgen(getter)]
    pub fn solve_ms(&self) -> f64 { self.solve_ms }
    /// Substeps run by the last step
    #[wasm_bindgen(getter)]
    pub fn substeps(&self) -> u32 { self.substeps }
    /// Broad-phase pairs, summed over substeps
    #[wasm_bindgen(getter)]
    pub fn candidate_pairs(&self) -> u32 { self.candidate_pairs }
    #[wasm_bindgen(getter)]
    pub fn contacts(&self) -> u32 { self.contacts }
    #[wasm_bindgen(getter)]
    pub fn impulses(&self) -> u32 { self.impulses }
    /// Grid cell changes, summed over substeps
    #[wasm_bindgen(getter)]
    pub fn reindexed(&self) -> u32 { self.reindexed }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
}
