//! Grid - uniform-cell broad phase over rigidbody slot indices
//!
//! Each cell is a plain `Vec<u32>` of arena slots. Membership is updated
//! incrementally: a body only changes cells when its position crosses a cell
//! boundary, and removal is a swap-remove.
//!
//! Queries scan the 3x3 block around a body's cell, so the cell size must be
//! at least the largest collider extent for the candidate set to be complete.

use crate::core::fixed::{FixedPoint, FixedVector2};

mod indexing;
mod cells;

/// Upper bound on `cols * rows`. Settings that would need more cells fail
/// validation instead of reaching the allocator.
pub const MAX_CELLS: u64 = 1 << 22;

/// Columns and rows needed to cover `[min, max)`, each `ceil(extent / cell_size)`.
/// `None` when `cell_size` is not positive or an extent is empty.
pub fn grid_dimensions(min: FixedVector2, max: FixedVector2, cell_size: FixedPoint) -> Option<(u64, u64)> {
    if !cell_size.is_positive() {
        return None;
    }
    let cell = cell_size.raw() as i128;
    let span = |lo: FixedPoint, hi: FixedPoint| {
        let extent = hi.raw() as i128 - lo.raw() as i128;
        (extent > 0).then(|| ((extent + cell - 1) / cell) as u64)
    };
    Some((span(min.x, max.x)?, span(min.y, max.y)?))
}

/// Uniform broad-phase grid covering `[min, max)`.
pub struct Grid {
    origin: FixedVector2,
    cell_size: FixedPoint,
    cols: u32,
    rows: u32,

    /// Row-major cells, `rows * cols` entries.
    cells: Vec<Vec<u32>>,
    /// Number of indices currently stored across all cells.
    occupancy: usize,
}

impl Grid {
    /// Panics when `cell_size` is not positive, the bounds are empty, or the
    /// grid would exceed [`MAX_CELLS`].
    pub fn new(min: FixedVector2, max: FixedVector2, cell_size: FixedPoint) -> Self {
        assert!(cell_size.is_positive(), "grid cell size must be positive");
        let Some((cols, rows)) = grid_dimensions(min, max, cell_size) else {
            panic!("grid bounds must be non-empty");
        };
        let count = cols.saturating_mul(rows);
        assert!(count <= MAX_CELLS, "grid of {cols}x{rows} cells exceeds {MAX_CELLS}");
        let (cols, rows, count) = (cols as u32, rows as u32, count as usize);

        Self {
            origin: min,
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); count],
            occupancy: 0,
        }
    }

    /// Drop every stored index, keeping cell allocations.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.clear();
        }
        self.occupancy = 0;
    }

    /// Total indices stored (one per in-bounds body).
    pub fn occupancy(&self) -> usize {
        self.occupancy
    }
}
