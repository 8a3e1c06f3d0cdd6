use super::*;

impl Grid {
    // === Dimensions ===
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) { (self.cols, self.rows) }

    #[inline]
    pub fn cell_size(&self) -> FixedPoint { self.cell_size }

    #[inline]
    pub fn origin(&self) -> FixedVector2 { self.origin }

    #[inline]
    pub fn cell_count(&self) -> usize { self.cells.len() }

    // === Coordinate conversion ===

    /// Cell containing `pos`, or `None` outside the grid.
    #[inline]
    pub fn cell_coord(&self, pos: FixedVector2) -> Option<(u32, u32)> {
        let cx = ((pos.x - self.origin.x) / self.cell_size).to_int();
        let cy = ((pos.y - self.origin.y) / self.cell_size).to_int();
        if self.in_bounds(cx, cy) {
            Some((cx as u32, cy as u32))
        } else {
            None
        }
    }

    #[inline]
    pub fn in_bounds(&self, cx: i64, cy: i64) -> bool {
        cx >= 0 && cx < self.cols as i64 && cy >= 0 && cy < self.rows as i64
    }

    #[inline]
    pub fn index(&self, cx: u32, cy: u32) -> usize {
        debug_assert!(
            cx < self.cols && cy < self.rows,
            "index: out of bounds ({}, {}) for {}x{} grid",
            cx,
            cy,
            self.cols,
            self.rows
        );
        (cy as usize) * (self.cols as usize) + cx as usize
    }

    /// Row-major cell index for `pos`.
    #[inline]
    pub fn cell_index(&self, pos: FixedVector2) -> Option<usize> {
        self.cell_coord(pos).map(|(cx, cy)| self.index(cx, cy))
    }

    // === Cell views ===

    pub fn cell(&self, cx: u32, cy: u32) -> Option<&[u32]> {
        if !self.in_bounds(cx as i64, cy as i64) {
            return None;
        }
        Some(fast!(self.cells, [self.index(cx, cy)]).as_slice())
    }

    pub fn cell_at(&self, pos: FixedVector2) -> Option<&[u32]> {
        self.cell_index(pos).map(|idx| fast!(self.cells, [idx]).as_slice())
    }
}
