use super::*;

impl Grid {
    /// Register `body` at `pos`. Out-of-bounds positions are ignored.
    ///
    /// Returns whether the body landed in a cell.
    pub fn insert(&mut self, body: u32, pos: FixedVector2) -> bool {
        match self.cell_index(pos) {
            Some(idx) => {
                fast!(mut self.cells, [idx]).push(body);
                self.occupancy += 1;
                true
            }
            None => false,
        }
    }

    /// Append every index stored in the 3x3 block around the cell of `pos`.
    ///
    /// Conservative: callers filter false positives (including the querying
    /// body itself) in the narrow phase.
    pub fn get_potential_colliders(&self, pos: FixedVector2, result: &mut Vec<u32>) {
        let Some((cx, cy)) = self.cell_coord(pos) else {
            return;
        };
        let (cx, cy) = (cx as i64, cy as i64);

        for ny in (cy - 1)..=(cy + 1) {
            for nx in (cx - 1)..=(cx + 1) {
                if !self.in_bounds(nx, ny) {
                    continue;
                }
                let idx = self.index(nx as u32, ny as u32);
                result.extend_from_slice(fast!(self.cells, [idx]));
            }
        }
    }

    /// Move `body` from the cell of `old_pos` to the cell of `new_pos`.
    ///
    /// O(1) no-op when both positions share a cell. Returns whether the
    /// membership changed.
    pub fn update_rigidbody(&mut self, old_pos: FixedVector2, body: u32, new_pos: FixedVector2) -> bool {
        let old_idx = self.cell_index(old_pos);
        let new_idx = self.cell_index(new_pos);
        if old_idx == new_idx {
            return false;
        }

        if let Some(idx) = old_idx {
            self.remove_from_cell(idx, body);
        }
        if let Some(idx) = new_idx {
            fast!(mut self.cells, [idx]).push(body);
            self.occupancy += 1;
        }
        true
    }

    /// Remove `body` from the cell of `pos`. Returns whether it was found.
    pub fn remove_rigidbody(&mut self, body: u32, pos: FixedVector2) -> bool {
        match self.cell_index(pos) {
            Some(idx) => self.remove_from_cell(idx, body),
            None => false,
        }
    }

    fn remove_from_cell(&mut self, idx: usize, body: u32) -> bool {
        let cell = fast!(mut self.cells, [idx]);
        if let Some(slot) = cell.iter().position(|&b| b == body) {
            cell.swap_remove(slot);
            self.occupancy -= 1;
            true
        } else {
            false
        }
    }
}
