//! Soft-reset scratch state reused across searches on the same grid.
//!
//! A search mutates only the handful of cells it actually explores, so
//! resetting is driven by a touched-cell list rather than clearing the
//! whole buffer: before the next search, only cells touched by the
//! previous one are restored to their resting state. This brings per-pair
//! search cost down from O(grid size) to O(cells explored).

/// Per-cell distance/back-pointer state for one grid, reused across searches.
pub(crate) struct SearchScratch {
    distance: Vec<f64>,
    came_from: Vec<Option<usize>>,
    touched: Vec<usize>,
    is_touched: Vec<bool>,
}

impl SearchScratch {
    pub(crate) fn new(cell_count: usize) -> Self {
        Self {
            distance: vec![f64::INFINITY; cell_count],
            came_from: vec![None; cell_count],
            touched: Vec::new(),
            is_touched: vec![false; cell_count],
        }
    }

    pub(crate) fn distance(&self, idx: usize) -> f64 {
        self.distance[idx]
    }

    pub(crate) fn came_from(&self, idx: usize) -> Option<usize> {
        self.came_from[idx]
    }

    fn mark_touched(&mut self, idx: usize) {
        if !self.is_touched[idx] {
            self.is_touched[idx] = true;
            self.touched.push(idx);
        }
    }

    /// Seed the source cell at distance zero.
    pub(crate) fn seed_source(&mut self, idx: usize) {
        self.mark_touched(idx);
        self.distance[idx] = 0.0;
        self.came_from[idx] = None;
    }

    /// Relax `idx` to `distance` via predecessor `from`.
    pub(crate) fn relax(&mut self, idx: usize, distance: f64, from: usize) {
        self.mark_touched(idx);
        self.distance[idx] = distance;
        self.came_from[idx] = Some(from);
    }

    /// Restore every touched cell to its resting state (distance = infinity,
    /// no back-pointer) and clear the touched list.
    pub(crate) fn soft_reset(&mut self) {
        for &idx in &self.touched {
            self.distance[idx] = f64::INFINITY;
            self.came_from[idx] = None;
            self.is_touched[idx] = false;
        }
        self.touched.clear();
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.distance.len()
    }
}
