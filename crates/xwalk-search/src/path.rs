//! [`PathSearch`]: bounded multi-target shortest-path search over an
//! [`OccupancyGrid`].

use crate::error::SearchError;
use crate::scratch::SearchScratch;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use xwalk_core::GridCoord;
use xwalk_grid::OccupancyGrid;

/// The 26-neighbour cube stencil (full 3×3×3 minus the centre), enumerated
/// in a fixed order so that equal-distance tie-breaking is deterministic.
const NEIGHBOUR_OFFSETS: [[i32; 3]; 26] = [
    [-1, -1, -1], [-1, -1, 0], [-1, -1, 1],
    [-1, 0, -1], [-1, 0, 0], [-1, 0, 1],
    [-1, 1, -1], [-1, 1, 0], [-1, 1, 1],
    [0, -1, -1], [0, -1, 0], [0, -1, 1],
    [0, 0, -1], [0, 0, 1],
    [0, 1, -1], [0, 1, 0], [0, 1, 1],
    [1, -1, -1], [1, -1, 0], [1, -1, 1],
    [1, 0, -1], [1, 0, 0], [1, 0, 1],
    [1, 1, -1], [1, 1, 0], [1, 1, 1],
];

/// An ordered sequence of grid cells and the accumulated Euclidean distance
/// along them, from a search's source to one of its targets.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    cells: Vec<GridCoord>,
    distance: f64,
}

impl Path {
    /// The cells visited, in order from source to target.
    pub fn cells(&self) -> &[GridCoord] {
        &self.cells
    }

    /// Total Euclidean path length, Å.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// `true` for the zero-length sentinel used when a target is
    /// unreachable within bound.
    pub fn is_sentinel(&self) -> bool {
        self.cells.is_empty()
    }

    /// The zero-length sentinel path used when a target is not reachable
    /// within bound. Not an error.
    pub fn sentinel() -> Self {
        Self {
            cells: Vec::new(),
            distance: f64::INFINITY,
        }
    }
}

/// Orders a `(cost, cell_index)` pair for the min-heap frontier.
///
/// `f64` has no total order (`NaN`), but path costs are sums of finite
/// Euclidean distances and are never `NaN` in practice; `partial_cmp`
/// falling back to `Equal` is unreachable in that case.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Frontier {
    cost: f64,
    cell: usize,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bounded multi-target Dijkstra-style search over an [`OccupancyGrid`].
///
/// A `PathSearch` owns only its scratch buffers, sized once at construction;
/// the grid it searches over is passed to [`search`](Self::search) on every
/// call rather than stored, so the caller remains free to mutate the grid
/// (via [`OccupancyGrid::release_atom`] / `restore_atom`) between and around
/// calls without fighting the borrow checker over a held reference. One
/// `PathSearch` is built per grid shape and reused across many single-source
/// searches (the driver calls one per source atom); `search` soft-resets its
/// scratch state between calls rather than reallocating.
pub struct PathSearch {
    scratch: SearchScratch,
}

impl PathSearch {
    /// Build a search engine sized for `grid`.
    pub fn new(grid: &OccupancyGrid) -> Self {
        Self {
            scratch: SearchScratch::new(grid.cell_count()),
        }
    }

    fn flat_index(grid: &OccupancyGrid, coord: GridCoord) -> Option<usize> {
        let (nx, ny, nz) = grid.dims();
        if coord[0] < 0 || coord[1] < 0 || coord[2] < 0 {
            return None;
        }
        let (i, j, k) = (coord[0] as usize, coord[1] as usize, coord[2] as usize);
        if i >= nx || j >= ny || k >= nz {
            return None;
        }
        Some(i + j * nx + k * nx * ny)
    }

    fn unflatten(grid: &OccupancyGrid, idx: usize) -> GridCoord {
        let (nx, ny, _nz) = grid.dims();
        let k = idx / (nx * ny);
        let rem = idx % (nx * ny);
        let j = rem / nx;
        let i = rem % nx;
        [i as i32, j as i32, k as i32]
    }

    /// Run a bounded search from `source` to every cell in `targets`,
    /// returning one [`Path`] per target in the same order. Targets not
    /// reached within `max_distance` come back as [`Path::sentinel`].
    ///
    /// The caller is responsible for having opened a walkable hole at the
    /// source and target cells (via [`OccupancyGrid::release_atom`]) before
    /// calling this.
    pub fn search(
        &mut self,
        grid: &OccupancyGrid,
        source: GridCoord,
        targets: &[GridCoord],
        max_distance: f64,
    ) -> Result<Vec<Path>, SearchError> {
        trace!(
            "search: source={source:?}, targets={}, max_distance={max_distance}",
            targets.len()
        );
        if max_distance <= 0.0 {
            return Err(SearchError::NonPositiveBound { value: max_distance });
        }
        let source_idx = Self::flat_index(grid, source)
            .ok_or(SearchError::SourceOutOfGrid { coord: source })?;
        if grid.is_occupied(source) {
            return Err(SearchError::CellStillOccupied { coord: source });
        }

        let mut target_indices = Vec::with_capacity(targets.len());
        for &t in targets {
            let idx = Self::flat_index(grid, t)
                .ok_or(SearchError::TargetOutOfGrid { coord: t })?;
            if grid.is_occupied(t) {
                return Err(SearchError::CellStillOccupied { coord: t });
            }
            target_indices.push(idx);
        }

        self.scratch.soft_reset();
        self.scratch.seed_source(source_idx);

        let mut remaining: std::collections::HashSet<usize> =
            target_indices.iter().copied().collect();
        let mut heap = BinaryHeap::new();
        heap.push(Frontier {
            cost: 0.0,
            cell: source_idx,
        });
        let mut settled = vec![false; self.scratch.cell_count()];

        while let Some(Frontier { cost, cell }) = heap.pop() {
            if settled[cell] {
                continue;
            }
            if cost > self.scratch.distance(cell) {
                continue;
            }
            settled[cell] = true;
            remaining.remove(&cell);
            if remaining.is_empty() {
                break;
            }

            let u_coord = Self::unflatten(grid, cell);
            let u_centre_dist = cost;
            for offset in NEIGHBOUR_OFFSETS {
                let v_coord = [
                    u_coord[0] + offset[0],
                    u_coord[1] + offset[1],
                    u_coord[2] + offset[2],
                ];
                let Some(v_idx) = Self::flat_index(grid, v_coord) else {
                    continue;
                };
                if settled[v_idx] {
                    continue;
                }
                if grid.is_occupied(v_coord) || grid.is_clearance_blocked(v_coord) {
                    continue;
                }
                let step = grid.cell_distance(u_coord, v_coord);
                let candidate = u_centre_dist + step;
                if candidate > max_distance {
                    continue;
                }
                if candidate < self.scratch.distance(v_idx) {
                    self.scratch.relax(v_idx, candidate, cell);
                    heap.push(Frontier {
                        cost: candidate,
                        cell: v_idx,
                    });
                }
            }
        }

        let mut paths = Vec::with_capacity(target_indices.len());
        for &idx in &target_indices {
            let distance = self.scratch.distance(idx);
            if !distance.is_finite() || distance > max_distance {
                paths.push(Path::sentinel());
                continue;
            }
            paths.push(self.reconstruct(grid, idx, distance));
        }
        debug!(
            "search: {} of {} targets reached within bound",
            paths.iter().filter(|p| !p.is_sentinel()).count(),
            paths.len()
        );
        Ok(paths)
    }

    fn reconstruct(&self, grid: &OccupancyGrid, target_idx: usize, distance: f64) -> Path {
        let mut cells = Vec::new();
        let mut current = Some(target_idx);
        while let Some(idx) = current {
            cells.push(Self::unflatten(grid, idx));
            current = self.scratch.came_from(idx);
        }
        cells.reverse();
        Path { cells, distance }
    }
}
