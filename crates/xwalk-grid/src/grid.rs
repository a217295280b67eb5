//! The [`OccupancyGrid`]: a uniform 3D cell decomposition of molecular space.
//!
//! Construction is a single pass per atom: each atom's van der Waals sphere
//! (expanded by the solvent radius) is rasterised onto the grid, and — in
//! the same pass — the clearance dilation around that same sphere is
//! rasterised too. This works because the Minkowski sum of two balls is a
//! ball of the summed radius: dilating an atom's occupied sphere by the
//! path-clearance radius is exactly the sphere of radius
//! `(r_atom + r_solvent + r_clearance)` around the same centre, so both
//! masks are built from one bounding-cube sweep per atom, not a second
//! full-grid dilation pass.
//!
//! Occupancy and clearance are reference-counted per cell rather than
//! stored as plain booleans, because [`OccupancyGrid::release_atom`] /
//! [`OccupancyGrid::restore_atom`] (used by the driver to open a walkable
//! hole for a source or target atom) must not affect cells also covered by
//! some *other* atom's sphere.

use crate::cell::{GridCell, GridParams, LocalGridSpec};
use crate::error::GridError;
use log::{debug, trace};
use std::collections::HashMap;
use xwalk_core::{Atom, AtomId, AtomList, BoundingBox, GridCoord, Point};

/// A uniform 3D occupancy grid over a molecular structure's bounding box.
///
/// Built once per structure (or once per source atom in local-grid mode)
/// and reused across many [`xwalk-search`](../xwalk_search/index.html)
/// queries. The occupancy and clearance masks are mutated only through
/// [`release_atom`](Self::release_atom) / [`restore_atom`](Self::restore_atom);
/// all other queries are read-only.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    origin: Point,
    cell_size: f64,
    dims: (usize, usize, usize),
    occupied_refcount: Vec<u32>,
    clearance_refcount: Vec<u32>,
    /// Per-atom cell membership: cells within the atom's own occupied sphere.
    atom_occupied_cells: HashMap<AtomId, Vec<usize>>,
    /// Per-atom cell membership: cells within the atom's clearance-dilated
    /// sphere but not already counted as occupied by this same atom.
    atom_clearance_cells: HashMap<AtomId, Vec<usize>>,
    /// Atoms that local-grid mode excluded (lay wholly outside the local box).
    excluded_atoms: Vec<AtomId>,
}

impl OccupancyGrid {
    /// Build a grid spanning the full bounding box of `atoms`, expanded by
    /// a margin of `max(vdW radius) + solvent radius + one cell`.
    pub fn build_full(atoms: &AtomList, params: GridParams) -> Result<Self, GridError> {
        Self::build(atoms, params, None)
    }

    /// Build a grid restricted to a cube centred on `local.source` with edge
    /// `2 * (local.max_distance + 2 * cell_size)`, intersected with the full
    /// bounding box. Atoms lying wholly outside the resulting box are
    /// skipped and recorded in [`excluded_atoms`](Self::excluded_atoms).
    pub fn build_local(
        atoms: &AtomList,
        params: GridParams,
        local: LocalGridSpec,
    ) -> Result<Self, GridError> {
        Self::build(atoms, params, Some(local))
    }

    fn build(
        atoms: &AtomList,
        params: GridParams,
        local: Option<LocalGridSpec>,
    ) -> Result<Self, GridError> {
        if params.cell_size <= 0.0 {
            return Err(GridError::InvalidCellSize {
                value: params.cell_size,
            });
        }
        if atoms.is_empty() {
            return Err(GridError::EmptyAtomList);
        }

        let mut full_box: Option<BoundingBox> = None;
        let mut max_vdw: f64 = 0.0;
        for (_, atom) in atoms.iter() {
            let p = atom.position();
            full_box = Some(match full_box {
                Some(bb) => bb.union(&BoundingBox::of_point(p)),
                None => BoundingBox::of_point(p),
            });
            max_vdw = max_vdw.max(atom.van_der_waals_radius());
        }
        let full_box = full_box.expect("non-empty atom list produces a bounding box");
        let margin = max_vdw + params.solvent_radius + params.cell_size;
        let expanded = full_box.expanded_by(margin);

        let bounds = match local {
            Some(spec) => {
                let half_edge = spec.max_distance + 2.0 * params.cell_size;
                let cube = BoundingBox {
                    min: Point::new(
                        spec.source.x - half_edge,
                        spec.source.y - half_edge,
                        spec.source.z - half_edge,
                    ),
                    max: Point::new(
                        spec.source.x + half_edge,
                        spec.source.y + half_edge,
                        spec.source.z + half_edge,
                    ),
                };
                expanded.intersect(&cube).unwrap_or(cube)
            }
            None => expanded,
        };

        let (ex, ey, ez) = bounds.extent();
        let nx = (ex / params.cell_size).ceil().max(1.0) as usize;
        let ny = (ey / params.cell_size).ceil().max(1.0) as usize;
        let nz = (ez / params.cell_size).ceil().max(1.0) as usize;
        debug!(
            "building occupancy grid: dims=({nx}, {ny}, {nz}), cell_size={}, local={}",
            params.cell_size,
            local.is_some()
        );

        let cell_count = nx * ny * nz;
        let mut grid = OccupancyGrid {
            origin: bounds.min,
            cell_size: params.cell_size,
            dims: (nx, ny, nz),
            occupied_refcount: vec![0u32; cell_count],
            clearance_refcount: vec![0u32; cell_count],
            atom_occupied_cells: HashMap::new(),
            atom_clearance_cells: HashMap::new(),
            excluded_atoms: Vec::new(),
        };

        for (atom_id, atom) in atoms.iter() {
            if local.is_some() && !grid.bounding_box().contains(&atom.position()) {
                let reach = atom.van_der_waals_radius() + params.solvent_radius;
                if !grid.sphere_touches_box(&atom.position(), reach) {
                    grid.excluded_atoms.push(atom_id);
                    continue;
                }
            }
            grid.admit_atom(atom_id, atom, &params);
        }

        trace!(
            "grid built: {} atoms admitted, {} excluded",
            atoms.len() - grid.excluded_atoms.len(),
            grid.excluded_atoms.len()
        );
        Ok(grid)
    }

    fn bounding_box(&self) -> BoundingBox {
        let (nx, ny, nz) = self.dims;
        BoundingBox {
            min: self.origin,
            max: Point::new(
                self.origin.x + nx as f64 * self.cell_size,
                self.origin.y + ny as f64 * self.cell_size,
                self.origin.z + nz as f64 * self.cell_size,
            ),
        }
    }

    fn sphere_touches_box(&self, centre: &Point, radius: f64) -> bool {
        let bb = self.bounding_box();
        let clamped = Point::new(
            centre.x.clamp(bb.min.x, bb.max.x),
            centre.y.clamp(bb.min.y, bb.max.y),
            centre.z.clamp(bb.min.z, bb.max.z),
        );
        clamped.distance_to(centre) <= radius
    }

    /// Admit one atom's sphere into the occupancy and clearance masks.
    fn admit_atom(&mut self, atom_id: AtomId, atom: &Atom, params: &GridParams) {
        let centre = atom.position();
        let occ_radius = atom.van_der_waals_radius() + params.solvent_radius;
        let full_radius = occ_radius + params.clearance_radius;

        let (i_min, i_max) = self.axis_range(centre.x, full_radius, self.origin.x, self.dims.0);
        let (j_min, j_max) = self.axis_range(centre.y, full_radius, self.origin.y, self.dims.1);
        let (k_min, k_max) = self.axis_range(centre.z, full_radius, self.origin.z, self.dims.2);

        let mut occ_cells = Vec::new();
        let mut clearance_cells = Vec::new();

        for i in i_min..=i_max {
            for j in j_min..=j_max {
                for k in k_min..=k_max {
                    let idx = self.flat_index(i, j, k);
                    let cell_centre = self.cell_centre(i, j, k);
                    let dist = cell_centre.distance_to(&centre);
                    if dist <= occ_radius {
                        self.occupied_refcount[idx] += 1;
                        occ_cells.push(idx);
                    } else if dist <= full_radius {
                        self.clearance_refcount[idx] += 1;
                        clearance_cells.push(idx);
                    }
                }
            }
        }

        self.atom_occupied_cells.insert(atom_id, occ_cells);
        self.atom_clearance_cells.insert(atom_id, clearance_cells);
    }

    /// Index range `[lo, hi]` (inclusive, clamped to grid bounds) covering
    /// `[centre - radius, centre + radius]` along one axis.
    fn axis_range(&self, centre: f64, radius: f64, origin_axis: f64, dim: usize) -> (usize, usize) {
        if dim == 0 {
            return (0, 0);
        }
        let lo = ((centre - radius - origin_axis) / self.cell_size).floor();
        let hi = ((centre + radius - origin_axis) / self.cell_size).floor();
        let lo = (lo.max(0.0) as usize).min(dim - 1);
        let hi = (hi.max(0.0) as usize).min(dim - 1);
        (lo, hi)
    }

    fn flat_index(&self, i: usize, j: usize, k: usize) -> usize {
        let (nx, ny, _nz) = self.dims;
        i + j * nx + k * nx * ny
    }

    fn cell_centre(&self, i: usize, j: usize, k: usize) -> Point {
        Point::new(
            self.origin.x + (i as f64 + 0.5) * self.cell_size,
            self.origin.y + (j as f64 + 0.5) * self.cell_size,
            self.origin.z + (k as f64 + 0.5) * self.cell_size,
        )
    }

    /// Grid dimensions `(nx, ny, nz)`.
    pub fn dims(&self) -> (usize, usize, usize) {
        self.dims
    }

    /// Cubic cell edge length, Å.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Total number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.occupied_refcount.len()
    }

    /// Atoms skipped because they lay wholly outside the local-grid box.
    /// Always empty for grids built with [`build_full`](Self::build_full).
    pub fn excluded_atoms(&self) -> &[AtomId] {
        &self.excluded_atoms
    }

    /// Map a world-space point to its containing grid index, or `None` if
    /// the point falls outside the grid's bounding box.
    pub fn world_to_index(&self, point: &Point) -> Option<GridCoord> {
        let (nx, ny, nz) = self.dims;
        let fi = (point.x - self.origin.x) / self.cell_size;
        let fj = (point.y - self.origin.y) / self.cell_size;
        let fk = (point.z - self.origin.z) / self.cell_size;
        if fi < 0.0 || fj < 0.0 || fk < 0.0 {
            return None;
        }
        let i = fi.floor() as usize;
        let j = fj.floor() as usize;
        let k = fk.floor() as usize;
        if i >= nx || j >= ny || k >= nz {
            return None;
        }
        Some([i as i32, j as i32, k as i32])
    }

    /// World-space centre of the cell at `coord`.
    pub fn index_to_world(&self, coord: GridCoord) -> Option<Point> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(self.cell_centre(coord[0] as usize, coord[1] as usize, coord[2] as usize))
    }

    /// `true` if `coord` addresses a cell within `dims`.
    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        let (nx, ny, nz) = self.dims;
        coord[0] >= 0
            && coord[1] >= 0
            && coord[2] >= 0
            && (coord[0] as usize) < nx
            && (coord[1] as usize) < ny
            && (coord[2] as usize) < nz
    }

    fn index_of(&self, coord: GridCoord) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(self.flat_index(coord[0] as usize, coord[1] as usize, coord[2] as usize))
    }

    /// Query the occupancy/clearance state of a single cell.
    pub fn cell_at(&self, coord: GridCoord) -> Result<GridCell, GridError> {
        let idx = self.index_of(coord).ok_or_else(|| GridError::IndexOutOfBounds {
            coord,
            bounds: format!("dims={:?}", self.dims),
        })?;
        Ok(GridCell {
            coord,
            occupied: self.occupied_refcount[idx] > 0,
            clearance_blocked: self.clearance_refcount[idx] > 0,
        })
    }

    /// Flat-array occupancy test, used by `xwalk-search`'s hot inner loop
    /// without the `Result` overhead of [`cell_at`](Self::cell_at).
    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.index_of(coord)
            .map(|idx| self.occupied_refcount[idx] > 0)
            .unwrap_or(true)
    }

    /// Flat-array clearance test, used by `xwalk-search`'s hot inner loop.
    pub fn is_clearance_blocked(&self, coord: GridCoord) -> bool {
        self.index_of(coord)
            .map(|idx| self.clearance_refcount[idx] > 0)
            .unwrap_or(true)
    }

    /// Centre-to-centre Euclidean distance between two grid cells.
    pub fn cell_distance(&self, a: GridCoord, b: GridCoord) -> f64 {
        let dx = (a[0] - b[0]) as f64 * self.cell_size;
        let dy = (a[1] - b[1]) as f64 * self.cell_size;
        let dz = (a[2] - b[2]) as f64 * self.cell_size;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Un-occupy the cells belonging to `atom`'s own sphere, opening a
    /// walkable hole so a search can start or terminate inside it. A no-op
    /// if `atom` was excluded by local-grid mode.
    ///
    /// Returns [`GridError::IndexOutOfBounds`] only in the case of internal
    /// inconsistency (an atom whose recorded cells no longer validate) —
    /// this corresponds to the Consistency error class's "target shell
    /// cannot be cleared".
    pub fn release_atom(&mut self, atom: AtomId) -> Result<(), GridError> {
        if let Some(cells) = self.atom_occupied_cells.get(&atom) {
            for &idx in cells {
                self.occupied_refcount[idx] = self.occupied_refcount[idx].saturating_sub(1);
            }
        }
        if let Some(cells) = self.atom_clearance_cells.get(&atom) {
            for &idx in cells {
                self.clearance_refcount[idx] = self.clearance_refcount[idx].saturating_sub(1);
            }
        }
        Ok(())
    }

    /// Reverse of [`release_atom`](Self::release_atom): restore `atom`'s
    /// contribution to the occupancy and clearance masks.
    pub fn restore_atom(&mut self, atom: AtomId) {
        if let Some(cells) = self.atom_occupied_cells.get(&atom) {
            for &idx in cells {
                self.occupied_refcount[idx] += 1;
            }
        }
        if let Some(cells) = self.atom_clearance_cells.get(&atom) {
            for &idx in cells {
                self.clearance_refcount[idx] += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xwalk_core::Element;

    fn atom(id: i64, x: f64, y: f64, z: f64) -> Atom {
        Atom::new(
            id,
            "NZ",
            "LYS",
            1,
            None,
            'A',
            None,
            Point::new(x, y, z),
            Element::N,
        )
        .unwrap()
    }

    fn default_params() -> GridParams {
        GridParams {
            cell_size: 1.0,
            solvent_radius: 1.4,
            clearance_radius: 3.0,
        }
    }

    #[test]
    fn rejects_non_positive_cell_size() {
        let mut atoms = AtomList::new();
        atoms.push(atom(1, 0.0, 0.0, 0.0));
        let params = GridParams {
            cell_size: 0.0,
            ..default_params()
        };
        let err = OccupancyGrid::build_full(&atoms, params).unwrap_err();
        assert!(matches!(err, GridError::InvalidCellSize { value } if value == 0.0));
    }

    #[test]
    fn rejects_empty_atom_list() {
        let atoms = AtomList::new();
        let err = OccupancyGrid::build_full(&atoms, default_params()).unwrap_err();
        assert!(matches!(err, GridError::EmptyAtomList));
    }

    #[test]
    fn atom_centre_cell_is_occupied() {
        let mut atoms = AtomList::new();
        let id = atoms.push(atom(1, 0.0, 0.0, 0.0));
        let grid = OccupancyGrid::build_full(&atoms, default_params()).unwrap();
        let coord = grid.world_to_index(&atoms.get(id).unwrap().position()).unwrap();
        assert!(grid.is_occupied(coord));
    }

    #[test]
    fn cells_far_from_every_atom_are_walkable() {
        let mut atoms = AtomList::new();
        atoms.push(atom(1, 0.0, 0.0, 0.0));
        let grid = OccupancyGrid::build_full(&atoms, default_params()).unwrap();
        let far = Point::new(20.0, 20.0, 20.0);
        if let Some(coord) = grid.world_to_index(&far) {
            let cell = grid.cell_at(coord).unwrap();
            assert!(cell.is_walkable());
        }
    }

    #[test]
    fn release_then_restore_is_idempotent() {
        let mut atoms = AtomList::new();
        let id = atoms.push(atom(1, 0.0, 0.0, 0.0));
        let mut grid = OccupancyGrid::build_full(&atoms, default_params()).unwrap();
        let coord = grid.world_to_index(&atoms.get(id).unwrap().position()).unwrap();
        assert!(grid.is_occupied(coord));
        grid.release_atom(id).unwrap();
        assert!(!grid.is_occupied(coord));
        grid.restore_atom(id);
        assert!(grid.is_occupied(coord));
    }

    #[test]
    fn overlapping_atoms_stay_occupied_after_one_release() {
        let mut atoms = AtomList::new();
        let a = atoms.push(atom(1, 0.0, 0.0, 0.0));
        let b = atoms.push(atom(2, 0.5, 0.0, 0.0));
        let mut grid = OccupancyGrid::build_full(&atoms, default_params()).unwrap();
        let coord = grid.world_to_index(&atoms.get(a).unwrap().position()).unwrap();
        assert!(grid.is_occupied(coord));
        grid.release_atom(a).unwrap();
        // Still occupied: atom b's sphere also covers this cell.
        assert!(grid.is_occupied(coord));
        let _ = b;
    }

    #[test]
    fn local_grid_excludes_atoms_far_outside_box() {
        let mut atoms = AtomList::new();
        let source = atoms.push(atom(1, 0.0, 0.0, 0.0));
        let far = atoms.push(atom(2, 500.0, 500.0, 500.0));
        let grid = OccupancyGrid::build_local(
            &atoms,
            default_params(),
            LocalGridSpec {
                source: atoms.get(source).unwrap().position(),
                max_distance: 20.0,
            },
        )
        .unwrap();
        assert!(grid.excluded_atoms().contains(&far));
    }

    use proptest::prelude::*;

    fn arb_atoms(max_count: usize, coord_bound: f64) -> impl Strategy<Value = AtomList> {
        prop::collection::vec(
            (
                -coord_bound..coord_bound,
                -coord_bound..coord_bound,
                -coord_bound..coord_bound,
            ),
            1..=max_count,
        )
        .prop_map(|positions| {
            let mut atoms = AtomList::new();
            for (i, (x, y, z)) in positions.into_iter().enumerate() {
                atoms.push(atom(i as i64 + 1, x, y, z));
            }
            atoms
        })
    }

    proptest! {
        #[test]
        fn full_grid_bounding_box_contains_every_atom(atoms in arb_atoms(6, 15.0)) {
            let grid = OccupancyGrid::build_full(&atoms, default_params()).unwrap();
            let bb = grid.bounding_box();
            for (_, a) in atoms.iter() {
                prop_assert!(bb.contains(&a.position()));
            }
        }

        #[test]
        fn every_occupied_cell_is_within_reach_of_some_atom(atoms in arb_atoms(4, 10.0)) {
            let params = default_params();
            let grid = OccupancyGrid::build_full(&atoms, params).unwrap();
            let half_diagonal = grid.cell_size * 3f64.sqrt() / 2.0;
            let (nx, ny, nz) = grid.dims;
            for i in 0..nx {
                for j in 0..ny {
                    for k in 0..nz {
                        let idx = grid.flat_index(i, j, k);
                        if grid.occupied_refcount[idx] == 0 {
                            continue;
                        }
                        let cell_centre = grid.cell_centre(i, j, k);
                        let reachable = atoms.iter().any(|(_, a)| {
                            cell_centre.distance_to(&a.position())
                                <= a.van_der_waals_radius() + params.solvent_radius + half_diagonal
                        });
                        prop_assert!(reachable);
                    }
                }
            }
        }
    }
}
