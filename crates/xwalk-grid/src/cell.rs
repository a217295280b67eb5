//! Read-only view of a single grid cell and grid construction parameters.

use xwalk_core::GridCoord;
use xwalk_core::Point;

/// A read-only snapshot of one cell's occupancy state.
///
/// A grid cell conceptually carries an occupancy flag plus a search-local
/// scratch triple (visited/distance/back-pointer). The scratch triple is
/// owned by `xwalk-search`'s `PathSearch`, not by the grid itself — this
/// crate only ever stores occupancy, since the grid is immutable topology
/// shared read-only across many searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    /// Grid index of this cell.
    pub coord: GridCoord,
    /// `true` iff the cell is covered by some atom's van der Waals sphere
    /// (expanded by the solvent radius).
    pub occupied: bool,
    /// `true` iff the cell lies within the path-clearance radius of some
    /// atom's expanded sphere (and is not itself occupied).
    pub clearance_blocked: bool,
}

impl GridCell {
    /// `true` if a path may step into this cell: neither occupied nor
    /// clearance-blocked.
    pub fn is_walkable(&self) -> bool {
        !self.occupied && !self.clearance_blocked
    }
}

/// Parameters governing occupancy grid construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridParams {
    /// Cubic cell edge length, Å. Must be positive.
    pub cell_size: f64,
    /// Solvent radius added to every atom's van der Waals radius, Å.
    pub solvent_radius: f64,
    /// Path-clearance radius: minimum distance a walkable cell must keep
    /// from any occupied cell, Å. Independent of `solvent_radius` — the two
    /// model different things (solvent exclusion vs. cross-linker thickness)
    /// and are not meant to be folded together.
    pub clearance_radius: f64,
}

/// Specifies a local-grid rebuild centred on one source atom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalGridSpec {
    /// Position of the source atom the local box is centred on.
    pub source: Point,
    /// The caller's search bound (`D_max`); the local box edge is
    /// `2 * (max_distance + 2 * cell_size)`.
    pub max_distance: f64,
}
