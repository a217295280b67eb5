//! Occupancy grid construction for the Xwalk distance engine.
//!
//! Builds a uniform 3D cell decomposition over a structure's atoms, marking
//! cells as occupied (covered by some atom's solvent-expanded van der Waals
//! sphere) or clearance-blocked (too close to an occupied cell for the
//! cross-linker moiety to pass). `xwalk-search` walks this grid; `xwalk-grid`
//! itself knows nothing about paths.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod grid;

pub use cell::{GridCell, GridParams, LocalGridSpec};
pub use error::GridError;
pub use grid::OccupancyGrid;
