//! Error types for occupancy grid construction and queries.

use xwalk_core::GridCoord;
use std::fmt;

/// Errors arising from occupancy grid construction or cell queries.
#[derive(Debug, Clone)]
pub enum GridError {
    /// A world-space point fell outside the grid's bounding box.
    PointOutOfBounds {
        /// The offending point, formatted for display.
        point: String,
    },
    /// A grid index fell outside `0..dims`.
    IndexOutOfBounds {
        /// The offending index.
        coord: GridCoord,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// The cell size was non-positive (Configuration error class).
    InvalidCellSize {
        /// The offending cell size.
        value: f64,
    },
    /// The atom list was empty; there is no bounding box to grid.
    EmptyAtomList,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointOutOfBounds { point } => {
                write!(f, "point {point} out of grid bounds")
            }
            Self::IndexOutOfBounds { coord, bounds } => {
                write!(f, "index {coord:?} out of bounds: {bounds}")
            }
            Self::InvalidCellSize { value } => {
                write!(f, "grid cell size {value} must be positive")
            }
            Self::EmptyAtomList => write!(f, "cannot build a grid over an empty atom list"),
        }
    }
}

impl std::error::Error for GridError {}
