//! Error types for bounded multi-target path search.

use std::fmt;
use xwalk_core::GridCoord;

/// Errors arising from a [`PathSearch`](crate::PathSearch) run.
///
/// Unreachability within `max_distance` is deliberately *not* a member of
/// this enum — it comes back as a sentinel [`Path`](crate::Path), not a
/// failure.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The source cell falls outside the grid (Geometric error class).
    SourceOutOfGrid {
        /// The offending coordinate.
        coord: GridCoord,
    },
    /// A target cell falls outside the grid (Geometric error class).
    TargetOutOfGrid {
        /// The offending coordinate.
        coord: GridCoord,
    },
    /// The source or a target cell remained occupied after its own atom's
    /// shell was un-occupied, indicating overlap with another atom's sphere
    /// (Consistency error class).
    CellStillOccupied {
        /// The offending coordinate.
        coord: GridCoord,
    },
    /// `max_distance` was non-positive (Configuration error class).
    NonPositiveBound {
        /// The offending value.
        value: f64,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceOutOfGrid { coord } => {
                write!(f, "source cell {coord:?} lies outside the grid")
            }
            Self::TargetOutOfGrid { coord } => {
                write!(f, "target cell {coord:?} lies outside the grid")
            }
            Self::CellStillOccupied { coord } => write!(
                f,
                "cell {coord:?} remained occupied after its own atom's shell was cleared"
            ),
            Self::NonPositiveBound { value } => {
                write!(f, "search bound {value} must be positive")
            }
        }
    }
}

impl std::error::Error for SearchError {}
