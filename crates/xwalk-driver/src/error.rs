//! [`DriverError`]: the per-run failure type surfaced by [`crate::driver`].

use std::error::Error;
use std::fmt;

use xwalk_core::AtomError;
use xwalk_grid::GridError;

/// Errors that abort a [`crate::driver::DistanceDriver::run`] call outright.
///
/// Per-pair geometric and consistency errors are *not* represented here
/// — those are caught inside the driver's per-source loop
/// and turned into a sentinel [`crate::driver::DistanceRecord`] instead of
/// propagating. `DriverError` is reserved for Input and Configuration
/// failures, which abort the whole run.
#[derive(Debug, Clone)]
pub enum DriverError {
    /// Configuration failed validation.
    Config(crate::config::ConfigError),
    /// An atom in the input list failed validation.
    Atom(AtomError),
    /// Grid construction failed for reasons other than a per-pair Geometric
    /// error (e.g. an empty atom list).
    Grid(GridError),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Atom(e) => write!(f, "atom: {e}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
        }
    }
}

impl Error for DriverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Atom(e) => Some(e),
            Self::Grid(e) => Some(e),
        }
    }
}

impl From<crate::config::ConfigError> for DriverError {
    fn from(e: crate::config::ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<AtomError> for DriverError {
    fn from(e: AtomError) -> Self {
        Self::Atom(e)
    }
}

impl From<GridError> for DriverError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
