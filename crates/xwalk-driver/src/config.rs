//! [`XwalkConfig`]: validated runtime configuration for the distance engine.

use std::error::Error;
use std::fmt;

use xwalk_core::{MAX_PROTEIN_DIMENSION, MAX_SASD_DISTANCE};

use crate::selector::PairSpec;

/// Errors detected during [`XwalkConfig::validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `max_distance` was non-positive.
    InvalidMaxDistance {
        /// The offending value.
        value: f64,
    },
    /// `max_distance` exceeds the hard SASD ceiling.
    MaxDistanceExceedsCeiling {
        /// The offending value.
        value: f64,
        /// The ceiling it exceeded.
        ceiling: f64,
    },
    /// `grid_cell_size` was non-positive.
    InvalidCellSize {
        /// The offending value.
        value: f64,
    },
    /// `solvent_radius` was negative.
    InvalidSolventRadius {
        /// The offending value.
        value: f64,
    },
    /// `clearance_radius` was negative.
    InvalidClearanceRadius {
        /// The offending value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMaxDistance { value } => {
                write!(f, "max_distance must be positive, got {value}")
            }
            Self::MaxDistanceExceedsCeiling { value, ceiling } => write!(
                f,
                "max_distance {value} exceeds the hard SASD ceiling of {ceiling}"
            ),
            Self::InvalidCellSize { value } => {
                write!(f, "grid_cell_size must be positive, got {value}")
            }
            Self::InvalidSolventRadius { value } => {
                write!(f, "solvent_radius must be non-negative, got {value}")
            }
            Self::InvalidClearanceRadius { value } => {
                write!(f, "clearance_radius must be non-negative, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Complete, validated configuration for one engine run.
#[derive(Clone, Debug)]
pub struct XwalkConfig {
    /// *D_max*, Å. Default 34.0 (`DEFAULT_CROSS_LINKER_LENGTH`).
    pub max_distance: f64,
    /// Cubic grid cell edge length, Å. Default 1.0.
    pub grid_cell_size: f64,
    /// Solvent radius, Å. Default 1.4, or 2.0 when `backbone_only` is set.
    pub solvent_radius: f64,
    /// Path-clearance radius, Å. Default 3.0 (`PATH_CLEARANCE_RADIUS`).
    pub clearance_radius: f64,
    /// Rebuild the grid locally per source atom once any bounding-box
    /// dimension exceeds `MAX_PROTEIN_DIMENSION`. Default `true`.
    pub local_grid: bool,
    /// The pair specification governing candidate enumeration.
    pub pair_spec: PairSpec,
}

impl Default for XwalkConfig {
    fn default() -> Self {
        Self {
            max_distance: xwalk_core::DEFAULT_CROSS_LINKER_LENGTH,
            grid_cell_size: xwalk_core::DEFAULT_GRID_CELL_SIZE,
            solvent_radius: xwalk_core::DEFAULT_SOLVENT_RADIUS,
            clearance_radius: xwalk_core::PATH_CLEARANCE_RADIUS,
            local_grid: true,
            pair_spec: PairSpec::default(),
        }
    }
}

impl XwalkConfig {
    /// Validate every structural invariant a run depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_distance.is_finite() || self.max_distance <= 0.0 {
            return Err(ConfigError::InvalidMaxDistance {
                value: self.max_distance,
            });
        }
        if self.max_distance > MAX_SASD_DISTANCE {
            return Err(ConfigError::MaxDistanceExceedsCeiling {
                value: self.max_distance,
                ceiling: MAX_SASD_DISTANCE,
            });
        }
        if !self.grid_cell_size.is_finite() || self.grid_cell_size <= 0.0 {
            return Err(ConfigError::InvalidCellSize {
                value: self.grid_cell_size,
            });
        }
        if !self.solvent_radius.is_finite() || self.solvent_radius < 0.0 {
            return Err(ConfigError::InvalidSolventRadius {
                value: self.solvent_radius,
            });
        }
        if !self.clearance_radius.is_finite() || self.clearance_radius < 0.0 {
            return Err(ConfigError::InvalidClearanceRadius {
                value: self.clearance_radius,
            });
        }
        Ok(())
    }

    /// `true` if `dimension` (the largest extent of the structure's
    /// bounding box, Å) should trigger local-grid mode.
    pub fn needs_local_grid(&self, dimension: f64) -> bool {
        self.local_grid && dimension > MAX_PROTEIN_DIMENSION
    }
}
