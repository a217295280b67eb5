//! Fixed constants shared across the workspace.

/// Bounding-box dimension above which local-grid mode is triggered.
pub const MAX_PROTEIN_DIMENSION: f64 = 150.0;

/// Default cross-linker reach (`D_max`) when the caller does not override it.
pub const DEFAULT_CROSS_LINKER_LENGTH: f64 = 34.0;

/// Hard ceiling on SASD regardless of the caller's requested `D_max`.
pub const MAX_SASD_DISTANCE: f64 = 80.0;

/// Minimum distance a path cell must maintain from any occupied cell,
/// representing the cross-linker moiety's own thickness.
pub const PATH_CLEARANCE_RADIUS: f64 = 3.0;

/// Default cubic grid cell edge length, Å.
pub const DEFAULT_GRID_CELL_SIZE: f64 = 1.0;

/// Default solvent radius, Å.
pub const DEFAULT_SOLVENT_RADIUS: f64 = 1.4;

/// Solvent radius used when only backbone atoms are considered, Å.
pub const BACKBONE_SOLVENT_RADIUS: f64 = 2.0;
