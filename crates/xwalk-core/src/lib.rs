//! Geometry primitives and the atom model for the Xwalk distance engine.
//!
//! This is the leaf crate with zero internal Xwalk dependencies. It defines
//! the fundamental abstractions used throughout the workspace: the
//! coordinate/point type, the `Atom`/`AtomList` model, element and van der
//! Waals radius resolution, and the Input-class error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod atom;
pub mod constants;
pub mod element;
pub mod error;
pub mod id;
pub mod point;

// Re-export core types at crate root for convenience.
pub use atom::{Atom, AtomList};
pub use constants::{
    BACKBONE_SOLVENT_RADIUS, DEFAULT_CROSS_LINKER_LENGTH, DEFAULT_GRID_CELL_SIZE,
    DEFAULT_SOLVENT_RADIUS, MAX_PROTEIN_DIMENSION, MAX_SASD_DISTANCE, PATH_CLEARANCE_RADIUS,
};
pub use element::{Element, DEFAULT_VDW_RADIUS};
pub use error::AtomError;
pub use id::{AtomId, GridCoord};
pub use point::{BoundingBox, Point, COINCIDENCE_EPSILON};
