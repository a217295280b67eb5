//! Xwalk: solvent-accessible surface distance (SASD) computation for
//! protein cross-linking.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Xwalk sub-crates. For most users, adding `xwalk` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use xwalk::prelude::*;
//!
//! // Two lysine side-chain nitrogens, 10 Å apart, nothing else nearby.
//! let mut atoms = AtomList::new();
//! atoms.push(Atom::new(1, "NZ", "LYS", 1, None, 'A', None, Point::ORIGIN, Element::N).unwrap());
//! atoms.push(Atom::new(2, "NZ", "LYS", 2, None, 'A', None, Point::new(10.0, 0.0, 0.0), Element::N).unwrap());
//!
//! let config = XwalkConfig {
//!     pair_spec: PairSpec {
//!         directional: true,
//!         ..PairSpec::default()
//!     },
//!     ..XwalkConfig::default()
//! };
//! let driver = DistanceDriver::new(&atoms, config).unwrap();
//! let records = driver.run().unwrap();
//! assert!(records.iter().any(|r| r.sasd.is_some()));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `xwalk-core` | `Atom`, `AtomList`, `Point`, `Element`, IDs, constants |
//! | [`grid`] | `xwalk-grid` | `OccupancyGrid`, `GridParams`, `GridCell` |
//! | [`search`] | `xwalk-search` | `PathSearch`, `Path` |
//! | [`driver`] | `xwalk-driver` | `DistanceDriver`, `XwalkConfig`, `PairSpec`, `PeptideEligibility` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Geometry primitives and the atom model (`xwalk-core`).
///
/// Contains [`core::Atom`], [`core::AtomList`], [`core::Point`],
/// [`core::Element`], and the id/constant types shared by every other
/// crate in the workspace.
pub use xwalk_core as core;

/// Occupancy grid construction (`xwalk-grid`).
///
/// [`grid::OccupancyGrid`] builds the cell decomposition that
/// [`search::PathSearch`] walks.
pub use xwalk_grid as grid;

/// Bounded multi-target shortest-path search (`xwalk-search`).
///
/// [`search::PathSearch`] runs the Dijkstra-style expansion over an
/// [`grid::OccupancyGrid`].
pub use xwalk_search as search;

/// Pair enumeration, configuration, and orchestration (`xwalk-driver`).
///
/// [`driver::DistanceDriver`] is the entry point most callers use directly:
/// build an [`core::AtomList`], a [`driver::XwalkConfig`], and call
/// [`driver::DistanceDriver::run`].
pub use xwalk_driver as driver;

/// Common imports for typical Xwalk usage.
///
/// ```rust
/// use xwalk::prelude::*;
/// ```
///
/// This imports the most frequently used types: the atom model, grid and
/// search types, and the driver's configuration and pair-selection types.
pub mod prelude {
    // Atom model and geometry.
    pub use xwalk_core::{Atom, AtomId, AtomList, BoundingBox, Element, GridCoord, Point};

    // Errors.
    pub use xwalk_core::AtomError;

    // Grid.
    pub use xwalk_grid::{GridCell, GridError, GridParams, LocalGridSpec, OccupancyGrid};

    // Search.
    pub use xwalk_search::{Path, PathSearch, SearchError};

    // Driver.
    pub use xwalk_driver::{
        enumerate_pairs, CancelToken, ConfigError, DistanceDriver, DistanceRecord, DriverError,
        PairSpec, PeptideEligibility, Selector, XwalkConfig,
    };
}
