//! Bounded multi-target shortest-path search over the Xwalk occupancy grid.
//!
//! [`PathSearch`] runs a Dijkstra-style expansion with a 26-neighbour cube
//! stencil and Euclidean step costs, bounded by a maximum search distance.
//! It knows nothing about atoms or pairs — those live in `xwalk-driver`,
//! which opens a walkable hole at the source and target cells before
//! calling in here.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod path;
mod scratch;

pub use error::SearchError;
pub use path::{Path, PathSearch};
