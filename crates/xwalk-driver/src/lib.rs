//! Pair enumeration, configuration, and distance-driver orchestration for
//! the Xwalk distance engine.
//!
//! This is the crate external collaborators (a PDB loader, a CLI, an output
//! formatter) link against: build an `AtomList` (from `xwalk-core`), a
//! [`selector::PairSpec`], wrap both in an [`config::XwalkConfig`], and run
//! [`driver::DistanceDriver`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod driver;
pub mod eligibility;
pub mod error;
pub mod selector;

pub use cancel::CancelToken;
pub use config::{ConfigError, XwalkConfig};
pub use driver::{DistanceDriver, DistanceRecord};
pub use eligibility::PeptideEligibility;
pub use error::DriverError;
pub use selector::{enumerate_pairs, PairSpec, Selector};
