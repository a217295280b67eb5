//! Error types for atom admission.
//!
//! Covers the Input error class. Geometric, Consistency, and Configuration
//! errors live in the crates that detect them (`xwalk-grid`, `xwalk-search`,
//! `xwalk-driver`) rather than here.

use std::error::Error;
use std::fmt;

/// Errors raised while admitting an atom to an [`AtomList`](crate::atom::AtomList).
#[derive(Clone, Debug, PartialEq)]
pub enum AtomError {
    /// A coordinate component fell outside `±9999 Å`.
    CoordinateOutOfBounds {
        /// Which axis failed (`"x"`, `"y"`, or `"z"`).
        axis: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A coordinate component was not finite (NaN or infinite).
    NonFiniteCoordinate {
        /// Which axis failed.
        axis: &'static str,
    },
    /// The residue sequence number fell outside `[-999, 9999]`.
    ResidueNumberOutOfBounds {
        /// The offending value.
        value: i32,
    },
    /// An identifying field (name, chain, residue name, alt-loc) was empty
    /// or contained characters outside the allowed PDB character set.
    MalformedIdentifier {
        /// Which field failed.
        field: &'static str,
        /// The offending value.
        value: String,
    },
}

impl fmt::Display for AtomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoordinateOutOfBounds { axis, value } => {
                write!(f, "{axis} coordinate {value} outside ±9999 Å bounds")
            }
            Self::NonFiniteCoordinate { axis } => {
                write!(f, "{axis} coordinate is not finite")
            }
            Self::ResidueNumberOutOfBounds { value } => {
                write!(f, "residue number {value} outside [-999, 9999] bounds")
            }
            Self::MalformedIdentifier { field, value } => {
                write!(f, "malformed {field}: {value:?}")
            }
        }
    }
}

impl Error for AtomError {}
