//! Chemical element and van der Waals radius resolution.
//!
//! The van der Waals radius of an atom is resolved from a parameter set
//! keyed by chemical element at the moment the atom is admitted to the
//! grid; an unknown element falls back to a configurable default radius.
//! The table below is a `const` array rather than a runtime registry —
//! there is no global mutable parameter table to keep consistent.

use std::fmt;

/// Default van der Waals radius (Å) applied to elements absent from
/// [`VDW_RADII`].
pub const DEFAULT_VDW_RADIUS: f64 = 1.5;

/// The set of elements this crate resolves a van der Waals radius for.
///
/// Covers the elements that occur in standard amino acid side chains plus
/// common hetero-group constituents. Anything else falls back to
/// [`Element::Other`], which always resolves to [`DEFAULT_VDW_RADIUS`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    /// Hydrogen.
    H,
    /// Carbon.
    C,
    /// Nitrogen.
    N,
    /// Oxygen.
    O,
    /// Sulfur.
    S,
    /// Phosphorus.
    P,
    /// An element not enumerated above, keyed by its symbol.
    Other(String),
}

impl Element {
    /// Parse a PDB-style element symbol (case-insensitive, whitespace-trimmed).
    pub fn parse(symbol: &str) -> Self {
        match symbol.trim().to_ascii_uppercase().as_str() {
            "H" => Element::H,
            "C" => Element::C,
            "N" => Element::N,
            "O" => Element::O,
            "S" => Element::S,
            "P" => Element::P,
            other => Element::Other(other.to_string()),
        }
    }

    /// Van der Waals radius in Å, resolved from the fixed parameter table.
    ///
    /// Unknown elements (including [`Element::Other`]) resolve to
    /// [`DEFAULT_VDW_RADIUS`].
    pub fn van_der_waals_radius(&self) -> f64 {
        for (element, radius) in VDW_RADII {
            if element == self {
                return *radius;
            }
        }
        DEFAULT_VDW_RADIUS
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::H => write!(f, "H"),
            Element::C => write!(f, "C"),
            Element::N => write!(f, "N"),
            Element::O => write!(f, "O"),
            Element::S => write!(f, "S"),
            Element::P => write!(f, "P"),
            Element::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Fixed van der Waals radius table (Å), keyed by element.
///
/// Values follow the commonly used Bondi-derived set for biomolecular
/// cross-linking work.
pub const VDW_RADII: &[(Element, f64)] = &[
    (Element::H, 1.20),
    (Element::C, 1.70),
    (Element::N, 1.55),
    (Element::O, 1.52),
    (Element::S, 1.80),
    (Element::P, 1.80),
];
