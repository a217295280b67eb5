//! The [`Atom`] record and [`AtomList`] container.

use crate::element::{Element, DEFAULT_VDW_RADIUS};
use crate::error::AtomError;
use crate::id::AtomId;
use crate::point::Point;

/// Residue sequence numbers outside this range are rejected.
pub const RESIDUE_NUMBER_RANGE: std::ops::RangeInclusive<i32> = -999..=9999;

/// Coordinate components outside `±COORDINATE_BOUND` are rejected.
pub const COORDINATE_BOUND: f64 = 9999.0;

/// A single atom in a protein structure.
///
/// Immutable once constructed, except for the van der Waals radius, which
/// may be set once from a selected parameter set after construction (see
/// [`Atom::with_van_der_waals_radius`]).
///
/// Two atoms are equal iff all identifying fields match and their
/// coordinates agree within [`COINCIDENCE_EPSILON`](crate::point::COINCIDENCE_EPSILON)
/// — see [`Atom::identity_eq`]. `#[derive(PartialEq)]` is deliberately not
/// used here since bitwise field equality is not the domain notion of
/// "same atom".
#[derive(Clone, Debug)]
pub struct Atom {
    serial_number: i64,
    name: String,
    residue_name: String,
    residue_number: i32,
    insertion_code: Option<char>,
    chain_id: char,
    alt_loc: Option<char>,
    position: Point,
    element: Element,
    van_der_waals_radius: f64,
    charge: Option<f64>,
    is_aromatic: bool,
    is_metallic: bool,
}

impl Atom {
    /// Construct an atom, validating its coordinates, residue number, and
    /// identifying fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        serial_number: i64,
        name: impl Into<String>,
        residue_name: impl Into<String>,
        residue_number: i32,
        insertion_code: Option<char>,
        chain_id: char,
        alt_loc: Option<char>,
        position: Point,
        element: Element,
    ) -> Result<Self, AtomError> {
        if !position.x.is_finite() {
            return Err(AtomError::NonFiniteCoordinate { axis: "x" });
        }
        if !position.y.is_finite() {
            return Err(AtomError::NonFiniteCoordinate { axis: "y" });
        }
        if !position.z.is_finite() {
            return Err(AtomError::NonFiniteCoordinate { axis: "z" });
        }
        for (axis, value) in [("x", position.x), ("y", position.y), ("z", position.z)] {
            if value.abs() > COORDINATE_BOUND {
                return Err(AtomError::CoordinateOutOfBounds { axis, value });
            }
        }
        if !RESIDUE_NUMBER_RANGE.contains(&residue_number) {
            return Err(AtomError::ResidueNumberOutOfBounds {
                value: residue_number,
            });
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AtomError::MalformedIdentifier {
                field: "atom name",
                value: name,
            });
        }
        let residue_name = residue_name.into();
        if residue_name.trim().is_empty() {
            return Err(AtomError::MalformedIdentifier {
                field: "residue name",
                value: residue_name,
            });
        }
        let van_der_waals_radius = element.van_der_waals_radius();
        Ok(Self {
            serial_number,
            name,
            residue_name,
            residue_number,
            insertion_code,
            chain_id,
            alt_loc,
            position,
            element,
            van_der_waals_radius,
            charge: None,
            is_aromatic: false,
            is_metallic: false,
        })
    }

    /// Replace the resolved van der Waals radius (e.g. to apply a different
    /// parameter set than the one [`Element::van_der_waals_radius`] would
    /// give, or the configured default for an unrecognised element).
    ///
    /// Callers are expected to do this exactly once, immediately after
    /// construction and before the atom is admitted to a grid.
    pub fn with_van_der_waals_radius(mut self, radius: f64) -> Self {
        self.van_der_waals_radius = radius;
        self
    }

    /// Serial number as it appeared in the source structure.
    pub fn serial_number(&self) -> i64 {
        self.serial_number
    }

    /// Atom name (e.g. `"NZ"` for a lysine side-chain nitrogen).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Residue name (e.g. `"LYS"`).
    pub fn residue_name(&self) -> &str {
        &self.residue_name
    }

    /// Residue sequence number.
    pub fn residue_number(&self) -> i32 {
        self.residue_number
    }

    /// PDB insertion code, if any.
    pub fn insertion_code(&self) -> Option<char> {
        self.insertion_code
    }

    /// Chain identifier.
    pub fn chain_id(&self) -> char {
        self.chain_id
    }

    /// Alternative location indicator, if any.
    pub fn alt_loc(&self) -> Option<char> {
        self.alt_loc
    }

    /// Cartesian position in Å.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Chemical element.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Resolved van der Waals radius in Å.
    pub fn van_der_waals_radius(&self) -> f64 {
        self.van_der_waals_radius
    }

    /// Formal charge, if known.
    pub fn charge(&self) -> Option<f64> {
        self.charge
    }

    /// Set the formal charge.
    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = Some(charge);
        self
    }

    /// `true` if this atom is part of an aromatic ring system.
    pub fn is_aromatic(&self) -> bool {
        self.is_aromatic
    }

    /// Mark this atom as aromatic.
    pub fn with_aromatic(mut self, aromatic: bool) -> Self {
        self.is_aromatic = aromatic;
        self
    }

    /// `true` if this atom is metallic.
    pub fn is_metallic(&self) -> bool {
        self.is_metallic
    }

    /// Mark this atom as metallic.
    pub fn with_metallic(mut self, metallic: bool) -> Self {
        self.is_metallic = metallic;
        self
    }

    /// A short descriptor in `residueName-residueNumber-chain-atomName` form,
    /// matching the output record format used by downstream TSV rendering.
    pub fn descriptor(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.residue_name, self.residue_number, self.chain_id, self.name
        )
    }

    /// The domain notion of atom equality: all identifying fields match and
    /// coordinates agree within [`COINCIDENCE_EPSILON`](crate::point::COINCIDENCE_EPSILON).
    pub fn identity_eq(&self, other: &Atom) -> bool {
        self.name == other.name
            && self.chain_id == other.chain_id
            && self.alt_loc == other.alt_loc
            && self.residue_name == other.residue_name
            && self.residue_number == other.residue_number
            && self.position.is_coincident_with(&other.position)
    }

    /// Backbone atom names, per the N/CA/C/O convention used to decide
    /// whether the backbone-only solvent radius (2.0 Å) applies.
    pub fn is_backbone(&self) -> bool {
        matches!(self.name.as_str(), "N" | "CA" | "C" | "O")
    }
}

/// An ordered, immutable collection of atoms.
///
/// Order is caller-meaningful (matches input file order) but not
/// semantically significant to the engine. Atoms are looked up by
/// [`AtomId`], which is simply their position in the list.
#[derive(Clone, Debug, Default)]
pub struct AtomList {
    atoms: Vec<Atom>,
}

impl AtomList {
    /// An empty atom list.
    pub fn new() -> Self {
        Self { atoms: Vec::new() }
    }

    /// Build an atom list from an already-validated `Vec<Atom>`.
    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// Append an atom, returning its freshly assigned [`AtomId`].
    pub fn push(&mut self, atom: Atom) -> AtomId {
        let id = AtomId(self.atoms.len() as u32);
        self.atoms.push(atom);
        id
    }

    /// Number of atoms in the list.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// `true` if the list has no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Look up an atom by ID.
    pub fn get(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id.0 as usize)
    }

    /// Iterate over `(AtomId, &Atom)` pairs in list order.
    pub fn iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms
            .iter()
            .enumerate()
            .map(|(i, a)| (AtomId(i as u32), a))
    }

    /// The plain atom slice, in list order.
    pub fn as_slice(&self) -> &[Atom] {
        &self.atoms
    }

    /// Default van der Waals radius applied when an atom's element is
    /// unrecognised.
    pub const DEFAULT_RADIUS: f64 = DEFAULT_VDW_RADIUS;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(serial: i64, x: f64) -> Atom {
        Atom::new(
            serial,
            "NZ",
            "LYS",
            42,
            None,
            'A',
            None,
            Point::new(x, 0.0, 0.0),
            Element::N,
        )
        .unwrap()
    }

    #[test]
    fn construction_resolves_vdw_radius() {
        let atom = sample(1, 0.0);
        assert_eq!(atom.van_der_waals_radius(), 1.55);
    }

    #[test]
    fn rejects_out_of_bounds_coordinate() {
        let err = Atom::new(
            1,
            "NZ",
            "LYS",
            42,
            None,
            'A',
            None,
            Point::new(20000.0, 0.0, 0.0),
            Element::N,
        )
        .unwrap_err();
        assert!(matches!(err, AtomError::CoordinateOutOfBounds { axis: "x", .. }));
    }

    #[test]
    fn rejects_residue_number_out_of_range() {
        let err = Atom::new(
            1,
            "NZ",
            "LYS",
            20000,
            None,
            'A',
            None,
            Point::ORIGIN,
            Element::N,
        )
        .unwrap_err();
        assert!(matches!(err, AtomError::ResidueNumberOutOfBounds { value: 20000 }));
    }

    #[test]
    fn identity_eq_tolerant_of_small_coordinate_drift() {
        let a = sample(1, 0.0);
        let b = sample(2, 0.00005);
        assert!(a.identity_eq(&b));
        let c = sample(3, 1.0);
        assert!(!a.identity_eq(&c));
    }

    #[test]
    fn atom_list_assigns_sequential_ids() {
        let mut list = AtomList::new();
        let id0 = list.push(sample(1, 0.0));
        let id1 = list.push(sample(2, 1.0));
        assert_eq!(id0, AtomId(0));
        assert_eq!(id1, AtomId(1));
        assert_eq!(list.len(), 2);
        assert!(list.get(id0).unwrap().identity_eq(&sample(1, 0.0)));
    }

    #[test]
    fn backbone_atom_names_recognised() {
        let mut backbone = sample(1, 0.0);
        backbone = Atom::new(
            backbone.serial_number(),
            "CA",
            backbone.residue_name(),
            backbone.residue_number(),
            None,
            backbone.chain_id(),
            None,
            backbone.position(),
            Element::C,
        )
        .unwrap();
        assert!(backbone.is_backbone());
        assert!(!sample(1, 0.0).is_backbone());
    }
}
