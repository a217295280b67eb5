//! Reusable atom and structure fixtures.
//!
//! Three building blocks for grid, search, and driver test suites:
//!
//! - [`atom`] — a single fully-specified atom, for ad-hoc placement.
//! - [`backbone_chain`] — a straight CA backbone, for extended-structure tests.
//! - [`lysine_pair`] — two NZ side-chain atoms a fixed distance apart, the
//!   minimal fixture for a single cross-linkable pair.

use xwalk_core::{Atom, AtomList, Element, Point};

/// Construct a single atom, panicking on validation failure. Test-only: a
/// production caller goes through a loader and handles [`xwalk_core::AtomError`].
#[allow(clippy::too_many_arguments)]
pub fn atom(
    serial: i64,
    name: &str,
    residue_name: &str,
    residue_number: i32,
    chain_id: char,
    x: f64,
    y: f64,
    z: f64,
    element: Element,
) -> Atom {
    Atom::new(
        serial,
        name,
        residue_name,
        residue_number,
        None,
        chain_id,
        None,
        Point::new(x, y, z),
        element,
    )
    .expect("fixture atom is always within bounds")
}

/// A lone lysine side-chain nitrogen at the given position.
pub fn lysine_nz(serial: i64, residue_number: i32, chain_id: char, position: Point) -> Atom {
    atom(
        serial,
        "NZ",
        "LYS",
        residue_number,
        chain_id,
        position.x,
        position.y,
        position.z,
        Element::N,
    )
}

/// Two lysine NZ atoms on chain `A`, `distance` Å apart along the x axis,
/// with nothing else in the structure. The minimal fixture for a single
/// unobstructed cross-linkable pair.
pub fn lysine_pair(distance: f64) -> AtomList {
    let mut atoms = AtomList::new();
    atoms.push(lysine_nz(1, 1, 'A', Point::ORIGIN));
    atoms.push(lysine_nz(2, 2, 'A', Point::new(distance, 0.0, 0.0)));
    atoms
}

/// A straight CA backbone of `length` residues on `chain_id`, spaced
/// `spacing` Å apart starting at the origin along the x axis. Residue
/// numbers run from `1..=length`.
pub fn backbone_chain(chain_id: char, length: usize, spacing: f64) -> AtomList {
    let mut atoms = AtomList::new();
    for i in 0..length {
        let residue_number = i as i32 + 1;
        atoms.push(atom(
            i as i64 + 1,
            "CA",
            "ALA",
            residue_number,
            chain_id,
            i as f64 * spacing,
            0.0,
            0.0,
            Element::C,
        ));
    }
    atoms
}

/// Two parallel backbone chains, `separation` Å apart along the y axis, each
/// `length` residues long. Useful for intermolecular-pair and chain-filter
/// tests: chain `A` runs along `y = 0`, chain `B` along `y = separation`.
pub fn two_chain_structure(length: usize, spacing: f64, separation: f64) -> AtomList {
    let mut atoms = AtomList::new();
    for i in 0..length {
        let residue_number = i as i32 + 1;
        atoms.push(atom(
            i as i64 + 1,
            "CA",
            "ALA",
            residue_number,
            'A',
            i as f64 * spacing,
            0.0,
            0.0,
            Element::C,
        ));
    }
    for i in 0..length {
        let residue_number = i as i32 + 1;
        atoms.push(atom(
            (length + i) as i64 + 1,
            "CA",
            "ALA",
            residue_number,
            'B',
            i as f64 * spacing,
            separation,
            0.0,
            Element::C,
        ));
    }
    atoms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lysine_pair_has_two_atoms_at_requested_distance() {
        let atoms = lysine_pair(12.0);
        assert_eq!(atoms.len(), 2);
        let a = atoms.get(xwalk_core::AtomId(0)).unwrap();
        let b = atoms.get(xwalk_core::AtomId(1)).unwrap();
        assert!((a.position().distance_to(&b.position()) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn backbone_chain_has_requested_length_and_spacing() {
        let atoms = backbone_chain('A', 5, 3.8);
        assert_eq!(atoms.len(), 5);
        let first = atoms.get(xwalk_core::AtomId(0)).unwrap();
        let last = atoms.get(xwalk_core::AtomId(4)).unwrap();
        assert!((last.position().x - first.position().x - 4.0 * 3.8).abs() < 1e-9);
    }

    #[test]
    fn two_chain_structure_separates_chains_along_y() {
        let atoms = two_chain_structure(4, 3.8, 20.0);
        assert_eq!(atoms.len(), 8);
        let chain_a = atoms.get(xwalk_core::AtomId(0)).unwrap();
        let chain_b = atoms.get(xwalk_core::AtomId(4)).unwrap();
        assert_eq!(chain_a.chain_id(), 'A');
        assert_eq!(chain_b.chain_id(), 'B');
        assert!((chain_b.position().y - 20.0).abs() < 1e-9);
    }
}
