//! [`Selector`], [`PairSpec`], and the pair enumerator.

use std::collections::HashSet;
use xwalk_core::{Atom, AtomId, AtomList};

/// A candidate-atom filter. Every field is "unspecified (any)" when empty.
#[derive(Clone, Debug, Default)]
pub struct Selector {
    /// Allowed residue names (e.g. `"LYS"`). Empty means any.
    pub residue_names: Vec<String>,
    /// Allowed residue sequence numbers. Empty means any.
    pub residue_numbers: Vec<i32>,
    /// Allowed chain identifiers. Empty means any.
    pub chain_ids: Vec<char>,
    /// Allowed atom names (e.g. `"NZ"`). Empty means any.
    pub atom_names: Vec<String>,
    /// Allowed alternate-location codes. Empty means any.
    pub alt_locs: Vec<Option<char>>,
}

impl Selector {
    /// A selector matching every atom.
    pub fn any() -> Self {
        Self::default()
    }

    /// `true` if `atom` satisfies every specified field of this selector.
    pub fn matches(&self, atom: &Atom) -> bool {
        (self.residue_names.is_empty()
            || self.residue_names.iter().any(|n| n == atom.residue_name()))
            && (self.residue_numbers.is_empty()
                || self.residue_numbers.contains(&atom.residue_number()))
            && (self.chain_ids.is_empty() || self.chain_ids.contains(&atom.chain_id()))
            && (self.atom_names.is_empty() || self.atom_names.iter().any(|n| n == atom.name()))
            && (self.alt_locs.is_empty() || self.alt_locs.contains(&atom.alt_loc()))
    }
}

/// Two parallel selectors plus the chain and symmetry rules governing which
/// candidate pairs are emitted.
#[derive(Clone, Debug)]
pub struct PairSpec {
    /// Selector applied to the pair's first member.
    pub selector_a: Selector,
    /// Selector applied to the pair's second member.
    pub selector_b: Selector,
    /// Restrict to same-chain pairs.
    pub intra: bool,
    /// Restrict to different-chain pairs.
    pub inter: bool,
    /// Canonicalise pairs by residue identity across symmetric chains.
    pub homomeric: bool,
    /// Emit both `(a, b)` and `(b, a)` when selectors overlap. Default
    /// `false`: the duplicate-pair cache keeps only one direction.
    pub directional: bool,
}

impl Default for PairSpec {
    fn default() -> Self {
        Self {
            selector_a: Selector::any(),
            selector_b: Selector::any(),
            intra: false,
            inter: false,
            homomeric: false,
            directional: false,
        }
    }
}

fn chain_allows(spec: &PairSpec, a: &Atom, b: &Atom) -> bool {
    match (spec.intra, spec.inter) {
        (true, false) => a.chain_id() == b.chain_id(),
        (false, true) => a.chain_id() != b.chain_id(),
        _ => true,
    }
}

/// Identity key used to canonicalise homomeric pairs: residue name, residue
/// number, and atom name, with chain deliberately excluded.
fn homomeric_key(atom: &Atom) -> (String, i32, String) {
    (
        atom.residue_name().to_string(),
        atom.residue_number(),
        atom.name().to_string(),
    )
}

/// Enumerate candidate pairs from `atoms` per `spec`.
///
/// Excludes self-pairs (`a == b`), then applies the chain predicate,
/// homomeric canonicalisation, and the undirected duplicate-pair cache.
/// Does not apply the Euclidean pre-screen / straight-line short-circuit —
/// those require grid geometry and live in [`crate::driver`].
pub fn enumerate_pairs(atoms: &AtomList, spec: &PairSpec) -> Vec<(AtomId, AtomId)> {
    let set_a: Vec<AtomId> = atoms
        .iter()
        .filter(|(_, atom)| spec.selector_a.matches(atom))
        .map(|(id, _)| id)
        .collect();
    let set_b: Vec<AtomId> = atoms
        .iter()
        .filter(|(_, atom)| spec.selector_b.matches(atom))
        .map(|(id, _)| id)
        .collect();

    let mut seen_unordered: HashSet<(AtomId, AtomId)> = HashSet::new();
    let mut seen_homomeric: HashSet<((String, i32, String), (String, i32, String))> =
        HashSet::new();
    let mut pairs = Vec::new();

    for &a_id in &set_a {
        for &b_id in &set_b {
            if a_id == b_id {
                continue;
            }
            let a = atoms.get(a_id).expect("selector produced valid AtomId");
            let b = atoms.get(b_id).expect("selector produced valid AtomId");
            if !chain_allows(spec, a, b) {
                continue;
            }
            if !spec.directional {
                let key = if a_id <= b_id {
                    (a_id, b_id)
                } else {
                    (b_id, a_id)
                };
                if !seen_unordered.insert(key) {
                    continue;
                }
            }
            if spec.homomeric {
                let (ka, kb) = (homomeric_key(a), homomeric_key(b));
                let key = if ka <= kb {
                    (ka.clone(), kb.clone())
                } else {
                    (kb.clone(), ka.clone())
                };
                if !seen_homomeric.insert(key) {
                    continue;
                }
            }
            pairs.push((a_id, b_id));
        }
    }
    pairs
}
