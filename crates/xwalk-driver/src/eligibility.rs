//! [`PeptideEligibility`]: the tryptic-peptide filter, as a pure predicate.
//!
//! Tryptic digestion is out of scope for the core distance engine, but an
//! external digestion layer that wants to gate an optional probability
//! column on "peptide filtering is active" can reuse the published
//! cleavage rules here without re-deriving them. [`crate::driver::DistanceDriver`]
//! never calls it itself, and [`crate::driver::DistanceRecord`] never
//! carries a probability field.

use regex::Regex;
use std::sync::LazyLock;

/// Peptides shorter than this are rejected.
pub const MIN_PEPTIDE_LENGTH: usize = 5;
/// Peptides longer than this are rejected.
pub const MAX_PEPTIDE_LENGTH: usize = 40;
/// Maximum number of missed tryptic cleavage sites tolerated.
pub const MAX_MISCLEAVAGES: usize = 1;

/// Tryptic cleavage site: after K or R, not before P.
static CLEAVAGE_SITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[KR][^P]|[KR]$").expect("fixed pattern is valid"));

/// Lysine-central motif: a window with a lysine at its centre, used to
/// identify candidate cross-link sites within a peptide.
static LYSINE_CENTRAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*K.*$").expect("fixed pattern is valid"));

/// A pure predicate over a peptide sequence, independent of any atom or
/// structure. Length in `[5, 40]`, at most one missed tryptic cleavage, and
/// containing at least one lysine.
#[derive(Clone, Copy, Debug, Default)]
pub struct PeptideEligibility;

impl PeptideEligibility {
    /// `true` if `sequence` is an eligible tryptic peptide for cross-linking.
    pub fn evaluate(&self, sequence: &str) -> bool {
        let len = sequence.chars().count();
        if !(MIN_PEPTIDE_LENGTH..=MAX_PEPTIDE_LENGTH).contains(&len) {
            return false;
        }
        if Self::miscleavage_count(sequence) > MAX_MISCLEAVAGES {
            return false;
        }
        LYSINE_CENTRAL.is_match(sequence)
    }

    /// Count internal tryptic cleavage sites: every K/R not followed by P,
    /// excluding the sequence's own C-terminal residue (the cleavage that
    /// produced this peptide, not a missed one).
    fn miscleavage_count(sequence: &str) -> usize {
        let Some(interior_len) = sequence.len().checked_sub(1) else {
            return 0;
        };
        let interior = &sequence[..interior_len];
        CLEAVAGE_SITE.find_iter(sequence).filter(|m| m.start() < interior.len()).count()
    }
}
