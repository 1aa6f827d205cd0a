//! Deterministic selection from a tiered candidate list.
//!
//! ```text
//! Tiers ──shortlist()──▶ [c0]          -> c0 (no hash)
//!                    └─▶ [c0 .. cN-1]  -> c[hash % N]
//!                    └─▶ none          -> no match
//! ```
//!
//! The hash is requested lazily, so a flight that only ever meets
//! single-candidate shortlists is never hashed.

use super::filter::{Tier, Tiers};
use crate::config::Candidate;

/// The outcome of a successful selection.
#[derive(Debug)]
pub struct Selection<'c, T> {
    pub candidate: &'c T,
    /// Tier the shortlist was taken from.
    pub tier: Tier,
    /// Number of candidates on the shortlist.
    pub shortlist: usize,
    /// Whether the flight hash broke a tie.
    pub hashed: bool,
}

impl<T> Clone for Selection<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Selection<'_, T> {}

/// Pick one candidate from the best non-empty tier.
pub(crate) fn select<'c, T: Candidate>(tiers: &Tiers<'c, T>, hash: impl FnOnce() -> u32) -> Option<Selection<'c, T>> {
    let (tier, shortlist) = tiers.shortlist()?;
    if let [only] = shortlist {
        return Some(Selection { candidate: *only, tier, shortlist: 1, hashed: false });
    }

    let index = hash() as usize % shortlist.len();
    Some(Selection { candidate: shortlist[index], tier, shortlist: shortlist.len(), hashed: true })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Gate;
    use crate::flight::Flight;

    #[test]
    fn single_candidate_skips_hashing() {
        let gates = vec![Gate::new("A").with_callsign(pattern!(r"^ACA")), Gate::new("C")];
        let tiers = Tiers::partition(&Flight::new("ACA1"), &gates);
        let picked = select(&tiers, || panic!("hash must not be needed")).unwrap();
        assert_eq!(picked.candidate.name, "A");
        assert_eq!(picked.tier, Tier::Best);
        assert!(!picked.hashed);
    }

    #[test]
    fn hash_indexes_into_shortlist() {
        let gates: Vec<Gate> = ["G0", "G1", "G2"].into_iter().map(Gate::new).collect();
        let tiers = Tiers::partition(&Flight::new("X"), &gates);
        for (hash, expected) in [(0, "G0"), (1, "G1"), (5, "G2"), (3_000_000_002, "G2")] {
            let picked = select(&tiers, || hash).unwrap();
            assert_eq!(picked.candidate.name, expected, "hash {hash}");
            assert_eq!(picked.shortlist, 3);
            assert!(picked.hashed);
        }
    }

    #[test]
    fn empty_shortlist_is_no_match() {
        let gates = vec![Gate::new("A").with_callsign(pattern!(r"^ACA"))];
        let tiers = Tiers::partition(&Flight::new("WJA1"), &gates);
        assert!(select(&tiers, || 7).is_none());
    }
}
