//! Candidate filtering (tiering).
//!
//! Given a flight and an ordered candidate list (terminals, or the gates of
//! one terminal), every candidate lands in at most one tier:
//!
//! ```text
//! declared == {}                                    -> Ok
//! DOMESTIC declared && mismatched ∩ {DOMESTIC,AIRCRAFT} -> Worst
//! CALLSIGN not declared                             -> Ok
//! CALLSIGN not mismatched                           -> Best
//! otherwise                                         -> excluded
//! ```
//!
//! The checks run in exactly this order, so a region-constrained candidate
//! the flight disagrees with is demoted to `Worst` before its callsign is ever
//! looked at. `Worst` candidates are deprioritised, never discarded; only a
//! callsign that fails to match removes a candidate outright.
//!
//! Order inside each tier is the configuration order. Duplicate entries are
//! separate candidates.

use super::constraints::ConstraintSet;
use crate::config::{Candidate, Constraints};
use crate::flight::Flight;
use serde::Serialize;

/// Match quality of a candidate for one flight. Ordered best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Best,
    Ok,
    Worst,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::Best => "best",
            Tier::Ok => "ok",
            Tier::Worst => "worst",
        }
    }
}

/// Classify one candidate; `None` means excluded.
pub(crate) fn classify(flight: &Flight, constraints: &Constraints) -> Option<Tier> {
    let declared = constraints.declared();
    if declared.is_empty() {
        return Some(Tier::Ok);
    }

    let mismatched = constraints.mismatched(flight);
    if declared.contains(ConstraintSet::DOMESTIC)
        && mismatched.intersects(ConstraintSet::DOMESTIC | ConstraintSet::AIRCRAFT)
    {
        return Some(Tier::Worst);
    }

    if !declared.contains(ConstraintSet::CALLSIGN) {
        return Some(Tier::Ok);
    }

    if mismatched.contains(ConstraintSet::CALLSIGN) { None } else { Some(Tier::Best) }
}

/// Candidates of one list, split by tier.
#[derive(Debug)]
pub struct Tiers<'c, T> {
    pub best: Vec<&'c T>,
    pub ok: Vec<&'c T>,
    pub worst: Vec<&'c T>,
    /// Number of candidates excluded by a failed callsign match.
    pub excluded: usize,
}

impl<'c, T: Candidate> Tiers<'c, T> {
    /// Partition `candidates` for `flight`.
    pub fn partition(flight: &Flight, candidates: &'c [T]) -> Self {
        let mut tiers = Tiers { best: Vec::new(), ok: Vec::new(), worst: Vec::new(), excluded: 0 };
        for candidate in candidates {
            match classify(flight, candidate.constraints()) {
                Some(Tier::Best) => tiers.best.push(candidate),
                Some(Tier::Ok) => tiers.ok.push(candidate),
                Some(Tier::Worst) => tiers.worst.push(candidate),
                None => tiers.excluded += 1,
            }
        }
        tiers
    }

    /// The first non-empty tier, best to worst.
    pub fn shortlist(&self) -> Option<(Tier, &[&'c T])> {
        [(Tier::Best, &self.best), (Tier::Ok, &self.ok), (Tier::Worst, &self.worst)]
            .into_iter()
            .find(|(_, list)| !list.is_empty())
            .map(|(tier, list)| (tier, list.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Gate;

    fn names<T: Candidate>(list: &[&T]) -> Vec<String> {
        list.iter().map(|c| c.name().to_string()).collect()
    }

    #[test]
    fn unconstrained_is_ok() {
        assert_eq!(classify(&Flight::new("ACA1"), &Constraints::default()), Some(Tier::Ok));
        assert_eq!(classify(&Flight::default(), &Constraints::default()), Some(Tier::Ok));
    }

    #[test]
    fn callsign_match_is_best_and_miss_is_excluded() {
        let gate = Gate::new("A").with_callsign(pattern!(r"^ACA\d+"));
        assert_eq!(classify(&Flight::new("ACA12"), &gate.constraints), Some(Tier::Best));
        assert_eq!(classify(&Flight::new("WJA12"), &gate.constraints), None);
        assert_eq!(classify(&Flight::default(), &gate.constraints), None);
    }

    #[test]
    fn region_mismatch_is_worst_even_with_matching_callsign() {
        let terminal = Gate::new("Intl").with_domestic(false).with_callsign(pattern!(r"^ACA"));
        let domestic = Flight::new("ACA1").with_domestic(true);
        assert_eq!(classify(&domestic, &terminal.constraints), Some(Tier::Worst));

        // Unknown region disagrees with any declared one.
        assert_eq!(classify(&Flight::new("ACA1"), &terminal.constraints), Some(Tier::Worst));

        let international = Flight::new("ACA1").with_domestic(false);
        assert_eq!(classify(&international, &terminal.constraints), Some(Tier::Best));
    }

    #[test]
    fn region_match_without_callsign_is_ok() {
        let gate = Gate::new("Dom").with_domestic(true);
        assert_eq!(classify(&Flight::new("WJA5").with_domestic(true), &gate.constraints), Some(Tier::Ok));
        assert_eq!(classify(&Flight::new("WJA5").with_domestic(false), &gate.constraints), Some(Tier::Worst));
    }

    #[test]
    fn aircraft_mismatch_only_demotes_region_constrained_candidates() {
        let regional = Gate::new("R").with_domestic(true).with_aircraft(pattern!(r"^CRJ"));
        let narrowbody = Flight::new("JZA1").with_domestic(true).with_aircraft("A320");
        let crj = Flight::new("JZA1").with_domestic(true).with_aircraft("CRJ9");
        assert_eq!(classify(&narrowbody, &regional.constraints), Some(Tier::Worst));
        assert_eq!(classify(&crj, &regional.constraints), Some(Tier::Ok));

        // Without a region constraint the aircraft pattern is not consulted.
        let airbus = Gate::new("B1").with_aircraft(pattern!(r"A3\d+"));
        assert_eq!(classify(&Flight::new("X").with_aircraft("B738"), &airbus.constraints), Some(Tier::Ok));
    }

    #[test]
    fn partition_preserves_order_and_duplicates() {
        let gates = vec![
            Gate::new("A").with_callsign(pattern!(r"^ACA\d+")),
            Gate::new("B").with_callsign(pattern!(r"^WJ\d+")),
            Gate::new("A").with_callsign(pattern!(r"^AA\d+")),
            Gate::new("B").with_callsign(pattern!(r"^AA\d+")),
            Gate::new("C"),
            Gate::new("C"),
            Gate::new("D").with_domestic(true),
        ];

        let tiers = Tiers::partition(&Flight::new("AA7").with_domestic(false), &gates);
        assert_eq!(names(&tiers.best), vec!["A", "B"]);
        assert_eq!(names(&tiers.ok), vec!["C", "C"]);
        assert_eq!(names(&tiers.worst), vec!["D"]);
        assert_eq!(tiers.excluded, 2);

        let (tier, shortlist) = tiers.shortlist().unwrap();
        assert_eq!(tier, Tier::Best);
        assert_eq!(shortlist.len(), 2);
    }

    #[test]
    fn shortlist_falls_through_to_worst() {
        let gates = vec![Gate::new("Dom").with_domestic(true), Gate::new("X").with_callsign(pattern!(r"^X"))];
        let tiers = Tiers::partition(&Flight::new("ACA1").with_domestic(false), &gates);
        let (tier, shortlist) = tiers.shortlist().unwrap();
        assert_eq!(tier, Tier::Worst);
        assert_eq!(names(shortlist), vec!["Dom"]);
    }

    #[test]
    fn all_excluded_has_no_shortlist() {
        let gates = vec![Gate::new("A").with_callsign(pattern!(r"^ACA"))];
        let tiers = Tiers::partition(&Flight::new("WJA1"), &gates);
        assert!(tiers.shortlist().is_none());
        assert_eq!(tiers.excluded, 1);
    }
}
