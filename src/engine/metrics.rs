//! Assignment traces.
//!
//! [`Assigner::run`](super::Assigner::run) only stamps flights. The verbose
//! path, [`Assigner::run_with_metrics`](super::Assigner::run_with_metrics),
//! additionally records how each flight was placed: which tier the terminal
//! and gate came from, how long the shortlists were, and whether the flight
//! hash had to break a tie. This is meant for debugging configurations, not
//! for the hot path.

use super::filter::Tier;
use super::select::Selection;
use crate::config::Candidate;
use crate::flight::Movement;
use serde::Serialize;
use std::time::Duration;

/// One selection step (terminal or gate) for one flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub name: String,
    pub tier: Tier,
    pub shortlist: usize,
    pub hashed: bool,
}

impl<T: Candidate> From<Selection<'_, T>> for Decision {
    fn from(selection: Selection<'_, T>) -> Self {
        Decision {
            name: selection.candidate.name().to_string(),
            tier: selection.tier,
            shortlist: selection.shortlist,
            hashed: selection.hashed,
        }
    }
}

/// How one flight was placed.
#[derive(Debug, Clone, Serialize)]
pub struct FlightTrace {
    pub movement: Movement,
    /// Position within its list.
    pub index: usize,
    pub callsign: Option<String>,
    pub terminal: Option<Decision>,
    pub gate: Option<Decision>,
    /// Identity hash, if any selection needed it (or it was already cached).
    pub hash: Option<u32>,
}

impl FlightTrace {
    pub fn is_placed(&self) -> bool {
        self.terminal.is_some()
    }
}

/// Result of a verbose assignment run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssignmentReport {
    /// Total elapsed time for the run.
    pub elapsed: Duration,
    /// One entry per flight, departures first.
    pub flights: Vec<FlightTrace>,
}

impl AssignmentReport {
    /// Flights no terminal accepted.
    pub fn unplaced(&self) -> usize {
        self.flights.iter().filter(|t| !t.is_placed()).count()
    }

    /// Flights that reached a terminal but got no gate.
    pub fn without_gate(&self) -> usize {
        self.flights.iter().filter(|t| t.is_placed() && t.gate.is_none()).count()
    }

    /// Selections, terminal or gate, that needed the flight hash.
    pub fn hashed_selections(&self) -> usize {
        self.flights
            .iter()
            .flat_map(|t| [t.terminal.as_ref(), t.gate.as_ref()])
            .flatten()
            .filter(|d| d.hashed)
            .count()
    }
}
