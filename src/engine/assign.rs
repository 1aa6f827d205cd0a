//! Batch assignment.
//!
//! This module is the operational core of the engine: it walks a
//! [`FlightBatch`] and, for every flight, runs the filter/select pipeline
//! twice, once over all terminals and once over the gates of the chosen
//! terminal.
//!
//! ```text
//! for flight in departures ++ arrivals:
//!     terminal = select(partition(flight, terminals))
//!     gate     = terminal.gates.map(|g| select(partition(flight, g)))
//!     flight.terminal = terminal?.name
//!     flight.gate     = gate?.name
//! ```
//!
//! Both selections share the flight's cached hash, so a flight that lands on
//! a terminal keeps landing on the same gate as long as the configuration is
//! unchanged. Assignment is total: flights nothing accepts simply keep
//! `terminal`/`gate` unset.

use super::filter::Tiers;
use super::metrics::{AssignmentReport, Decision, FlightTrace};
use super::select::{Selection, select};
use crate::config::{Config, Gate, Terminal};
use crate::flight::{Flight, FlightBatch, Movement};
use std::time::Instant;

/// Applies one (already range-expanded) configuration to flights.
#[derive(Debug, Clone, Copy)]
pub struct Assigner<'a> {
    terminals: &'a [Terminal],
}

impl<'a> Assigner<'a> {
    pub fn new(config: &'a Config) -> Self {
        Assigner { terminals: &config.terminals }
    }

    /// Choose a terminal for `flight` among all configured terminals.
    pub fn select_terminal(&self, flight: &Flight) -> Option<Selection<'a, Terminal>> {
        let tiers = Tiers::partition(flight, self.terminals);
        select(&tiers, || flight.hash())
    }

    /// Choose a gate of `terminal` for `flight`; `None` when the terminal has
    /// no gate list or every gate excludes the flight.
    pub fn select_gate<'t>(&self, flight: &Flight, terminal: &'t Terminal) -> Option<Selection<'t, Gate>> {
        let gates = terminal.gates.as_deref()?;
        let tiers = Tiers::partition(flight, gates);
        select(&tiers, || flight.hash())
    }

    /// Select and stamp one flight.
    pub fn assign_flight(&self, flight: &mut Flight) -> (Option<Decision>, Option<Decision>) {
        let terminal = self.select_terminal(flight);
        let gate = terminal.and_then(|t| self.select_gate(flight, t.candidate));

        flight.terminal = terminal.map(|t| t.candidate.name.clone());
        flight.gate = gate.map(|g| g.candidate.name.clone());

        log::trace!(
            "[assign] {} -> terminal={:?} gate={:?}",
            flight.callsign.as_deref().unwrap_or("<no callsign>"),
            flight.terminal,
            flight.gate
        );

        (terminal.map(Decision::from), gate.map(Decision::from))
    }

    /// Stamp every flight in `batch`: departures first, then arrivals.
    pub fn run(&self, batch: &mut FlightBatch) {
        for flight in batch.departures.iter_mut().chain(batch.arrivals.iter_mut()) {
            self.assign_flight(flight);
        }
        log::debug!(
            "[assign] {} departures, {} arrivals over {} terminals",
            batch.departures.len(),
            batch.arrivals.len(),
            self.terminals.len()
        );
    }

    /// Like [`run`](Self::run), but also records a per-flight trace.
    pub fn run_with_metrics(&self, batch: &mut FlightBatch) -> AssignmentReport {
        let start = Instant::now();
        let mut flights = Vec::with_capacity(batch.len());

        let lists = [(Movement::Departure, &mut batch.departures), (Movement::Arrival, &mut batch.arrivals)];
        for (movement, list) in lists {
            for (index, flight) in list.iter_mut().enumerate() {
                let (terminal, gate) = self.assign_flight(flight);
                flights.push(FlightTrace {
                    movement,
                    index,
                    callsign: flight.callsign.clone(),
                    terminal,
                    gate,
                    hash: flight.cached_hash(),
                });
            }
        }

        let report = AssignmentReport { elapsed: start.elapsed(), flights };
        log::debug!(
            "[assign] {} flights in {:?}: {} unplaced, {} without gate, {} hashed selections",
            report.flights.len(),
            report.elapsed,
            report.unplaced(),
            report.without_gate(),
            report.hashed_selections()
        );
        report
    }
}
