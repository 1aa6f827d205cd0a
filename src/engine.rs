//! Terminal and gate assignment engine.
//!
//! This module is the entry point for the rules engine. It is split into
//! focused submodules under `src/engine/`.
//!
//! ## How the parts work together
//!
//! ```text
//! Config (expanded) ──┐
//!                     │  Assigner::new                    (assign.rs)
//!                     └──────────┬────────────
//!                                │
//! flight ── Tiers::partition ────┼─ best / ok / worst / excluded
//!           (filter.rs, constraints.rs)
//!                                │
//!                                v
//!                     select (select.rs)
//!                       - first non-empty tier
//!                       - one candidate: take it
//!                       - several: hash % len
//!                                │        └─ Flight::hash (hash.rs, cached)
//!                                v
//!                     terminal ──▶ same again over terminal.gates
//!                                │
//!                                v
//!                     flight.terminal / flight.gate
//! ```
//!
//! ## Responsibilities by module
//!
//! - `constraints.rs`: summarises a candidate's constraints as bit sets
//!   (`declared`, `mismatched`).
//! - `filter.rs`: the ordered tier rules and `Tiers`.
//! - `select.rs`: deterministic pick from the shortlist.
//! - `hash.rs`: the flight identity key and its 32-bit hash.
//! - `assign.rs`: walks a batch and stamps flights.
//! - `metrics.rs`: optional per-flight traces.
//!
//! ## Determinism
//!
//! Nothing here depends on batch order, wall-clock time or randomness. For a
//! fixed configuration, a flight's placement is a function of its own
//! identifying fields (or of its cached hash, once computed).
//!
//! ## Debugging
//!
//! Decisions are logged through the `log` facade at `trace` level, batch
//! summaries at `debug` level.

#[path = "engine/assign.rs"]
mod assign;
#[path = "engine/constraints.rs"]
mod constraints;
#[path = "engine/filter.rs"]
mod filter;
#[path = "engine/hash.rs"]
mod hash;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/select.rs"]
mod select;


pub use assign::Assigner;
pub use constraints::ConstraintSet;
pub use filter::{Tier, Tiers};
pub use hash::flight_hash;
pub use metrics::{AssignmentReport, Decision, FlightTrace};
pub use select::Selection;
