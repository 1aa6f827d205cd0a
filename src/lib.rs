//! Deterministic terminal and gate assignment for flight information boards.
//!
//! A [`Board`] holds a configuration of terminals and gates, each optionally
//! constrained by callsign pattern, domestic/international flag and aircraft
//! type. Handing it a [`FlightBatch`] stamps every flight with a terminal and
//! gate. The same configuration and flight always produce the same result;
//! when several candidates qualify equally, a hash of the flight's own fields
//! breaks the tie.
//!
//! ```
//! use gateboard::{Board, ConfigOverrides, Flight, FlightBatch, Gate, Terminal, pattern};
//!
//! let overrides = ConfigOverrides::terminals(vec![
//!     Terminal::new("T1").with_gates([Gate::new("A").with_callsign(pattern!(r"^ACA\d+")), Gate::new("C")]),
//! ]);
//! let mut board = Board::new(Some(overrides)).unwrap();
//!
//! board.assign(FlightBatch::new(vec![Flight::new("ACA12"), Flight::new("CF-KMT")], Vec::new()));
//! let deps = &board.state().departures;
//! assert_eq!((deps[0].terminal.as_deref(), deps[0].gate.as_deref()), (Some("T1"), Some("A")));
//! assert_eq!((deps[1].terminal.as_deref(), deps[1].gate.as_deref()), (Some("T1"), Some("C")));
//! ```

#[macro_use]
mod macros;
mod api;
mod config;
mod engine;
mod error;
mod flight;
mod pattern;

pub use api::Board;
pub use config::{Candidate, Config, ConfigOverrides, Constraints, Gate, Terminal};
pub use engine::{AssignmentReport, Assigner, ConstraintSet, Decision, FlightTrace, Selection, Tier, Tiers, flight_hash};
pub use error::{ConfigError, Result};
pub use flight::{Flight, FlightBatch, Movement};
pub use pattern::{Matcher, Pattern};

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
    pub use regex::Regex;
}
