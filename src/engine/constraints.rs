//! Constraint bookkeeping for candidates.
//!
//! Filtering never looks at raw `Option` fields directly. Instead each
//! candidate's [`Constraints`] are summarised as two small bit sets:
//!
//! - `declared`: which constraints the candidate sets at all.
//! - `mismatched`: which of those the given flight disagrees with.
//!
//! The tier rules in `filter.rs` are then plain set tests.

use crate::config::Constraints;
use crate::flight::Flight;
use crate::pattern::Pattern;

bitflags::bitflags! {
    /// A set of candidate constraints.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ConstraintSet: u8 {
        const DOMESTIC = 1 << 0;
        const CALLSIGN = 1 << 1;
        const AIRCRAFT = 1 << 2;
    }
}

impl Constraints {
    /// Constraints this candidate declares.
    pub fn declared(&self) -> ConstraintSet {
        let mut set = ConstraintSet::empty();
        if self.domestic.is_some() {
            set |= ConstraintSet::DOMESTIC;
        }
        if self.callsign.is_some() {
            set |= ConstraintSet::CALLSIGN;
        }
        if self.aircraft_short.is_some() {
            set |= ConstraintSet::AIRCRAFT;
        }
        set
    }

    /// Declared constraints that `flight` does not satisfy.
    ///
    /// A flight that lacks the attribute a constraint looks at never satisfies
    /// it.
    pub fn mismatched(&self, flight: &Flight) -> ConstraintSet {
        let mut set = ConstraintSet::empty();
        if let Some(domestic) = self.domestic {
            if flight.domestic != Some(domestic) {
                set |= ConstraintSet::DOMESTIC;
            }
        }
        if !accepts(self.callsign.as_ref(), flight.callsign.as_deref()) {
            set |= ConstraintSet::CALLSIGN;
        }
        if !accepts(self.aircraft_short.as_ref(), flight.aircraft_short.as_deref()) {
            set |= ConstraintSet::AIRCRAFT;
        }
        set
    }
}

fn accepts(pattern: Option<&Pattern>, value: Option<&str>) -> bool {
    match pattern {
        None => true,
        Some(pattern) => value.is_some_and(|v| pattern.matches(v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_reflects_set_fields() {
        assert!(Constraints::default().declared().is_empty());

        let c = Constraints { domestic: Some(true), callsign: Some(pattern!(r"^ACA")), aircraft_short: None };
        assert_eq!(c.declared(), ConstraintSet::DOMESTIC | ConstraintSet::CALLSIGN);
    }

    #[test]
    fn mismatched_only_reports_declared_constraints() {
        let c = Constraints { domestic: None, callsign: Some(pattern!(r"^ACA")), aircraft_short: None };
        let flight = Flight::new("WJA1").with_domestic(true).with_aircraft("B738");
        assert_eq!(c.mismatched(&flight), ConstraintSet::CALLSIGN);
    }

    #[test]
    fn absent_flight_attributes_never_match() {
        let c = Constraints {
            domestic: Some(false),
            callsign: Some(pattern!(r".*")),
            aircraft_short: Some(pattern!(r".*")),
        };
        assert_eq!(c.mismatched(&Flight::default()), ConstraintSet::all());

        let flight = Flight::new("ACA1").with_domestic(false).with_aircraft("A320");
        assert!(c.mismatched(&flight).is_empty());
    }
}
