//! Flight records and batches.
//!
//! A [`Flight`] is whatever the data feed hands us: a handful of identifying
//! fields, an optional domestic flag, and any number of extra fields that are
//! carried through untouched. Assignment writes `terminal`, `gate` and the
//! cached identity hash back onto the record.

use crate::engine::flight_hash;
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Flight {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_text")]
    pub callsign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_text")]
    pub cid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_text")]
    pub departure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_text")]
    pub arrival: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_text")]
    pub deptime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_text")]
    pub arrtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_text")]
    pub aircraft_short: Option<String>,
    /// Anything other than a JSON boolean reads as absent.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_flag")]
    pub domestic: Option<bool>,

    /// Assigned terminal name; `None` when no terminal accepted the flight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<String>,
    /// Assigned gate name; `None` when the terminal has no (matching) gates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,

    /// Identity hash, computed on first use and never recomputed.
    #[serde(default, with = "hash_cell", skip_serializing_if = "hash_cell::is_unset")]
    hash: OnceCell<u32>,

    /// Fields the engine does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Flight {
    pub fn new(callsign: impl Into<String>) -> Self {
        Flight { callsign: Some(callsign.into()), ..Flight::default() }
    }

    pub fn with_cid(mut self, cid: impl Into<String>) -> Self {
        self.cid = Some(cid.into());
        self
    }

    pub fn with_route(mut self, departure: impl Into<String>, arrival: impl Into<String>) -> Self {
        self.departure = Some(departure.into());
        self.arrival = Some(arrival.into());
        self
    }

    pub fn with_times(mut self, deptime: impl Into<String>, arrtime: impl Into<String>) -> Self {
        self.deptime = Some(deptime.into());
        self.arrtime = Some(arrtime.into());
        self
    }

    pub fn with_aircraft(mut self, aircraft_short: impl Into<String>) -> Self {
        self.aircraft_short = Some(aircraft_short.into());
        self
    }

    pub fn with_domestic(mut self, domestic: bool) -> Self {
        self.domestic = Some(domestic);
        self
    }

    /// The flight's identity hash.
    ///
    /// The first call fixes the value for the lifetime of this record: editing
    /// identifying fields afterwards does not change it.
    pub fn hash(&self) -> u32 {
        *self.hash.get_or_init(|| flight_hash(self))
    }

    /// The hash if it has already been computed (or was supplied with the record).
    pub fn cached_hash(&self) -> Option<u32> {
        self.hash.get().copied()
    }
}

/// Which list of a [`FlightBatch`] a flight belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Departure,
    Arrival,
}

impl Movement {
    pub fn label(self) -> &'static str {
        match self {
            Movement::Departure => "departure",
            Movement::Arrival => "arrival",
        }
    }
}

/// One snapshot of the board's traffic. Either list may be missing from input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightBatch {
    #[serde(default)]
    pub arrivals: Vec<Flight>,
    #[serde(default)]
    pub departures: Vec<Flight>,
}

impl FlightBatch {
    pub fn new(departures: Vec<Flight>, arrivals: Vec<Flight>) -> Self {
        FlightBatch { arrivals, departures }
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn len(&self) -> usize {
        self.arrivals.len() + self.departures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty() && self.departures.is_empty()
    }

    /// All flights in assignment order: departures first, then arrivals.
    pub fn iter(&self) -> impl Iterator<Item = (Movement, &Flight)> {
        let deps = self.departures.iter().map(|f| (Movement::Departure, f));
        let arrs = self.arrivals.iter().map(|f| (Movement::Arrival, f));
        deps.chain(arrs)
    }
}

/// Feeds disagree on whether `cid` is a number or a string, and send `null`
/// for unknown values. Keep the text form the way a template string renders
/// it: `null` stays the word `null`, so only a missing key reads as absent.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Some(text_form(&Value::deserialize(deserializer)?)))
}

fn lenient_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Bool(flag) => Ok(Some(flag)),
        other => {
            log::debug!("[flight] ignoring non-boolean domestic flag {other}");
            Ok(None)
        }
    }
}

fn text_form(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
            _ => n.to_string(),
        },
        // Array elements join with commas; null elements print as nothing.
        Value::Array(items) => items
            .iter()
            .map(|item| if item.is_null() { String::new() } else { text_form(item) })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

mod hash_cell {
    use once_cell::unsync::OnceCell;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn is_unset(cell: &OnceCell<u32>) -> bool {
        cell.get().is_none()
    }

    pub fn serialize<S: Serializer>(cell: &OnceCell<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        match cell.get() {
            Some(hash) => serializer.serialize_some(hash),
            None => serializer.serialize_none(),
        }
    }

    /// Only a positive integer that fits a `u32` is trusted; anything else is
    /// recomputed on first use.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OnceCell<u32>, D::Error> {
        let cell = OnceCell::new();
        let value = Value::deserialize(deserializer)?;
        match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(hash) if hash != 0 => {
                let _ = cell.set(hash);
            }
            _ if value.is_null() => {}
            _ => log::debug!("[flight] ignoring unusable cached hash {value}"),
        }
        Ok(cell)
    }
}
