//! Flight identity hashing.
//!
//! When several candidates tie, the flight's hash picks one of them. The hash
//! only depends on the flight's own identifying fields, never on its position
//! in a batch, so adding or removing other flights does not move it.
//!
//! ## Identity key
//!
//! ```text
//! cid _ callsign _ departure _ arrival _ deptime _ arrtime _ aircraft_short
//! ```
//!
//! Absent fields are spelled `undefined`, which keeps keys of sparsely
//! populated flights distinct and stable.
//!
//! ## Hash
//!
//! The classic `31 * h + c` string hash over UTF-16 code units, wrapping in
//! signed 32-bit arithmetic, with the absolute value taken at the end. The
//! absolute value of `i32::MIN` does not fit an `i32`, hence the `u32`
//! result.

use crate::flight::Flight;

const ABSENT: &str = "undefined";
const SEPARATOR: &str = "_";

/// The string the identity hash is computed from.
pub(crate) fn identity_key(flight: &Flight) -> String {
    [
        &flight.cid,
        &flight.callsign,
        &flight.departure,
        &flight.arrival,
        &flight.deptime,
        &flight.arrtime,
        &flight.aircraft_short,
    ]
    .iter()
    .map(|field| field.as_deref().unwrap_or(ABSENT))
    .collect::<Vec<_>>()
    .join(SEPARATOR)
}

pub(crate) fn hash_text(text: &str) -> u32 {
    text.encode_utf16().fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit))).unsigned_abs()
}

/// Compute (without caching) the identity hash of `flight`.
///
/// Callers normally want [`Flight::hash`], which caches the first result.
pub fn flight_hash(flight: &Flight) -> u32 {
    hash_text(&identity_key(flight))
}
