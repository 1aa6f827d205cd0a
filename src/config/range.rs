//! Range notation in terminal and gate names.
//!
//! `A{01..09}` is shorthand for nine entries `A01` .. `A09`. The grammar is
//!
//! ```text
//! <prefix>{<start>..<end>}<suffix>
//! ```
//!
//! - `prefix` and `suffix` are copied verbatim, whitespace included.
//! - `start` and `end` are decimal integers; the *length of `start`* is the
//!   zero-padding width of every generated number, so `{00..010}` yields
//!   `00` .. `10` (width 2, not 3).
//! - Each generated entry is a clone of the original with only the name
//!   replaced.
//!
//! A single range may produce at most 10 000 entries.
//!
//! Names without `{` are fixed names and pass through untouched, which makes
//! expansion idempotent.

use crate::config::Candidate;
use crate::error::{ConfigError, Result};

/// Upper bound on the entries a single range may produce.
const MAX_RANGE_LEN: u64 = 10_000;

/// Expand every ranged entry in place, keeping fixed entries and expanded
/// blocks in their original relative order.
pub(crate) fn expand<T: Candidate>(entries: Vec<T>) -> Result<Vec<T>> {
    let mut expanded = Vec::with_capacity(entries.len());
    for entry in entries {
        match RangeName::parse(entry.name())? {
            None => expanded.push(entry),
            Some(range) => {
                log::trace!("[range] '{}' -> {} entries", entry.name(), range.len());
                expanded.extend(range.names().map(|name| entry.renamed(name)));
            }
        }
    }
    Ok(expanded)
}

/// A parsed `prefix{start..end}suffix` name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RangeName<'a> {
    prefix: &'a str,
    suffix: &'a str,
    start: u64,
    end: u64,
    width: usize,
}

impl<'a> RangeName<'a> {
    /// `Ok(None)` for fixed names, an error for a `{` that does not open a
    /// well-formed range.
    pub(crate) fn parse(name: &'a str) -> Result<Option<Self>> {
        if !name.contains('{') {
            return Ok(None);
        }

        // Greedy prefix: with several braces, the last well-formed range wins.
        let caps = crate::regex!(r"(?s)^(.*)\{(.*)\.\.(.*)\}(.*)$")
            .captures(name)
            .ok_or_else(|| ConfigError::MalformedRange { name: name.to_string() })?;

        let part = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        let (prefix, start_text, end_text, suffix) = (part(1), part(2), part(3), part(4));

        let start = parse_bound(name, start_text)?;
        let end = parse_bound(name, end_text)?;
        if end < start {
            return Err(ConfigError::ReversedRange { name: name.to_string(), start, end });
        }
        match (end - start).checked_add(1) {
            Some(len) if len <= MAX_RANGE_LEN => {}
            _ => return Err(ConfigError::RangeTooLarge { name: name.to_string(), max: MAX_RANGE_LEN }),
        }

        Ok(Some(RangeName { prefix, suffix, start, end, width: start_text.len() }))
    }

    pub(crate) fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = String> + '_ {
        (self.start..=self.end).map(move |n| format!("{}{:0width$}{}", self.prefix, n, self.suffix, width = self.width))
    }
}

fn parse_bound(name: &str, bound: &str) -> Result<u64> {
    let invalid = || ConfigError::InvalidRangeBound { name: name.to_string(), bound: bound.to_string() };
    if bound.is_empty() || !bound.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    bound.parse().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Gate;

    fn names(input: &[&str]) -> Vec<String> {
        let gates = input.iter().map(|n| Gate::new(*n)).collect();
        expand(gates).unwrap().into_iter().map(|g| g.name).collect()
    }

    #[test]
    fn range_examples() {
        let cases: Vec<(&str, Vec<&str>)> = vec![
            ("G{1..2}", vec!["G1", "G2"]),
            ("G{005..006}", vec!["G005", "G006"]),
            ("G{1..1}", vec!["G1"]),
            (" G  {1..1}", vec![" G  1"]),
            ("{1..1}G", vec!["1G"]),
            ("{1..1} A  ", vec!["1 A  "]),
            ("(Gate-{1..1}_ [A]!", vec!["(Gate-1_ [A]!"]),
            ("{8..11}", vec!["8", "9", "10", "11"]),
            ("A{01..09}", vec!["A01", "A02", "A03", "A04", "A05", "A06", "A07", "A08", "A09"]),
        ];

        for (input, expected) in cases {
            assert_eq!(names(&[input]), expected, "expanding '{input}'");
        }
    }

    #[test]
    fn leading_zeros_are_kept() {
        let out = names(&["{0000..0005}"]);
        assert_eq!(out.len(), 6);
        assert_eq!(out.first().unwrap(), "0000");
        assert_eq!(out.last().unwrap(), "0005");
    }

    #[test]
    fn padding_width_comes_from_start_only() {
        let out = names(&["{00..010}"]);
        assert_eq!(out.len(), 11);
        assert_eq!(out.first().unwrap(), "00");
        assert_eq!(out.last().unwrap(), "10");
    }

    #[test]
    fn fixed_and_ranged_entries_keep_their_order() {
        let out = names(&["G-Fixed", "G{1..3}", "G-Other Fixed", "G{005..006}"]);
        assert_eq!(out, vec!["G-Fixed", "G1", "G2", "G3", "G-Other Fixed", "G005", "G006"]);
    }

    #[test]
    fn fixed_names_are_a_no_op() {
        assert_eq!(RangeName::parse("Terminal 3").unwrap(), None);
        let once = names(&["A", "B", "A"]);
        assert_eq!(once, vec!["A", "B", "A"]);
        let refs: Vec<&str> = once.iter().map(String::as_str).collect();
        assert_eq!(names(&refs), once);
    }

    #[test]
    fn copies_share_constraints() {
        let gate = Gate::new("A{1..2}").with_domestic(true).with_field("bridge", 3);
        let out = expand(vec![gate]).unwrap();
        assert_eq!(out.len(), 2);
        for g in &out {
            assert_eq!(g.constraints.domestic, Some(true));
            assert_eq!(g.extra.get("bridge"), Some(&serde_json::Value::from(3)));
        }
    }

    #[test]
    fn malformed_ranges_are_rejected() {
        for name in ["G{1-3}", "G{}", "G{1..3", "{"] {
            let err = RangeName::parse(name).unwrap_err();
            assert!(matches!(err, ConfigError::MalformedRange { .. }), "'{name}' gave {err:?}");
        }
    }

    #[test]
    fn non_numeric_bounds_are_rejected() {
        for name in ["G{a..b}", "G{..3}", "G{1..}", "G{ 1..3}", "G{-1..3}"] {
            let err = RangeName::parse(name).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidRangeBound { .. }), "'{name}' gave {err:?}");
        }
    }

    #[test]
    fn oversized_ranges_are_rejected() {
        assert_eq!(RangeName::parse("G{1..10000}").unwrap().unwrap().len(), 10_000);
        for name in ["G{0..10000}", "X{0..99999999999}", "{0..18446744073709551615}"] {
            let err = RangeName::parse(name).unwrap_err();
            assert!(matches!(err, ConfigError::RangeTooLarge { max: 10_000, .. }), "'{name}' gave {err:?}");
        }
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = RangeName::parse("G{5..3}").unwrap_err();
        assert!(matches!(err, ConfigError::ReversedRange { start: 5, end: 3, .. }));
    }
}
