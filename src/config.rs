//! Board configuration: terminals, their gates, and the constraints that steer
//! flights towards them.
//!
//! A configuration is built once, merged over the defaults, range-expanded
//! (see `config/range.rs`) and then treated as read-only.
//!
//! ```text
//! ConfigOverrides ──merge over Config::default()──▶ Config ──expand_ranges()──▶ Config
//!  (user keys win)                                  (raw)     (names explicit)
//! ```

#[path = "config/range.rs"]
mod range;

use crate::error::Result;
use crate::pattern::Pattern;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Match constraints shared by terminals and gates. All optional; a candidate
/// that declares none of them accepts any flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domestic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callsign: Option<Pattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft_short: Option<Pattern>,
}

/// Common view of terminals and gates used by filtering, selection and range
/// expansion.
pub trait Candidate: Clone {
    fn name(&self) -> &str;
    fn constraints(&self) -> &Constraints;
    /// A copy of this entry under another name, every other field untouched.
    fn renamed(&self, name: String) -> Self;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gate {
    pub name: String,
    #[serde(flatten)]
    pub constraints: Constraints,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Gate {
    pub fn new(name: impl Into<String>) -> Self {
        Gate { name: name.into(), constraints: Constraints::default(), extra: Map::new() }
    }
}

candidate_builders!(Gate);

impl Candidate for Gate {
    fn name(&self) -> &str {
        &self.name
    }

    fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    fn renamed(&self, name: String) -> Self {
        Gate { name, ..self.clone() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terminal {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gates: Option<Vec<Gate>>,
    #[serde(flatten)]
    pub constraints: Constraints,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Terminal {
    pub fn new(name: impl Into<String>) -> Self {
        Terminal { name: name.into(), gates: None, constraints: Constraints::default(), extra: Map::new() }
    }

    pub fn with_gates(mut self, gates: impl IntoIterator<Item = Gate>) -> Self {
        self.gates = Some(gates.into_iter().collect());
        self
    }
}

candidate_builders!(Terminal);

impl Candidate for Terminal {
    fn name(&self) -> &str {
        &self.name
    }

    fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    fn renamed(&self, name: String) -> Self {
        Terminal { name, ..self.clone() }
    }
}

/// A complete board configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub terminals: Vec<Terminal>,
    /// Top-level keys the engine does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Config {
    /// One terminal, `Main`, with a single unconstrained gate `A`.
    fn default() -> Self {
        Config { terminals: vec![Terminal::new("Main").with_gates([Gate::new("A")])], extra: Map::new() }
    }
}

impl Config {
    pub fn new(terminals: Vec<Terminal>) -> Self {
        Config { terminals, extra: Map::new() }
    }

    /// Shallow-merge `overrides` over this configuration: every top-level key
    /// present in `overrides` replaces the current value wholesale.
    ///
    /// An empty terminal list is not a usable board, so it keeps the current
    /// terminals instead.
    pub fn merged(mut self, overrides: ConfigOverrides) -> Self {
        match overrides.terminals {
            Some(terminals) if terminals.is_empty() => {
                log::debug!("[config] empty terminal list, keeping {} default terminal(s)", self.terminals.len());
            }
            Some(terminals) => self.terminals = terminals,
            None => {}
        }
        self.extra.extend(overrides.extra);
        self
    }

    /// Replace every `prefix{start..end}suffix` name with explicit entries,
    /// terminals first, then the gates of each resulting terminal.
    pub fn expand_ranges(mut self) -> Result<Self> {
        self.terminals = range::expand(self.terminals)?;
        for terminal in &mut self.terminals {
            if let Some(gates) = terminal.gates.take() {
                terminal.gates = Some(range::expand(gates)?);
            }
        }
        Ok(self)
    }
}

/// User-supplied configuration keys, all optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminals: Option<Vec<Terminal>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigOverrides {
    pub fn terminals(terminals: Vec<Terminal>) -> Self {
        ConfigOverrides { terminals: Some(terminals), extra: Map::new() }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

impl From<Config> for ConfigOverrides {
    fn from(config: Config) -> Self {
        ConfigOverrides { terminals: Some(config.terminals), extra: config.extra }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn default_is_main_terminal_with_gate_a() {
        let config = Config::default();
        assert_eq!(config.terminals.len(), 1);
        assert_eq!(config.terminals[0].name, "Main");
        let gates = config.terminals[0].gates.as_ref().unwrap();
        assert_eq!(gates.len(), 1);
        assert_eq!(gates[0].name, "A");
    }

    #[test]
    fn builders_set_constraints_on_gates_and_terminals() {
        let gate = Gate::new("A").with_callsign(pattern!("^ACA")).with_aircraft(pattern!("^B7")).with_domestic(true);
        let terminal = Terminal::new("T1").with_callsign(pattern!("^WJA")).with_domestic(false).with_field("bus", 4);

        assert_eq!(gate.constraints.declared(), crate::engine::ConstraintSet::all());
        assert!(gate.constraints.aircraft_short.as_ref().unwrap().matches("B738"));
        assert_eq!(terminal.constraints.domestic, Some(false));
        assert!(terminal.constraints.callsign.as_ref().unwrap().matches("WJA1"));
        assert_eq!(terminal.extra.get("bus"), Some(&Value::from(4)));
    }

    #[test]
    fn merge_replaces_top_level_keys_wholesale() {
        let overrides = ConfigOverrides::terminals(vec![Terminal::new("1")]);
        let config = Config::default().merged(overrides);
        assert_eq!(config.terminals.len(), 1);
        assert_eq!(config.terminals[0].name, "1");
        // Not deep-merged: the default gate does not leak into the user terminal.
        assert!(config.terminals[0].gates.is_none());
    }

    #[test]
    fn merge_keeps_unknown_keys() {
        let overrides = ConfigOverrides::from_json_str(r#"{"airport":"CYUL"}"#).unwrap();
        let config = Config::default().merged(overrides);
        assert_eq!(config.terminals[0].name, "Main");
        assert_eq!(config.extra.get("airport"), Some(&Value::from("CYUL")));
    }

    #[test]
    fn empty_terminal_list_falls_back_to_defaults() {
        let config = Config::default().merged(ConfigOverrides::terminals(Vec::new()));
        assert_eq!(config.terminals[0].name, "Main");
    }

    #[test]
    fn json_config_with_constraints_and_passthrough() {
        let json = r#"{
            "terminals": [
                {
                    "name": "International",
                    "domestic": false,
                    "lounge": "Maple Leaf",
                    "gates": [
                        { "name": "A{01..03}", "callsign": "^ACA\\d+", "jetway": true },
                        { "name": "B", "aircraft_short": "/^b7/i" }
                    ]
                }
            ]
        }"#;
        let config = ConfigOverrides::from_json_str(json).unwrap();
        let terminal = &config.terminals.as_ref().unwrap()[0];
        assert_eq!(terminal.constraints.domestic, Some(false));
        assert_eq!(terminal.extra.get("lounge"), Some(&Value::from("Maple Leaf")));

        let gates = terminal.gates.as_ref().unwrap();
        assert!(gates[0].constraints.callsign.as_ref().unwrap().matches("ACA7"));
        assert_eq!(gates[0].extra.get("jetway"), Some(&Value::Bool(true)));
        assert!(gates[1].constraints.aircraft_short.as_ref().unwrap().matches("B738"));
        assert!(gates[1].extra.is_empty());
    }

    #[test]
    fn json_with_bad_pattern_is_rejected() {
        let err = ConfigOverrides::from_json_str(r#"{"terminals":[{"name":"T1","callsign":"(ACA"}]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        let err = ConfigOverrides::from_path("/nonexistent/gateboard.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn expands_terminals_then_their_gates() {
        let config = Config::new(vec![Terminal::new("T{1..2}").with_gates([Gate::new("G{1..2}")])])
            .expand_ranges()
            .unwrap();
        let names: Vec<(&str, Vec<&str>)> = config
            .terminals
            .iter()
            .map(|t| (t.name.as_str(), t.gates.as_ref().unwrap().iter().map(|g| g.name.as_str()).collect()))
            .collect();
        assert_eq!(names, vec![("T1", vec!["G1", "G2"]), ("T2", vec!["G1", "G2"])]);
    }

    #[test]
    fn expansion_keeps_passthrough_fields() {
        let config = Config::new(vec![
            Terminal::new("1").with_field("foo", true).with_gates([Gate::new("G{1..2}").with_field("foo", true)]),
            Terminal::new("2").with_field("foo", false).with_gates([Gate::new("G{3..4}").with_field("foo", false)]),
        ])
        .expand_ranges()
        .unwrap();

        for (terminal, expected) in config.terminals.iter().zip([true, false]) {
            assert_eq!(terminal.extra.get("foo"), Some(&Value::Bool(expected)));
            for gate in terminal.gates.as_ref().unwrap() {
                assert_eq!(gate.extra.get("foo"), Some(&Value::Bool(expected)));
            }
        }
        let second: Vec<&str> =
            config.terminals[1].gates.as_ref().unwrap().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(second, vec!["G3", "G4"]);
    }

    #[test]
    fn malformed_gate_range_fails_expansion() {
        let err = Config::new(vec![Terminal::new("T1").with_gates([Gate::new("G{1-3}")])]).expand_ranges().unwrap_err();
        assert!(matches!(err, ConfigError::MalformedRange { .. }));
    }
}
