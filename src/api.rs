use crate::config::{Config, ConfigOverrides};
use crate::engine::{AssignmentReport, Assigner};
use crate::error::Result;
use crate::flight::FlightBatch;

/// A flight information board: a fixed, range-expanded configuration plus
/// the most recently assigned batch of flights.
///
/// The configuration is read-only after construction. Each call to
/// [`assign`](Board::assign) replaces the previous batch wholesale.
#[derive(Debug, Clone)]
pub struct Board {
    config: Config,
    flights: FlightBatch,
}

impl Default for Board {
    /// A board with the default configuration: terminal `Main`, gate `A`.
    fn default() -> Self {
        Board { config: Config::default(), flights: FlightBatch::default() }
    }
}

impl Board {
    /// Build a board, shallow-merging `overrides` over the default
    /// configuration and expanding range names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`](crate::ConfigError) when a terminal or gate name
    /// contains a malformed range.
    pub fn new(overrides: Option<ConfigOverrides>) -> Result<Self> {
        let config = match overrides {
            Some(overrides) => Config::default().merged(overrides),
            None => Config::default(),
        };
        Self::with_config(config)
    }

    /// Build a board from a complete configuration (no merge with defaults,
    /// except that an empty terminal list still falls back to them).
    pub fn with_config(config: Config) -> Result<Self> {
        let config = if config.terminals.is_empty() { Config::default().merged(config.into()) } else { config };
        let config = config.expand_ranges()?;
        log::debug!(
            "[board] {} terminals, {} gates after range expansion",
            config.terminals.len(),
            config.terminals.iter().filter_map(|t| t.gates.as_ref()).map(Vec::len).sum::<usize>()
        );
        Ok(Board { config, flights: FlightBatch::default() })
    }

    /// Build a board from a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::new(Some(ConfigOverrides::from_json_str(json)?))
    }

    /// The expanded configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the current batch with `batch` and assign terminals and gates.
    pub fn assign(&mut self, batch: FlightBatch) {
        self.flights = batch;
        Assigner::new(&self.config).run(&mut self.flights);
    }

    /// Like [`assign`](Board::assign), but also return a per-flight trace.
    pub fn assign_verbose(&mut self, batch: FlightBatch) -> AssignmentReport {
        self.flights = batch;
        Assigner::new(&self.config).run_with_metrics(&mut self.flights)
    }

    /// The current, already assigned, batch.
    pub fn state(&self) -> &FlightBatch {
        &self.flights
    }

    /// Consume the board and return the current batch.
    pub fn into_state(self) -> FlightBatch {
        self.flights
    }
}
