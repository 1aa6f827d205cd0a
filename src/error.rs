use thiserror::Error;

/// Errors raised while building a [`Board`](crate::Board) from its configuration.
///
/// Configuration problems are fatal and surface at construction time; once a
/// board exists, assignment never fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A name contains `{` but no well-formed `{start..end}` range.
    #[error("malformed range in name '{name}' (expected prefix{{start..end}}suffix)")]
    MalformedRange { name: String },

    /// One side of a range is not a non-negative integer.
    #[error("invalid range bound '{bound}' in name '{name}'")]
    InvalidRangeBound { name: String, bound: String },

    /// The range end lies before its start, so it would expand to nothing.
    #[error("range in name '{name}' ends before it starts ({start} > {end})")]
    ReversedRange { name: String, start: u64, end: u64 },

    /// The range would produce more entries than a board can sensibly hold.
    #[error("range in name '{name}' expands to more than {max} entries")]
    RangeTooLarge { name: String, max: u64 },

    /// A callsign or aircraft pattern does not compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The configuration document is not valid JSON or has the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
