use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by Expense Chart.
#[derive(Error, Debug)]
pub enum ChartError {
    /// A change event referenced a record id that is not in the local list.
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// A write against the expense store was rejected.
    #[error("Remote write failed for {id}: {reason}")]
    RemoteWriteFailed { id: String, reason: String },

    /// A record carried a negative cost.
    #[error("Invalid cost for {name}: {cost}")]
    InvalidCost { name: String, cost: f64 },

    /// A store document could not be opened or read from disk.
    #[error("Failed to read document {path}: {source}")]
    StoreRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The expected collection directory does not exist.
    #[error("Collection path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the chart crates.
pub type Result<T> = std::result::Result<T, ChartError>;
