//! Error types for the experiment
//!
//! Terminal and file failures surface as `Io`; a quit key press
//! unwinds the whole run as `Aborted`.

use thiserror::Error;

/// Main error type for experiment operations
#[derive(Error, Debug)]
pub enum ExperimentError {
    /// IO error (terminal or data file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Configuration values are inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// No stimulus registered under the requested key
    #[error("Stimulus not found: {0}")]
    MissingStimulus(String),

    /// Participant pressed the quit key
    #[error("Experiment aborted by participant")]
    Aborted,
}

/// Result type for experiment operations
pub type ExperimentResult<T> = Result<T, ExperimentError>;

impl ExperimentError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error is the participant quitting
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}
