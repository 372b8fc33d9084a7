//! Error types for configuration loading.
//!
//! The simulation itself never fails: guarded actions are rejected silently.
//! Only reading an external tuning table can go wrong.

use thiserror::Error;

/// Result type alias using [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or validating a [`crate::tuning::Tuning`] table.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The tuning file could not be read.
    #[error("Failed to read tuning file '{path}': {source}")]
    Io {
        /// Path that failed to open.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The tuning table is not valid JSON for the expected schema.
    #[error("Failed to parse tuning table: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the simulation cannot run with.
    #[error("Invalid tunable '{field}': {reason}")]
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
