//! Error types for narrator setup.
//!
//! Failures during generation are reported as
//! [`ww_engine::GenerationError`]; these errors only occur while building a
//! narrator.

use thiserror::Error;

/// Result type for narrator setup.
pub type NarratorResult<T> = Result<T, NarratorError>;

/// Errors that can occur while configuring a narrator.
#[derive(Debug, Error)]
pub enum NarratorError {
    /// A configuration value could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidSetting {
        /// Setting name.
        key: String,
        /// The rejected value.
        value: String,
    },

    /// The HTTP client could not be built.
    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
