//! Error types for the turn engine.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced to the caller of the engine.
///
/// Collaborator failures never appear here; they are folded into the
/// narrative (see [`GenerationError`]).
#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller supplied a world state that breaks a required invariant.
    /// The only recovery is a restart.
    #[error("corrupted world state: {0}")]
    StateCorruption(String),

    /// A story definition failed validation.
    #[error("invalid story: {0}")]
    InvalidStory(String),

    /// A story file could not be parsed.
    #[error("could not parse story: {0}")]
    StoryParse(#[from] serde_json::Error),

    /// A story file could not be read.
    #[error("could not read {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Failures of the narrative-generation collaborator.
///
/// Always recovered locally: the engine turns these into a player-visible
/// notice plus a safe choice set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The collaborator could not be reached.
    #[error("narrator unreachable: {0}")]
    Unreachable(String),

    /// The collaborator did not answer within the configured timeout.
    #[error("narrator timed out")]
    Timeout,

    /// The collaborator answered with an error status.
    #[error("narrator rejected the request ({status}): {body}")]
    Rejected {
        /// HTTP or backend status code.
        status: u16,
        /// Response body, as far as it could be read.
        body: String,
    },

    /// The collaborator's answer could not be decoded.
    #[error("invalid narrator response: {0}")]
    InvalidResponse(String),

    /// The collaborator answered with no usable text.
    #[error("narrator returned an empty response")]
    EmptyResponse,
}
