//! Narrator backends for Whisperwood.
//!
//! Implementations of [`ww_engine::Narrator`]: [`ChatNarrator`] talks to an
//! OpenAI-compatible chat-completions endpoint (Ollama, LM Studio, ...),
//! [`ScriptedNarrator`] writes deterministic prose offline.

pub mod config;
pub mod error;
pub mod http;
pub mod prompt;
pub mod scripted;

pub use config::NarratorConfig;
pub use error::{NarratorError, NarratorResult};
pub use http::ChatNarrator;
pub use scripted::ScriptedNarrator;
