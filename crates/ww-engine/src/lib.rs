//! Turn engine for Whisperwood interactive narratives.
//!
//! A story alternates between describing the current scene and interpreting
//! the player's choice. [`TurnEngine`] runs one turn at a time over a
//! [`WorldState`], consulting a data-driven [`Story`] for outcomes and an
//! injected [`Narrator`] for prose and free-text interpretation.

pub mod composer;
pub mod config;
pub mod engine;
pub mod error;
pub mod narrator;
pub mod resolver;
pub mod session;
pub mod state;
pub mod story;

pub use composer::{Scene, SceneComposer};
pub use config::EngineConfig;
pub use engine::TurnEngine;
pub use error::{EngineError, EngineResult, GenerationError};
pub use narrator::{INVALID_CHOICE_MARKER, Narrator, SceneContext};
pub use resolver::{ChoiceResolver, Resolution};
pub use session::Session;
pub use state::{PendingInput, Player, TurnPhase, WorldState};
pub use story::{LocationCatalog, Mutation, Outcome, Story, TransitionTable};

/// Normalize player-facing text for comparison: trimmed and lowercased.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_casefolds() {
        assert_eq!(normalize("  Go Deeper INTO the forest \n"), "go deeper into the forest");
        assert_eq!(normalize(""), "");
    }
}
