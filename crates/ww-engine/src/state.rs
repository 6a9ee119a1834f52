//! World and player state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// The player's attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Remaining health. Zero only once the game is over.
    pub health: i32,
    /// Items collected so far, in pickup order.
    pub inventory: Vec<String>,
    /// Identifier of the current location.
    pub location_id: String,
    /// Display name of the current location, derived from the id.
    pub location_name: String,
}

impl Player {
    /// Create a player at the given location.
    pub fn new(health: i32, location_id: impl Into<String>, location_name: impl Into<String>) -> Self {
        Self {
            health,
            inventory: Vec::new(),
            location_id: location_id.into(),
            location_name: location_name.into(),
        }
    }

    /// Change health by `delta` without clamping. Returns the new value.
    pub fn adjust_health(&mut self, delta: i32) -> i32 {
        self.health = self.health.saturating_add(delta);
        self.health
    }

    /// Clamp health so it never drops below zero.
    pub fn clamp_health(&mut self) {
        self.health = self.health.max(0);
    }

    /// Check if the player carries an item.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Add an item to the inventory. Items already carried are not duplicated.
    pub fn add_item(&mut self, item: impl Into<String>) {
        let item = item.into();
        if !self.has_item(&item) {
            self.inventory.push(item);
        }
    }

    /// Move to another location.
    pub fn move_to(&mut self, location_id: impl Into<String>, location_name: impl Into<String>) {
        self.location_id = location_id.into();
        self.location_name = location_name.into();
    }
}

/// Input waiting to be consumed by the next turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingInput {
    /// The very first turn of a session: describe the opening scene.
    Initial,
    /// Nothing pending.
    #[default]
    Idle,
    /// Raw text submitted by the player.
    Submitted(String),
}

/// Which path a turn takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// No input to process; the next turn describes a scene.
    AwaitingScene,
    /// Player input is pending; the next turn processes a choice.
    AwaitingChoice,
}

/// The complete state of one play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    /// Identifies the session in logs.
    pub session_id: Uuid,
    /// Number of turns processed so far.
    pub turn: u32,
    /// The player.
    pub player: Player,
    /// Narrative segments, oldest first. Never truncated.
    pub story: Vec<String>,
    /// Choices currently offered to the player.
    pub available_choices: Vec<String>,
    /// Plot flags. Set, never cleared.
    pub plot_flags: HashMap<String, bool>,
    /// Input for the next turn.
    pub pending_input: PendingInput,
    /// Terminal flag. Once set, turns no longer change the state.
    pub game_over: bool,
}

impl WorldState {
    /// Create a fresh state at the start of a session.
    pub fn new(player: Player) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            turn: 0,
            player,
            story: Vec::new(),
            available_choices: Vec::new(),
            plot_flags: HashMap::new(),
            pending_input: PendingInput::Initial,
            game_over: false,
        }
    }

    /// The path the next turn will take.
    pub fn phase(&self) -> TurnPhase {
        match self.pending_input {
            PendingInput::Submitted(_) => TurnPhase::AwaitingChoice,
            PendingInput::Initial | PendingInput::Idle => TurnPhase::AwaitingScene,
        }
    }

    /// Submit raw player input for the next turn.
    pub fn submit(&mut self, input: impl Into<String>) {
        self.pending_input = PendingInput::Submitted(input.into());
    }

    /// Append a narrative segment. Blank segments are dropped.
    pub fn push_story(&mut self, segment: impl Into<String>) {
        let segment = segment.into();
        if !segment.trim().is_empty() {
            self.story.push(segment);
        }
    }

    /// The whole story so far as one text.
    pub fn story_text(&self) -> String {
        self.story.join("\n\n")
    }

    /// Check if a plot flag is set to true.
    pub fn has_flag(&self, name: &str) -> bool {
        self.plot_flags.get(name).copied().unwrap_or(false)
    }

    /// Set a plot flag.
    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.plot_flags.insert(name.into(), value);
    }

    /// Check the invariants a caller-supplied state must satisfy.
    pub fn validate(&self) -> EngineResult<()> {
        if self.player.location_id.trim().is_empty() {
            return Err(EngineError::StateCorruption(
                "player has no location".to_string(),
            ));
        }
        if self.player.health < 0 {
            return Err(EngineError::StateCorruption(format!(
                "negative health {}",
                self.player.health
            )));
        }
        if self.game_over != (self.player.health == 0) {
            return Err(EngineError::StateCorruption(format!(
                "health {} disagrees with game_over={}",
                self.player.health, self.game_over
            )));
        }
        if !self.game_over
            && self.phase() == TurnPhase::AwaitingChoice
            && self.available_choices.is_empty()
        {
            return Err(EngineError::StateCorruption(
                "input submitted but no choices were offered".to_string(),
            ));
        }
        Ok(())
    }
}
