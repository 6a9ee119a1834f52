//! The turn state machine.
//!
//! Every turn takes one of two paths, chosen by [`WorldState::phase`]:
//!
//! - **AwaitingScene**: describe the current location and offer its choices.
//! - **AwaitingChoice**: resolve the pending input, apply the outcome, then
//!   describe the new location in the same turn.
//!
//! Between turns a running game is therefore always waiting for a choice,
//! with a non-empty set of choices on offer.

use tracing::{debug, info, info_span};

use crate::composer::SceneComposer;
use crate::config::EngineConfig;
use crate::narrator::Narrator;
use crate::resolver::{ChoiceResolver, Resolution};
use crate::state::{PendingInput, Player, WorldState};
use crate::story::{Outcome, Story};

/// Choice offered once the game is over.
pub const RESTART_GAME: &str = "Restart Game";

/// Final narrative line of a lost game.
pub const GAME_OVER_LINE: &str = "**Your health has dropped to zero! The adventure ends here.**";

/// Runs turns over a [`WorldState`].
pub struct TurnEngine {
    narrator: Box<dyn Narrator>,
    story: Story,
    config: EngineConfig,
}

impl TurnEngine {
    /// Create an engine with the given narrator, story and configuration.
    pub fn new(narrator: Box<dyn Narrator>, story: Story, config: EngineConfig) -> Self {
        Self {
            narrator,
            story,
            config,
        }
    }

    /// The story being played.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A fresh state at the story's start location, ready for the opening turn.
    pub fn new_state(&self) -> WorldState {
        let start = self.story.start_location();
        let name = self.story.catalog().display_name(start);
        WorldState::new(Player::new(self.config.start_health, start, name))
    }

    /// Run one turn and return the updated state.
    ///
    /// Never fails: narrator problems end up in the narrative. A state whose
    /// game is over comes back unchanged.
    pub fn process(&self, mut state: WorldState) -> WorldState {
        self.advance(&mut state);
        state
    }

    /// Run one turn in place.
    pub fn advance(&self, state: &mut WorldState) {
        if state.game_over {
            debug!(session = %state.session_id, "game is over; ignoring turn");
            return;
        }

        state.turn += 1;
        let span = info_span!("turn", session = %state.session_id, turn = state.turn);
        let _enter = span.enter();

        match std::mem::take(&mut state.pending_input) {
            PendingInput::Submitted(raw) => self.handle_choice(state, &raw),
            PendingInput::Initial | PendingInput::Idle => self.describe_scene(state),
        }
    }

    fn handle_choice(&self, state: &mut WorldState, raw: &str) {
        debug!(input = raw, "processing choice");
        let resolver = ChoiceResolver::new(self.narrator.as_ref());

        match resolver.resolve(raw, &state.available_choices) {
            Resolution::Matched(choice) => {
                let outcome = self
                    .story
                    .transitions()
                    .lookup(&state.player.location_id, &choice);
                info!(
                    choice = %choice,
                    from = %state.player.location_id,
                    to = %outcome.next_location_id,
                    "choice accepted"
                );
                state.available_choices.clear();
                self.apply_outcome(state, outcome);
                if !state.game_over {
                    self.describe_scene(state);
                }
            }
            Resolution::Invalid { explanation } => {
                info!(input = raw, "invalid choice");
                let text = guidance(&state.available_choices, explanation.as_deref());
                state.push_story(text);
                if state.available_choices.is_empty() {
                    self.describe_scene(state);
                }
            }
        }
    }

    /// Tax, outcome mutations, clamp, game-over check. In that order.
    fn apply_outcome(&self, state: &mut WorldState, outcome: &Outcome) {
        let cost = self.config.turn_cost.max(0);
        let after_tax = state.player.adjust_health(-cost);
        state.push_story(format!(
            "_Your journey drains your energy. (-{cost} health. Current health: {})_",
            after_tax.max(0)
        ));

        state.push_story(outcome.story_delta.clone());
        for mutation in &outcome.mutations {
            mutation.apply(state);
        }
        state.player.clamp_health();

        let next = &outcome.next_location_id;
        let name = self.story.catalog().display_name(next);
        state.player.move_to(next.clone(), name);

        debug!(health = state.player.health, "outcome applied");

        if state.player.health <= 0 {
            info!("game over");
            state.game_over = true;
            state.push_story(GAME_OVER_LINE);
            state.available_choices = vec![RESTART_GAME.to_string()];
        }
    }

    fn describe_scene(&self, state: &mut WorldState) {
        let location = state.player.location_id.clone();
        let name = self.story.catalog().display_name(&location);
        state.player.move_to(location, name);

        let composer = SceneComposer::new(self.narrator.as_ref(), self.story.catalog());
        let scene = composer.compose(state);
        state.push_story(scene.narrative);
        state.available_choices = scene.choices;
    }
}

fn guidance(offered: &[String], explanation: Option<&str>) -> String {
    let mut text = if offered.is_empty() {
        "That action isn't possible here.".to_string()
    } else {
        format!(
            "That action isn't possible here. Please choose one of the available paths: {}.",
            offered.join(", ")
        )
    };
    if let Some(explanation) = explanation {
        text.push_str(&format!(" ({explanation})"));
    }
    text
}
