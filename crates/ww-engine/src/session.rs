//! Session management.
//!
//! A `Session` pairs one [`TurnEngine`] with the [`WorldState`] it drives,
//! and handles what the engine itself does not: the restart signal and
//! validation of states handed in from outside.

use tracing::info;

use crate::composer::RESTART;
use crate::engine::{RESTART_GAME, TurnEngine};
use crate::error::EngineResult;
use crate::normalize;
use crate::state::{PendingInput, WorldState};

/// One player's play-through.
pub struct Session {
    engine: TurnEngine,
    state: WorldState,
}

impl Session {
    /// Create a session with a fresh state. Call [`Session::start`] to
    /// describe the opening scene.
    pub fn new(engine: TurnEngine) -> Self {
        let state = engine.new_state();
        Self { engine, state }
    }

    /// Resume from a caller-supplied state.
    pub fn with_state(engine: TurnEngine, state: WorldState) -> EngineResult<Self> {
        state.validate()?;
        Ok(Self { engine, state })
    }

    /// The current state.
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// The engine driving this session.
    pub fn engine(&self) -> &TurnEngine {
        &self.engine
    }

    /// Run the opening turn.
    pub fn start(&mut self) -> &WorldState {
        self.engine.advance(&mut self.state);
        &self.state
    }

    /// Discard the current state and start over.
    pub fn restart(&mut self) -> &WorldState {
        info!(session = %self.state.session_id, "restarting");
        self.state = self.engine.new_state();
        self.start()
    }

    /// Submit player input and run one turn.
    ///
    /// A restart affordance that is currently on offer restarts the game.
    /// Fails with [`crate::EngineError::StateCorruption`] if the state no
    /// longer satisfies its invariants; restart to recover.
    pub fn submit(&mut self, input: &str) -> EngineResult<&WorldState> {
        if self.offers_restart(input) {
            return Ok(self.restart());
        }
        if self.state.game_over {
            return Ok(&self.state);
        }

        let previous = std::mem::replace(
            &mut self.state.pending_input,
            PendingInput::Submitted(input.to_string()),
        );
        if let Err(e) = self.state.validate() {
            self.state.pending_input = previous;
            return Err(e);
        }
        self.engine.advance(&mut self.state);
        Ok(&self.state)
    }

    fn offers_restart(&self, input: &str) -> bool {
        let wanted = normalize(input);
        let is_restart = wanted == normalize(RESTART) || wanted == normalize(RESTART_GAME);
        is_restart
            && self
                .state
                .available_choices
                .iter()
                .any(|choice| normalize(choice) == wanted)
    }
}
