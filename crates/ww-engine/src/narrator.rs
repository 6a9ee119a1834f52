//! The narrative-generation capability.
//!
//! The engine never talks to a model directly. It receives an implementation
//! of [`Narrator`] at construction time and passes every piece of context
//! explicitly; implementations hold no session memory.

use serde::Serialize;

use crate::error::GenerationError;
use crate::state::WorldState;

/// Marker a narrator answers with when free text matches no offered choice.
pub const INVALID_CHOICE_MARKER: &str = "INVALID_CHOICE";

/// Everything a narrator needs to describe a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneContext {
    /// Display name of the location to describe.
    pub location_name: String,
    /// The story so far.
    pub story_so_far: String,
    /// Items the player carries.
    pub inventory: Vec<String>,
    /// Current player health.
    pub health: i32,
}

impl SceneContext {
    /// Capture the context for the player's current location.
    pub fn from_state(state: &WorldState) -> Self {
        Self {
            location_name: state.player.location_name.clone(),
            story_so_far: state.story_text(),
            inventory: state.player.inventory.clone(),
            health: state.player.health,
        }
    }

    /// Inventory as a comma-separated list, or "nothing".
    pub fn inventory_list(&self) -> String {
        if self.inventory.is_empty() {
            "nothing".to_string()
        } else {
            self.inventory.join(", ")
        }
    }
}

/// A text generator the engine consults for prose and intent matching.
#[cfg_attr(test, mockall::automock)]
pub trait Narrator {
    /// Describe the scene. Must return prose only, never choices.
    fn generate_scene(&self, context: &SceneContext) -> Result<String, GenerationError>;

    /// Map free text onto one of `offered`. The answer should be one of the
    /// offered choices verbatim or [`INVALID_CHOICE_MARKER`].
    fn interpret_choice(
        &self,
        offered: &[String],
        raw_input: &str,
    ) -> Result<String, GenerationError>;
}
