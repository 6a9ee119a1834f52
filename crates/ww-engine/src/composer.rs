//! Scene generation.

use tracing::{debug, warn};

use crate::error::GenerationError;
use crate::narrator::{Narrator, SceneContext};
use crate::state::WorldState;
use crate::story::LocationCatalog;

/// Choice offered when the scene could not be generated.
pub const RESTART: &str = "Restart";

/// A freshly composed scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    /// Narrative to append to the story.
    pub narrative: String,
    /// Choices to offer. Never empty.
    pub choices: Vec<String>,
}

/// Asks the narrator for prose and pairs it with the location's choices.
///
/// Choices always come from the catalog, never from the narrator.
pub struct SceneComposer<'a> {
    narrator: &'a dyn Narrator,
    catalog: &'a LocationCatalog,
}

impl<'a> SceneComposer<'a> {
    /// Create a composer.
    pub fn new(narrator: &'a dyn Narrator, catalog: &'a LocationCatalog) -> Self {
        Self { narrator, catalog }
    }

    /// Compose the scene for the player's current location.
    pub fn compose(&self, state: &WorldState) -> Scene {
        let context = SceneContext::from_state(state);
        let prose = self
            .narrator
            .generate_scene(&context)
            .and_then(|text| {
                let text = text.trim();
                if text.is_empty() {
                    Err(GenerationError::EmptyResponse)
                } else {
                    Ok(text.to_string())
                }
            });

        match prose {
            Ok(narrative) => {
                debug!(location = %state.player.location_id, "scene generated");
                Scene {
                    narrative,
                    choices: self.catalog.choices_for(&state.player.location_id),
                }
            }
            Err(e) => {
                warn!(error = %e, location = %state.player.location_id, "scene generation failed");
                Scene {
                    narrative: format!("An error occurred while generating the scene: {e}"),
                    choices: vec![RESTART.to_string()],
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrator::MockNarrator;
    use crate::state::Player;
    use crate::story::Story;

    fn state_at(location_id: &str, name: &str) -> WorldState {
        WorldState::new(Player::new(100, location_id, name))
    }

    #[test]
    fn prose_from_narrator_choices_from_catalog() {
        let story = Story::builtin();
        let mut narrator = MockNarrator::new();
        narrator
            .expect_generate_scene()
            .withf(|ctx| ctx.location_name == "Dense Tangled Woods" && ctx.health == 100)
            .times(1)
            .returning(|_| Ok("  Moss muffles every step.\n".to_string()));

        let composer = SceneComposer::new(&narrator, story.catalog());
        let scene = composer.compose(&state_at("deep_forest", "Dense Tangled Woods"));

        assert_eq!(scene.narrative, "Moss muffles every step.");
        assert_eq!(
            scene.choices,
            vec![
                "Follow the sound of running water",
                "Try to climb a tall tree",
                "Rest and recover health",
            ]
        );
    }

    #[test]
    fn unmapped_location_offers_generic_choices() {
        let story = Story::builtin();
        let mut narrator = MockNarrator::new();
        narrator
            .expect_generate_scene()
            .returning(|_| Ok("Fog everywhere.".to_string()));

        let composer = SceneComposer::new(&narrator, story.catalog());
        let scene = composer.compose(&state_at("lighthouse", "An Unknown Place"));
        assert_eq!(scene.choices, vec!["Continue forward", "Turn back"]);
    }

    #[test]
    fn failure_offers_restart() {
        let story = Story::builtin();
        let mut narrator = MockNarrator::new();
        narrator
            .expect_generate_scene()
            .returning(|_| Err(GenerationError::Unreachable("connection refused".to_string())));

        let composer = SceneComposer::new(&narrator, story.catalog());
        let scene = composer.compose(&state_at("start_forest", "Mysterious Whispering Forest"));
        assert!(scene.narrative.contains("An error occurred while generating the scene"));
        assert!(scene.narrative.contains("connection refused"));
        assert_eq!(scene.choices, vec![RESTART]);
    }

    #[test]
    fn blank_prose_counts_as_failure() {
        let story = Story::builtin();
        let mut narrator = MockNarrator::new();
        narrator
            .expect_generate_scene()
            .returning(|_| Ok("   ".to_string()));

        let composer = SceneComposer::new(&narrator, story.catalog());
        let scene = composer.compose(&state_at("start_forest", "Mysterious Whispering Forest"));
        assert!(scene.narrative.contains("empty response"));
        assert_eq!(scene.choices, vec![RESTART]);
    }
}
