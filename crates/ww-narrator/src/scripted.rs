//! Offline narrator with canned prose.
//!
//! Useful without a model server and in tests: output depends only on the
//! input, so runs are reproducible.

use strsim::jaro_winkler;

use ww_engine::{GenerationError, INVALID_CHOICE_MARKER, Narrator, SceneContext};

/// Minimum similarity score for fuzzy matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// Shortest input accepted as a substring of a choice.
const MIN_SUBSTRING_LEN: usize = 4;

const DETAILS: [&str; 5] = [
    "Wind stirs the leaves overhead, carrying the scent of damp earth.",
    "Somewhere close by, a bird calls once and falls silent.",
    "Pale light filters down in slanting shafts, and the air is cool.",
    "The ground is soft with moss, muffling every step you take.",
    "A faint whispering seems to follow you, though no one is there.",
];

/// Narrator that needs no network.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedNarrator;

impl ScriptedNarrator {
    /// Create a scripted narrator.
    pub fn new() -> Self {
        Self
    }
}

impl Narrator for ScriptedNarrator {
    fn generate_scene(&self, context: &SceneContext) -> Result<String, GenerationError> {
        let detail = DETAILS[(context.story_so_far.len() + context.location_name.len()) % DETAILS.len()];

        let mut scene = format!("You find yourself in {}. {detail}", context.location_name);
        if context.health <= 30 {
            scene.push_str(" Your limbs feel heavy and your breath comes short.");
        }
        if !context.inventory.is_empty() {
            scene.push_str(&format!(" You carry {}.", context.inventory_list()));
        }
        Ok(scene)
    }

    fn interpret_choice(
        &self,
        offered: &[String],
        raw_input: &str,
    ) -> Result<String, GenerationError> {
        Ok(best_match(offered, raw_input)
            .map(str::to_string)
            .unwrap_or_else(|| INVALID_CHOICE_MARKER.to_string()))
    }
}

/// Pick the offered choice that `input` most plausibly means.
fn best_match<'a>(offered: &'a [String], input: &str) -> Option<&'a str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    if input.len() >= MIN_SUBSTRING_LEN {
        if let Some(choice) = offered.iter().find(|c| c.to_lowercase().contains(&input)) {
            return Some(choice);
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for choice in offered {
        let score = jaro_winkler(&input, &choice.to_lowercase());
        if score >= FUZZY_THRESHOLD && best.is_none_or(|(_, top)| score > top) {
            best = Some((choice, score));
        }
    }
    best.map(|(choice, _)| choice)
}
