//! Prompt texts sent to chat models.

use ww_engine::{INVALID_CHOICE_MARKER, SceneContext};

/// Standing instructions for every request.
pub const SYSTEM_PROMPT: &str = "You are a seasoned Dungeon Master and narrative guide for a \
text-based choose-your-own-adventure game.
Your responses should be immersive, descriptive, and engaging, always drawing the player deeper \
into the story.
Maintain a consistent fantasy tone.
When generating a scene, focus on sensory details (sights, sounds, smells) and the general \
atmosphere.
Do NOT generate the next choices; only describe the scene. The game system will provide choices \
separately.
Keep your narrative concise, typically 2-4 paragraphs per scene.";

/// Prompt asking for a scene description.
pub fn scene_prompt(context: &SceneContext) -> String {
    let story = if context.story_so_far.trim().is_empty() {
        "(the adventure is just beginning)"
    } else {
        context.story_so_far.as_str()
    };

    format!(
        "The player is currently in **{location}**.
Previous events: {story}

Player's current status:
- Health: {health}
- Inventory: {inventory}

Please describe the current scene vividly. Focus on the environment, any sounds or smells, and \
the immediate atmosphere. What does the player perceive? Do not offer choices or ask questions. \
Just the narrative description of the scene.",
        location = context.location_name,
        health = context.health,
        inventory = context.inventory_list(),
    )
}

/// Prompt asking which offered choice free text means.
pub fn interpretation_prompt(offered: &[String], raw_input: &str) -> String {
    let choices = offered
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "The player's current available choices are: [{choices}].
The user has provided the following input: \"{raw_input}\".
Based on the available choices, what is the most likely intent of the user?
If the user's input clearly matches one of the choices, state that choice exactly as written.
If it's a synonym or closely related, identify the closest available choice.
If it does not match any available choice, state \"{INVALID_CHOICE_MARKER}\".
Example:
Choices: [\"Attack the goblin\", \"Flee the scene\", \"Talk to the guard\"]
User Input: \"fight goblin\"
Output: Attack the goblin

Choices: [\"Go left\", \"Go right\"]
User Input: \"walk straight ahead\"
Output: {INVALID_CHOICE_MARKER}

Your output should only be the identified choice or \"{INVALID_CHOICE_MARKER}\"."
    )
}
