//! The built-in "Whispering Forest" story.

use super::transition::Mutation;
use super::{ChoiceData, LocationData, StoryData};

fn choice(text: &str, next: Option<&str>, narrative: &str, effects: Vec<Mutation>) -> ChoiceData {
    ChoiceData {
        text: text.to_string(),
        next: next.map(str::to_string),
        narrative: narrative.to_string(),
        effects,
    }
}

fn location(id: &str, name: &str, choices: Vec<ChoiceData>) -> LocationData {
    LocationData {
        id: id.to_string(),
        name: name.to_string(),
        choices,
    }
}

/// Story data for the default adventure.
pub fn whispering_forest() -> StoryData {
    StoryData {
        start_location: "start_forest".to_string(),
        locations: vec![
            location(
                "start_forest",
                "Mysterious Whispering Forest",
                vec![
                    choice(
                        "Go deeper into the forest",
                        Some("deep_forest"),
                        "You venture deeper into the tangled woods.",
                        vec![],
                    ),
                    choice(
                        "Look for a path to the village",
                        Some("village_outskirts"),
                        "You search for a path and soon find a faint trail.",
                        vec![],
                    ),
                    choice(
                        "Examine the strange glowing mushroom",
                        None,
                        "You cautiously approach the mushroom. It pulses with a soft, ethereal \
                         light. Touching it gives you a strange tingling sensation, and you feel \
                         slightly more robust (+5 health).",
                        vec![Mutation::AdjustHealth { delta: 5 }],
                    ),
                ],
            ),
            location(
                "deep_forest",
                "Dense Tangled Woods",
                vec![
                    choice(
                        "Follow the sound of running water",
                        Some("forest_stream"),
                        "You follow the gentle gurgle of a hidden stream.",
                        vec![],
                    ),
                    choice(
                        "Try to climb a tall tree",
                        None,
                        "After a strenuous climb, you reach the canopy. You see vast stretches \
                         of forest, but no clear path. You spot a distant ruined tower.",
                        vec![Mutation::SetFlag {
                            name: "tower_seen".to_string(),
                            value: true,
                        }],
                    ),
                    choice(
                        "Rest and recover health",
                        None,
                        "You find a hidden clearing and rest for a while, regaining some \
                         strength. (+10 health)",
                        vec![Mutation::AdjustHealth { delta: 10 }],
                    ),
                ],
            ),
            location("village_outskirts", "Dusty Village Outskirts", vec![]),
            location("forest_stream", "Glistening Forest Stream", vec![]),
            location("unknown_path", "An Uncharted Path", vec![]),
        ],
    }
}
