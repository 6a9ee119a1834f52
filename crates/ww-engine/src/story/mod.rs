//! Story data: locations, offered choices, and outcomes.
//!
//! A [`Story`] is assembled from [`StoryData`], either the built-in
//! adventure or a JSON file. Each authored choice feeds both the
//! [`LocationCatalog`] (what is offered) and the [`TransitionTable`]
//! (what happens when it is picked).

mod builtin;
mod catalog;
mod transition;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::normalize;

pub use catalog::{GENERIC_CHOICES, LocationCatalog, UNKNOWN_LOCATION_NAME};
pub use transition::{Mutation, Outcome, TransitionTable, UNKNOWN_PATH, UNKNOWN_PATH_NARRATIVE};

/// Serialized form of a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryData {
    /// Where every session begins.
    pub start_location: String,
    /// All authored locations.
    #[serde(default)]
    pub locations: Vec<LocationData>,
}

/// Serialized form of a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationData {
    /// Location identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Choices offered here. Empty means the generic choices.
    #[serde(default)]
    pub choices: Vec<ChoiceData>,
}

/// Serialized form of a choice and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceData {
    /// Text offered to the player.
    pub text: String,
    /// Destination. `None` keeps the player where they are.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Narrative appended when the choice is taken.
    #[serde(default)]
    pub narrative: String,
    /// Mutations applied in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<Mutation>,
}

impl StoryData {
    /// Check the story for authoring mistakes.
    pub fn validate(&self) -> EngineResult<()> {
        let mut ids = HashSet::new();
        for location in &self.locations {
            if location.id.trim().is_empty() {
                return Err(EngineError::InvalidStory(
                    "location with an empty id".to_string(),
                ));
            }
            if !ids.insert(location.id.as_str()) {
                return Err(EngineError::InvalidStory(format!(
                    "duplicate location '{}'",
                    location.id
                )));
            }

            let mut texts = HashSet::new();
            for choice in &location.choices {
                let key = normalize(&choice.text);
                if key.is_empty() {
                    return Err(EngineError::InvalidStory(format!(
                        "empty choice at '{}'",
                        location.id
                    )));
                }
                if !texts.insert(key) {
                    return Err(EngineError::InvalidStory(format!(
                        "duplicate choice '{}' at '{}'",
                        choice.text, location.id
                    )));
                }
            }
        }

        if !ids.contains(self.start_location.as_str()) {
            return Err(EngineError::InvalidStory(format!(
                "start location '{}' is not defined",
                self.start_location
            )));
        }
        Ok(())
    }
}

/// A playable story.
#[derive(Debug, Clone)]
pub struct Story {
    start_location: String,
    catalog: LocationCatalog,
    transitions: TransitionTable,
}

impl Story {
    /// The built-in Whispering Forest adventure.
    pub fn builtin() -> Self {
        Self::assemble(builtin::whispering_forest())
    }

    /// Build a story from data, validating it first.
    pub fn from_data(data: StoryData) -> EngineResult<Self> {
        data.validate()?;
        Ok(Self::assemble(data))
    }

    /// Parse a story from JSON.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let data: StoryData = serde_json::from_str(json)?;
        Self::from_data(data)
    }

    /// Load a story from a JSON file.
    pub fn load(path: &Path) -> EngineResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    fn assemble(data: StoryData) -> Self {
        let mut catalog = LocationCatalog::new();
        let mut transitions = TransitionTable::new();

        for location in data.locations {
            let offered = location.choices.iter().map(|c| c.text.clone()).collect();
            for choice in location.choices {
                let next = choice.next.unwrap_or_else(|| location.id.clone());
                let outcome = Outcome {
                    next_location_id: next,
                    story_delta: choice.narrative,
                    mutations: choice.effects,
                };
                transitions.insert(location.id.clone(), &choice.text, outcome);
            }
            catalog.insert(location.id, location.name, offered);
        }

        Self {
            start_location: data.start_location,
            catalog,
            transitions,
        }
    }

    /// Where every session begins.
    pub fn start_location(&self) -> &str {
        &self.start_location
    }

    /// Location names and offered choices.
    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    /// Choice outcomes.
    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }
}

impl Default for Story {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHIPPED: &str = include_str!("../../../../stories/whispering_forest.json");

    #[test]
    fn builtin_is_valid() {
        assert!(builtin::whispering_forest().validate().is_ok());
    }

    #[test]
    fn builtin_story() {
        let story = Story::builtin();
        assert_eq!(story.start_location(), "start_forest");
        assert_eq!(story.catalog().len(), 5);
        assert_eq!(story.transitions().len(), 6);
        assert_eq!(
            story.catalog().display_name("deep_forest"),
            "Dense Tangled Woods"
        );

        let outcome = story
            .transitions()
            .lookup("start_forest", "go deeper into the forest");
        assert_eq!(outcome.next_location_id, "deep_forest");
        assert!(outcome.mutations.is_empty());
    }

    #[test]
    fn missing_next_stays_in_place() {
        let story = Story::builtin();
        let outcome = story
            .transitions()
            .lookup("deep_forest", "Try to climb a tall tree");
        assert_eq!(outcome.next_location_id, "deep_forest");
        assert_eq!(
            outcome.mutations,
            vec![Mutation::SetFlag {
                name: "tower_seen".to_string(),
                value: true
            }]
        );
    }

    #[test]
    fn shipped_file_matches_builtin() {
        let data: StoryData = serde_json::from_str(SHIPPED).unwrap();
        assert_eq!(data, builtin::whispering_forest());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("story.json");
        std::fs::write(&path, SHIPPED).unwrap();
        let story = Story::load(&path).unwrap();
        assert_eq!(story.start_location(), "start_forest");
    }

    #[test]
    fn load_missing_file() {
        let err = Story::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, EngineError::Io { .. }));
    }

    #[test]
    fn malformed_json() {
        let err = Story::from_json("{ not json").unwrap_err();
        assert!(matches!(err, EngineError::StoryParse(_)));
    }

    #[test]
    fn rejects_unknown_start() {
        let err = Story::from_json(r#"{"start_location": "moon", "locations": []}"#).unwrap_err();
        assert!(err.to_string().contains("moon"));
    }

    #[test]
    fn rejects_duplicate_choices() {
        let json = r#"{
            "start_location": "cave",
            "locations": [
                {"id": "cave", "name": "Cave", "choices": [
                    {"text": "Leave"},
                    {"text": " leave "}
                ]}
            ]
        }"#;
        let err = Story::from_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate choice"));
    }

    #[test]
    fn rejects_duplicate_locations() {
        let json = r#"{
            "start_location": "cave",
            "locations": [
                {"id": "cave", "name": "Cave"},
                {"id": "cave", "name": "Other Cave"}
            ]
        }"#;
        let err = Story::from_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate location"));
    }

    #[test]
    fn minimal_story_defaults() {
        let json = r#"{
            "start_location": "cave",
            "locations": [
                {"id": "cave", "name": "Cave", "choices": [
                    {"text": "Pick up the lantern", "effects": [{"op": "add_item", "item": "lantern"}]}
                ]}
            ]
        }"#;
        let story = Story::from_json(json).unwrap();
        let outcome = story.transitions().lookup("cave", "pick up the lantern");
        assert_eq!(outcome.next_location_id, "cave");
        assert_eq!(outcome.story_delta, "");
        assert_eq!(story.catalog().choices_for("cave"), vec!["Pick up the lantern"]);
    }
}
