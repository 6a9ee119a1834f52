//! Outcomes of choices and the table that maps choices to them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::normalize;
use crate::state::WorldState;

/// Location every unmapped choice leads to.
pub const UNKNOWN_PATH: &str = "unknown_path";

/// Narrative for choices without an authored outcome.
pub const UNKNOWN_PATH_NARRATIVE: &str = "You proceed, but the path ahead is still uncertain.";

/// A single change to the world state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    /// Change the player's health.
    AdjustHealth {
        /// Amount to add (negative to drain).
        delta: i32,
    },
    /// Set a plot flag.
    SetFlag {
        /// Flag name.
        name: String,
        /// Value to set.
        value: bool,
    },
    /// Give the player an item.
    AddItem {
        /// Item identifier.
        item: String,
    },
}

impl Mutation {
    /// Apply this mutation. Health is not clamped here.
    pub fn apply(&self, state: &mut WorldState) {
        match self {
            Mutation::AdjustHealth { delta } => {
                state.player.adjust_health(*delta);
            }
            Mutation::SetFlag { name, value } => state.set_flag(name.clone(), *value),
            Mutation::AddItem { item } => state.player.add_item(item.clone()),
        }
    }
}

/// The structured effect of a matched choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Where the player ends up.
    pub next_location_id: String,
    /// Narrative appended when the outcome applies.
    pub story_delta: String,
    /// Changes applied in order.
    pub mutations: Vec<Mutation>,
}

impl Outcome {
    /// Create an outcome without mutations.
    pub fn new(next_location_id: impl Into<String>, story_delta: impl Into<String>) -> Self {
        Self {
            next_location_id: next_location_id.into(),
            story_delta: story_delta.into(),
            mutations: Vec::new(),
        }
    }

    /// Add a mutation.
    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutations.push(mutation);
        self
    }

    /// The outcome of choices nobody wrote an entry for.
    pub fn unknown_path() -> Self {
        Self::new(UNKNOWN_PATH, UNKNOWN_PATH_NARRATIVE)
    }
}

/// Maps `(location, choice)` to an [`Outcome`].
///
/// Choice keys are normalized, so lookups ignore case and surrounding
/// whitespace. Missing entries resolve to a fallback outcome instead of
/// failing.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    outcomes: HashMap<String, HashMap<String, Outcome>>,
    fallback: Outcome,
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self {
            outcomes: HashMap::new(),
            fallback: Outcome::unknown_path(),
        }
    }
}

impl TransitionTable {
    /// Create an empty table with the standard fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the outcome of choosing `choice` at `location_id`.
    /// Replaces any earlier entry for the same pair.
    pub fn insert(&mut self, location_id: impl Into<String>, choice: &str, outcome: Outcome) {
        self.outcomes
            .entry(location_id.into())
            .or_default()
            .insert(normalize(choice), outcome);
    }

    /// Look up the outcome for a choice, falling back to the unknown path.
    pub fn lookup(&self, location_id: &str, choice: &str) -> &Outcome {
        self.outcomes
            .get(location_id)
            .and_then(|choices| choices.get(&normalize(choice)))
            .unwrap_or(&self.fallback)
    }

    /// Check if an authored entry exists for the pair.
    pub fn contains(&self, location_id: &str, choice: &str) -> bool {
        self.outcomes
            .get(location_id)
            .is_some_and(|choices| choices.contains_key(&normalize(choice)))
    }

    /// Number of authored entries.
    pub fn len(&self) -> usize {
        self.outcomes.values().map(HashMap::len).sum()
    }

    /// Returns true if the table has no authored entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
