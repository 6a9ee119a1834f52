//! Location names and the choices each location offers.

use std::collections::HashMap;

/// Display name for locations missing from the catalog.
pub const UNKNOWN_LOCATION_NAME: &str = "An Unknown Place";

/// Choices offered where no authored choices exist.
pub const GENERIC_CHOICES: [&str; 2] = ["Continue forward", "Turn back"];

#[derive(Debug, Clone)]
struct LocationEntry {
    name: String,
    choices: Vec<String>,
}

/// Location-keyed lookup of display names and offered choices.
#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    locations: HashMap<String, LocationEntry>,
}

impl LocationCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a location. An empty choice list means the generic choices.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>, choices: Vec<String>) {
        self.locations.insert(
            id.into(),
            LocationEntry {
                name: name.into(),
                choices,
            },
        );
    }

    /// Check if a location is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.locations.contains_key(id)
    }

    /// Number of registered locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns true if no locations are registered.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// The display name of a location.
    pub fn display_name(&self, id: &str) -> &str {
        self.locations
            .get(id)
            .map(|entry| entry.name.as_str())
            .unwrap_or(UNKNOWN_LOCATION_NAME)
    }

    /// The choices offered at a location. Never empty.
    pub fn choices_for(&self, id: &str) -> Vec<String> {
        match self.locations.get(id) {
            Some(entry) if !entry.choices.is_empty() => entry.choices.clone(),
            _ => GENERIC_CHOICES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> LocationCatalog {
        let mut catalog = LocationCatalog::new();
        catalog.insert(
            "start_forest",
            "Mysterious Whispering Forest",
            vec!["Go deeper into the forest".to_string()],
        );
        catalog.insert("unknown_path", "An Uncharted Path", Vec::new());
        catalog
    }

    #[test]
    fn known_location() {
        let catalog = catalog();
        assert!(catalog.contains("start_forest"));
        assert_eq!(catalog.display_name("start_forest"), "Mysterious Whispering Forest");
        assert_eq!(catalog.choices_for("start_forest"), vec!["Go deeper into the forest"]);
    }

    #[test]
    fn named_location_without_choices_uses_generic() {
        let catalog = catalog();
        assert_eq!(catalog.display_name("unknown_path"), "An Uncharted Path");
        assert_eq!(catalog.choices_for("unknown_path"), vec!["Continue forward", "Turn back"]);
    }

    #[test]
    fn unknown_location() {
        let catalog = catalog();
        assert!(!catalog.contains("lighthouse"));
        assert_eq!(catalog.display_name("lighthouse"), UNKNOWN_LOCATION_NAME);
        assert_eq!(catalog.choices_for("lighthouse").len(), 2);
        assert_eq!(catalog.len(), 2);
    }
}
