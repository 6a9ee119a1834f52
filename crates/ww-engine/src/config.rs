//! Configuration for the turn engine.

/// Default player health at session start.
pub const DEFAULT_START_HEALTH: i32 = 100;

/// Default health cost charged for every processed choice.
pub const DEFAULT_TURN_COST: i32 = 10;

/// Tunable numbers for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Health a fresh player starts with.
    pub start_health: i32,
    /// Health drained by every turn that reaches the transition table.
    pub turn_cost: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            start_health: DEFAULT_START_HEALTH,
            turn_cost: DEFAULT_TURN_COST,
        }
    }
}

impl EngineConfig {
    /// Set the starting health (at least 1, so a fresh game is playable).
    pub fn with_start_health(mut self, health: i32) -> Self {
        self.start_health = health.max(1);
        self
    }

    /// Set the per-turn health cost (never negative).
    pub fn with_turn_cost(mut self, cost: i32) -> Self {
        self.turn_cost = cost.max(0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.start_health, 100);
        assert_eq!(cfg.turn_cost, 10);
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default()
            .with_start_health(40)
            .with_turn_cost(3);
        assert_eq!(cfg.start_health, 40);
        assert_eq!(cfg.turn_cost, 3);
    }

    #[test]
    fn values_clamped() {
        let cfg = EngineConfig::default()
            .with_start_health(0)
            .with_turn_cost(-5);
        assert_eq!(cfg.start_health, 1);
        assert_eq!(cfg.turn_cost, 0);
    }
}
