//! Game configuration.
//!
//! Loads the night turn order and the Sorcerer's starting potions from a
//! JSON file. Every field is optional and falls back to the standard game.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::game::{Potions, RoleName, TurnOrder, DEFAULT_TURN_ORDER};

/// Errors raised while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("turn order must be non-empty and list each role once")]
    InvalidTurnOrder,
}

/// Settings fixed for the whole game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameConfig {
    pub turn_order: TurnOrder,
    pub potions: Potions,
}

/// The configuration as it appears on disk.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default = "default_turn_order")]
    turn_order: Vec<RoleName>,
    #[serde(default)]
    potions: Potions,
}

fn default_turn_order() -> Vec<RoleName> {
    DEFAULT_TURN_ORDER.to_vec()
}

impl GameConfig {
    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<GameConfig, ConfigError> {
        let file: ConfigFile = serde_json::from_str(json)?;
        let turn_order = TurnOrder::new(file.turn_order).ok_or(ConfigError::InvalidTurnOrder)?;
        Ok(GameConfig {
            turn_order,
            potions: file.potions.clamped(),
        })
    }

    /// Reads and parses a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
        let data = fs::read_to_string(path)?;
        GameConfig::from_json(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = GameConfig::from_json("{}").unwrap();
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.turn_order.roles(), &DEFAULT_TURN_ORDER);
    }

    #[test]
    fn custom_order_and_potions() {
        let cfg = GameConfig::from_json(
            r#"{"turn_order": ["Wolf", "fortune teller"], "potions": {"revive": 0, "kill": 1}}"#,
        )
        .unwrap();
        assert_eq!(
            cfg.turn_order.roles(),
            &[RoleName::Wolf, RoleName::FortuneTeller]
        );
        assert_eq!(cfg.potions, Potions { revive: 0, kill: 1 });
    }

    #[test]
    fn potions_are_clamped() {
        let cfg = GameConfig::from_json(r#"{"potions": {"revive": 5, "kill": 2}}"#).unwrap();
        assert_eq!(cfg.potions, Potions { revive: 1, kill: 1 });
    }

    #[test]
    fn rejects_bad_turn_orders() {
        assert!(matches!(
            GameConfig::from_json(r#"{"turn_order": []}"#),
            Err(ConfigError::InvalidTurnOrder)
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"turn_order": ["Wolf", "wolf"]}"#),
            Err(ConfigError::InvalidTurnOrder)
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"turn_order": ["Seer"]}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            GameConfig::load("/nonexistent/nightwatch.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
