//! Tunable game configuration.
//!
//! Every field defaults to the matching value in [`crate::constants`], so an
//! empty JSON object is a valid config. Partial files override only the keys
//! they name.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{background, canvas, enemy, items, player, transition};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub player_size: f32,
    pub player_speed: f32,
    pub player_hp_max: f32,
    pub player_contact_damage: f32,
    pub knockback: f32,
    pub pursuit_radius: f32,
    pub medkit_heal: f32,
    pub fade_step: f32,
    pub swap_delay_ticks: u32,
    pub background_drift: f32,
    pub skyline_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: canvas::WIDTH,
            canvas_height: canvas::HEIGHT,
            player_size: player::SIZE,
            player_speed: player::SPEED,
            player_hp_max: player::HP_MAX,
            player_contact_damage: player::CONTACT_DAMAGE,
            knockback: player::KNOCKBACK,
            pursuit_radius: enemy::PURSUIT_RADIUS,
            medkit_heal: items::MEDKIT_HEAL,
            fade_step: transition::FADE_STEP,
            swap_delay_ticks: transition::SWAP_DELAY_TICKS,
            background_drift: background::DRIFT,
            skyline_seed: background::SKYLINE_SEED,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be positive, got {}×{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.player_size <= 0.0
            || self.player_size > self.canvas_width
            || self.player_size > self.canvas_height
        {
            return Err(ConfigError::Invalid(format!(
                "player_size {} does not fit a {}×{} canvas",
                self.player_size, self.canvas_width, self.canvas_height
            )));
        }
        if self.player_hp_max <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "player_hp_max must be positive, got {}",
                self.player_hp_max
            )));
        }
        if self.fade_step <= 0.0 || self.fade_step > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "fade_step must be in (0, 1], got {}",
                self.fade_step
            )));
        }
        let non_negative = [
            ("player_speed", self.player_speed),
            ("player_contact_damage", self.player_contact_damage),
            ("knockback", self.knockback),
            ("pursuit_radius", self.pursuit_radius),
            ("medkit_heal", self.medkit_heal),
        ];
        for (name, value) in non_negative {
            if value < 0.0 || !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Errors that can occur while loading a config
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = GameConfig::from_json_str("{}").expect("empty config parses");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = GameConfig::from_json_str(r#"{ "player_speed": 6.0, "swap_delay_ticks": 5 }"#)
            .expect("partial config parses");
        assert_eq!(config.player_speed, 6.0);
        assert_eq!(config.swap_delay_ticks, 5);
        assert_eq!(config.canvas_width, canvas::WIDTH);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_oversized_player() {
        let err = GameConfig::from_json_str(r#"{ "player_size": 500.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_bad_fade_step() {
        let err = GameConfig::from_json_str(r#"{ "fade_step": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }
}
