//! Game tuning and rule-set variants
//!
//! Every constant the simulation reads lives in [`GameConfig`]. Missing JSON keys
//! fall back to the defaults below, so a config file can override just the
//! values you care about.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DELTA_MS;

/// What an enemy collision costs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EnergyModel {
    /// Energy drains with speed, coins refill it, enemies take a chunk
    #[default]
    Depleting,
    /// No energy bar; the first enemy hit ends the run
    InstantDeath,
}

/// How frame time turns into simulation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TimestepMode {
    /// One tick per frame, scaled by the (clamped) wall-clock delta
    #[default]
    WallClock,
    /// Constant-size ticks drained from an accumulator
    Fixed,
}

/// Rule switches that distinguish the game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub energy_model: EnergyModel,
    pub coins_enabled: bool,
    /// Speed and level escalate with distance
    pub speed_ramp: bool,
    pub timestep: TimestepMode,
}

impl Default for Rules {
    fn default() -> Self {
        RulesPreset::Full.rules()
    }
}

impl Rules {
    pub fn tracks_energy(&self) -> bool {
        self.energy_model == EnergyModel::Depleting
    }
}

/// Named rule-set presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RulesPreset {
    #[default]
    Full,
    Streamlined,
    Minimal,
}

impl RulesPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            RulesPreset::Full => "Full",
            RulesPreset::Streamlined => "Streamlined",
            RulesPreset::Minimal => "Minimal",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "full" => Some(RulesPreset::Full),
            "streamlined" | "lite" => Some(RulesPreset::Streamlined),
            "minimal" | "min" => Some(RulesPreset::Minimal),
            _ => None,
        }
    }

    pub fn rules(&self) -> Rules {
        match self {
            RulesPreset::Full => Rules {
                energy_model: EnergyModel::Depleting,
                coins_enabled: true,
                speed_ramp: true,
                timestep: TimestepMode::WallClock,
            },
            RulesPreset::Streamlined => Rules {
                energy_model: EnergyModel::InstantDeath,
                coins_enabled: true,
                speed_ramp: false,
                timestep: TimestepMode::WallClock,
            },
            RulesPreset::Minimal => Rules {
                energy_model: EnergyModel::InstantDeath,
                coins_enabled: false,
                speed_ramp: false,
                timestep: TimestepMode::Fixed,
            },
        }
    }
}

/// Errors raised while loading or validating a config
#[derive(Debug)]
pub enum ConfigError {
    /// The config file could not be read
    Io(std::io::Error),
    /// The JSON did not match the config shape
    Parse(serde_json::Error),
    /// A value is outside the range the simulation can work with
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config: {e}"),
            ConfigError::Parse(e) => write!(f, "malformed config: {e}"),
            ConfigError::Invalid { field, reason } => write!(f, "invalid `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
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

/// Tunable constants, fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rules: Rules,

    // === Speed ===
    pub init_speed: f32,
    pub increment_speed_by_time: f32,
    pub increment_speed_by_level: f32,
    pub distance_for_speed_update: u64,
    /// How quickly base speed catches up with its target
    pub base_speed_easing: f32,

    // === Distance / energy / level ===
    pub ratio_speed_distance: f32,
    pub ratio_speed_energy: f32,
    pub distance_for_level_update: u64,

    // === Plane ===
    pub plane_default_height: f32,
    pub plane_amp_height: f32,
    pub plane_amp_width: f32,
    pub plane_move_sensitivity: f32,
    pub plane_rot_x_sensitivity: f32,
    pub plane_rot_z_sensitivity: f32,
    pub plane_min_speed: f32,
    pub plane_max_speed: f32,
    pub collision_impulse: f32,
    pub collision_speed_damping: f32,
    pub collision_displacement_damping: f32,

    // === Game over fall ===
    pub plane_fall_speed: f32,
    pub fall_acceleration: f32,
    pub game_over_speed_decay: f32,
    pub game_over_roll_easing: f32,
    pub game_over_pitch_rate: f32,
    /// Altitude below which the replay prompt shows
    pub game_over_floor: f32,

    // === Sea ===
    pub sea_radius: f32,
    pub sea_length: f32,
    pub waves_min_amp: f32,
    pub waves_max_amp: f32,
    pub waves_min_speed: f32,
    pub waves_max_speed: f32,

    // === Sky ===
    pub cloud_count: usize,

    // === Coins ===
    pub coin_distance_tolerance: f32,
    pub coin_value: f32,
    pub coins_speed: f32,
    pub distance_for_coins_spawn: u64,
    pub initial_coin_pool: usize,

    // === Enemies ===
    pub enemy_distance_tolerance: f32,
    pub enemy_value: f32,
    pub enemies_speed: f32,
    pub distance_for_enemies_spawn: u64,
    pub initial_enemy_pool: usize,

    // === Frame driver ===
    pub max_frame_delta_ms: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rules: Rules::default(),

            init_speed: 0.000_35,
            increment_speed_by_time: 0.000_002_5,
            increment_speed_by_level: 0.000_005,
            distance_for_speed_update: 100,
            base_speed_easing: 0.02,

            ratio_speed_distance: 50.0,
            ratio_speed_energy: 3.0,
            distance_for_level_update: 1000,

            plane_default_height: 100.0,
            plane_amp_height: 80.0,
            plane_amp_width: 75.0,
            plane_move_sensitivity: 0.005,
            plane_rot_x_sensitivity: 0.000_8,
            plane_rot_z_sensitivity: 0.000_4,
            plane_min_speed: 1.2,
            plane_max_speed: 1.6,
            collision_impulse: 100.0,
            collision_speed_damping: 0.03,
            collision_displacement_damping: 0.01,

            plane_fall_speed: 0.001,
            fall_acceleration: 1.05,
            game_over_speed_decay: 0.99,
            game_over_roll_easing: 0.000_2,
            game_over_pitch_rate: 0.000_3,
            game_over_floor: -10.0,

            sea_radius: 600.0,
            sea_length: 800.0,
            waves_min_amp: 5.0,
            waves_max_amp: 20.0,
            waves_min_speed: 0.001,
            waves_max_speed: 0.003,

            cloud_count: 20,

            coin_distance_tolerance: 15.0,
            coin_value: 3.0,
            coins_speed: 0.5,
            distance_for_coins_spawn: 10,
            initial_coin_pool: 20,

            enemy_distance_tolerance: 10.0,
            enemy_value: 10.0,
            enemies_speed: 0.6,
            distance_for_enemies_spawn: 10,
            initial_enemy_pool: 10,

            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
        }
    }
}

impl GameConfig {
    /// Default tuning with a preset rule set
    pub fn from_preset(preset: RulesPreset) -> Self {
        Self {
            rules: preset.rules(),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values that would stall or destabilise the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        for (field, every) in [
            ("distance_for_speed_update", self.distance_for_speed_update),
            ("distance_for_level_update", self.distance_for_level_update),
            ("distance_for_coins_spawn", self.distance_for_coins_spawn),
            ("distance_for_enemies_spawn", self.distance_for_enemies_spawn),
        ] {
            if every == 0 {
                return invalid(field, "must be at least 1");
            }
        }

        if !(self.sea_radius.is_finite() && self.sea_radius > 0.0) {
            return invalid("sea_radius", "must be positive");
        }
        if self.waves_min_amp > self.waves_max_amp {
            return invalid("waves_min_amp", "must not exceed waves_max_amp");
        }
        if self.waves_min_speed > self.waves_max_speed {
            return invalid("waves_min_speed", "must not exceed waves_max_speed");
        }
        if self.plane_min_speed > self.plane_max_speed {
            return invalid("plane_min_speed", "must not exceed plane_max_speed");
        }
        if self.coin_distance_tolerance < 0.0 || self.enemy_distance_tolerance < 0.0 {
            return invalid("distance_tolerance", "must not be negative");
        }
        if !(self.max_frame_delta_ms > 0.0) {
            return invalid("max_frame_delta_ms", "must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_full_rules() {
        let config = GameConfig::default();
        assert_eq!(config.rules, RulesPreset::Full.rules());
        assert!(config.rules.tracks_energy());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(RulesPreset::from_str("MINIMAL"), Some(RulesPreset::Minimal));
        assert_eq!(RulesPreset::from_str("lite"), Some(RulesPreset::Streamlined));
        assert_eq!(RulesPreset::from_str("arcade"), None);
        assert_eq!(RulesPreset::Streamlined.as_str(), "Streamlined");
    }

    #[test]
    fn test_partial_json_override() {
        let json = r#"{ "coin_value": 7.5, "rules": { "energy_model": "instant-death" } }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.coin_value, 7.5);
        assert_eq!(config.rules.energy_model, EnergyModel::InstantDeath);
        // Untouched fields keep their defaults
        assert!(config.rules.coins_enabled);
        assert_eq!(config.sea_radius, 600.0);

        let back = GameConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_rejects_zero_cadence() {
        let json = r#"{ "distance_for_enemies_spawn": 0 }"#;
        match GameConfig::from_json(json) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "distance_for_enemies_spawn"),
            other => panic!("expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("malformed config"));
    }

    #[test]
    fn test_rejects_inverted_wave_ranges() {
        let config = GameConfig {
            waves_min_amp: 30.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
