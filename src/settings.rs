// Per-game settings: string parameters, a seed and the per-turn random source
//
// Parameters arrive as strings from whoever starts the game and are read
// through typed accessors that fall back to a default. Settings can also be
// loaded from a TOML file (Rules.toml by default).

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::RulesError;
use crate::rng::{FixedRand, GameRand};

/// Percent chance (0-100) of spawning one food after each turn
pub const PARAM_FOOD_SPAWN_CHANCE: &str = "foodSpawnChance";

/// Immutable per-game configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    params: HashMap<String, String>,
    seed: i64,
    #[serde(skip)]
    rand: Option<FixedRand>,
}

/// On-disk layout of a settings file
#[derive(Debug, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    seed: i64,
    #[serde(default)]
    params: HashMap<String, toml::Value>,
}

impl Settings {
    pub fn new(params: HashMap<String, String>) -> Self {
        Settings {
            params,
            ..Settings::default()
        }
    }

    /// Builds settings from alternating key/value strings. A trailing key
    /// without a value is ignored.
    pub fn with_param_pairs(pairs: &[&str]) -> Self {
        let params = pairs
            .chunks_exact(2)
            .map(|kv| (kv[0].to_string(), kv[1].to_string()))
            .collect();
        Settings::new(params)
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the seeded per-turn stream with a fixed source
    pub fn with_rand(mut self, rand: FixedRand) -> Self {
        self.rand = Some(rand);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Integer parameter, or `default` when missing or not an integer
    pub fn int(&self, key: &str, default: i32) -> i32 {
        self.params
            .get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Boolean parameter, or `default` when missing or not "true"/"false"
    pub fn bool(&self, key: &str, default: bool) -> bool {
        self.params
            .get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    /// Random source for a turn. The same seed and turn always give the same stream.
    pub fn get_rand(&self, turn: i32) -> GameRand {
        match self.rand {
            Some(fixed) => GameRand::Fixed(fixed),
            None => GameRand::for_turn(self.seed, turn),
        }
    }

    /// Loads settings from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the settings file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RulesError> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| RulesError::Config(format!("Failed to read settings file: {}", e)))?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, RulesError> {
        let file: SettingsFile = toml::from_str(contents)
            .map_err(|e| RulesError::Config(format!("Failed to parse settings file: {}", e)))?;

        let mut params = HashMap::with_capacity(file.params.len());
        for (key, value) in file.params {
            let value = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    return Err(RulesError::Config(format!(
                        "parameter '{}' must be a scalar, got {}",
                        key,
                        other.type_str()
                    )))
                }
            };
            params.insert(key, value);
        }

        Ok(Settings::new(params).with_seed(file.seed))
    }

    /// Loads Rules.toml from the working directory
    pub fn load_default() -> Result<Self, RulesError> {
        Self::from_file("Rules.toml")
    }

    /// Attempts to load Rules.toml, falls back to empty settings on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!("Could not load Rules.toml ({}), using default settings", e);
            Settings::default()
        })
    }
}
