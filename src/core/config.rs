//! Game timing configuration with documented constants
//!
//! All timing values are in milliseconds of game-clock time. Defaults
//! reproduce the pacing of the classic browser version of the game.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, SimonError};
use crate::core::types::Millis;

/// Configuration for playback and round pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Spacing between consecutive signal activations during playback
    ///
    /// Signal `i` (0-indexed) activates `(i + 1) * playback_interval_ms`
    /// after playback starts.
    pub playback_interval_ms: Millis,

    /// How long one signal stays lit/audible
    ///
    /// Must be shorter than `playback_interval_ms` so that two signals
    /// never overlap. At the defaults this leaves a 100ms dark gap.
    pub activation_ms: Millis,

    /// Extra wait after the final playback slot before the player turn opens
    ///
    /// The player turn begins `round * playback_interval_ms + playback_done_buffer_ms`
    /// after the computer turn starts.
    pub playback_done_buffer_ms: Millis,

    /// Pause between a completed round and the next computer turn
    pub next_round_delay_ms: Millis,

    /// Level used when the start control does not provide one
    pub default_level: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playback_interval_ms: 600,
            activation_ms: 500,
            playback_done_buffer_ms: 1000,
            next_round_delay_ms: 1000,
            default_level: None,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a TOML config
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.playback_interval_ms == 0 || self.activation_ms == 0 {
            return Err(SimonError::InvalidConfig(
                "playback_interval_ms and activation_ms must be positive".into(),
            ));
        }

        // Activations must not overlap
        if self.activation_ms >= self.playback_interval_ms {
            return Err(SimonError::InvalidConfig(format!(
                "activation_ms ({}) must be < playback_interval_ms ({})",
                self.activation_ms, self.playback_interval_ms
            )));
        }

        // The player turn may only open once the last activation has finished
        if self.playback_done_buffer_ms <= self.activation_ms {
            return Err(SimonError::InvalidConfig(format!(
                "playback_done_buffer_ms ({}) must be > activation_ms ({})",
                self.playback_done_buffer_ms, self.activation_ms
            )));
        }

        if let Some(level) = self.default_level {
            if !(1..=4).contains(&level) {
                return Err(SimonError::InvalidLevel(level));
            }
        }

        Ok(())
    }
}
