//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::SimonError;

/// Virtual time in milliseconds since the game clock was created
pub type Millis = u64;

/// One of the four pads the computer plays and the player repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Signal {
    /// Every signal, in pad order
    pub const ALL: [Signal; 4] = [Signal::Red, Signal::Green, Signal::Blue, Signal::Yellow];

    pub fn name(&self) -> &'static str {
        match self {
            Signal::Red => "red",
            Signal::Green => "green",
            Signal::Blue => "blue",
            Signal::Yellow => "yellow",
        }
    }

    /// Single-letter key used by the terminal frontend
    pub fn key(&self) -> char {
        match self {
            Signal::Red => 'r',
            Signal::Green => 'g',
            Signal::Blue => 'b',
            Signal::Yellow => 'y',
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Signal {
    type Err = SimonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Signal::ALL
            .into_iter()
            .find(|signal| {
                lowered == signal.name() || (lowered.len() == 1 && lowered.starts_with(signal.key()))
            })
            .ok_or_else(|| SimonError::UnknownSignal(s.to_string()))
    }
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Won,
    Lost,
}

impl GameOutcome {
    /// Message surfaced through the alert sink when the game ends
    pub fn message(&self) -> &'static str {
        match self {
            GameOutcome::Won => "Good Job. You are done",
            GameOutcome::Lost => "Better luck next time",
        }
    }
}

/// Which part of the round cycle is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Idle,
    ComputerTurn,
    PlayerTurn,
    RoundComplete,
    GameOver(GameOutcome),
}

impl GamePhase {
    /// True while a session is running (between `start` and game over)
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            GamePhase::ComputerTurn | GamePhase::PlayerTurn | GamePhase::RoundComplete
        )
    }
}
