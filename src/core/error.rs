use thiserror::Error;

use crate::core::types::Signal;

#[derive(Error, Debug)]
pub enum SimonError {
    #[error("Invalid level: {0} (expected 1, 2, 3, or 4)")]
    InvalidLevel(u32),

    #[error("Sequence mismatch at position {index}: expected {expected}, got {actual}")]
    SequencePositionMismatch {
        index: usize,
        expected: Signal,
        actual: Signal,
    },

    #[error("Cannot pick a signal from an empty signal set")]
    EmptySignalSet,

    #[error("A game is already in progress")]
    GameInProgress,

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown signal: {0}")]
    UnknownSignal(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimonError>;
