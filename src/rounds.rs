//! Difficulty level to round-count mapping

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimonError};

/// Round count used when no level is chosen
pub const DEFAULT_MAX_ROUNDS: u32 = 8;

/// A validated difficulty level (1 to 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Level(u32);

impl Level {
    pub const EASY: Level = Level(1);
    pub const HARDEST: Level = Level(4);

    pub fn new(level: u32) -> Result<Self> {
        if (1..=4).contains(&level) {
            Ok(Self(level))
        } else {
            Err(SimonError::InvalidLevel(level))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Number of rounds the player must clear to win at this level
    pub fn max_rounds(&self) -> u32 {
        match self.0 {
            1 => 8,
            2 => 14,
            3 => 20,
            _ => 31,
        }
    }
}

/// Maps an optional level to the session's max round count
///
/// `None` and `Some(0)` mean "no level chosen" and fall back to
/// [`DEFAULT_MAX_ROUNDS`]. Any other value outside 1..=4 is rejected.
pub fn max_rounds_for_level(level: Option<u32>) -> Result<u32> {
    match level {
        None | Some(0) => Ok(DEFAULT_MAX_ROUNDS),
        Some(level) => Level::new(level).map(|level| level.max_rounds()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_levels() {
        assert_eq!(max_rounds_for_level(Some(1)).unwrap(), 8);
        assert_eq!(max_rounds_for_level(Some(2)).unwrap(), 14);
        assert_eq!(max_rounds_for_level(Some(3)).unwrap(), 20);
        assert_eq!(max_rounds_for_level(Some(4)).unwrap(), 31);
    }

    #[test]
    fn test_missing_level_defaults() {
        assert_eq!(max_rounds_for_level(None).unwrap(), DEFAULT_MAX_ROUNDS);
        assert_eq!(max_rounds_for_level(Some(0)).unwrap(), DEFAULT_MAX_ROUNDS);
    }

    #[test]
    fn test_out_of_range_level_is_error() {
        for level in [5, 9, 100, u32::MAX] {
            assert!(matches!(
                max_rounds_for_level(Some(level)),
                Err(SimonError::InvalidLevel(l)) if l == level
            ));
        }
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::EASY < Level::HARDEST);
        assert!(Level::EASY.max_rounds() < Level::HARDEST.max_rounds());
    }
}
