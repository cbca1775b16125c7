//! Simon Says - turn sequencing and validation core
//!
//! The computer plays an ever-growing sequence of signals, the player
//! repeats it, and the game tracks correctness and progression across
//! rounds. Rendering, audio and input wiring are external; see [`frontend`].

pub mod core;
pub mod driver;
pub mod frontend;
pub mod game;
pub mod playback;
pub mod rounds;
pub mod sequence;
pub mod timers;

pub use crate::core::{GameConfig, GameOutcome, GamePhase, Result, Signal, SimonError};
pub use game::{PressOutcome, SessionStats, SimonGame};
