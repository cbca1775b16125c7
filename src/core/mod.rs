pub mod config;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use error::{Result, SimonError};
pub use types::{GameOutcome, GamePhase, Millis, Signal};
