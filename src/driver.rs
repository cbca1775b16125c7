//! Real-time async driver
//!
//! Maps the game's virtual clock onto `tokio::time` and feeds it commands
//! from the input source and start control. Everything runs on one task:
//! each wake-up either fires due timers or applies one command, so inputs
//! are handled strictly in arrival order.

use std::str::FromStr;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use crate::core::error::{Result, SimonError};
use crate::core::types::{Millis, Signal};
use crate::frontend::Frontend;
use crate::game::{PressOutcome, SessionStats, SimonGame};
use crate::sequence::SignalSource;

/// How long to sleep when nothing is scheduled
const IDLE_WAKE: Duration = Duration::from_secs(3600);

/// Input from the start control and the pads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start(Option<u32>),
    Press(Signal),
    Reset,
    Quit,
}

impl FromStr for Command {
    type Err = SimonError;

    /// Accepts `start [level]`, `reset`, `quit`, or a pad name/key
    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(SimonError::UnknownSignal(String::new()));
        };

        match head.to_ascii_lowercase().as_str() {
            "start" | "s" => {
                let level = match words.next() {
                    Some(word) => Some(
                        word.parse::<u32>()
                            .map_err(|_| SimonError::InvalidConfig(format!("bad level '{}'", word)))?,
                    ),
                    None => None,
                };
                Ok(Command::Start(level))
            }
            "reset" => Ok(Command::Reset),
            "quit" | "q" => Ok(Command::Quit),
            _ => head.parse::<Signal>().map(Command::Press),
        }
    }
}

fn elapsed_ms(origin: Instant) -> Millis {
    Instant::now().duration_since(origin).as_millis() as Millis
}

/// Apply one command to the game
///
/// Returns false when the session should stop.
pub fn apply_command<F: Frontend, S: SignalSource>(game: &mut SimonGame<F, S>, command: Command) -> bool {
    match command {
        Command::Start(level) => {
            if let Err(e) = game.start(level) {
                tracing::warn!("Could not start game: {}", e);
                game.frontend_mut().set_status(&e.to_string());
            }
        }
        Command::Press(signal) => {
            let outcome = game.press_pad(signal);
            if outcome == PressOutcome::Ignored {
                tracing::debug!("Press of {} ignored", signal);
            }
        }
        Command::Reset => game.reset(),
        Command::Quit => return false,
    }
    true
}

/// Drive `game` in real time until `Quit` or the command channel closes
pub async fn run_session<F: Frontend, S: SignalSource>(
    game: &mut SimonGame<F, S>,
    mut commands: mpsc::Receiver<Command>,
) -> SessionStats {
    let origin = Instant::now() - Duration::from_millis(game.now());

    loop {
        let wake = match game.next_deadline() {
            Some(deadline) => origin + Duration::from_millis(deadline),
            None => Instant::now() + IDLE_WAKE,
        };

        tokio::select! {
            command = commands.recv() => {
                // Catch up on anything that fell due before this input
                game.advance_to(elapsed_ms(origin));
                match command {
                    Some(command) => {
                        if !apply_command(game, command) {
                            break;
                        }
                    }
                    None => break,
                }
            }
            _ = sleep_until(wake) => {
                game.advance_to(elapsed_ms(origin));
            }
        }
    }

    tracing::info!("Session over: {:?}", game.stats());
    game.stats()
}
