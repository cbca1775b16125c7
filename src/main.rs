//! Simon Says - Entry Point
//!
//! Interactive terminal version of the game. Pads are pressed by typing
//! their colour name or first letter; the computer's playback is printed
//! as it happens.

use simon_says::core::error::Result;
use simon_says::driver::{run_session, Command};
use simon_says::frontend::{AlertSink, InputGate, SignalSink, StatusDisplay};
use simon_says::sequence::SequenceGenerator;
use simon_says::{GameConfig, Signal, SimonGame};

use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

/// Simon Says in the terminal
#[derive(Parser, Debug)]
#[command(name = "simon-says")]
#[command(about = "Repeat the computer's growing sequence of colours")]
struct Args {
    /// Level 1-4 (8, 14, 20, or 31 rounds); the game starts immediately when given
    #[arg(long, short = 'l')]
    level: Option<u32>,

    /// Random seed for a reproducible sequence
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the default timings
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Prints pad activity and status text to stdout
struct TerminalFrontend;

impl SignalSink for TerminalFrontend {
    fn activate_signal(&mut self, signal: Signal) {
        println!("  *** {} ***", signal.name().to_uppercase());
    }
}

impl StatusDisplay for TerminalFrontend {
    fn set_status(&mut self, text: &str) {
        println!("{}", text);
    }

    fn set_heading(&mut self, text: &str) {
        println!();
        println!("=== {} ===", text);
    }
}

impl AlertSink for TerminalFrontend {
    fn notify(&mut self, message: &str) {
        println!();
        println!("!!! {} !!!", message);
        println!("Type 'start [level]' to play again or 'quit' to exit.");
    }
}

impl InputGate for TerminalFrontend {
    fn set_input_enabled(&mut self, enabled: bool) {
        if enabled {
            println!("Your turn: type r, g, b, or y (one per line)");
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("simon_says=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let generator = match args.seed {
        Some(seed) => SequenceGenerator::with_seed(seed),
        None => SequenceGenerator::from_entropy(),
    };
    let mut game = SimonGame::new(config, TerminalFrontend, generator)?;

    println!("\n=== SIMON SAYS ===");
    println!("Commands:");
    println!("  start [1-4]     - Start a game (level sets the number of rounds)");
    println!("  r / g / b / y   - Press the red, green, blue, or yellow pad");
    println!("  reset           - Abandon the current game");
    println!("  quit / q        - Exit");

    let rt = Runtime::new()?;
    let stats = rt.block_on(async {
        let (tx, rx) = mpsc::channel(32);

        if args.level.is_some() {
            let _ = tx.send(Command::Start(args.level)).await;
        }

        // Stdin is blocking; read it on its own thread and forward commands
        let reader_tx = tx.clone();
        tokio::task::spawn_blocking(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => {
                        let quit = command == Command::Quit;
                        if reader_tx.blocking_send(command).is_err() || quit {
                            break;
                        }
                    }
                    Err(e) => println!("{}", e),
                }
            }
        });
        drop(tx);

        run_session(&mut game, rx).await
    });

    println!(
        "\nGoodbye! {} games played, {} won, {} lost, best round {}.",
        stats.games_played, stats.wins, stats.losses, stats.best_round
    );
    // The stdin reader may still be blocked on a read
    rt.shutdown_background();
    Ok(())
}
