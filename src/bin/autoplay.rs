//! Headless Autoplay Runner
//!
//! Plays one seeded game with a scripted player and prints the result,
//! optionally fumbling a chosen round. Useful for checking pacing and
//! round limits without a terminal.

use clap::Parser;
use serde::Serialize;
use simon_says::frontend::RecordingFrontend;
use simon_says::sequence::SequenceGenerator;
use simon_says::{GameConfig, GameOutcome, GamePhase, PressOutcome, Signal, SimonGame};
use std::path::PathBuf;
use std::process::ExitCode;

/// Headless Simon Says runner
#[derive(Parser, Debug)]
#[command(name = "autoplay")]
#[command(about = "Play a seeded Simon Says game automatically and report the outcome")]
struct Args {
    /// Level 1-4
    #[arg(long)]
    level: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Press a wrong final signal in this round
    #[arg(long)]
    mistake_round: Option<u32>,

    /// TOML timing config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct AutoplayResult {
    outcome: GameOutcome,
    rounds_reached: u32,
    max_rounds: u32,
    /// Virtual time from start to game over
    elapsed_ms: u64,
    signals_played: usize,
    final_sequence: Vec<Signal>,
    seed: u64,
}

fn wrong_signal(expected: Signal) -> Signal {
    match expected {
        Signal::Red => Signal::Green,
        Signal::Green => Signal::Blue,
        Signal::Blue => Signal::Yellow,
        Signal::Yellow => Signal::Red,
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter("simon_says=warn")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::random());

    let config = match &args.config {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {:?}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    let mut game = match SimonGame::new(config, RecordingFrontend::new(), SequenceGenerator::with_seed(seed)) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Invalid config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = game.start(args.level) {
        eprintln!("Could not start: {}", e);
        return ExitCode::FAILURE;
    }
    let max_rounds = game.max_rounds().unwrap_or_default();

    let mut rounds_reached = 0;
    let mut final_sequence = Vec::new();

    while game.run_until_player_turn() {
        rounds_reached = game.round();
        final_sequence = game.computer_sequence().to_vec();
        let fumble = args.mistake_round == Some(game.round());
        let last = final_sequence.len() - 1;

        for (index, &expected) in final_sequence.iter().enumerate() {
            let signal = if fumble && index == last {
                wrong_signal(expected)
            } else {
                expected
            };
            match game.press_pad(signal) {
                PressOutcome::Correct { .. } | PressOutcome::RoundComplete { .. } => {}
                PressOutcome::Won | PressOutcome::Lost { .. } | PressOutcome::Ignored => break,
            }
        }
    }

    let outcome = match game.phase() {
        GamePhase::GameOver(outcome) => outcome,
        phase => {
            eprintln!("Game stalled in {:?}", phase);
            return ExitCode::FAILURE;
        }
    };

    let result = AutoplayResult {
        outcome,
        rounds_reached,
        max_rounds,
        elapsed_ms: game.now(),
        signals_played: game.frontend().activations().len(),
        final_sequence,
        seed,
    };

    if args.format == "text" {
        println!("=== Autoplay Result ===");
        println!("Outcome: {:?}", result.outcome);
        println!("Rounds: {} / {}", result.rounds_reached, result.max_rounds);
        println!("Elapsed: {}ms (virtual)", result.elapsed_ms);
        println!("Signals played: {}", result.signals_played);
        println!("Seed: {}", result.seed);
    } else {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize result: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
