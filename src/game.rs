//! Round and turn state machine
//!
//! `SimonGame` owns the whole session: both sequences, the round counters,
//! the timer queue and the random source. Frontends only receive output
//! through the [`Frontend`] traits and feed input back through
//! [`SimonGame::start`] and [`SimonGame::press_pad`].
//!
//! Time is virtual. Nothing happens until the owner calls
//! [`SimonGame::advance`] (or `advance_to`), which fires due timers in
//! deadline order. The async driver maps this onto wall-clock time.

use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::error::{Result, SimonError};
use crate::core::types::{GameOutcome, GamePhase, Millis, Signal};
use crate::frontend::Frontend;
use crate::playback::{PlaybackEvent, PlaybackScheduler};
use crate::rounds::max_rounds_for_level;
use crate::sequence::{SequenceGenerator, SignalSource};
use crate::timers::TimerQueue;

pub const TITLE: &str = "Simon Says";

/// Deferred work the game schedules on its own timer queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Playback(PlaybackEvent),
    /// The pause after a completed round is over
    NextRound,
}

impl From<PlaybackEvent> for GameEvent {
    fn from(event: PlaybackEvent) -> Self {
        GameEvent::Playback(event)
    }
}

/// Result of feeding one player signal into the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressOutcome {
    /// Not the player's turn; nothing changed
    Ignored,
    /// Matched, more presses needed this round
    Correct { remaining: usize },
    /// Matched the whole sequence; the next computer turn is queued
    RoundComplete { next_round: u32 },
    /// Matched the final round
    Won,
    /// Did not match the signal at `index`; the session was reset
    Lost {
        index: usize,
        expected: Signal,
        actual: Signal,
    },
}

/// Results across every game played with this instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    /// Highest round number reached in any game
    pub best_round: u32,
}

/// Read-only view of the game for display and reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub round: u32,
    pub max_rounds: Option<u32>,
    pub computer_sequence: Vec<Signal>,
    pub player_sequence: Vec<Signal>,
    pub input_enabled: bool,
    pub now: Millis,
}

pub struct SimonGame<F: Frontend, S: SignalSource = SequenceGenerator> {
    config: GameConfig,
    source: S,
    playback: PlaybackScheduler,
    timers: TimerQueue<GameEvent>,
    frontend: F,

    phase: GamePhase,
    computer_sequence: Vec<Signal>,
    player_sequence: Vec<Signal>,
    round: u32,
    max_rounds: Option<u32>,
    input_enabled: bool,

    stats: SessionStats,
}

impl<F: Frontend> SimonGame<F, SequenceGenerator> {
    /// Default timings with a seeded generator
    pub fn with_seed(frontend: F, seed: u64) -> Self {
        Self::build(GameConfig::default(), frontend, SequenceGenerator::with_seed(seed))
    }
}

impl<F: Frontend, S: SignalSource> SimonGame<F, S> {
    pub fn new(config: GameConfig, frontend: F, source: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, frontend, source))
    }

    fn build(config: GameConfig, frontend: F, source: S) -> Self {
        let playback = PlaybackScheduler::from_config(&config);
        Self {
            config,
            source,
            playback,
            timers: TimerQueue::new(),
            frontend,
            phase: GamePhase::Idle,
            computer_sequence: Vec::new(),
            player_sequence: Vec::new(),
            round: 0,
            max_rounds: None,
            input_enabled: false,
            stats: SessionStats::default(),
        }
    }

    // === ACCESSORS ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn max_rounds(&self) -> Option<u32> {
        self.max_rounds
    }

    pub fn computer_sequence(&self) -> &[Signal] {
        &self.computer_sequence
    }

    pub fn player_sequence(&self) -> &[Signal] {
        &self.player_sequence
    }

    pub fn presses_remaining(&self) -> usize {
        self.computer_sequence.len() - self.player_sequence.len()
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            round: self.round,
            max_rounds: self.max_rounds,
            computer_sequence: self.computer_sequence.clone(),
            player_sequence: self.player_sequence.clone(),
            input_enabled: self.input_enabled,
            now: self.now(),
        }
    }

    // === OPERATIONS ===

    /// Begin a new game at `level` (falls back to the configured default)
    ///
    /// Fails with `InvalidLevel` for levels outside 1..=4 and with
    /// `GameInProgress` if a game is already running. Either way no state
    /// changes.
    pub fn start(&mut self, level: Option<u32>) -> Result<()> {
        if self.phase.is_active() {
            return Err(SimonError::GameInProgress);
        }
        let max_rounds = max_rounds_for_level(level.or(self.config.default_level))?;

        self.clear_session();
        self.max_rounds = Some(max_rounds);
        self.round = 1;
        self.phase = GamePhase::ComputerTurn;
        self.stats.games_played += 1;
        self.frontend.set_status_visible(true);

        tracing::info!("Game started: {} rounds to win", max_rounds);
        self.run_computer_turn();
        Ok(())
    }

    /// Append one signal and play the whole computer sequence back
    ///
    /// Only meaningful at the start of a round, before this round's signal
    /// has been appended; does nothing otherwise.
    pub fn run_computer_turn(&mut self) {
        let round_pending = self.computer_sequence.len() < self.round as usize;
        let turn_phase = matches!(self.phase, GamePhase::ComputerTurn | GamePhase::RoundComplete);
        if !turn_phase || !round_pending {
            tracing::debug!("Computer turn requested during {:?}; ignoring", self.phase);
            return;
        }
        let Some(max_rounds) = self.max_rounds else {
            return;
        };

        self.phase = GamePhase::ComputerTurn;
        self.set_input_enabled(false);
        self.frontend.set_status("The computer's turn...");
        self.frontend
            .set_heading(&format!("Round {} of {}", self.round, max_rounds));

        let signal = self.source.next_signal();
        self.computer_sequence.push(signal);
        tracing::debug!(
            "Round {}: appended {}, sequence length {}",
            self.round,
            signal,
            self.computer_sequence.len()
        );

        self.playback.play(&mut self.timers, &self.computer_sequence);
    }

    /// A pad press from the input source: light the pad, then validate
    pub fn press_pad(&mut self, signal: Signal) -> PressOutcome {
        if self.phase != GamePhase::PlayerTurn {
            tracing::debug!("Pad {} pressed during {:?}; ignoring", signal, self.phase);
            return PressOutcome::Ignored;
        }
        self.frontend.activate_signal(signal);
        self.receive_player_signal(signal)
    }

    /// Validate one player signal against the computer sequence
    ///
    /// The new signal is compared with the computer signal at the position
    /// it fills, so repeated signals are matched one by one.
    pub fn receive_player_signal(&mut self, signal: Signal) -> PressOutcome {
        if self.phase != GamePhase::PlayerTurn {
            tracing::debug!("Signal {} outside player turn; ignoring", signal);
            return PressOutcome::Ignored;
        }

        self.player_sequence.push(signal);
        let index = self.player_sequence.len() - 1;
        let expected = self.computer_sequence[index];

        if expected != signal {
            let mismatch = SimonError::SequencePositionMismatch {
                index,
                expected,
                actual: signal,
            };
            tracing::info!("Round {} lost: {}", self.round, mismatch);
            self.end_game(GameOutcome::Lost);
            return PressOutcome::Lost {
                index,
                expected,
                actual: signal,
            };
        }

        let remaining = self.presses_remaining();
        self.frontend
            .set_status(&format!("Player: {} presses left", remaining));

        if remaining > 0 {
            return PressOutcome::Correct { remaining };
        }
        self.complete_round()
    }

    /// Drop the session and return to Idle. Pending timers never fire.
    pub fn reset(&mut self) {
        let cancelled = self.clear_session();
        self.phase = GamePhase::Idle;
        self.frontend.set_heading(TITLE);
        self.frontend.set_status_visible(false);
        tracing::debug!("Reset: cancelled {} pending timers", cancelled);
    }

    /// Run the clock forward by `delta` ms
    pub fn advance(&mut self, delta: Millis) {
        self.advance_to(self.now().saturating_add(delta));
    }

    /// Fire every timer due at or before `target`, in order
    pub fn advance_to(&mut self, target: Millis) {
        while let Some((at, event)) = self.timers.pop_due(target) {
            tracing::trace!("t={}ms firing {:?}", at, event);
            self.handle_event(event);
        }
        self.timers.set_now(target);
    }

    /// Advance straight to the next player turn
    ///
    /// Returns false if no timer is pending that could get there.
    pub fn run_until_player_turn(&mut self) -> bool {
        while self.phase != GamePhase::PlayerTurn {
            match self.timers.next_deadline() {
                Some(deadline) => self.advance_to(deadline),
                None => return false,
            }
        }
        true
    }

    // === INTERNALS ===

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Playback(step) => {
                if self.phase != GamePhase::ComputerTurn {
                    tracing::debug!("Stale playback step {:?} during {:?}", step, self.phase);
                    return;
                }
                match step {
                    PlaybackEvent::Activate { signal, .. } => self.frontend.activate_signal(signal),
                    PlaybackEvent::Deactivate { signal, .. } => {
                        self.frontend.deactivate_signal(signal)
                    }
                    PlaybackEvent::Done => self.begin_player_turn(),
                }
            }
            GameEvent::NextRound => self.run_computer_turn(),
        }
    }

    fn begin_player_turn(&mut self) {
        self.phase = GamePhase::PlayerTurn;
        self.set_input_enabled(true);
        self.frontend.set_status(&format!(
            "Player: {} presses left",
            self.presses_remaining()
        ));
    }

    fn complete_round(&mut self) -> PressOutcome {
        if Some(self.player_sequence.len() as u32) == self.max_rounds {
            self.frontend.set_status("You completed all your turns");
            tracing::info!("Game won after {} rounds", self.round);
            self.end_game(GameOutcome::Won);
            return PressOutcome::Won;
        }

        self.round += 1;
        self.player_sequence.clear();
        self.phase = GamePhase::RoundComplete;
        self.set_input_enabled(false);
        self.frontend.set_status("Nice! Keep going!");
        self.timers
            .schedule(self.config.next_round_delay_ms, GameEvent::NextRound);

        PressOutcome::RoundComplete {
            next_round: self.round,
        }
    }

    fn end_game(&mut self, outcome: GameOutcome) {
        self.stats.best_round = self.stats.best_round.max(self.round);
        match outcome {
            GameOutcome::Won => self.stats.wins += 1,
            GameOutcome::Lost => self.stats.losses += 1,
        }

        self.frontend.notify(outcome.message());
        self.frontend.set_heading(TITLE);
        self.frontend.set_status_visible(false);

        self.clear_session();
        self.phase = GamePhase::GameOver(outcome);
    }

    /// Clear both sequences and counters and cancel pending timers
    fn clear_session(&mut self) -> usize {
        self.computer_sequence.clear();
        self.player_sequence.clear();
        self.round = 0;
        self.max_rounds = None;
        self.set_input_enabled(false);
        self.timers.cancel_all()
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        if self.input_enabled != enabled {
            self.input_enabled = enabled;
            self.frontend.set_input_enabled(enabled);
        }
    }
}
