//! Full-game integration tests driven through virtual time

use proptest::prelude::*;
use simon_says::frontend::{FrontendCall, RecordingFrontend};
use simon_says::sequence::{ScriptedSignals, SequenceGenerator};
use simon_says::{GameConfig, GameOutcome, GamePhase, PressOutcome, Signal, SimonGame};

/// Play every round perfectly until the game ends
fn play_perfectly(game: &mut SimonGame<RecordingFrontend>) -> Vec<PressOutcome> {
    let mut outcomes = Vec::new();
    while game.run_until_player_turn() {
        let expected = game.computer_sequence().to_vec();
        for signal in expected {
            outcomes.push(game.press_pad(signal));
        }
    }
    outcomes
}

#[test]
fn test_level_one_win() {
    let mut game = SimonGame::with_seed(RecordingFrontend::new(), 2024);
    game.start(Some(1)).unwrap();

    let outcomes = play_perfectly(&mut game);

    assert_eq!(outcomes.last(), Some(&PressOutcome::Won));
    // 1 + 2 + ... + 8 presses
    assert_eq!(outcomes.len(), 36);
    assert_eq!(
        outcomes
            .iter()
            .filter(|o| matches!(o, PressOutcome::RoundComplete { .. }))
            .count(),
        7
    );

    assert_eq!(game.phase(), GamePhase::GameOver(GameOutcome::Won));
    assert!(game.computer_sequence().is_empty());
    assert_eq!(game.round(), 0);
    assert_eq!(game.frontend().alerts(), vec!["Good Job. You are done"]);
    assert!(game
        .frontend()
        .calls
        .contains(&FrontendCall::Status("You completed all your turns".into())));

    let stats = game.stats();
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.best_round, 8);
}

#[test]
fn test_each_level_needs_its_round_count() {
    for (level, rounds) in [(1, 8), (2, 14), (3, 20), (4, 31)] {
        let mut game = SimonGame::with_seed(RecordingFrontend::new(), level as u64);
        game.start(Some(level)).unwrap();
        let outcomes = play_perfectly(&mut game);

        let presses = (rounds * (rounds + 1) / 2) as usize;
        assert_eq!(outcomes.len(), presses, "level {}", level);
        assert_eq!(outcomes.last(), Some(&PressOutcome::Won));
    }
}

#[test]
fn test_sequence_grows_by_one_and_keeps_prefix() {
    let mut game = SimonGame::with_seed(RecordingFrontend::new(), 99);
    game.start(Some(2)).unwrap();

    let mut previous: Vec<Signal> = Vec::new();
    for round in 1..=5u32 {
        assert!(game.run_until_player_turn());
        let current = game.computer_sequence().to_vec();
        assert_eq!(current.len() as u32, round);
        assert_eq!(game.round(), round);
        assert_eq!(&current[..previous.len()], previous.as_slice());

        for &signal in &current {
            game.press_pad(signal);
        }
        previous = current;
    }
}

#[test]
fn test_playback_timeline_for_round_three() {
    let mut game = SimonGame::new(
        GameConfig::default(),
        RecordingFrontend::new(),
        ScriptedSignals::new(vec![Signal::Red, Signal::Green, Signal::Blue]).unwrap(),
    )
    .unwrap();
    game.start(None).unwrap();

    for _ in 0..2 {
        game.run_until_player_turn();
        let expected = game.computer_sequence().to_vec();
        for signal in expected {
            game.press_pad(signal);
        }
    }

    // Round 3 starts after the 1000ms pause
    let pause_start = game.now();
    game.advance(1000);
    assert_eq!(game.phase(), GamePhase::ComputerTurn);
    let round_start = game.now();
    assert_eq!(round_start, pause_start + 1000);
    game.frontend_mut().clear();

    for (index, signal) in [Signal::Red, Signal::Green, Signal::Blue].into_iter().enumerate() {
        let on_at = round_start + (index as u64 + 1) * 600;
        game.advance_to(on_at - 1);
        assert_eq!(game.frontend().activations().len(), index);
        game.advance_to(on_at);
        assert_eq!(game.frontend().activations().last(), Some(&signal));
    }

    // 3 * 600 + 1000
    game.advance_to(round_start + 2799);
    assert_eq!(game.phase(), GamePhase::ComputerTurn);
    game.advance_to(round_start + 2800);
    assert_eq!(game.phase(), GamePhase::PlayerTurn);
    assert_eq!(game.frontend().last_status(), Some("Player: 3 presses left"));
}

#[test]
fn test_input_gate_follows_phase() {
    let mut game = SimonGame::with_seed(RecordingFrontend::new(), 5);
    game.start(None).unwrap();
    assert!(!game.frontend().input_enabled());

    game.run_until_player_turn();
    assert!(game.frontend().input_enabled());

    let signal = game.computer_sequence()[0];
    game.press_pad(signal);
    assert!(!game.frontend().input_enabled());

    game.run_until_player_turn();
    assert!(game.frontend().input_enabled());

    game.reset();
    assert!(!game.frontend().input_enabled());
}

#[test]
fn test_wrong_first_press_loses_round_one() {
    let mut game = SimonGame::with_seed(RecordingFrontend::new(), 11);
    game.start(Some(4)).unwrap();
    game.run_until_player_turn();

    let expected = game.computer_sequence()[0];
    let wrong = Signal::ALL.into_iter().find(|s| *s != expected).unwrap();

    assert_eq!(
        game.press_pad(wrong),
        PressOutcome::Lost {
            index: 0,
            expected,
            actual: wrong
        }
    );
    assert_eq!(game.phase(), GamePhase::GameOver(GameOutcome::Lost));
    assert_eq!(game.pending_timers(), 0);
    assert_eq!(game.press_pad(expected), PressOutcome::Ignored);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = SimonGame::new(
        GameConfig::default(),
        RecordingFrontend::new(),
        SequenceGenerator::with_seed(77),
    )
    .unwrap();
    let mut b = SimonGame::with_seed(RecordingFrontend::new(), 77);
    a.start(Some(1)).unwrap();
    b.start(Some(1)).unwrap();
    play_perfectly(&mut a);
    play_perfectly(&mut b);
    assert_eq!(a.frontend().calls, b.frontend().calls);
    assert_eq!(a.now(), b.now());
}

proptest! {
    /// Whatever the player presses, every accepted press leaves the player
    /// sequence a positional prefix of the computer sequence.
    #[test]
    fn prop_player_sequence_is_prefix(
        seed in any::<u64>(),
        presses in prop::collection::vec((0usize..4, 0u64..3000), 1..60),
    ) {
        let mut game = SimonGame::with_seed(RecordingFrontend::new(), seed);
        game.start(Some(4)).unwrap();

        for (pad, wait) in presses {
            game.advance(wait);
            let outcome = game.press_pad(Signal::ALL[pad]);

            let player = game.player_sequence();
            let computer = game.computer_sequence();
            prop_assert!(player.len() <= computer.len());
            prop_assert_eq!(player, &computer[..player.len()]);

            if let PressOutcome::Lost { .. } = outcome {
                prop_assert!(computer.is_empty());
                prop_assert_eq!(game.round(), 0);
                break;
            }
            if game.phase().is_active() {
                prop_assert_eq!(computer.len() as u32 + u32::from(game.phase() == GamePhase::RoundComplete), game.round());
            }
        }
    }
}
