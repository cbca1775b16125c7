//! Random signal selection for the growing computer sequence

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::error::{Result, SimonError};
use crate::core::types::Signal;

/// Pick one item uniformly at random
pub fn random_item<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Result<&'a T> {
    if items.is_empty() {
        return Err(SimonError::EmptySignalSet);
    }
    let index = rng.gen_range(0..items.len());
    Ok(&items[index])
}

/// Produces the next signal appended to the computer sequence
///
/// Holds no game state of its own; the only state is the random source.
#[derive(Debug, Clone)]
pub struct SequenceGenerator<R = ChaCha8Rng> {
    rng: R,
}

impl SequenceGenerator<ChaCha8Rng> {
    /// Deterministic generator for replays and tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl<R: Rng> SequenceGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

/// Anything that can supply the next computer signal
pub trait SignalSource {
    fn next_signal(&mut self) -> Signal;
}

impl<R: Rng> SignalSource for SequenceGenerator<R> {
    fn next_signal(&mut self) -> Signal {
        // Signal::ALL is a non-empty constant, so this cannot fail
        match random_item(&Signal::ALL, &mut self.rng) {
            Ok(signal) => *signal,
            Err(_) => unreachable!("Signal::ALL is never empty"),
        }
    }
}

/// Replays a fixed script, wrapping around when it runs out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedSignals {
    script: Vec<Signal>,
    cursor: usize,
}

impl ScriptedSignals {
    pub fn new(script: Vec<Signal>) -> Result<Self> {
        if script.is_empty() {
            return Err(SimonError::EmptySignalSet);
        }
        Ok(Self { script, cursor: 0 })
    }
}

impl SignalSource for ScriptedSignals {
    fn next_signal(&mut self) -> Signal {
        let signal = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        signal
    }
}
