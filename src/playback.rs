//! Timed playback of the computer sequence
//!
//! `play` returns immediately after queueing one activation and one
//! deactivation per signal plus a final `Done`. With the default timings
//! signal `i` lights at `(i + 1) * 600ms` for 500ms, leaving a 100ms gap
//! before the next one, and `Done` lands at `len * 600 + 1000ms`.

use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::types::{Millis, Signal};
use crate::timers::{TimerId, TimerQueue};

/// Steps emitted while the computer plays its sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Light and sound the signal at `index`
    Activate { signal: Signal, index: usize },
    /// The activation of the signal at `index` is over
    Deactivate { signal: Signal, index: usize },
    /// Every activation has finished
    Done,
}

/// Timer tokens for one playback run
#[derive(Debug, Clone, Default)]
pub struct PlaybackHandle {
    timers: Vec<TimerId>,
}

impl PlaybackHandle {
    /// Cancel whatever part of the playback has not fired yet
    pub fn cancel<E>(&self, queue: &mut TimerQueue<E>) -> usize {
        self.timers.iter().filter(|id| queue.cancel(**id)).count()
    }

    pub fn timers(&self) -> &[TimerId] {
        &self.timers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackScheduler {
    interval_ms: Millis,
    activation_ms: Millis,
    done_buffer_ms: Millis,
}

impl Default for PlaybackScheduler {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl PlaybackScheduler {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            interval_ms: config.playback_interval_ms,
            activation_ms: config.activation_ms,
            done_buffer_ms: config.playback_done_buffer_ms,
        }
    }

    /// Offset from playback start at which signal `index` activates
    pub fn activation_offset(&self, index: usize) -> Millis {
        (index as Millis + 1) * self.interval_ms
    }

    /// Offset from playback start at which `Done` fires for a sequence of `len`
    pub fn playback_duration(&self, len: usize) -> Millis {
        len as Millis * self.interval_ms + self.done_buffer_ms
    }

    /// Queue the whole playback of `sequence` and return immediately
    pub fn play<E>(&self, queue: &mut TimerQueue<E>, sequence: &[Signal]) -> PlaybackHandle
    where
        E: From<PlaybackEvent>,
    {
        let mut timers = Vec::with_capacity(sequence.len() * 2 + 1);

        for (index, &signal) in sequence.iter().enumerate() {
            let on_at = self.activation_offset(index);
            timers.push(queue.schedule(on_at, PlaybackEvent::Activate { signal, index }.into()));
            timers.push(queue.schedule(
                on_at + self.activation_ms,
                PlaybackEvent::Deactivate { signal, index }.into(),
            ));
        }

        let done_at = self.playback_duration(sequence.len());
        timers.push(queue.schedule(done_at, PlaybackEvent::Done.into()));

        tracing::debug!(
            "Scheduled playback of {} signals, done at +{}ms",
            sequence.len(),
            done_at
        );

        PlaybackHandle { timers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(queue: &mut TimerQueue<PlaybackEvent>) -> Vec<(Millis, PlaybackEvent)> {
        let mut fired = Vec::new();
        while let Some(entry) = queue.pop_due(Millis::MAX) {
            fired.push(entry);
        }
        fired
    }

    #[test]
    fn test_default_timeline() {
        let scheduler = PlaybackScheduler::default();
        let mut queue = TimerQueue::new();
        scheduler.play(&mut queue, &[Signal::Red, Signal::Blue]);

        assert_eq!(
            run(&mut queue),
            vec![
                (600, PlaybackEvent::Activate { signal: Signal::Red, index: 0 }),
                (1100, PlaybackEvent::Deactivate { signal: Signal::Red, index: 0 }),
                (1200, PlaybackEvent::Activate { signal: Signal::Blue, index: 1 }),
                (1700, PlaybackEvent::Deactivate { signal: Signal::Blue, index: 1 }),
                (2200, PlaybackEvent::Done),
            ]
        );
    }

    #[test]
    fn test_activations_never_overlap() {
        let scheduler = PlaybackScheduler::default();
        let mut queue = TimerQueue::new();
        let sequence = vec![Signal::Green; 31];
        scheduler.play(&mut queue, &sequence);

        let mut lit: Option<usize> = None;
        let mut last_off = 0;
        for (at, event) in run(&mut queue) {
            match event {
                PlaybackEvent::Activate { index, .. } => {
                    assert!(lit.is_none(), "signal {} lit while another active", index);
                    lit = Some(index);
                }
                PlaybackEvent::Deactivate { index, .. } => {
                    assert_eq!(lit, Some(index));
                    lit = None;
                    last_off = at;
                }
                PlaybackEvent::Done => {
                    assert!(lit.is_none());
                    assert!(at > last_off);
                }
            }
        }
    }

    #[test]
    fn test_play_is_relative_to_current_clock() {
        let scheduler = PlaybackScheduler::default();
        let mut queue: TimerQueue<PlaybackEvent> = TimerQueue::new();
        queue.set_now(5000);
        scheduler.play(&mut queue, &[Signal::Yellow]);
        assert_eq!(queue.next_deadline(), Some(5600));
    }

    #[test]
    fn test_empty_sequence_only_signals_done() {
        let scheduler = PlaybackScheduler::default();
        let mut queue = TimerQueue::new();
        scheduler.play(&mut queue, &[]);
        assert_eq!(run(&mut queue), vec![(1000, PlaybackEvent::Done)]);
    }

    #[test]
    fn test_handle_cancels_remaining_steps() {
        let scheduler = PlaybackScheduler::default();
        let mut queue: TimerQueue<PlaybackEvent> = TimerQueue::new();
        let handle = scheduler.play(&mut queue, &[Signal::Red, Signal::Green]);
        assert_eq!(handle.timers().len(), 5);

        queue.pop_due(600);
        assert_eq!(handle.cancel(&mut queue), 4);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_custom_timings() {
        let config = GameConfig {
            playback_interval_ms: 300,
            activation_ms: 200,
            playback_done_buffer_ms: 400,
            ..GameConfig::default()
        };
        let scheduler = PlaybackScheduler::from_config(&config);
        assert_eq!(scheduler.activation_offset(2), 900);
        assert_eq!(scheduler.playback_duration(3), 1300);
    }
}
