//! Virtual-time timer queue
//!
//! Deferred game work (playback steps, the next-round pause) is queued here
//! as plain event values rather than closures. The owner pops due events in
//! deadline order and dispatches them itself, so cancelling a timer is just
//! removing its entry.

use std::collections::{BTreeMap, HashMap};

use crate::core::types::Millis;

/// Cancellation token for one scheduled event
///
/// Ids are never reused, so a stale token cannot cancel a newer timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
pub struct TimerQueue<E> {
    now: Millis,
    next_id: u64,
    /// Ordered by deadline, ties broken by scheduling order
    pending: BTreeMap<(Millis, TimerId), E>,
    deadlines: HashMap<TimerId, Millis>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 0,
            pending: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current clock time
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Schedule `event` to fire `delay` ms from now
    pub fn schedule(&mut self, delay: Millis, event: E) -> TimerId {
        self.schedule_at(self.now.saturating_add(delay), event)
    }

    /// Schedule `event` at an absolute time (clamped to now)
    pub fn schedule_at(&mut self, deadline: Millis, event: E) -> TimerId {
        let deadline = deadline.max(self.now);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert((deadline, id), event);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancel one timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.pending.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }

    /// Cancel every pending timer, returning how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        self.deadlines.clear();
        dropped
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Pop the earliest event due at or before `until`
    ///
    /// The clock moves to the event's deadline, so anything the handler
    /// schedules is timed from the moment the event fired.
    pub fn pop_due(&mut self, until: Millis) -> Option<(Millis, E)> {
        let key = *self.pending.keys().next()?;
        if key.0 > until {
            return None;
        }
        let event = self.pending.remove(&key)?;
        self.deadlines.remove(&key.1);
        self.now = self.now.max(key.0);
        Some((key.0, event))
    }

    /// Move the clock forward without firing anything
    ///
    /// Callers drain `pop_due` first; the clock never moves backwards.
    pub fn set_now(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }
}
