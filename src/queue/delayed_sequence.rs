//! Time-sorted sequence of `(payload, ready_at)` entries awaiting promotion.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// One payload deferred until `ready_at`.
pub struct DelayedEntry<P> {
    pub payload: P,
    pub ready_at: DateTime<Utc>,
}

impl<P> DelayedEntry<P> {
    pub fn new(payload: P, ready_at: DateTime<Utc>) -> Self {
        Self { payload, ready_at }
    }
}

/// A mutable, time-ordered sequence of [`DelayedEntry`] values.
///
/// `add` keeps the sequence sorted ascending by `ready_at` (sort-on-insert);
/// `try_pop_due` inspects and removes the head, never the tail. Both
/// operations are non-blocking and wait-free of external scheduling: all
/// state lives behind one uncontended [`parking_lot::Mutex`].
pub struct DelayedSequence<P> {
    entries: Mutex<Vec<DelayedEntry<P>>>,
}

impl<P> Default for DelayedSequence<P> {
    fn default() -> Self {
        Self { entries: Mutex::new(Vec::new()) }
    }
}

impl<P> DelayedSequence<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry` so the sequence remains sorted ascending by `ready_at`.
    ///
    /// Uses a strict less-than comparison to find the first later entry; if
    /// none is later, `entry` is appended. Entries with equal `ready_at` may
    /// end up in either relative order.
    pub fn add(&self, entry: DelayedEntry<P>) {
        let mut entries = self.entries.lock();
        let pos = entries.iter().position(|e| e.ready_at > entry.ready_at);
        match pos {
            Some(idx) => entries.insert(idx, entry),
            None => entries.push(entry),
        }
    }

    /// Removes and returns the head entry if its `ready_at` is due, i.e. not
    /// after `now`. The head examined is always the head removed: this fixes
    /// the documented head/tail mismatch of the system this queue is modeled on.
    pub fn try_pop_due(&self, now: DateTime<Utc>) -> Option<DelayedEntry<P>> {
        let mut entries = self.entries.lock();
        match entries.first() {
            Some(head) if head.ready_at <= now => Some(entries.remove(0)),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }
}
