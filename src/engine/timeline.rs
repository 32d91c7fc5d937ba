//! Explicit timeline of delayed engine events
//!
//! Delayed transitions (leaderboard, next round, winner) are queued here with
//! an absolute due time on the engine clock instead of being left to timer
//! callbacks. The engine advances the clock and drains whatever became due.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Entry<E> {
    due_ms: u64,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due_ms == other.due_ms && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    // Ties on due time fire in scheduling order
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due_ms, self.seq).cmp(&(other.due_ms, other.seq))
    }
}

/// Millisecond clock plus a queue of events ordered by `(due time, scheduling order)`
#[derive(Debug)]
pub struct Timeline<E> {
    now_ms: u64,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Entry<E>>>,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queue `event` to fire `delay_ms` after the current clock reading
    pub fn schedule(&mut self, delay_ms: u64, event: E) {
        let entry = Entry {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq: self.next_seq,
            event,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(entry));
    }

    /// Pop the earliest event due at or before `until_ms`, moving the clock to
    /// its due time. Returns `None` once nothing else is due.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<E> {
        let due = self.queue.peek().map(|Reverse(e)| e.due_ms)?;
        if due > until_ms {
            return None;
        }
        let Reverse(entry) = self.queue.pop()?;
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(entry.event)
    }

    /// Move the clock forward without firing anything. Never moves backwards.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Drop every pending event matching `pred`
    pub fn cancel_where<F>(&mut self, mut pred: F)
    where
        F: FnMut(&E) -> bool,
    {
        self.queue.retain(|Reverse(entry)| !pred(&entry.event));
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
