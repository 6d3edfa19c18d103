//! Bounded most-recent-first history used for pointer positions and deltas.

use std::collections::VecDeque;

pub const DEFAULT_HISTORY_LEN: usize = 60;

#[derive(Debug, Clone)]
pub struct RecentHistory<T> {
    entries: VecDeque<T>,
    max_len: usize,
}

impl<T: Copy> RecentHistory<T> {
    pub fn new(max_len: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_len,
        }
    }

    /// Records a new entry at the front, evicting the oldest when full.
    pub fn push(&mut self, value: T) {
        self.entries.push_front(value);
        self.entries.truncate(self.max_len);
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Shrinking keeps only the newest `max_len` entries. Growing keeps
    /// everything and just allows more entries from now on.
    pub fn set_max_len(&mut self, max_len: usize) {
        if max_len < self.max_len {
            self.entries.truncate(max_len);
        }
        self.max_len = max_len;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of the entries, newest first.
    pub fn snapshot(&self) -> Vec<T> {
        self.entries.iter().copied().collect()
    }
}

impl<T: Copy> Default for RecentHistory<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LEN)
    }
}
