//! Debouncer for affected directories
//!
//! Pure state machine: the caller supplies the clock. Every batch with at
//! least one affected directory (re)arms a single deadline; the fire hands
//! back everything accumulated since the last fire.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: BTreeSet<PathBuf>,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: BTreeSet::new(),
            deadline: None,
        }
    }

    /// Accumulate `dirs`; a non-empty batch resets the deadline
    pub fn add<I>(&mut self, dirs: I, now: Instant)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let before = self.pending.len();
        let mut any = false;
        for dir in dirs {
            any = true;
            self.pending.insert(dir);
        }
        if any {
            self.deadline = Some(now + self.delay);
            tracing::trace!(
                pending = self.pending.len(),
                new = self.pending.len() - before,
                "debounce armed"
            );
        }
    }

    /// Time left before the next fire, if armed
    pub fn time_until_fire(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Take the accumulated directories once the deadline has passed
    pub fn poll(&mut self, now: Instant) -> Option<Vec<PathBuf>> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(std::mem::take(&mut self.pending).into_iter().collect())
            }
            _ => None,
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
