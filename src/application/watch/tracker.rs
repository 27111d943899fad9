//! Self-write tracker
//!
//! Paths are registered immediately before a write and consumed by matching
//! change events. Registering a path twice (write, then formatter) keeps it
//! pending for two events. Once the last registration is consumed the path
//! settles for a short window in which further events on it are still ours:
//! one atomic rename can surface as several events for the same target.
//! Pending entries whose event never arrives expire after the TTL. One
//! tracker per watch session; clones share state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::event::{SELF_WRITE_SETTLE_MS, SELF_WRITE_TTL_MS};

#[derive(Debug, Clone, Copy)]
struct Tracked {
    remaining: usize,
    at: Instant,
}

#[derive(Debug, Default)]
struct Entries {
    pending: HashMap<PathBuf, Tracked>,
    /// Fully consumed paths and the instant their window closes
    settling: HashMap<PathBuf, Instant>,
}

#[derive(Debug, Clone)]
pub struct SelfWriteTracker {
    entries: Arc<Mutex<Entries>>,
    ttl: Duration,
    settle: Duration,
}

impl Default for SelfWriteTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SelfWriteTracker {
    pub fn new() -> Self {
        Self::with_timing(
            Duration::from_millis(SELF_WRITE_TTL_MS),
            Duration::from_millis(SELF_WRITE_SETTLE_MS),
        )
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_timing(ttl, Duration::from_millis(SELF_WRITE_SETTLE_MS))
    }

    pub fn with_timing(ttl: Duration, settle: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Entries::default())),
            ttl,
            settle,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a path about to be written
    pub fn track(&self, path: &Path) {
        self.track_at(path, Instant::now());
    }

    pub fn track_at(&self, path: &Path, now: Instant) {
        let mut entries = self.lock();
        entries.settling.remove(path);
        entries
            .pending
            .entry(path.to_path_buf())
            .and_modify(|t| {
                t.remaining += 1;
                t.at = now;
            })
            .or_insert(Tracked { remaining: 1, at: now });
    }

    /// Whether an event on `path` is one of our own writes
    pub fn consume(&self, path: &Path) -> bool {
        self.consume_at(path, Instant::now())
    }

    pub fn consume_at(&self, path: &Path, now: Instant) -> bool {
        let mut entries = self.lock();
        if let Some(tracked) = entries.pending.get_mut(path) {
            if now.saturating_duration_since(tracked.at) > self.ttl {
                entries.pending.remove(path);
                return false;
            }
            tracked.remaining -= 1;
            if tracked.remaining == 0 {
                entries.pending.remove(path);
                entries.settling.insert(path.to_path_buf(), now + self.settle);
            }
            return true;
        }
        match entries.settling.get(path) {
            Some(until) if now < *until => true,
            Some(_) => {
                entries.settling.remove(path);
                false
            }
            None => false,
        }
    }

    /// Drop pending entries older than the TTL and closed settle windows.
    /// Returns how many pending entries expired.
    pub fn expire(&self, now: Instant) -> usize {
        let ttl = self.ttl;
        let mut entries = self.lock();
        entries.settling.retain(|_, until| now < *until);
        let before = entries.pending.len();
        entries
            .pending
            .retain(|_, tracked| now.saturating_duration_since(tracked.at) <= ttl);
        before - entries.pending.len()
    }

    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.pending.clear();
        entries.settling.clear();
    }

    /// Path still waits for at least one event
    pub fn contains(&self, path: &Path) -> bool {
        self.lock().pending.contains_key(path)
    }

    /// Number of paths waiting for events
    pub fn len(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
