//! Debounce timers for UI-driven work.
//!
//! Two small stateful wrappers replace ad-hoc timer closures: `Debouncer`
//! collapses a burst of triggers into a single trailing fire, `Cooldown`
//! lets the first call through and drops repeats for a fixed window.
//! Both expose `_at` variants taking an explicit `Instant` so tests can
//! drive time deterministically.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Trailing-edge debouncer. Every `schedule` replaces the pending payload
/// and restarts the window; the payload is released once the window has
/// elapsed with no newer call (latest wins).
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Schedule a fire one window from now, replacing any pending payload.
    pub fn schedule(&mut self, value: T) {
        self.schedule_at(value, Instant::now());
    }

    pub fn schedule_at(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.window));
    }

    /// Drop the pending fire, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the payload once its window has elapsed.
    pub fn fire_ready(&mut self) -> Option<T> {
        self.fire_ready_at(Instant::now())
    }

    pub fn fire_ready_at(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Time left until the pending fire, for repaint scheduling.
    pub fn time_remaining(&self) -> Option<Duration> {
        let (_, deadline) = self.pending.as_ref()?;
        Some(deadline.saturating_duration_since(Instant::now()))
    }
}

/// Leading-edge guard keyed by id. The first `try_fire` for a key goes
/// through and opens a window during which repeats for that key report
/// `false`; other keys are unaffected.
pub struct Cooldown {
    window: Duration,
    last_fired: HashMap<String, Instant>,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fired: HashMap::new(),
        }
    }

    /// Returns true when the call is allowed to proceed.
    pub fn try_fire(&mut self, key: &str) -> bool {
        self.try_fire_at(key, Instant::now())
    }

    pub fn try_fire_at(&mut self, key: &str, now: Instant) -> bool {
        if let Some(last) = self.last_fired.get(key) {
            if now.duration_since(*last) < self.window {
                return false;
            }
        }
        self.last_fired.insert(key.to_string(), now);
        true
    }

    /// Drop the bookkeeping for a key (its subject no longer exists).
    pub fn forget(&mut self, key: &str) {
        self.last_fired.remove(key);
    }
}
