//! Single-slot debounce, independent of any event loop.
//!
//! A [`Debouncer`] holds at most one pending value. Scheduling a new value
//! replaces the old one and restarts the quiet interval; the value is released
//! by [`Debouncer::poll`] once the interval has passed without another
//! schedule. Time comes from a [`Clock`], so tests drive it with a
//! [`ManualClock`].

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::trace;

/// Default quiet interval before a search query is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Source of the current time.
pub trait Clock: fmt::Debug {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Simulated time that only moves when told to.
///
/// Clones share the same timeline, so a test can keep one handle while the
/// table owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Arc<Mutex<Duration>>,
}

impl ManualClock {
    /// Create a clock at t=0.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        if let Ok(mut elapsed) = self.elapsed.lock() {
            *elapsed += by;
        }
    }

    /// Jump to an absolute offset from t=0. Never moves backwards.
    pub fn set_elapsed(&self, to: Duration) {
        if let Ok(mut elapsed) = self.elapsed.lock() {
            *elapsed = (*elapsed).max(to);
        }
    }

    /// Time since t=0.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.lock().map(|e| *e).unwrap_or_default()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    /// `None` when the interval runs past what `Instant` can represent.
    deadline: Option<Instant>,
}

/// Schedule-or-replace deferred value.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet interval.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The quiet interval.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the quiet interval. Applies to the next schedule.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Schedule `value` to be released after the quiet interval from `now`.
    ///
    /// Any value already pending is dropped. Returns `true` if one was.
    /// An interval too long to represent is never due; only
    /// [`flush`](Self::flush) releases such a value.
    pub fn schedule(&mut self, value: T, now: Instant) -> bool {
        let replaced = self.pending.is_some();
        self.pending = Some(Pending {
            value,
            deadline: now.checked_add(self.delay),
        });
        trace!("Debounce scheduled (replaced: {})", replaced);
        replaced
    }

    /// Release the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(Pending {
                deadline: Some(deadline),
                ..
            }) if *deadline <= now => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Release the pending value immediately, regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value without releasing it.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Returns `true` while a value is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will be released.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().and_then(|p| p.deadline)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
