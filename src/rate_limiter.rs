//! Minimum-interval rate limiter for outbound provider calls.
//!
//! The limiter owns its clock and its last-call timestamp. It is injected
//! into the client that needs it; nothing here is process-global. It is safe
//! to share via `Arc<RateLimiter>` across threads.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Time source for the limiter.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

pub struct RateLimiter {
    clock: Arc<dyn Clock>,
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("min_interval", &self.min_interval)
            .field("next_slot", &*self.next_slot.lock())
            .finish()
    }
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self::with_clock(min_interval, Arc::new(SystemClock))
    }

    pub fn with_clock(min_interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Claim the next call slot and return how long the caller must wait for it.
    ///
    /// Concurrent callers get consecutive slots, each `min_interval` apart.
    pub fn reserve(&self) -> Duration {
        let now = self.clock.now();
        let mut next_slot = self.next_slot.lock();
        let slot = match *next_slot {
            Some(slot) if slot > now => slot,
            _ => now,
        };
        *next_slot = Some(slot + self.min_interval);
        slot.saturating_duration_since(now)
    }

    /// Block until a call is allowed.
    pub fn acquire(&self) {
        let wait = self.reserve();
        if !wait.is_zero() {
            tracing::debug!(wait_ms = wait.as_millis() as u64, "rate limiter delaying call");
            self.clock.sleep(wait);
        }
    }
}
