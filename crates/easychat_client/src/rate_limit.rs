//! Client-side throttle: delay a send once 3+ requests landed in the last minute.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How many recent request timestamps are kept (oldest evicted on overflow).
pub const MAX_TRACKED_REQUESTS: usize = 10;
/// Trailing window inspected for bursts.
pub const WINDOW: Duration = Duration::from_secs(60);
/// Number of requests inside the window that triggers a delay.
pub const BURST_THRESHOLD: usize = 3;

/// Bounded history of send times with an advisory delay decision.
/// Purely advisory: callers decide whether to actually sleep.
#[derive(Debug, Default)]
pub struct RateLimiter {
    timestamps: VecDeque<Instant>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `now` and return how long the caller should wait before issuing
    /// the request. Zero unless the history holds [`BURST_THRESHOLD`] or more
    /// entries and the oldest of them is younger than [`WINDOW`]; then the
    /// delay is what remains of the window measured from that oldest entry.
    pub fn should_delay(&mut self, now: Instant) -> Duration {
        if self.timestamps.len() == MAX_TRACKED_REQUESTS {
            self.timestamps.pop_front();
        }
        self.timestamps.push_back(now);

        if self.timestamps.len() >= BURST_THRESHOLD {
            if let Some(&oldest) = self.timestamps.front() {
                let age = now.saturating_duration_since(oldest);
                if age < WINDOW {
                    return WINDOW - age;
                }
            }
        }
        Duration::ZERO
    }

    /// Number of timestamps currently tracked.
    pub fn tracked(&self) -> usize {
        self.timestamps.len()
    }
}
