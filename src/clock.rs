//! Time source used by the polling loop.
//!
//! Poll intervals, the overall deadline and result timestamps all go through a
//! [`Clock`], so the client never reads ambient time directly.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Notify;

/// Source of monotonic time, wall-clock time and sleeping.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Monotonic instant used for deadlines.
    fn now(&self) -> Instant;
    /// Wall-clock time used for result timestamps.
    fn utc_now(&self) -> DateTime<Utc>;
    /// Suspend the current task for `duration`.
    async fn sleep(&self, duration: Duration);
    /// Completes once `duration` has passed on this clock. Races against
    /// in-flight requests, so it never moves time forward itself.
    async fn timer(&self, duration: Duration);
}

/// Real time backed by `tokio::time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    async fn timer(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Virtual clock: `sleep` advances time instantly instead of waiting.
///
/// Timers only fire when something else moves the clock, via [`ManualClock::advance`]
/// or another task's `sleep`.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    wall_origin: DateTime<Utc>,
    elapsed: Mutex<Duration>,
    advanced: Notify,
}

impl ManualClock {
    /// Creates a clock whose wall time starts at the current UTC time.
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Creates a clock whose wall time starts at `wall_origin`.
    pub fn starting_at(wall_origin: DateTime<Utc>) -> Self {
        Self {
            origin: Instant::now(),
            wall_origin,
            elapsed: Mutex::new(Duration::ZERO),
            advanced: Notify::new(),
        }
    }

    /// Move virtual time forward without sleeping.
    pub fn advance(&self, duration: Duration) {
        {
            let mut elapsed = self.elapsed.lock().unwrap_or_else(|e| e.into_inner());
            *elapsed += duration;
        }
        self.advanced.notify_waiters();
    }

    /// Total virtual time that has passed.
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        let elapsed =
            chrono::Duration::from_std(self.elapsed()).unwrap_or(chrono::Duration::zero());
        self.wall_origin + elapsed
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
        tokio::task::yield_now().await;
    }

    async fn timer(&self, duration: Duration) {
        let target = self.elapsed() + duration;
        loop {
            let advanced = self.advanced.notified();
            tokio::pin!(advanced);
            advanced.as_mut().enable();
            if self.elapsed() >= target {
                return;
            }
            advanced.await;
        }
    }
}
