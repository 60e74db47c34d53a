//! Bounded retry for store writes
//!
//! A [`RetryPolicy`] decides how many attempts an operation gets and how long
//! to wait between them. Waiting goes through a [`Sleeper`] so callers (and
//! tests) control the clock.

use std::time::Duration;

use tracing::warn;

/// Blocks the current thread between attempts
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Sleeps the calling thread for real
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Delay before the next attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    Fixed(Duration),
    /// `base * 2^(attempt - 1)`, capped at `max`
    Exponential { base: Duration, max: Duration },
}

impl Backoff {
    /// Delay after the given failed attempt (1-based)
    pub fn delay(&self, attempt: u32) -> Duration {
        match *self {
            Self::Fixed(delay) => delay,
            Self::Exponential { base, max } => {
                let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
                base.saturating_mul(factor).min(max)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one; at least 1
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    /// Three attempts, 100ms apart
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Backoff::Fixed(Duration::from_millis(100)),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn once() -> Self {
        Self {
            max_attempts: 1,
            backoff: Backoff::Fixed(Duration::ZERO),
        }
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out
    ///
    /// `op` receives the 1-based attempt number. Errors for which
    /// `is_permanent` returns true are returned at once without sleeping.
    /// When attempts run out the last error is returned.
    pub fn run<T, E, F, P>(&self, sleeper: &dyn Sleeper, mut op: F, is_permanent: P) -> Result<T, E>
    where
        F: FnMut(u32) -> Result<T, E>,
        P: Fn(&E) -> bool,
        E: std::fmt::Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(err) if is_permanent(&err) || attempt >= max_attempts => return Err(err),
                Err(err) => {
                    let delay = self.backoff.delay(attempt);
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Attempt failed, retrying"
                    );
                    sleeper.sleep(delay);
                    attempt += 1;
                }
            }
        }
    }
}
