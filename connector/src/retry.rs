//! Retry policy for event delivery.
//!
//! Exponential backoff without jitter: the wait starts at
//! [`DEFAULT_INITIAL_BACKOFF`] and doubles after every failed attempt.

use std::time::Duration;

use crate::error::{InputError, Result};

/// Default number of attempts per `send` call (including the first).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Wait before the second attempt.
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_millis(100);

/// Retry configuration shared by every `send` call on a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the default backoff and `max_attempts` attempts.
    ///
    /// Zero attempts is rejected with [`InputError::InvalidMaxRetries`].
    pub fn new(max_attempts: u32) -> Result<Self> {
        if max_attempts == 0 {
            return Err(InputError::InvalidMaxRetries(max_attempts).into());
        }
        Ok(Self {
            max_attempts,
            ..Self::default()
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn initial_backoff(&self) -> Duration {
        self.initial_backoff
    }

    /// Wait inserted after failed attempt `attempt` (1-based).
    ///
    /// Attempt 1 waits the initial backoff, attempt 2 twice that, and so on.
    /// Saturates instead of overflowing for very large attempt counts.
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.initial_backoff
            .checked_mul(1u32 << exponent)
            .unwrap_or(Duration::MAX)
    }

    /// Total time spent waiting when every attempt fails.
    pub fn total_backoff(&self) -> Duration {
        (1..self.max_attempts)
            .map(|attempt| self.backoff_after(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

/// Per-call retry state. Lives for a single `send` and is then dropped.
#[derive(Debug)]
pub(crate) struct Backoff {
    policy: RetryPolicy,
    attempt: u32,
}

impl Backoff {
    pub(crate) fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            attempt: 1,
        }
    }

    /// Current attempt number (1-based).
    pub(crate) fn attempt(&self) -> u32 {
        self.attempt
    }

    pub(crate) fn is_last_attempt(&self) -> bool {
        self.attempt >= self.policy.max_attempts
    }

    /// Advances to the next attempt and returns how long to wait first.
    pub(crate) fn advance(&mut self) -> Duration {
        let wait = self.policy.backoff_after(self.attempt);
        self.attempt += 1;
        wait
    }
}
