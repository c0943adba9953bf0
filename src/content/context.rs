//! Deadline handling for content fetches.

use std::time::{Duration, Instant};

use crate::error::{PrGuardError, Result};

/// Context passed to every content fetch.
///
/// Carries an optional deadline. A fetch must not start once the deadline
/// has passed, and network calls bound their timeout by the time left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchContext {
    deadline: Option<Instant>,
}

impl FetchContext {
    /// A context without a deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    /// A context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// The deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left until the deadline; `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Whether the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.remaining().is_some_and(|left| left.is_zero())
    }

    /// Fail with [`PrGuardError::DeadlineExceeded`] once the deadline passed.
    pub fn ensure_time_left(&self) -> Result<()> {
        if self.is_expired() {
            return Err(PrGuardError::DeadlineExceeded);
        }
        Ok(())
    }

    /// Bound a request timeout by the time left.
    pub fn bound(&self, timeout: Duration) -> Duration {
        match self.remaining() {
            Some(left) => timeout.min(left),
            None => timeout,
        }
    }
}
