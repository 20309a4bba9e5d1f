//! Bounded retry with exponential backoff.
//!
//! The policy is split into a pure [`RetryPolicy::step`] transition and a
//! driver loop ([`RetryPolicy::run`]) that performs the waits.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::GroundedError;

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Wait before the second attempt.
    pub initial_backoff: Duration,
    /// Factor applied to the wait after every retry.
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(1000),
            multiplier: 2,
        }
    }
}

/// Transition out of one attempt.
#[derive(Debug)]
pub enum Step<T> {
    Done(T),
    RetryAfter {
        delay: Duration,
        error: GroundedError,
    },
    Fail(GroundedError),
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Decide what follows attempt number `attempt` (1-based), whose pending
    /// backoff is `delay`.
    pub fn step<T>(
        &self,
        attempt: u32,
        delay: Duration,
        outcome: Result<T, GroundedError>,
    ) -> Step<T> {
        match outcome {
            Ok(value) => Step::Done(value),
            Err(error) if error.is_retryable() && attempt < self.max_attempts.max(1) => {
                Step::RetryAfter { delay, error }
            }
            Err(e) => Step::Fail(e),
        }
    }

    /// Backoff to use after waiting `delay`.
    pub fn next_delay(&self, delay: Duration) -> Duration {
        delay.saturating_mul(self.multiplier)
    }

    /// Sum of all waits when every attempt fails with a retryable error.
    pub fn total_backoff(&self) -> Duration {
        let mut total = Duration::ZERO;
        let mut delay = self.initial_backoff;
        for _ in 1..self.max_attempts.max(1) {
            total = total.saturating_add(delay);
            delay = self.next_delay(delay);
        }
        total
    }

    /// Execute an async operation with retry.
    pub async fn execute<F, Fut, T>(&self, operation: F) -> Result<T, GroundedError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, GroundedError>>,
    {
        self.run(&CancellationToken::new(), operation).await
    }

    /// Execute with retry, aborting when `cancel` fires.
    ///
    /// Cancellation is observed before each attempt, while an attempt is in
    /// flight, and during backoff waits. `operation` receives the 1-based
    /// attempt number.
    pub async fn run<F, Fut, T>(
        &self,
        cancel: &CancellationToken,
        mut operation: F,
    ) -> Result<T, GroundedError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, GroundedError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut delay = self.initial_backoff;
        let mut attempt = 1;

        loop {
            if cancel.is_cancelled() {
                return Err(GroundedError::Cancelled);
            }

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(GroundedError::Cancelled),
                outcome = operation(attempt) => outcome,
            };

            match self.step(attempt, delay, outcome) {
                Step::Done(value) => return Ok(value),
                Step::Fail(e) => return Err(e),
                Step::RetryAfter { delay: wait, error } => {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        delay_ms = wait.as_millis() as u64,
                        error = %error,
                        "Retrying after transient failure"
                    );

                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(GroundedError::Cancelled),
                        _ = tokio::time::sleep(wait) => {}
                    }

                    delay = self.next_delay(delay);
                    attempt += 1;
                }
            }
        }
    }
}
