//! Retry mechanism with exponential backoff

use super::types::RetryConfig;
use std::time::Duration;
use tracing::{debug, error};

/// Final value of a retried call together with the number of attempts made
#[derive(Debug)]
pub struct RetryOutcome<T> {
    pub value: T,
    pub attempts: u32,
}

/// Retry mechanism with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute a function with retry logic, retrying every error
    pub async fn call<F, Fut, R, E>(&self, f: F) -> std::result::Result<R, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<R, E>>,
        E: std::fmt::Display + std::fmt::Debug,
    {
        self.call_if(|_| true, f)
            .await
            .map(|outcome| outcome.value)
            .map_err(|outcome| outcome.value)
    }

    /// Execute a function with retry logic, retrying only errors accepted by `should_retry`.
    ///
    /// Errors rejected by `should_retry` are returned after the attempt that produced them.
    pub async fn call_if<P, F, Fut, R, E>(
        &self,
        should_retry: P,
        mut f: F,
    ) -> std::result::Result<RetryOutcome<R>, RetryOutcome<E>>
    where
        P: Fn(&E) -> bool,
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<R, E>>,
        E: std::fmt::Display + std::fmt::Debug,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match f().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!("Retry succeeded on attempt {}", attempt);
                    }
                    return Ok(RetryOutcome {
                        value,
                        attempts: attempt,
                    });
                }
                Err(err) => {
                    if !should_retry(&err) {
                        debug!("Attempt {} failed with non-retryable error: {}", attempt, err);
                        return Err(RetryOutcome {
                            value: err,
                            attempts: attempt,
                        });
                    }

                    if attempt >= self.config.max_attempts {
                        error!("Retry failed after {} attempts: {}", attempt, err);
                        return Err(RetryOutcome {
                            value: err,
                            attempts: attempt,
                        });
                    }

                    let delay = self.jittered(self.config.delay_for_attempt(attempt));
                    debug!(
                        "Attempt {} failed: {}, retrying in {:?}",
                        attempt, err, delay
                    );

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    fn jittered(&self, delay: Duration) -> Duration {
        if !self.config.jitter {
            return delay;
        }
        let jitter_factor = 0.1;
        let jitter = delay.as_millis() as f64 * jitter_factor * (rand::random::<f64>() - 0.5);
        Duration::from_millis((delay.as_millis() as f64 + jitter).max(0.0) as u64)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}
