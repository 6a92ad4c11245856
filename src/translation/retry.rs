/*!
 * Fixed-delay retry policy for backend calls.
 *
 * An operation is attempted once and then retried up to `max_retries` more
 * times, sleeping `delay` before each retry. The sleep is an async
 * suspension point, so other in-flight batches keep running.
 */

use log::warn;
use std::future::Future;
use std::time::Duration;

use crate::errors::ProviderError;

/// Retry settings shared by every backend call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure
    pub max_retries: u32,
    /// Delay before each retry
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Create a policy
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Total number of attempts this policy allows
    pub fn attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Run `operation` until it succeeds or the attempts are exhausted
    ///
    /// Returns the last error when every attempt failed.
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    if attempt >= self.max_retries {
                        warn!("{} failed after {} attempt(s): {}", label, attempt + 1, e);
                        return Err(e);
                    }
                    attempt += 1;
                    warn!(
                        "{} failed (attempt {}/{}): {}; retrying in {:?}",
                        label,
                        attempt,
                        self.attempts(),
                        e,
                        self.delay
                    );
                    tokio::time::sleep(self.delay).await;
                }
            }
        }
    }
}
