//! Bounded retry with exponential backoff for provider calls.
//!
//! Only [`GeoError::Unavailable`] is retried; [`GeoError::NotFound`]
//! is a definitive answer and is returned immediately. Callers wrap
//! individual provider calls with [`with_retry`] and keep their own
//! policy for what happens once the attempt budget is exhausted.

use std::future::Future;
use std::time::Duration;

use crate::provider::GeoError;

/// Tunable parameters for the backoff strategy.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            multiplier: 2.0,
        }
    }
}

/// Calculate the next backoff delay, clamped to [`RetryConfig::max_delay`].
pub fn next_delay(current: Duration, config: &RetryConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

/// Run `operation` until it succeeds, fails with a non-retryable
/// error, or the attempt budget is spent.
///
/// The closure is invoked fresh per attempt. The final error (always
/// [`GeoError::Unavailable`] when the budget runs out) is returned
/// unchanged so callers can still classify it.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, mut operation: F) -> Result<T, GeoError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GeoError>>,
{
    let mut delay = config.initial_delay;
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < config.max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Geo provider unavailable, retrying",
                );
                tokio::time::sleep(delay).await;
                delay = next_delay(delay, config);
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn next_delay_doubles() {
        let config = RetryConfig::default();
        let d = next_delay(Duration::from_secs(1), &config);
        assert_eq!(d, Duration::from_secs(2));
    }

    #[test]
    fn next_delay_clamps_at_max() {
        let config = RetryConfig {
            max_delay: Duration::from_secs(10),
            ..Default::default()
        };
        let d = next_delay(Duration::from_secs(8), &config);
        assert_eq!(d, Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn retries_unavailable_until_budget_spent() {
        let config = RetryConfig {
            max_attempts: 3,
            ..Default::default()
        };
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_retry(&config, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(GeoError::Unavailable("down".into())) }
        })
        .await;

        assert_matches!(result, Err(GeoError::Unavailable(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn not_found_is_never_retried() {
        let config = RetryConfig::default();
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = with_retry(&config, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(GeoError::NotFound("no route".into())) }
        })
        .await;

        assert_matches!(result, Err(GeoError::NotFound(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_transient_failure() {
        let config = RetryConfig::default();
        let calls = AtomicU32::new(0);

        let result = with_retry(&config, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(GeoError::Unavailable("blip".into()))
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
