//! Retry with exponential backoff for transient Reddit errors.
//!
//! Reddit answers bursts with 429 and occasionally with 5xx from its edge.
//! Those are retried; everything else (parse failures, 403s, bad tokens)
//! is propagated on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Returns `true` if `err` is worth another attempt after a delay.
fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } | ScraperError::Http(_) => true,
        ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Runs `operation`, retrying retriable errors up to `max_retries` times.
///
/// The delay before retry `k` (1-based) is `backoff_base_secs * 2^(k-1)`
/// seconds, so with `max_retries = 3` and a base of 2 the operation runs at
/// most four times with sleeps of 2, 4 and 8 seconds. A [`ScraperError::RateLimited`]
/// carrying a longer `Retry-After` than the computed delay waits that long
/// instead.
///
/// With `max_retries = 0` the first error is returned as is.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let mut delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        if let ScraperError::RateLimited {
            retry_after_secs, ..
        } = &err
        {
            delay_secs = delay_secs.max(*retry_after_secs);
        }
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient reddit error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
