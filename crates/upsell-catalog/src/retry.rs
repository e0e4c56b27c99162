//! Retry with exponential back-off and jitter for catalog searches.
//!
//! [`retry_with_backoff`] wraps a fallible async operation and retries on
//! transient errors. With `max_retries = 0` (the default configuration) a
//! failed search is reported immediately and the user re-triggers it.

use std::future::Future;
use std::time::Duration;

use crate::error::CatalogError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - [`CatalogError::RateLimited`]: HTTP 429.
/// - [`CatalogError::UnexpectedStatus`] with a 5xx status.
/// - [`CatalogError::Http`] timeouts and connection failures.
///
/// **Not retriable:** bad credentials, 4xx statuses, malformed bodies and
/// configuration errors. Retrying would return the same result.
pub(crate) fn is_retriable(err: &CatalogError) -> bool {
    match err {
        CatalogError::RateLimited { .. } => true,
        CatalogError::UnexpectedStatus { status, .. } => *status >= 500,
        CatalogError::Http(e) => e.is_timeout() || e.is_connect(),
        CatalogError::Unauthorized { .. }
        | CatalogError::Deserialize { .. }
        | CatalogError::Config(_)
        | CatalogError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 500`:
///
/// | Attempt | Sleep before next attempt    |
/// |---------|------------------------------|
/// | 1       | 500 ms × 2⁰ ± 25 % jitter    |
/// | 2       | 500 ms × 2¹ ± 25 % jitter    |
/// | 3       | 500 ms × 2² ± 25 % jitter    |
///
/// Delay is capped at 30 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    const MAX_DELAY_MS: u64 = 30_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "catalog search failed transiently, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
