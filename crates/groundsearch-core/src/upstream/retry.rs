//! Retry strategy for transient model API failures.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// Status codes worth another attempt.
pub const RETRYABLE_STATUS_CODES: &[u16] = &[429, 500, 502, 503, 504, 529];

/// Upper bound for any single backoff sleep.
const MAX_BACKOFF_MS: u64 = 10_000;

/// Strategy for retrying failed upstream requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryStrategy {
    /// Do not retry.
    NoRetry,
    /// Retry after a fixed delay (server-provided `retryDelay`).
    FixedDelay(Duration),
    /// Retry with exponentially increasing delay.
    ExponentialBackoff {
        /// Base delay in milliseconds.
        base_ms: u64,
        /// Maximum delay in milliseconds.
        max_ms: u64,
    },
}

/// Pick a strategy for a failed attempt. `status_code` is `None` for
/// transport errors (connect reset, DNS, per-attempt timeout).
pub fn determine_retry_strategy(
    status_code: Option<u16>,
    error_text: &str,
    base_ms: u64,
) -> RetryStrategy {
    match status_code {
        None => RetryStrategy::ExponentialBackoff { base_ms, max_ms: MAX_BACKOFF_MS },
        Some(429) => match parse_retry_delay(error_text) {
            Some(delay_ms) => RetryStrategy::FixedDelay(Duration::from_millis(
                delay_ms.saturating_add(200).min(MAX_BACKOFF_MS),
            )),
            None => RetryStrategy::ExponentialBackoff { base_ms, max_ms: MAX_BACKOFF_MS },
        },
        Some(code) if RETRYABLE_STATUS_CODES.contains(&code) => {
            RetryStrategy::ExponentialBackoff { base_ms, max_ms: MAX_BACKOFF_MS }
        },
        Some(_) => RetryStrategy::NoRetry,
    }
}

/// Sleep according to `strategy`. Returns `false` when the caller should stop.
pub async fn apply_retry_strategy(
    strategy: &RetryStrategy,
    attempt: u32,
    max_retries: u32,
    trace_id: &str,
) -> bool {
    match strategy {
        RetryStrategy::NoRetry => {
            debug!("[{}] Non-retryable upstream failure, stopping", trace_id);
            false
        },
        RetryStrategy::FixedDelay(duration) => {
            info!(
                "[{}] Retry with fixed delay: attempt={}/{}, delay={}ms",
                trace_id,
                attempt + 1,
                max_retries,
                duration.as_millis()
            );
            sleep(*duration).await;
            true
        },
        RetryStrategy::ExponentialBackoff { base_ms, max_ms } => {
            let delay_ms = base_ms.saturating_mul(2_u64.saturating_pow(attempt)).min(*max_ms);
            info!(
                "[{}] Retry with exponential backoff: attempt={}/{}, delay={}ms",
                trace_id,
                attempt + 1,
                max_retries,
                delay_ms
            );
            sleep(Duration::from_millis(delay_ms)).await;
            true
        },
    }
}

/// Extract `retryDelay` (e.g. `"12s"`, `"0.5s"`) from a Google RPC error body,
/// in milliseconds.
pub fn parse_retry_delay(error_text: &str) -> Option<u64> {
    let body: serde_json::Value = serde_json::from_str(error_text).ok()?;
    let details = body.get("error")?.get("details")?.as_array()?;
    details.iter().find_map(|detail| {
        let raw = detail.get("retryDelay")?.as_str()?;
        let secs: f64 = raw.strip_suffix('s')?.parse().ok()?;
        if secs.is_finite() && secs >= 0.0 {
            Some((secs * 1000.0).round() as u64)
        } else {
            None
        }
    })
}
