use std::time::Duration;

/// Build the HTTP client used for model calls.
///
/// `timeout_secs` bounds a single HTTP attempt; the service applies its own
/// deadline over the whole turn, retries included.
pub fn build_http_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(timeout_secs.max(5)))
        .tcp_nodelay(true)
        .build()
}
