//! Upstream error sanitization: keeps API keys, project identifiers and raw
//! Google error payloads out of client-facing messages.
//!
//! Pattern: log the raw error server-side, return only an opaque message
//! with the HTTP status code to the client.

/// Client-safe message for a non-success model API response.
pub fn sanitize_upstream_error(status_code: u16, raw_text: &str) -> String {
    match classify_error(status_code, raw_text) {
        ErrorCategory::RateLimited => format!("Model API rate limited (HTTP {})", status_code),
        ErrorCategory::QuotaExhausted => format!("Model API quota exhausted (HTTP {})", status_code),
        ErrorCategory::Unauthorized => {
            format!("Model API rejected credentials (HTTP {})", status_code)
        },
        ErrorCategory::ModelNotFound => format!("Model not available (HTTP {})", status_code),
        ErrorCategory::InvalidRequest => format!("Model API rejected request (HTTP {})", status_code),
        ErrorCategory::ServerError => format!("Upstream server error (HTTP {})", status_code),
        ErrorCategory::Unknown => format!("Upstream error (HTTP {})", status_code),
    }
}

enum ErrorCategory {
    RateLimited,
    QuotaExhausted,
    Unauthorized,
    ModelNotFound,
    InvalidRequest,
    ServerError,
    Unknown,
}

fn classify_error(status_code: u16, raw_text: &str) -> ErrorCategory {
    match status_code {
        429 | 529 => {
            if raw_text.contains("quota") || raw_text.contains("QUOTA") {
                ErrorCategory::QuotaExhausted
            } else {
                ErrorCategory::RateLimited
            }
        },
        401 | 403 => ErrorCategory::Unauthorized,
        400 if raw_text.contains("API_KEY_INVALID") || raw_text.contains("API key not valid") => {
            ErrorCategory::Unauthorized
        },
        400 => ErrorCategory::InvalidRequest,
        404 => ErrorCategory::ModelNotFound,
        500..=599 => ErrorCategory::ServerError,
        _ => ErrorCategory::Unknown,
    }
}
