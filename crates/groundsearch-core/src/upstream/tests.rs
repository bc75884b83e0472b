use groundsearch_types::{ConfigError, ModelConfig};

use super::gemini::{build_generate_url, error_chain};
use super::build_http_client;
use super::GeminiModel;

#[test]
fn test_build_generate_url() {
    assert_eq!(
        build_generate_url("https://generativelanguage.googleapis.com/v1beta", "gemini-2.0-flash-exp"),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-exp:generateContent"
    );
    assert_eq!(
        build_generate_url("http://127.0.0.1:9000/v1beta/", "m"),
        "http://127.0.0.1:9000/v1beta/models/m:generateContent"
    );
}

#[test]
fn test_missing_api_key_rejected() {
    let config = ModelConfig::default();
    match GeminiModel::new(reqwest::Client::new(), &config) {
        Err(ConfigError::MissingApiKey) => {},
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("model built without an API key"),
    }
}

#[test]
fn test_invalid_base_url_rejected() {
    let config = ModelConfig {
        api_key: "key".to_string(),
        base_url: "not a url".to_string(),
        ..ModelConfig::default()
    };
    assert!(matches!(
        GeminiModel::new(reqwest::Client::new(), &config),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[derive(Debug)]
struct SendError(std::io::Error);

impl std::fmt::Display for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("error sending request")
    }
}

impl std::error::Error for SendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

#[test]
fn test_error_chain_keeps_root_cause() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
    assert_eq!(error_chain(&SendError(io)), "error sending request: Connection refused");

    let plain = std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline elapsed");
    assert_eq!(error_chain(&plain), "deadline elapsed");
}

#[test]
fn test_http_client_builds_with_short_timeout() {
    // sub-5s timeouts are raised to the floor rather than rejected
    assert!(build_http_client(0).is_ok());
    assert!(build_http_client(60).is_ok());
}
