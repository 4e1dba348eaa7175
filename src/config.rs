use std::env;
use std::time::Duration;

/// Configuration for the remote order API, sourced from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderApiConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for OrderApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl OrderApiConfig {
    /// Reads `ORDER_API_URL` and `ORDER_API_TIMEOUT_SECS`, falling back to
    /// the defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = env::var("ORDER_API_URL").unwrap_or(defaults.base_url);
        let request_timeout = match env::var("ORDER_API_TIMEOUT_SECS") {
            Ok(secs) => Duration::from_secs(
                secs.parse().expect("ORDER_API_TIMEOUT_SECS must be a valid number"),
            ),
            Err(_) => defaults.request_timeout,
        };
        Self { base_url, request_timeout }
    }
}
