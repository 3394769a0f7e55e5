use std::time::Duration;

use anyhow::{Context, Result};

use crate::api_client::DEFAULT_BASE_URL;

/// Client configuration loaded from environment variables.
/// Every value has a default; malformed numbers fail at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub cache_window: Duration,
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            api_base_url: lookup("API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            cache_window: Duration::from_millis(
                parse_or(&lookup, "CACHE_WINDOW_MS", 1000)
                    .context("CACHE_WINDOW_MS must be a whole number of milliseconds")?,
            ),
            request_timeout: Duration::from_secs(
                parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)
                    .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("Invalid value '{raw}' for {key}")),
        None => Ok(default),
    }
}
