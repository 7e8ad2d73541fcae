//! Environment configuration.

use std::env;
use std::time::Duration;

use crate::session::SessionPolicy;

pub const ENDPOINT_ENV: &str = "THINKING_FEED_ENDPOINT";
pub const RECONNECT_MS_ENV: &str = "THINKING_FEED_RECONNECT_MS";
pub const SESSION_POLICY_ENV: &str = "THINKING_FEED_SESSION_POLICY";
pub const COALESCE_MS_ENV: &str = "THINKING_FEED_COALESCE_MS";
pub const BACKEND_URL_ENV: &str = "THINKING_FEED_BACKEND_URL";
pub const LOG_ENV: &str = "THINKING_FEED_LOG";

pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8765";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:4400";
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_millis(5000);
pub const DEFAULT_COALESCE_GRACE: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub endpoint: String,
    pub reconnect_delay: Duration,
    pub session_policy: SessionPolicy,
    pub backend_url: String,
    pub log_filter: Option<String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            session_policy: SessionPolicy::Fragment,
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            log_filter: None,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        let coalesce_grace = env_millis(COALESCE_MS_ENV).unwrap_or(DEFAULT_COALESCE_GRACE);
        let session_policy = env_string_opt(SESSION_POLICY_ENV)
            .and_then(|value| SessionPolicy::parse(&value, coalesce_grace))
            .unwrap_or(SessionPolicy::Fragment);

        Self {
            endpoint: env_string_opt(ENDPOINT_ENV).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            reconnect_delay: env_millis(RECONNECT_MS_ENV).unwrap_or(DEFAULT_RECONNECT_DELAY),
            session_policy,
            backend_url: env_string_opt(BACKEND_URL_ENV)
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            log_filter: env_string_opt(LOG_ENV),
        }
    }
}

fn env_millis(key: &str) -> Option<Duration> {
    env_string_opt(key)
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
