//! Tracing subscriber setup shared by the binaries.
//!
//! Filter precedence: `RUST_LOG`, then the configured filter (usually
//! `THINKING_FEED_LOG`), then [`DEFAULT_LOG_FILTER`]. Output goes to stderr so
//! transcript output on stdout stays clean.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str =
    "thinking_feed=info,feed_transport=info,search_api=info,local_store=info";

/// Resolves the effective filter directive without installing anything.
pub fn resolve_filter(configured: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = configured
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_LOG_FILTER);
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    })
}

/// Installs the global subscriber. Returns `false` when one was already set.
pub fn init_logging(configured: Option<&str>) -> bool {
    tracing_subscriber::registry()
        .with(resolve_filter(configured))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
