use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use search_api::SortOrder;
use thinking_feed::config::DEFAULT_COALESCE_GRACE;
use thinking_feed::{EnvConfig, ManagerOptions, SessionPolicy};

pub const STORE_DIR_ENV: &str = "THINKING_FEED_STORE_DIR";

#[derive(Debug, Parser)]
#[command(
    name = "thinking-feed",
    author,
    version,
    about = "Watch a live AI thinking feed, browse its archived sessions, and search past results."
)]
pub struct Cli {
    /// Tracing filter; overrides THINKING_FEED_LOG
    #[arg(long, global = true, value_name = "FILTER")]
    pub log: Option<String>,

    /// Directory holding recent searches, saved searches and preferences
    #[arg(long, global = true, value_name = "DIR", env = STORE_DIR_ENV)]
    pub store_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Stream the live panel and accept slash commands on stdin
    Watch(WatchArgs),

    /// Run a search against the backend or the local index
    Search(SearchArgs),

    /// Show query suggestions
    Suggest {
        query: String,

        /// Use the built-in suggestion list instead of the backend
        #[arg(long)]
        local: bool,

        #[arg(long, value_name = "URL")]
        backend_url: Option<String>,
    },

    /// List recent searches
    Recent {
        /// Forget all recent searches
        #[arg(long)]
        clear: bool,
    },

    /// List saved searches
    Saved {
        /// Save the query, or unsave it if already saved
        #[arg(long, value_name = "QUERY")]
        toggle: Option<String>,
    },

    /// Show or change preferences
    Prefs {
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Fragment,
    Coalesce,
}

#[derive(Debug, Clone, Args)]
pub struct WatchArgs {
    /// Feed endpoint; `ws://` is assumed when no scheme is given
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Delay before each reconnect attempt
    #[arg(long, value_name = "MS")]
    pub reconnect_ms: Option<u64>,

    /// What a disconnect does to the live session
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Grace period for `--policy coalesce`
    #[arg(long, value_name = "MS")]
    pub coalesce_ms: Option<u64>,

    /// Print lines as transcript markup instead of raw text
    #[arg(long)]
    pub markup: bool,

    /// Where `/export` writes transcripts
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub export_dir: PathBuf,
}

impl WatchArgs {
    pub fn endpoint(&self, env: &EnvConfig) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| env.endpoint.clone())
    }

    /// Flags win over the environment.
    pub fn manager_options(&self, env: &EnvConfig) -> ManagerOptions {
        let env_grace = match env.session_policy {
            SessionPolicy::Coalesce { grace } => grace,
            SessionPolicy::Fragment => DEFAULT_COALESCE_GRACE,
        };
        let grace = self
            .coalesce_ms
            .map(Duration::from_millis)
            .unwrap_or(env_grace);

        let policy = match (self.policy, env.session_policy) {
            (Some(PolicyArg::Fragment), _) => SessionPolicy::Fragment,
            (Some(PolicyArg::Coalesce), _) | (None, SessionPolicy::Coalesce { .. }) => {
                SessionPolicy::Coalesce { grace }
            }
            (None, SessionPolicy::Fragment) => SessionPolicy::Fragment,
        };

        ManagerOptions {
            reconnect_delay: self
                .reconnect_ms
                .map(Duration::from_millis)
                .unwrap_or(env.reconnect_delay),
            policy,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    pub query: String,

    /// Result type: all, document, image, video or audio
    #[arg(long = "type", default_value = "all")]
    pub search_type: String,

    /// Filter such as `video` or `Size:10`; repeatable
    #[arg(long = "filter", value_name = "FILTER")]
    pub filters: Vec<String>,

    /// relevance, date or size
    #[arg(long, default_value = "relevance")]
    pub sort: SortOrder,

    /// Fetch pages 1 through N
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Search the built-in sample index instead of the backend
    #[arg(long)]
    pub local: bool,

    /// Also write the results as CSV into this directory
    #[arg(long, value_name = "DIR")]
    pub csv: Option<PathBuf>,

    #[arg(long, value_name = "URL")]
    pub backend_url: Option<String>,
}
