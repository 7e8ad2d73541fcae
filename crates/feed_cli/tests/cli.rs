use std::time::Duration;

use clap::Parser;
use feed_cli::cli::{Cli, Command, PolicyArg};
use search_api::SortOrder;
use thinking_feed::{EnvConfig, SessionPolicy};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("arguments should parse")
}

#[test]
fn watch_flags_override_environment() {
    let cli = parse(&[
        "thinking-feed",
        "watch",
        "--endpoint",
        "localhost:9000",
        "--reconnect-ms",
        "250",
        "--policy",
        "coalesce",
        "--coalesce-ms",
        "1500",
        "--markup",
    ]);
    let Command::Watch(args) = cli.command else {
        panic!("expected watch");
    };

    assert_eq!(args.policy, Some(PolicyArg::Coalesce));
    assert!(args.markup);
    let env = EnvConfig::default();
    assert_eq!(args.endpoint(&env), "localhost:9000");
    let options = args.manager_options(&env);
    assert_eq!(options.reconnect_delay, Duration::from_millis(250));
    assert_eq!(
        options.policy,
        SessionPolicy::Coalesce {
            grace: Duration::from_millis(1500)
        }
    );
}

#[test]
fn watch_without_flags_uses_environment() {
    let Command::Watch(args) = parse(&["thinking-feed", "watch"]).command else {
        panic!("expected watch");
    };
    let env = EnvConfig {
        reconnect_delay: Duration::from_secs(9),
        session_policy: SessionPolicy::Coalesce {
            grace: Duration::from_secs(4),
        },
        ..EnvConfig::default()
    };

    let options = args.manager_options(&env);
    assert_eq!(options.reconnect_delay, Duration::from_secs(9));
    assert_eq!(
        options.policy,
        SessionPolicy::Coalesce {
            grace: Duration::from_secs(4)
        }
    );
    assert_eq!(args.endpoint(&env), "ws://localhost:8765");
}

#[test]
fn fragment_flag_beats_coalesce_environment() {
    let Command::Watch(args) = parse(&["thinking-feed", "watch", "--policy", "fragment"]).command
    else {
        panic!("expected watch");
    };
    let env = EnvConfig {
        session_policy: SessionPolicy::Coalesce {
            grace: Duration::from_secs(4),
        },
        ..EnvConfig::default()
    };
    assert_eq!(args.manager_options(&env).policy, SessionPolicy::Fragment);
}

#[test]
fn search_collects_repeated_filters() {
    let cli = parse(&[
        "thinking-feed",
        "search",
        "neural nets",
        "--filter",
        "video",
        "--filter",
        "Size:10",
        "--sort",
        "date",
        "--page",
        "2",
        "--local",
    ]);
    let Command::Search(args) = cli.command else {
        panic!("expected search");
    };

    assert_eq!(args.query, "neural nets");
    assert_eq!(args.search_type, "all");
    assert_eq!(args.filters, vec!["video", "Size:10"]);
    assert_eq!(args.sort, SortOrder::Date);
    assert_eq!(args.page, 2);
    assert!(args.local);
}

#[test]
fn search_rejects_page_zero_and_unknown_sort() {
    assert!(Cli::try_parse_from(["thinking-feed", "search", "q", "--page", "0"]).is_err());
    assert!(Cli::try_parse_from(["thinking-feed", "search", "q", "--sort", "newest"]).is_err());
}

#[test]
fn prefs_accepts_repeated_assignments() {
    let cli = parse(&[
        "thinking-feed",
        "--store-dir",
        "/tmp/feed-store",
        "prefs",
        "--set",
        "theme=dark",
        "--set",
        "saveHistory=false",
    ]);
    assert_eq!(
        cli.store_dir.as_deref(),
        Some(std::path::Path::new("/tmp/feed-store"))
    );
    let Command::Prefs { set } = cli.command else {
        panic!("expected prefs");
    };
    assert_eq!(set, vec!["theme=dark", "saveHistory=false"]);
}
