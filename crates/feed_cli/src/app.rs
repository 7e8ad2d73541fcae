use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use local_store::{store_root, FileKeyValueStore, LocalStore};
use search_api::{LocalIndex, SearchApiClient, SearchApiConfig, SearchBackend};
use thinking_feed::EnvConfig;
use time::OffsetDateTime;

use crate::cli::{Cli, Command};
use crate::search::{print_report, run_search, suggestions, update_preferences};
use crate::watch::run_watch;

pub async fn run(cli: Cli, env: EnvConfig) -> Result<()> {
    let store = LocalStore::new(FileKeyValueStore::new(resolve_store_dir(cli.store_dir)?));
    let mut stdout = io::stdout();

    match cli.command {
        Command::Watch(args) => run_watch(&args, &env).await,
        Command::Search(args) => {
            let backend = backend_for(args.local, args.backend_url.as_deref(), &env)?;
            let report =
                run_search(&args, backend.as_ref(), &store, OffsetDateTime::now_utc()).await?;
            print_report(&mut stdout, &report)
        }
        Command::Suggest {
            query,
            local,
            backend_url,
        } => {
            let backend = backend_for(local, backend_url.as_deref(), &env)?;
            for suggestion in suggestions(&query, backend.as_ref(), &store).await? {
                writeln!(stdout, "{suggestion}")?;
            }
            Ok(())
        }
        Command::Recent { clear } => {
            if clear {
                store.clear_recent_searches()?;
                return Ok(());
            }
            print_numbered(&mut stdout, &store.recent_searches()?)
        }
        Command::Saved { toggle } => {
            if let Some(query) = toggle {
                let saved = store.toggle_saved_search(&query)?;
                let verb = if saved { "saved" } else { "removed" };
                writeln!(stdout, "{verb}: {query}")?;
            }
            print_numbered(&mut stdout, &store.saved_searches()?)
        }
        Command::Prefs { set } => {
            let preferences = update_preferences(&store, &set)?;
            for (name, value) in preferences.entries() {
                writeln!(stdout, "{name} = {value}")?;
            }
            Ok(())
        }
    }
}

fn backend_for(
    local: bool,
    backend_url: Option<&str>,
    env: &EnvConfig,
) -> Result<Box<dyn SearchBackend>> {
    if local {
        return Ok(Box::new(LocalIndex::sample(OffsetDateTime::now_utc())));
    }

    let base_url = backend_url.unwrap_or(&env.backend_url);
    let client = SearchApiClient::new(SearchApiConfig::new(base_url))
        .with_context(|| format!("creating search client for {base_url}"))?;
    Ok(Box::new(client))
}

fn resolve_store_dir(configured: Option<PathBuf>) -> Result<PathBuf> {
    match configured {
        Some(dir) => Ok(dir),
        None => {
            let cwd = std::env::current_dir().context("resolving current directory")?;
            Ok(store_root(&cwd))
        }
    }
}

fn print_numbered(out: &mut impl Write, items: &[String]) -> Result<()> {
    if items.is_empty() {
        writeln!(out, "(none)")?;
    }
    for (index, item) in items.iter().enumerate() {
        writeln!(out, "{:>3}. {item}", index + 1)?;
    }
    Ok(())
}
