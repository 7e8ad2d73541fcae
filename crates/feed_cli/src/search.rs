use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use local_store::{KeyValueStore, LocalStore, UserPreferences};
use search_api::{write_results_csv, SearchBackend, SearchForm, SearchOutcome, SearchResult};
use time::OffsetDateTime;

use crate::cli::SearchArgs;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub results: Vec<SearchResult>,
    pub recorded: bool,
    pub exported: Option<PathBuf>,
}

/// Fetches pages `1..=args.page`, stopping early at an empty page. Records the
/// query in recent searches when history is enabled and writes CSV when asked.
/// A failed page keeps the results gathered so far.
pub async fn run_search<S: KeyValueStore>(
    args: &SearchArgs,
    backend: &dyn SearchBackend,
    store: &LocalStore<S>,
    now: OffsetDateTime,
) -> Result<SearchReport> {
    let mut form = SearchForm::new();
    form.set_query(args.query.clone());
    form.set_search_type(args.search_type.clone());
    for filter in &args.filters {
        form.toggle_filter(filter);
    }
    form.set_sort(args.sort);

    let mut outcome = form.perform(backend).await;
    while form.page() < args.page {
        match outcome {
            SearchOutcome::Loaded { received, .. } if received > 0 => {}
            _ => break,
        }
        form.next_page();
        outcome = form.perform(backend).await;
    }

    let preferences = store.preferences().context("reading preferences")?;
    let recorded = matches!(outcome, SearchOutcome::Loaded { .. })
        && preferences.save_history
        && !args.query.trim().is_empty();
    if recorded {
        store
            .add_recent_search(&args.query)
            .context("recording recent search")?;
    }

    let exported = match &args.csv {
        Some(dir) if !form.results().is_empty() => Some(
            write_results_csv(dir, form.results(), now)
                .with_context(|| format!("writing CSV into {}", dir.display()))?,
        ),
        _ => None,
    };

    Ok(SearchReport {
        outcome,
        results: form.results().to_vec(),
        recorded,
        exported,
    })
}

pub fn print_report(out: &mut impl Write, report: &SearchReport) -> Result<()> {
    for (index, result) in report.results.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {}  [{}] {}  {}",
            index + 1,
            result.title,
            result.kind,
            result.size,
            result.date
        )?;
    }

    match &report.outcome {
        SearchOutcome::Failed(message) => writeln!(out, "search failed: {message}")?,
        SearchOutcome::Cleared => writeln!(out, "nothing to search for")?,
        _ if report.results.is_empty() => writeln!(out, "no results")?,
        _ => {}
    }
    if let Some(path) = &report.exported {
        writeln!(out, "exported {}", path.display())?;
    }
    Ok(())
}

/// Suggestions honour the `searchSuggestions` preference.
pub async fn suggestions<S: KeyValueStore>(
    query: &str,
    backend: &dyn SearchBackend,
    store: &LocalStore<S>,
) -> Result<Vec<String>> {
    if !store.preferences().context("reading preferences")?.search_suggestions {
        return Ok(Vec::new());
    }

    match backend.suggestions(query).await {
        Ok(suggestions) => Ok(suggestions),
        Err(error) => {
            tracing::warn!(%error, "failed to fetch suggestions");
            Ok(Vec::new())
        }
    }
}

/// Applies `key=value` assignments and persists the result.
pub fn update_preferences<S: KeyValueStore>(
    store: &LocalStore<S>,
    assignments: &[String],
) -> Result<UserPreferences> {
    let mut preferences = store.preferences().context("reading preferences")?;
    if assignments.is_empty() {
        return Ok(preferences);
    }

    for assignment in assignments {
        let Some((name, value)) = assignment.split_once('=') else {
            bail!("expected KEY=VALUE, got '{assignment}'");
        };
        preferences.set(name.trim(), value.trim())?;
    }
    store
        .set_preferences(&preferences)
        .context("saving preferences")?;
    Ok(preferences)
}
