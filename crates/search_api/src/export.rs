use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use time::format_description::well_known::Iso8601;
use time::{OffsetDateTime, UtcOffset};

use crate::results::SearchResult;

pub const RESULTS_FILE_PREFIX: &str = "search-results-";

/// One `title,type,size,date` row per result, joined by `\n`. Fields are
/// written as-is.
pub fn results_csv(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|result| {
            format!(
                "{},{},{},{}",
                result.title, result.kind, result.size, result.date
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn results_file_name(now: OffsetDateTime) -> String {
    let date = now.to_offset(UtcOffset::UTC).date();
    let day = date.format(&Iso8601::DATE).unwrap_or_else(|_| date.to_string());
    format!("{RESULTS_FILE_PREFIX}{day}.csv")
}

pub fn write_results_csv(
    dir: &Path,
    results: &[SearchResult],
    now: OffsetDateTime,
) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(results_file_name(now));
    fs::write(&path, results_csv(results))?;
    tracing::info!(path = %path.display(), rows = results.len(), "search results exported");
    Ok(path)
}
