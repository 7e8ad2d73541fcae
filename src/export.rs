use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use time::format_description::well_known::Iso8601;
use time::{Date, OffsetDateTime, UtcOffset};

pub const TRANSCRIPT_FILE_PREFIX: &str = "ai-transcript-";

/// `YYYY-MM-DD` for file names.
pub fn iso_date(date: Date) -> String {
    date.format(&Iso8601::DATE).unwrap_or_else(|_| date.to_string())
}

pub fn transcript_file_name(now: OffsetDateTime) -> String {
    let date = now.to_offset(UtcOffset::UTC).date();
    format!("{TRANSCRIPT_FILE_PREFIX}{}.txt", iso_date(date))
}

/// Writes `lines` joined by `\n` to `dir/ai-transcript-YYYY-MM-DD.txt`,
/// replacing an export from the same day.
pub fn write_transcript<S: AsRef<str>>(
    dir: &Path,
    lines: &[S],
    now: OffsetDateTime,
) -> io::Result<PathBuf> {
    let content = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");

    fs::create_dir_all(dir)?;
    let path = dir.join(transcript_file_name(now));
    fs::write(&path, content)?;
    tracing::info!(path = %path.display(), lines = lines.len(), "transcript exported");
    Ok(path)
}
