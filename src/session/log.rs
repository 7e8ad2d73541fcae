use super::SessionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub session: SessionId,
    pub line: String,
}

/// Ordered `(session, line)` log for one open-panel lifetime.
///
/// The session buffer and the panel-lifetime buffer are both views over this
/// log: [`TranscriptLog::lines_for`] and [`TranscriptLog::all_lines`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TranscriptLog {
    entries: Vec<LogEntry>,
}

impl TranscriptLog {
    pub fn push(&mut self, session: SessionId, line: impl Into<String>) {
        self.entries.push(LogEntry {
            session,
            line: line.into(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lines_for(&self, session: SessionId) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(move |entry| entry.session == session)
            .map(|entry| entry.line.as_str())
    }

    pub fn count_for(&self, session: SessionId) -> usize {
        self.lines_for(session).count()
    }

    pub fn all_lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.line.as_str())
    }

    /// Session of the most recently buffered line.
    pub fn last_session(&self) -> Option<SessionId> {
        self.entries.last().map(|entry| entry.session)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
