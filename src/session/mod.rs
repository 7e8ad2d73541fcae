//! Session lifecycle: implicit start on first line, archival on close.
//!
//! Invariants:
//! - at most one active session;
//! - a session with zero lines is never archived;
//! - archiving is idempotent per [`SessionId`];
//! - archived content is an owned copy and never changes afterwards.

mod history;
mod id;
mod log;

use std::time::Duration;

use time::OffsetDateTime;

pub use history::{ArchivedSession, SessionHistory, SUMMARY_GRAPHEMES};
pub use id::{SessionId, SessionIdSource};
pub use log::{LogEntry, TranscriptLog};

/// What a close does to the active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPolicy {
    /// Every close ends the session.
    #[default]
    Fragment,
    /// A close leaves the session dormant; a line arriving within `grace`
    /// resumes it.
    Coalesce { grace: Duration },
}

impl SessionPolicy {
    pub fn parse(value: &str, grace: Duration) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fragment" => Some(Self::Fragment),
            "coalesce" => Some(Self::Coalesce { grace }),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Fragment => "fragment",
            Self::Coalesce { .. } => "coalesce",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSession {
    pub id: SessionId,
    pub started_at: OffsetDateTime,
    /// Set while a coalescing session waits for its connection to come back.
    pub dormant_since: Option<OffsetDateTime>,
}

impl ActiveSession {
    pub fn is_dormant(&self) -> bool {
        self.dormant_since.is_some()
    }
}

/// Result of recording one incoming line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineOutcome {
    pub session: SessionId,
    pub started: bool,
    pub resumed: bool,
    /// Dormant session archived because its grace period ran out.
    pub archived: Option<SessionId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTracker {
    policy: SessionPolicy,
    ids: SessionIdSource,
    log: TranscriptLog,
    active: Option<ActiveSession>,
    history: SessionHistory,
}

impl SessionTracker {
    pub fn new(policy: SessionPolicy) -> Self {
        Self {
            policy,
            ids: SessionIdSource::default(),
            log: TranscriptLog::default(),
            active: None,
            history: SessionHistory::default(),
        }
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    pub fn log(&self) -> &TranscriptLog {
        &self.log
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn active_lines(&self) -> Vec<&str> {
        match self.active {
            Some(active) => self.log.lines_for(active.id).collect(),
            None => Vec::new(),
        }
    }

    pub fn record(&mut self, line: impl Into<String>, now: OffsetDateTime) -> LineOutcome {
        let mut archived = None;
        let mut resumed = false;

        if let Some(active) = self.active.as_mut() {
            if let Some(since) = active.dormant_since {
                if within_grace(self.policy, since, now) {
                    active.dormant_since = None;
                    resumed = true;
                } else {
                    archived = self.archive_active(now);
                }
            }
        }

        let started = self.active.is_none();
        let session = match self.active {
            Some(active) => active.id,
            None => {
                let id = self.ids.next(now);
                self.active = Some(ActiveSession {
                    id,
                    started_at: now,
                    dormant_since: None,
                });
                tracing::debug!(session = %id, "session started");
                id
            }
        };
        self.log.push(session, line);

        LineOutcome {
            session,
            started,
            resumed,
            archived,
        }
    }

    /// Connection closed. Archives under [`SessionPolicy::Fragment`]; marks the
    /// session dormant under [`SessionPolicy::Coalesce`].
    pub fn close(&mut self, now: OffsetDateTime) -> Option<SessionId> {
        match self.policy {
            SessionPolicy::Fragment => self.archive_active(now),
            SessionPolicy::Coalesce { .. } => {
                if let Some(active) = self.active.as_mut() {
                    if active.dormant_since.is_none() {
                        active.dormant_since = Some(now);
                    }
                }
                None
            }
        }
    }

    /// Archives the active session regardless of policy.
    pub fn finish(&mut self, now: OffsetDateTime) -> Option<SessionId> {
        self.archive_active(now)
    }

    /// Archives a dormant session whose grace period has elapsed.
    pub fn expire_dormant(&mut self, now: OffsetDateTime) -> Option<SessionId> {
        let since = self.active.and_then(|active| active.dormant_since)?;
        if within_grace(self.policy, since, now) {
            return None;
        }
        self.archive_active(now)
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn archive_active(&mut self, now: OffsetDateTime) -> Option<SessionId> {
        let active = self.active.take()?;
        let lines: Vec<&str> = self.log.lines_for(active.id).collect();
        if lines.is_empty() {
            tracing::debug!(session = %active.id, "empty session dropped");
            return None;
        }

        let content = lines.join("\n");
        if !self.history.archive(active.id, now, content) {
            return None;
        }

        tracing::info!(session = %active.id, lines = lines.len(), "session archived");
        Some(active.id)
    }
}

fn within_grace(policy: SessionPolicy, since: OffsetDateTime, now: OffsetDateTime) -> bool {
    let SessionPolicy::Coalesce { grace } = policy else {
        return false;
    };
    let grace = time::Duration::try_from(grace).unwrap_or(time::Duration::MAX);
    now - since <= grace
}
