//! The live transcript manager.
//!
//! [`TranscriptManager`] is the single owner of connection status, the
//! transcript log, session history and panel flags. Transports feed it
//! [`FeedEvent`]s in delivery order; the display layer reads derived views
//! ([`TranscriptManager::displayed_lines`], [`TranscriptManager::panel`]) and
//! issues user actions (minimize, history, preview, dismiss).

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::config::{EnvConfig, DEFAULT_RECONNECT_DELAY};
use crate::connection::{ConnectionState, ConnectionStatus, FeedEvent, ReconnectPlan};
use crate::export::write_transcript;
use crate::format::format_line;
use crate::panel::{PanelState, PanelView};
use crate::session::{
    ActiveSession, ArchivedSession, SessionHistory, SessionId, SessionPolicy, SessionTracker,
    TranscriptLog,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerOptions {
    pub reconnect_delay: Duration,
    pub policy: SessionPolicy,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            policy: SessionPolicy::Fragment,
        }
    }
}

impl From<&EnvConfig> for ManagerOptions {
    fn from(config: &EnvConfig) -> Self {
        Self {
            reconnect_delay: config.reconnect_delay,
            policy: config.session_policy,
        }
    }
}

/// Observable effects of one [`FeedEvent`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub reconnect: Option<ReconnectPlan>,
    pub started: Option<SessionId>,
    pub archived: Option<SessionId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Preview {
    session: SessionId,
    lines: Vec<String>,
}

pub struct TranscriptManager {
    connection: ConnectionState,
    sessions: SessionTracker,
    panel: PanelState,
    preview: Option<Preview>,
    clock: Box<dyn Clock>,
}

impl Default for TranscriptManager {
    fn default() -> Self {
        Self::new(ManagerOptions::default())
    }
}

impl TranscriptManager {
    pub fn new(options: ManagerOptions) -> Self {
        Self::with_clock(options, SystemClock)
    }

    pub fn with_clock(options: ManagerOptions, clock: impl Clock) -> Self {
        Self {
            connection: ConnectionState::new(options.reconnect_delay),
            sessions: SessionTracker::new(options.policy),
            panel: PanelState::default(),
            preview: None,
            clock: Box::new(clock),
        }
    }

    pub fn handle(&mut self, event: FeedEvent) -> Outcome {
        let mut outcome = Outcome::default();

        match event {
            FeedEvent::Connecting => self.connection.on_connecting(),
            FeedEvent::Opened => self.connection.on_opened(),
            FeedEvent::Error(error) => self.connection.on_error(&error),
            FeedEvent::Message(line) => {
                tracing::trace!(bytes = line.len(), "feed line");
                let recorded = self.sessions.record(line, self.clock.now());
                outcome.archived = recorded.archived;
                if recorded.started {
                    self.preview = None;
                    self.panel.reveal();
                    outcome.started = Some(recorded.session);
                } else if recorded.resumed {
                    tracing::debug!(session = %recorded.session, "session resumed after reconnect");
                }
            }
            FeedEvent::Closed => {
                let now = self.clock.now();
                outcome.archived = if self.connection.is_tearing_down() {
                    self.sessions.finish(now)
                } else {
                    self.sessions.close(now)
                };
                outcome.reconnect = self.connection.on_closed();
            }
        }

        outcome
    }

    /// Stops all future reconnects; the next close archives unconditionally.
    pub fn begin_teardown(&mut self) {
        self.connection.begin_teardown();
    }

    pub fn status(&self) -> ConnectionStatus {
        self.connection.status()
    }

    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    pub fn policy(&self) -> SessionPolicy {
        self.sessions.policy()
    }

    pub fn panel(&self) -> PanelView {
        PanelView::new(
            self.connection.status(),
            self.panel,
            self.sessions.active().map(|active| active.id),
            self.preview.as_ref().map(|preview| preview.session),
            self.sessions.history().len(),
        )
    }

    pub fn active_session(&self) -> Option<&ActiveSession> {
        self.sessions.active()
    }

    pub fn history(&self) -> &SessionHistory {
        self.sessions.history()
    }

    pub fn log(&self) -> &TranscriptLog {
        self.sessions.log()
    }

    /// Lines of the active session only.
    pub fn active_lines(&self) -> Vec<&str> {
        self.sessions.active_lines()
    }

    /// Every line received since the panel was last dismissed.
    pub fn panel_lines(&self) -> Vec<&str> {
        self.sessions.log().all_lines().collect()
    }

    /// Preview if one is shown, else the active session, else the most
    /// recently buffered session.
    pub fn displayed_lines(&self) -> Vec<&str> {
        if let Some(preview) = &self.preview {
            return preview.lines.iter().map(String::as_str).collect();
        }
        if self.sessions.active().is_some() {
            return self.sessions.active_lines();
        }
        match self.sessions.log().last_session() {
            Some(last) => self.sessions.log().lines_for(last).collect(),
            None => Vec::new(),
        }
    }

    pub fn displayed_markup(&self) -> Vec<String> {
        self.displayed_lines().into_iter().map(format_line).collect()
    }

    pub fn toggle_minimized(&mut self) -> bool {
        self.panel.toggle_minimized()
    }

    pub fn toggle_history(&mut self) -> bool {
        self.panel.toggle_history()
    }

    /// Shows an archived session read-only. Returns `false` for unknown ids.
    pub fn view_session(&mut self, id: SessionId) -> bool {
        let Some(entry) = self.sessions.history().get(id) else {
            return false;
        };
        self.preview = Some(preview_of(entry));
        self.panel.hide_history();
        true
    }

    /// Same as [`Self::view_session`], addressed by history position.
    pub fn view_session_at(&mut self, index: usize) -> Option<SessionId> {
        let entry = self.sessions.history().entries().get(index)?;
        let id = entry.id();
        self.preview = Some(preview_of(entry));
        self.panel.hide_history();
        Some(id)
    }

    /// Leaves any preview and the history listing.
    pub fn show_live(&mut self) {
        self.preview = None;
        self.panel.hide_history();
    }

    /// Archives a dormant session whose grace period elapsed.
    pub fn expire_dormant(&mut self) -> Option<SessionId> {
        self.sessions.expire_dormant(self.clock.now())
    }

    /// User closed the panel: archive, drop buffers, hide.
    pub fn dismiss(&mut self) -> Option<SessionId> {
        let archived = self.sessions.finish(self.clock.now());
        self.sessions.clear_log();
        self.preview = None;
        self.panel.hide();
        archived
    }

    pub fn export_displayed(&self, dir: &Path) -> io::Result<PathBuf> {
        write_transcript(dir, &self.displayed_lines(), self.clock.now())
    }
}

fn preview_of(entry: &ArchivedSession) -> Preview {
    Preview {
        session: entry.id(),
        lines: entry.lines().into_iter().map(str::to_owned).collect(),
    }
}
