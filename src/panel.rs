use crate::connection::ConnectionStatus;
use crate::session::SessionId;

/// Visibility flags of the transcript panel, owned by the manager.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    open: bool,
    minimized: bool,
    history_visible: bool,
}

impl PanelState {
    /// Opens and restores the panel; a new session forces this.
    pub fn reveal(&mut self) {
        self.open = true;
        self.minimized = false;
    }

    pub fn hide(&mut self) {
        self.open = false;
        self.minimized = false;
        self.history_visible = false;
    }

    pub fn toggle_minimized(&mut self) -> bool {
        self.minimized = !self.minimized;
        self.minimized
    }

    pub fn toggle_history(&mut self) -> bool {
        self.history_visible = !self.history_visible;
        self.history_visible
    }

    pub fn hide_history(&mut self) {
        self.history_visible = false;
    }
}

/// Read-only snapshot handed to the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelView {
    pub status: ConnectionStatus,
    pub open: bool,
    pub minimized: bool,
    pub history_visible: bool,
    pub active_session: Option<SessionId>,
    pub previewing: Option<SessionId>,
    pub archived_sessions: usize,
}

impl PanelView {
    pub(crate) fn new(
        status: ConnectionStatus,
        panel: PanelState,
        active_session: Option<SessionId>,
        previewing: Option<SessionId>,
        archived_sessions: usize,
    ) -> Self {
        Self {
            status,
            open: panel.open,
            minimized: panel.minimized,
            history_visible: panel.history_visible,
            active_session,
            previewing,
            archived_sessions,
        }
    }

    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    /// Whether anything besides the launcher is shown.
    pub fn is_visible(&self) -> bool {
        self.open || self.minimized
    }
}
