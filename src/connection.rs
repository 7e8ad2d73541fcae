//! Connection status tracking and the reconnect-forever policy.
//!
//! [`ConnectionState`] is sans-IO: the transport reports [`FeedEvent`]s and the
//! state answers with a [`ReconnectPlan`] when a fresh connect should be
//! scheduled. The delay is fixed and retries are unbounded; only teardown stops
//! the loop.

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Connecting => "Connecting...",
            Self::Disconnected => "Disconnected",
            Self::Error => "Connection Error",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything a socket can report, in delivery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    Connecting,
    Opened,
    Message(String),
    Error(String),
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPlan {
    pub after: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionState {
    status: ConnectionStatus,
    reconnect_delay: Duration,
    reconnect_scheduled: bool,
    tearing_down: bool,
    attempts: u64,
}

impl ConnectionState {
    pub fn new(reconnect_delay: Duration) -> Self {
        Self {
            status: ConnectionStatus::Disconnected,
            reconnect_delay,
            reconnect_scheduled: false,
            tearing_down: false,
            attempts: 0,
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn reconnect_delay(&self) -> Duration {
        self.reconnect_delay
    }

    /// Number of connect attempts observed so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn is_tearing_down(&self) -> bool {
        self.tearing_down
    }

    /// Marks the state as torn down; later closes never schedule a reconnect.
    pub fn begin_teardown(&mut self) {
        self.tearing_down = true;
        self.reconnect_scheduled = false;
    }

    pub fn on_connecting(&mut self) {
        self.attempts += 1;
        self.reconnect_scheduled = false;
        self.status = ConnectionStatus::Connecting;
        tracing::info!(attempt = self.attempts, "feed connecting");
    }

    pub fn on_opened(&mut self) {
        self.status = ConnectionStatus::Connected;
        tracing::info!("feed connected");
    }

    pub fn on_error(&mut self, error: &str) {
        self.status = ConnectionStatus::Error;
        tracing::warn!(%error, "feed transport error");
    }

    /// Applies a close. Returns the reconnect to schedule, at most once per
    /// connection and never after teardown began.
    pub fn on_closed(&mut self) -> Option<ReconnectPlan> {
        self.status = ConnectionStatus::Disconnected;
        if self.tearing_down {
            tracing::info!("feed disconnected during teardown");
            return None;
        }
        if self.reconnect_scheduled {
            tracing::debug!("duplicate close ignored; reconnect already scheduled");
            return None;
        }

        self.reconnect_scheduled = true;
        tracing::info!(
            delay_ms = self.reconnect_delay.as_millis() as u64,
            "feed disconnected; reconnect scheduled"
        );
        Some(ReconnectPlan {
            after: self.reconnect_delay,
        })
    }
}
