//! Live transcript manager for streamed "AI thinking" feeds.
//!
//! Invariant: one owner. [`TranscriptManager`] holds connection status, the
//! `(session, line)` log, archived history and panel flags; everything a
//! display shows is derived from it.
//!
//! # Public API Overview
//! - Feed socket events through [`TranscriptManager::handle`] and honour the
//!   returned [`ReconnectPlan`].
//! - Read derived views: [`TranscriptManager::displayed_lines`],
//!   [`TranscriptManager::panel`], [`TranscriptManager::history`].
//! - Render lines with [`format_line`] exactly once each.
//! - Export the displayed transcript with [`write_transcript`].
//!
//! The async transport lives in the `feed_transport` crate; this crate does no
//! I/O besides transcript export.

pub mod clock;
pub mod config;
pub mod connection;
pub mod export;
pub mod format;
pub mod logging;
pub mod manager;
pub mod panel;
pub mod session;

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::EnvConfig;
pub use crate::connection::{ConnectionState, ConnectionStatus, FeedEvent, ReconnectPlan};
pub use crate::export::{transcript_file_name, write_transcript};
pub use crate::format::{format_line, format_transcript};
pub use crate::logging::init_logging;
pub use crate::manager::{ManagerOptions, Outcome, TranscriptManager};
pub use crate::panel::{PanelState, PanelView};
pub use crate::session::{
    ActiveSession, ArchivedSession, LogEntry, SessionHistory, SessionId, SessionPolicy,
    SessionTracker, TranscriptLog,
};
