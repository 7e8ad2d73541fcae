//! Async transport for the live transcript feed.
//!
//! [`FeedRuntime`] drives a [`FeedConnector`] in a connect, read, close,
//! wait loop and applies every socket event to a shared
//! `thinking_feed::TranscriptManager`. The manager decides whether and when
//! to reconnect; the runtime owns the timer and the cancellation token.
//!
//! [`WebSocketConnector`] is the production connector (plain text frames over
//! `tokio-tungstenite`). Tests plug in scripted connectors through the same
//! traits.

pub mod connector;
pub mod error;
pub mod runtime;
pub mod websocket;

pub use connector::{FeedConnection, FeedConnector};
pub use error::TransportError;
pub use runtime::{FeedRuntime, FeedUpdate, SharedManager};
pub use websocket::{normalize_ws_url, WebSocketConnection, WebSocketConnector};
