use async_trait::async_trait;

use crate::error::TransportError;

/// Opens feed connections. One call per connect attempt.
#[async_trait]
pub trait FeedConnector: Send + Sync + 'static {
    async fn connect(&self, endpoint: &str) -> Result<Box<dyn FeedConnection>, TransportError>;
}

/// An open feed. Frames arrive in transport order, one text line each.
#[async_trait]
pub trait FeedConnection: Send {
    /// Next text frame; `None` once the peer closed the connection.
    async fn next_frame(&mut self) -> Option<Result<String, TransportError>>;

    async fn close(&mut self) -> Result<(), TransportError>;
}
