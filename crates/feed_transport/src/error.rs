use thiserror::Error;
use tokio_tungstenite::tungstenite;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: Box<tungstenite::Error>,
    },

    #[error("failed to read frame: {0}")]
    Read(#[source] Box<tungstenite::Error>),

    #[error("failed to close socket: {0}")]
    Close(#[source] Box<tungstenite::Error>),

    #[error("connection refused: {0}")]
    Refused(String),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    #[must_use]
    pub fn connect(endpoint: impl Into<String>, source: tungstenite::Error) -> Self {
        Self::Connect {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }
}
