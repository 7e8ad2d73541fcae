use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::connector::{FeedConnection, FeedConnector};
use crate::error::TransportError;

/// Adds `ws://` to bare `host:port` endpoints.
pub fn normalize_ws_url(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    if trimmed.starts_with("ws://") || trimmed.starts_with("wss://") {
        trimmed.to_string()
    } else {
        format!("ws://{trimmed}")
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketConnector;

#[async_trait]
impl FeedConnector for WebSocketConnector {
    async fn connect(&self, endpoint: &str) -> Result<Box<dyn FeedConnection>, TransportError> {
        let url = normalize_ws_url(endpoint);
        tracing::debug!(%url, "opening websocket");
        let (stream, _response) = connect_async(url.as_str())
            .await
            .map_err(|source| TransportError::connect(&url, source))?;
        Ok(Box::new(WebSocketConnection { stream }))
    }
}

pub struct WebSocketConnection {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl FeedConnection for WebSocketConnection {
    async fn next_frame(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            let message = match self.stream.next().await? {
                Ok(message) => message,
                Err(error) => return Some(Err(TransportError::Read(Box::new(error)))),
            };

            match message {
                Message::Text(text) => return Some(Ok(text.as_str().to_owned())),
                Message::Binary(data) => {
                    return Some(Ok(String::from_utf8_lossy(&data).into_owned()))
                }
                Message::Close(frame) => {
                    tracing::debug!(?frame, "websocket close frame");
                    return None;
                }
                Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.stream
            .close(None)
            .await
            .map_err(|error| TransportError::Close(Box::new(error)))
    }
}
