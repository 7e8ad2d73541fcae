use std::sync::{Arc, Mutex};
use std::time::Duration;

use feed_transport::{normalize_ws_url, FeedRuntime, FeedUpdate, WebSocketConnector};
use futures_util::{SinkExt, StreamExt};
use thinking_feed::{FeedEvent, ManagerOptions, SessionPolicy, TranscriptManager};
use tokio::net::TcpListener;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;

async fn recv_until(
    updates: &mut UnboundedReceiver<FeedUpdate>,
    wanted: impl Fn(&FeedUpdate) -> bool,
) -> FeedUpdate {
    loop {
        let update = timeout(Duration::from_secs(5), updates.recv())
            .await
            .expect("update should arrive in time")
            .expect("update channel open");
        if wanted(&update) {
            return update;
        }
    }
}

/// First client gets `frames` and a close; later clients are held open.
async fn spawn_feed_server(frames: Vec<&'static str>) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("local TCP listener should bind");
    let addr = listener.local_addr().expect("listener address");

    let handle = tokio::spawn(async move {
        let (socket, _) = match listener.accept().await {
            Ok(pair) => pair,
            Err(_) => return,
        };
        let mut ws = tokio_tungstenite::accept_async(socket)
            .await
            .expect("websocket handshake");
        for frame in frames {
            ws.send(Message::Text(frame.into()))
                .await
                .expect("frame should send");
        }
        ws.send(Message::Binary(b"binary line".to_vec().into()))
            .await
            .expect("binary frame should send");
        let _ = ws.close(None).await;
        while let Some(Ok(_)) = ws.next().await {}

        loop {
            let (socket, _) = match listener.accept().await {
                Ok(pair) => pair,
                Err(_) => break,
            };
            tokio::spawn(async move {
                if let Ok(mut ws) = tokio_tungstenite::accept_async(socket).await {
                    while let Some(Ok(_)) = ws.next().await {}
                }
            });
        }
    });

    (format!("ws://{addr}"), handle)
}

#[test]
fn bare_endpoints_get_ws_scheme() {
    assert_eq!(normalize_ws_url("localhost:8765"), "ws://localhost:8765");
    assert_eq!(normalize_ws_url(" ws://localhost:8765 "), "ws://localhost:8765");
    assert_eq!(normalize_ws_url("wss://feed.example"), "wss://feed.example");
}

#[tokio::test]
async fn websocket_feed_archives_session_when_server_closes() {
    let (endpoint, server) = spawn_feed_server(vec!["hello", "world"]).await;
    let manager = Arc::new(Mutex::new(TranscriptManager::new(ManagerOptions {
        reconnect_delay: Duration::from_millis(50),
        policy: SessionPolicy::Fragment,
    })));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let runtime = FeedRuntime::spawn(WebSocketConnector, endpoint, Arc::clone(&manager), Some(tx));

    let closed = recv_until(&mut rx, |update| update.event == FeedEvent::Closed).await;
    assert_eq!(
        closed.outcome.reconnect.map(|plan| plan.after),
        Some(Duration::from_millis(50))
    );
    {
        let manager = manager.lock().expect("manager lock");
        let entry = manager.history().latest().expect("archived session");
        assert_eq!(entry.content(), "hello\nworld\nbinary line");
        assert!(manager.active_session().is_none());
    }

    recv_until(&mut rx, |update| update.event == FeedEvent::Opened).await;

    runtime.shutdown().await;
    server.abort();

    let manager = manager.lock().expect("manager lock");
    assert_eq!(manager.history().len(), 1);
    assert!(manager.connection().is_tearing_down());
}

#[tokio::test]
async fn unreachable_endpoint_reports_error_then_disconnect() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("local TCP listener should bind");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);

    let manager = Arc::new(Mutex::new(TranscriptManager::new(ManagerOptions {
        reconnect_delay: Duration::from_secs(60),
        policy: SessionPolicy::Fragment,
    })));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let runtime = FeedRuntime::spawn(
        WebSocketConnector,
        format!("ws://{addr}"),
        Arc::clone(&manager),
        Some(tx),
    );

    let error = recv_until(&mut rx, |update| matches!(update.event, FeedEvent::Error(_))).await;
    assert!(error.outcome.reconnect.is_none());
    let closed = recv_until(&mut rx, |update| update.event == FeedEvent::Closed).await;
    assert_eq!(
        closed.outcome.reconnect.map(|plan| plan.after),
        Some(Duration::from_secs(60))
    );

    runtime.shutdown().await;
}
