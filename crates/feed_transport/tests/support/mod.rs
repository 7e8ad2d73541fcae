use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use feed_transport::{FeedConnection, FeedConnector, FeedUpdate, SharedManager, TransportError};
use thinking_feed::{ManagerOptions, SessionPolicy, TranscriptManager};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;

pub const DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub enum Script {
    Refuse(&'static str),
    /// Deliver the frames, then close cleanly.
    Frames(Vec<&'static str>),
    /// Deliver the frames, then fail the read.
    FramesThenError(Vec<&'static str>, &'static str),
    /// Deliver the frames, then stay open until closed locally.
    Hold(Vec<&'static str>),
}

#[derive(Default)]
pub struct ConnectorTrace {
    pub attempts: Vec<Instant>,
    pub local_closes: usize,
}

#[derive(Clone)]
pub struct ScriptedConnector {
    scripts: Arc<Mutex<VecDeque<Script>>>,
    trace: Arc<Mutex<ConnectorTrace>>,
}

impl ScriptedConnector {
    pub fn new(scripts: Vec<Script>) -> (Self, Arc<Mutex<ConnectorTrace>>) {
        let trace = Arc::new(Mutex::new(ConnectorTrace::default()));
        (
            Self {
                scripts: Arc::new(Mutex::new(scripts.into())),
                trace: Arc::clone(&trace),
            },
            trace,
        )
    }
}

#[async_trait]
impl FeedConnector for ScriptedConnector {
    async fn connect(&self, _endpoint: &str) -> Result<Box<dyn FeedConnection>, TransportError> {
        lock_unpoisoned(&self.trace).attempts.push(Instant::now());
        let script = lock_unpoisoned(&self.scripts)
            .pop_front()
            .unwrap_or(Script::Refuse("nobody listening"));

        let (frames, ending) = match script {
            Script::Refuse(reason) => return Err(TransportError::Refused(reason.to_string())),
            Script::Frames(frames) => (frames, Ending::Close),
            Script::FramesThenError(frames, error) => (frames, Ending::Error(error)),
            Script::Hold(frames) => (frames, Ending::Hold),
        };

        Ok(Box::new(ScriptedConnection {
            frames: frames.into_iter().map(str::to_string).collect(),
            ending,
            trace: Arc::clone(&self.trace),
        }))
    }
}

#[derive(Clone, Copy)]
enum Ending {
    Close,
    Error(&'static str),
    Hold,
}

struct ScriptedConnection {
    frames: VecDeque<String>,
    ending: Ending,
    trace: Arc<Mutex<ConnectorTrace>>,
}

#[async_trait]
impl FeedConnection for ScriptedConnection {
    async fn next_frame(&mut self) -> Option<Result<String, TransportError>> {
        if let Some(frame) = self.frames.pop_front() {
            return Some(Ok(frame));
        }

        match self.ending {
            Ending::Close => None,
            Ending::Error(error) => {
                self.ending = Ending::Close;
                Some(Err(TransportError::Other(error.to_string())))
            }
            Ending::Hold => std::future::pending().await,
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        lock_unpoisoned(&self.trace).local_closes += 1;
        Ok(())
    }
}

pub fn shared_manager(policy: SessionPolicy) -> SharedManager {
    Arc::new(Mutex::new(TranscriptManager::new(ManagerOptions {
        reconnect_delay: DELAY,
        policy,
    })))
}

pub async fn next_update(updates: &mut UnboundedReceiver<FeedUpdate>) -> FeedUpdate {
    tokio::time::timeout(Duration::from_secs(600), updates.recv())
        .await
        .expect("update should arrive")
        .expect("update channel open")
}

pub async fn collect_until(
    updates: &mut UnboundedReceiver<FeedUpdate>,
    mut done: impl FnMut(&FeedUpdate) -> bool,
) -> Vec<FeedUpdate> {
    let mut seen = Vec::new();
    loop {
        let update = next_update(updates).await;
        let finished = done(&update);
        seen.push(update);
        if finished {
            return seen;
        }
    }
}

pub fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
