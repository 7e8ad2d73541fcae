use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use thinking_feed::{ConnectionStatus, FeedEvent, Outcome, ReconnectPlan, TranscriptManager};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::connector::{FeedConnection, FeedConnector};

pub type SharedManager = Arc<Mutex<TranscriptManager>>;

const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

/// One applied event and what it did to the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedUpdate {
    pub event: FeedEvent,
    pub outcome: Outcome,
    /// Connection status right after this event was applied.
    pub status: ConnectionStatus,
}

/// Background task that keeps one feed connection alive.
///
/// The reconnect delay is a sleep raced against the runtime's cancellation
/// token, so [`FeedRuntime::shutdown`] (or dropping the runtime) can never be
/// followed by another connect attempt.
pub struct FeedRuntime {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
    manager: SharedManager,
}

impl FeedRuntime {
    /// Spawns the connect loop on the current tokio runtime. Every applied
    /// event is mirrored to `updates` when a sender is given.
    pub fn spawn<C: FeedConnector>(
        connector: C,
        endpoint: impl Into<String>,
        manager: SharedManager,
        updates: Option<UnboundedSender<FeedUpdate>>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let driver = FeedDriver {
            connector,
            endpoint: endpoint.into(),
            manager: Arc::clone(&manager),
            updates,
            cancel: cancel.clone(),
        };
        let handle = tokio::spawn(driver.run());

        Self {
            cancel,
            handle: Some(handle),
            manager,
        }
    }

    pub fn manager(&self) -> &SharedManager {
        &self.manager
    }

    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(true, |handle| handle.is_finished())
    }

    /// Closes the socket, archives any live session and waits for the loop
    /// to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(error) = handle.await {
                tracing::warn!(%error, "feed runtime task failed");
            }
        }
    }
}

impl Drop for FeedRuntime {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct FeedDriver<C> {
    connector: C,
    endpoint: String,
    manager: SharedManager,
    updates: Option<UnboundedSender<FeedUpdate>>,
    cancel: CancellationToken,
}

impl<C: FeedConnector> FeedDriver<C> {
    async fn run(self) {
        tracing::info!(endpoint = %self.endpoint, "feed runtime started");

        loop {
            let Some(plan) = self.run_connection().await else {
                break;
            };

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    self.finish_idle();
                    break;
                }
                _ = tokio::time::sleep(plan.after) => {}
            }
        }

        tracing::info!(endpoint = %self.endpoint, "feed runtime stopped");
    }

    /// One connect..close cycle. Returns the reconnect the manager asked for.
    async fn run_connection(&self) -> Option<ReconnectPlan> {
        if self.cancel.is_cancelled() {
            self.finish_idle();
            return None;
        }

        self.apply(FeedEvent::Connecting);
        let connected = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return self.teardown(None).await,
            result = self.connector.connect(&self.endpoint) => result,
        };

        let mut connection = match connected {
            Ok(connection) => connection,
            Err(error) => {
                self.apply(FeedEvent::Error(error.to_string()));
                return self.apply(FeedEvent::Closed).reconnect;
            }
        };
        self.apply(FeedEvent::Opened);

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return self.teardown(Some(connection)).await,
                frame = connection.next_frame() => match frame {
                    Some(Ok(line)) => {
                        self.apply(FeedEvent::Message(line));
                    }
                    Some(Err(error)) => {
                        self.apply(FeedEvent::Error(error.to_string()));
                        break;
                    }
                    None => break,
                },
            }
        }

        self.apply(FeedEvent::Closed).reconnect
    }

    async fn teardown(
        &self,
        connection: Option<Box<dyn FeedConnection>>,
    ) -> Option<ReconnectPlan> {
        lock_unpoisoned(&self.manager).begin_teardown();

        if let Some(mut connection) = connection {
            match tokio::time::timeout(CLOSE_TIMEOUT, connection.close()).await {
                Ok(Ok(())) => {}
                Ok(Err(error)) => tracing::debug!(%error, "close during teardown failed"),
                Err(_) => tracing::debug!("close during teardown timed out"),
            }
        }

        self.apply(FeedEvent::Closed).reconnect
    }

    /// Teardown with no socket open. A session left dormant by the last close
    /// still has to reach history.
    fn finish_idle(&self) {
        lock_unpoisoned(&self.manager).begin_teardown();
        self.apply(FeedEvent::Closed);
    }

    fn apply(&self, event: FeedEvent) -> Outcome {
        let (outcome, status) = {
            let mut manager = lock_unpoisoned(&self.manager);
            let outcome = manager.handle(event.clone());
            (outcome, manager.status())
        };

        if let Some(updates) = &self.updates {
            // A dropped receiver only means nobody is watching.
            let _ = updates.send(FeedUpdate {
                event,
                outcome,
                status,
            });
        }

        outcome
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
