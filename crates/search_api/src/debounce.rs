use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

pub const SUGGESTION_DEBOUNCE: Duration = Duration::from_millis(300);
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Runs only the most recently scheduled task, once `delay` has passed
/// without another call to [`Debouncer::schedule`].
///
/// Scheduling aborts the previous pending task, as do [`Debouncer::cancel`]
/// and drop.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Must be called inside a tokio runtime.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
