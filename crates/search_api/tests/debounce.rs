use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use search_api::{Debouncer, SUGGESTION_DEBOUNCE};

#[tokio::test(start_paused = true)]
async fn only_the_last_scheduled_task_runs() {
    let runs = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(AtomicUsize::new(0));
    let mut debouncer = Debouncer::new(SUGGESTION_DEBOUNCE);

    for value in 1..=3 {
        let runs = Arc::clone(&runs);
        let last = Arc::clone(&last);
        debouncer.schedule(async move {
            runs.fetch_add(1, Ordering::SeqCst);
            last.store(value, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    tokio::time::sleep(SUGGESTION_DEBOUNCE).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(last.load(Ordering::SeqCst), 3);
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn cancel_and_drop_abort_pending_task() {
    let runs = Arc::new(AtomicUsize::new(0));

    let mut debouncer = Debouncer::new(Duration::from_millis(500));
    let counter = Arc::clone(&runs);
    debouncer.schedule(async move {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert!(debouncer.is_pending());
    debouncer.cancel();
    assert!(!debouncer.is_pending());

    let counter = Arc::clone(&runs);
    debouncer.schedule(async move {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    drop(debouncer);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}
