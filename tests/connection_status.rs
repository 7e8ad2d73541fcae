use std::time::Duration;

use thinking_feed::{ConnectionState, ConnectionStatus, FeedEvent, TranscriptManager};

const DELAY: Duration = Duration::from_secs(5);

#[test]
fn status_follows_connect_open_close() {
    let mut state = ConnectionState::new(DELAY);
    assert_eq!(state.status(), ConnectionStatus::Disconnected);

    state.on_connecting();
    assert_eq!(state.status(), ConnectionStatus::Connecting);
    state.on_opened();
    assert_eq!(state.status(), ConnectionStatus::Connected);

    let plan = state.on_closed().expect("reconnect scheduled");
    assert_eq!(plan.after, DELAY);
    assert_eq!(state.status(), ConnectionStatus::Disconnected);
}

#[test]
fn error_then_close_schedules_one_reconnect_from_connected() {
    let mut state = ConnectionState::new(DELAY);
    state.on_connecting();
    state.on_opened();

    state.on_error("connection reset");
    assert_eq!(state.status(), ConnectionStatus::Error);

    assert_eq!(state.on_closed().map(|plan| plan.after), Some(DELAY));
    assert_eq!(state.status(), ConnectionStatus::Disconnected);
    assert_eq!(state.on_closed(), None, "second close must not reschedule");
}

#[test]
fn error_then_close_schedules_one_reconnect_from_connecting() {
    let mut state = ConnectionState::new(DELAY);
    state.on_connecting();

    state.on_error("connection refused");
    assert_eq!(state.status(), ConnectionStatus::Error);

    assert_eq!(state.on_closed().map(|plan| plan.after), Some(DELAY));
    assert_eq!(state.on_closed(), None);
}

#[test]
fn delay_never_grows_across_attempts() {
    let mut state = ConnectionState::new(DELAY);
    for attempt in 1..=20 {
        state.on_connecting();
        state.on_error("refused");
        let plan = state.on_closed().expect("retries are unbounded");
        assert_eq!(plan.after, DELAY, "attempt {attempt} changed the delay");
    }
    assert_eq!(state.attempts(), 20);
}

#[test]
fn teardown_suppresses_reconnect() {
    let mut state = ConnectionState::new(DELAY);
    state.on_connecting();
    state.on_opened();
    state.begin_teardown();

    assert_eq!(state.on_closed(), None);
    assert_eq!(state.status(), ConnectionStatus::Disconnected);
}

#[test]
fn manager_reports_error_status_and_labels() {
    let mut manager = TranscriptManager::default();
    manager.handle(FeedEvent::Connecting);
    assert_eq!(manager.panel().status_label(), "Connecting...");

    manager.handle(FeedEvent::Error("refused".to_string()));
    assert_eq!(manager.status(), ConnectionStatus::Error);
    assert_eq!(manager.panel().status_label(), "Connection Error");

    let outcome = manager.handle(FeedEvent::Closed);
    assert_eq!(manager.status(), ConnectionStatus::Disconnected);
    assert_eq!(outcome.reconnect.map(|plan| plan.after), Some(DELAY));
    assert_eq!(ConnectionStatus::Connected.to_string(), "Connected");
}
