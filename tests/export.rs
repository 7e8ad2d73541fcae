use std::fs;
use std::time::Duration;

use thinking_feed::{
    transcript_file_name, write_transcript, FeedEvent, ManagerOptions, ManualClock,
    SessionPolicy, TranscriptManager,
};
use time::macros::{date, datetime};

#[test]
fn file_name_uses_utc_date() {
    assert_eq!(
        transcript_file_name(datetime!(2026-03-05 23:30:00 -02:00)),
        "ai-transcript-2026-03-06.txt"
    );
}

#[test]
fn iso_date_pads_month_and_day() {
    assert_eq!(thinking_feed::export::iso_date(date!(2026 - 01 - 09)), "2026-01-09");
}

#[test]
fn write_transcript_joins_lines() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = write_transcript(
        dir.path(),
        &["first", "second"],
        datetime!(2026-10-19 08:00:00 UTC),
    )
    .expect("export should succeed");

    assert_eq!(path, dir.path().join("ai-transcript-2026-10-19.txt"));
    assert_eq!(
        fs::read_to_string(&path).expect("export readable"),
        "first\nsecond"
    );
}

#[test]
fn manager_exports_displayed_transcript() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let clock = ManualClock::new(datetime!(2026-10-19 08:00:00 UTC));
    let mut manager = TranscriptManager::with_clock(
        ManagerOptions {
            reconnect_delay: Duration::from_secs(5),
            policy: SessionPolicy::Fragment,
        },
        clock,
    );
    manager.handle(FeedEvent::Connecting);
    manager.handle(FeedEvent::Opened);
    manager.handle(FeedEvent::Message("<think>".to_string()));
    manager.handle(FeedEvent::Message("done".to_string()));

    let path = manager
        .export_displayed(&dir.path().join("exports"))
        .expect("export should succeed");

    assert_eq!(
        fs::read_to_string(path).expect("export readable"),
        "<think>\ndone"
    );
}
