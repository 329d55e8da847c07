//! # Consistency Polling Tests
//!
//! Drives the poller with scripted fetch sequences on a paused tokio clock.
//!
//! These tests verify:
//! - Until-found requires consecutive hits
//! - Until-not-found and predicate matching
//! - Timeouts, fatal errors and transient errors
//! - Prompt cancellation

mod common;

use std::future::ready;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use aws_resource_manager::config::PollConfig;
use aws_resource_manager::model::ContactDetails;
use aws_resource_manager::poll::{self, from_fn, Decision};
use aws_resource_manager::ResourceError;
use common::{contact, fast_poll, Script, Step};

#[tokio::test(start_paused = true)]
async fn test_until_found_needs_two_consecutive_hits() {
    let script = Script::new([
        Step::NotFound,
        Step::Found(1u32),
        Step::NotFound,
        Step::Found(2u32),
        Step::Found(3u32),
        Step::Found(4u32),
    ]);

    let result = poll::until_found(
        &fast_poll(Duration::from_secs(10)),
        None,
        2,
        || ready(script.next()),
        "sequence",
    )
    .await
    .unwrap();

    // The isolated hit at attempt 2 must not count
    assert_eq!(result, Some(3));
    assert_eq!(script.calls(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_until_found_retries_throttling() {
    let script = Script::new([Step::Throttled, Step::Throttled, Step::Found("ok")]);

    let result = poll::until_found(
        &fast_poll(Duration::from_secs(10)),
        None,
        1,
        || ready(script.next()),
        "throttled",
    )
    .await
    .unwrap();

    assert_eq!(result, Some("ok"));
    assert_eq!(script.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_until_not_found_succeeds_at_not_found() {
    let script = Script::new([Step::Found(()), Step::Found(()), Step::NotFound]);

    poll::until_not_found(
        &fast_poll(Duration::from_secs(10)),
        None,
        || ready(script.next()),
        "deleted",
    )
    .await
    .unwrap();

    assert_eq!(script.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_until_not_found_times_out() {
    let script = Script::new([Step::Found(())]);
    let start = Instant::now();

    let err = poll::until_not_found(
        &fast_poll(Duration::from_secs(1)),
        None,
        || ready(script.next()),
        "lingering",
    )
    .await
    .unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {err}");
    assert!(start.elapsed() >= Duration::from_secs(1));
    assert!(start.elapsed() < Duration::from_secs(2));
    match err {
        ResourceError::Timeout { attempts, .. } => {
            assert_eq!(attempts, script.calls());
            assert!(attempts > 10);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_until_match_converges() {
    let written = contact("ops@example.com", "Ops", "+1 555 0100", "On call");
    let script = Script::new([
        Step::NotFound,
        Step::Found(contact("old@example.com", "Old", "+1 555 0199", "Former")),
        Step::Found(contact("ops@example.com", "Ops", "+1 555 0199", "Former")),
        Step::Found(contact("ops@example.com", "Ops", "+1 555 0100", "Former")),
        Step::Found(written.clone()),
    ]);

    let result = poll::until_match(
        &fast_poll(Duration::from_secs(10)),
        None,
        || ready(script.next()),
        |current: &ContactDetails| *current == written,
        "converging",
    )
    .await
    .unwrap();

    assert_eq!(result, Some(written.clone()));
    assert_eq!(script.calls(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_until_match_mismatched_phone_times_out() {
    let written = contact("ops@example.com", "Ops", "+1 555 0100", "On call");
    let stale = contact("ops@example.com", "Ops", "+1 555 0199", "On call");
    let script = Script::new([Step::Found(stale)]);

    let err = poll::until_match(
        &fast_poll(Duration::from_secs(1)),
        None,
        || ready(script.next()),
        |current: &ContactDetails| *current == written,
        "stale phone",
    )
    .await
    .unwrap_err();

    assert!(err.is_timeout());
    assert!(script.calls() > 10);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_reports_last_error() {
    let script = Script::<u8>::new([Step::NotFound]);

    let err = poll::until_found(
        &fast_poll(Duration::from_millis(200)),
        None,
        2,
        || ready(script.next()),
        "missing",
    )
    .await
    .unwrap_err();

    match err {
        ResourceError::Timeout {
            last_error: Some(last),
            ..
        } => assert!(last.contains("not found"), "last error was {last}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_fatal_error_stops_immediately() {
    let script = Script::<u8>::new([Step::Denied, Step::Found(1)]);

    let err = poll::until_found(
        &fast_poll(Duration::from_secs(10)),
        None,
        2,
        || ready(script.next()),
        "denied",
    )
    .await
    .unwrap_err();

    assert_eq!(err.code(), Some("AccessDeniedException"));
    assert_eq!(script.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_wait_returns_promptly() {
    let script = Script::new([Step::Found(())]);
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(250)).await;
        canceller.cancel();
    });
    let start = Instant::now();

    let err = poll::until_not_found(
        &fast_poll(Duration::from_secs(300)),
        Some(&token),
        || ready(script.next()),
        "cancelled",
    )
    .await
    .unwrap_err();

    assert!(err.is_cancelled(), "expected cancellation, got {err}");
    assert!(!err.is_timeout());
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_interrupts_hung_fetch() {
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let err = poll::until_found(
        &fast_poll(Duration::from_secs(300)),
        Some(&token),
        1,
        || std::future::pending::<Result<(), ResourceError>>(),
        "hung",
    )
    .await
    .unwrap_err();

    assert!(err.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn test_deadline_interrupts_hung_fetch() {
    let start = Instant::now();

    let err = poll::until_found(
        &fast_poll(Duration::from_secs(5)),
        None,
        1,
        || std::future::pending::<Result<(), ResourceError>>(),
        "hung",
    )
    .await
    .unwrap_err();

    assert!(err.is_timeout());
    assert!(start.elapsed() >= Duration::from_secs(5));
    assert!(start.elapsed() < Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn test_custom_condition_can_abort() {
    let script = Script::new([Step::Found(1u32), Step::Found(2u32), Step::Found(99u32)]);

    let err = poll::poll_until(
        &fast_poll(Duration::from_secs(10)),
        None,
        || ready(script.next()),
        from_fn(|result: Result<&u32, &ResourceError>| match result {
            Ok(v) if *v > 50 => Decision::Abort(ResourceError::Api {
                code: None,
                message: format!("unexpected value {v}"),
            }),
            _ => Decision::Retry,
        }),
        "custom",
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "AWS error: unexpected value 99");
    assert_eq!(script.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_backoff_grows_and_caps() {
    let script = Script::new([Step::Found(())]);
    let start = Instant::now();

    let _ = poll::until_not_found(
        &fast_poll(Duration::from_millis(500)),
        None,
        || ready(script.next()),
        "backoff",
    )
    .await;

    // Attempts at 0, 10, 30 and 70 ms, then every 40 ms until 470 ms
    assert_eq!(start.elapsed(), Duration::from_millis(500));
    assert!(
        script.calls().abs_diff(14) <= 1,
        "expected about 14 attempts, got {}",
        script.calls()
    );
}

#[tokio::test(start_paused = true)]
async fn test_jitter_never_exceeds_max_delay() {
    let config = PollConfig {
        min_delay: Duration::from_millis(40),
        max_delay: Duration::from_millis(40),
        timeout: Duration::from_secs(20),
        jitter: true,
        found_streak: 2,
    };
    let mut stamps = Vec::new();

    let err = poll::until_not_found(
        &config,
        None,
        || {
            stamps.push(Instant::now());
            ready(Ok::<_, ResourceError>(()))
        },
        "jittered",
    )
    .await
    .unwrap_err();

    assert!(err.is_timeout());
    assert!(stamps.len() > 100);
    for pair in stamps.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(gap <= config.max_delay, "gap {gap:?} exceeds max delay");
    }
}
