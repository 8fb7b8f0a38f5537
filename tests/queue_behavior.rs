//! End-to-end behavior of the Executable Queue Core, exercised through
//! `DbCommandQueue` with a `FunctionSink` recording dispatched results.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use execqueue::{DbCommand, DbCommandQueue, FunctionSink, InMemoryDatabaseAdapter, QueueConfig};
use serde_json::Value;

fn recording_sink() -> (Arc<FunctionSink>, Arc<Mutex<Vec<Value>>>) {
    let results = Arc::new(Mutex::new(Vec::new()));
    let recorder = results.clone();
    let sink = Arc::new(FunctionSink::new(move |text| {
        let value: Value = serde_json::from_str(&text).expect("sink receives valid JSON");
        recorder.lock().unwrap().push(value);
    }));
    (sink, results)
}

fn queue(sink: Arc<FunctionSink>) -> DbCommandQueue {
    let adapter = Arc::new(InMemoryDatabaseAdapter::new());
    DbCommandQueue::new(adapter, sink, &QueueConfig::default())
}

fn create(name: &str) -> DbCommand {
    DbCommand::CreateDatabase { name: name.to_string() }
}

#[tokio::test]
async fn single_submission_round_trips_through_the_sink() {
    let (sink, results) = recording_sink();
    let q = queue(sink);

    q.push_back_now(create("alpha")).unwrap();
    q.wait_until_empty().await.unwrap();

    let results = results.lock().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["is_successful"], Value::Bool(true));

    q.dispose().await;
}

#[tokio::test]
async fn top_level_command_failure_keeps_its_command_tag() {
    let (sink, results) = recording_sink();
    let q = queue(sink);

    // No database named "ghost" was ever created, so this fails inside the
    // adapter; `DbCommand::invoke` catches that and reports it tagged rather
    // than letting the queue core synthesize an untagged failure result.
    q.push_back_now(DbCommand::ConnectToDatabase { name: "ghost".to_string() }).unwrap();
    q.wait_until_empty().await.unwrap();

    let results = results.lock().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["is_successful"], Value::Bool(false));
    assert_eq!(results[0]["command"], Value::String("connect_to_database".to_string()));
    assert!(results[0]["data"]["error"].as_str().unwrap().contains("ghost"));

    q.dispose().await;
}

fn names(results: &[Value]) -> Vec<String> {
    results
        .iter()
        .map(|r| r["data"]["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn rapid_front_inserts_execute_in_reverse_of_submission_order() {
    let (sink, results) = recording_sink();
    let q = queue(sink);

    // All land before the executor gets a turn: LIFO.
    for i in 0..5 {
        q.push_front_now(create(&format!("db-{i}"))).unwrap();
    }
    q.wait_until_empty().await.unwrap();

    let got = names(&results.lock().unwrap());
    assert_eq!(got, vec!["db-4", "db-3", "db-2", "db-1", "db-0"]);

    q.dispose().await;
}

#[tokio::test]
async fn front_inserts_spaced_beyond_the_poll_interval_execute_fifo() {
    let config = QueueConfig { poll_interval: Duration::from_millis(100) };
    let adapter = Arc::new(InMemoryDatabaseAdapter::new());
    let (sink, results) = recording_sink();
    let q = DbCommandQueue::new(adapter, sink, &config);

    for i in 0..3 {
        q.push_front_now(create(&format!("db-{i}"))).unwrap();
        // Sleep longer than the poll interval so the executor drains fully
        // between insertions.
        tokio::time::sleep(Duration::from_millis(150)).await;
    }
    q.wait_until_empty().await.unwrap();

    let got = names(&results.lock().unwrap());
    assert_eq!(got, vec!["db-0", "db-1", "db-2"]);

    q.dispose().await;
}

#[tokio::test]
async fn back_appends_always_execute_in_submission_order() {
    let (sink, results) = recording_sink();
    let q = queue(sink);

    q.push_back_now(create("first")).unwrap();
    q.push_back_now(create("second")).unwrap();
    q.wait_until_empty().await.unwrap();

    let got = names(&results.lock().unwrap());
    assert_eq!(got, vec!["first", "second"]);

    q.dispose().await;
}

#[tokio::test]
async fn delayed_submission_is_promoted_within_a_poll_interval() {
    let config = QueueConfig { poll_interval: Duration::from_millis(100) };
    let adapter = Arc::new(InMemoryDatabaseAdapter::new());
    let (sink, results) = recording_sink();
    let q = DbCommandQueue::new(adapter, sink, &config);

    q.push_back_after(create("delayed"), ChronoDuration::milliseconds(50)).unwrap();

    // Not yet promoted: due time hasn't arrived, so a drain right now would
    // not observe it.
    tokio::time::sleep(Duration::from_millis(400)).await;
    q.wait_until_empty().await.unwrap();

    let got = names(&results.lock().unwrap());
    assert_eq!(got, vec!["delayed"]);

    q.dispose().await;
}

#[tokio::test]
async fn wait_until_empty_returns_promptly_without_executing_a_future_dated_delay() {
    let config = QueueConfig { poll_interval: Duration::from_millis(100) };
    let adapter = Arc::new(InMemoryDatabaseAdapter::new());
    let (sink, results) = recording_sink();
    let q = DbCommandQueue::new(adapter, sink, &config);

    q.push_back_after(create("not-due-yet"), ChronoDuration::seconds(10)).unwrap();

    let started = std::time::Instant::now();
    q.wait_until_empty().await.unwrap();
    let elapsed = started.elapsed();

    // The Ready Queue is empty right now regardless of what's still sitting
    // in the `end_bound` Delayed Sequence, so the drain barrier must not
    // block on a payload whose `ready_at` is still in the future.
    assert!(
        elapsed < Duration::from_secs(2),
        "wait_until_empty took {elapsed:?}, it should not have waited out the 10s delay"
    );
    assert!(results.lock().unwrap().is_empty());

    q.dispose().await;
}

#[tokio::test]
async fn dispose_is_idempotent_and_safe_when_idle() {
    let (sink, _results) = recording_sink();
    let q = queue(sink);

    q.dispose().await;
    q.dispose().await;

    let err = q.push_back_now(create("too-late")).unwrap_err();
    assert!(matches!(err, execqueue::QueueError::Disposed));
}
