//! Integration tests for the full scheduling loop.
//!
//! These run `Scheduler::run` on a short real clock with real shell
//! commands, feed refresh events through the channel, and observe what
//! reaches the sink.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use statusblocks_core::{BlockDescriptor, BlocksError, Executor, Registry, Scheduler, Sink};
use tokio_util::sync::CancellationToken;

#[derive(Clone, Default)]
struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Sink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn write(&mut self, line: &str) -> Result<(), BlocksError> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

/// Swap file contents atomically so a concurrent `cat` never sees a partial write.
fn replace(path: &Path, contents: &str) {
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, contents).unwrap();
    std::fs::rename(&tmp, path).unwrap();
}

/// Poll the sink until `predicate` holds or the timeout expires.
async fn wait_for(sink: &RecordingSink, predicate: impl Fn(&[String]) -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while tokio::time::Instant::now() < deadline {
        if predicate(&sink.lines()) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

#[tokio::test]
async fn test_signal_event_refreshes_and_publishes() {
    let dir = tempfile::tempdir().unwrap();
    let value = dir.path().join("value");
    std::fs::write(&value, "1\n").unwrap();

    let registry = Registry::new(vec![
        BlockDescriptor::new("A:", format!("cat '{}'", value.display()), 0).with_signal(1),
        BlockDescriptor::new("B:", "echo b", 1),
    ]);
    let sink = RecordingSink::default();
    let mut scheduler = Scheduler::with_parts(
        registry,
        Executor::new("/bin/sh", 50),
        " | ",
        sink.clone(),
    )
    .with_tick_period(Duration::from_millis(20));

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let shutdown = CancellationToken::new();
    let loop_shutdown = shutdown.clone();
    let handle = tokio::spawn(async move {
        scheduler.run(rx, loop_shutdown).await;
        scheduler
    });

    assert!(wait_for(&sink, |lines| !lines.is_empty()).await);
    assert_eq!(sink.lines(), vec!["A:1 | B:b"]);

    // Periodic refresh of a zero-interval block never happens.
    replace(&value, "2\n");
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(sink.lines(), vec!["A:1 | B:b"]);

    tx.send(1).unwrap();
    assert!(wait_for(&sink, |lines| lines.len() == 2).await);

    // Ids no block uses are accepted and change nothing.
    tx.send(9).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    shutdown.cancel();
    let scheduler = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("loop did not stop after cancellation")
        .unwrap();

    assert_eq!(sink.lines(), vec!["A:1 | B:b", "A:2 | B:b"]);
    assert_eq!(scheduler.outputs(), &["A:2".to_string(), "B:b".to_string()]);
    assert!(scheduler.tick_count() > 0);
}

#[tokio::test]
async fn test_periodic_block_picks_up_changes() {
    let dir = tempfile::tempdir().unwrap();
    let value = dir.path().join("clock");
    std::fs::write(&value, "10:00").unwrap();

    let registry = Registry::new(vec![BlockDescriptor::new(
        "",
        format!("cat '{}'", value.display()),
        1,
    )]);
    let sink = RecordingSink::default();
    let mut scheduler =
        Scheduler::with_parts(registry, Executor::new("/bin/sh", 50), "", sink.clone())
            .with_tick_period(Duration::from_millis(20));

    let (_tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let shutdown = CancellationToken::new();
    let loop_shutdown = shutdown.clone();
    let handle = tokio::spawn(async move { scheduler.run(rx, loop_shutdown).await });

    assert!(wait_for(&sink, |lines| lines.len() == 1).await);
    replace(&value, "10:01");
    assert!(wait_for(&sink, |lines| lines.len() == 2).await);

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(sink.lines(), vec!["10:00", "10:01"]);
}
