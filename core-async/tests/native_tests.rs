//! Integration tests for the Tokio-backed async layer.

use core_async::{runtime, sync, task, time};
use std::sync::Arc;

#[core_async::test]
async fn spawned_task_returns_its_output() {
    let handle = task::spawn(async { 42 });
    assert_eq!(handle.await.unwrap(), 42);
}

#[core_async::test]
async fn sleep_waits_at_least_the_requested_duration() {
    let start = time::Instant::now();
    time::sleep(time::Duration::from_millis(20)).await;
    assert!(start.elapsed() >= time::Duration::from_millis(20));
}

#[core_async::test]
async fn timeout_passes_through_fast_futures() {
    let result = time::timeout(time::Duration::from_millis(200), async { 7 }).await;
    assert_eq!(result.unwrap(), 7);
}

#[core_async::test]
async fn timeout_expires_on_slow_futures() {
    let result = time::timeout(time::Duration::from_millis(5), async {
        time::sleep(time::Duration::from_millis(200)).await;
    })
    .await;
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn paused_clock_advances_by_exact_sleep_duration() {
    let start = time::Instant::now();
    time::sleep(time::Duration::from_millis(2000)).await;
    assert_eq!(start.elapsed(), time::Duration::from_millis(2000));
}

#[core_async::test]
async fn rwlock_is_shared_across_tasks() {
    let slot = Arc::new(sync::RwLock::new(None::<String>));
    let writer = Arc::clone(&slot);

    task::spawn(async move {
        *writer.write().await = Some("cookie".to_string());
    })
    .await
    .unwrap();

    assert_eq!(slot.read().await.as_deref(), Some("cookie"));
}

#[test]
fn block_on_drives_future_to_completion() {
    let value = runtime::block_on(async {
        time::sleep(time::Duration::from_millis(1)).await;
        "done"
    });
    assert_eq!(value, "done");
}

#[test]
fn now_millis_is_after_epoch() {
    assert!(time::now_millis() > 0);
}
