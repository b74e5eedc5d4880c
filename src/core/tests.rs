//! End-to-end tests of the tokio runtime around the serializer.
//!
//! All tests run on a paused clock, so timings are exact.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::time::{self, Instant};

use super::*;
use crate::events::{Event, EventKind};
use crate::items::{Presentation, QueueItem, Transition};
use crate::subscribers::Subscribe;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

async fn shown(view: &mut watch::Receiver<Presentation>) -> Presentation {
    view.wait_for(|p| p.current.is_some())
        .await
        .expect("queue alive")
        .clone()
}

async fn cleared(view: &mut watch::Receiver<Presentation>) -> Presentation {
    view.wait_for(|p| p.current.is_none())
        .await
        .expect("queue alive")
        .clone()
}

fn text(p: &Presentation) -> &str {
    p.current.as_ref().map(QueueItem::text).unwrap_or("")
}

#[derive(Default)]
struct Kinds(Mutex<Vec<EventKind>>);

#[async_trait]
impl Subscribe for Kinds {
    async fn on_event(&self, ev: &Event) {
        self.0.lock().unwrap().push(ev.kind);
    }
    fn name(&self) -> &'static str {
        "kinds"
    }
}

#[tokio::test(start_paused = true)]
async fn test_overflow_scenario_end_to_end() {
    let start = Instant::now();
    let queue = ToastQueue::with_defaults();
    let mut view = queue.subscribe();
    let mut events = queue.events();

    let ids: Vec<_> = ["A", "B", "C", "D", "E", "F"]
        .into_iter()
        .map(|t| queue.add(t, "info"))
        .collect();

    let b = shown(&mut view).await;
    assert_eq!(start.elapsed(), ms(300));
    assert_eq!(text(&b), "B");
    assert_eq!(b.transition, Transition::Appear);
    assert_eq!(b.phase, Phase::Presenting);
    assert_eq!(b.current.as_ref().map(QueueItem::progress), Some(0.0));

    view.changed().await.expect("queue alive");
    let first_tick = view.borrow().clone();
    assert_eq!(first_tick.transition, Transition::Update);
    assert_eq!(start.elapsed(), ms(400));

    let gone = cleared(&mut view).await;
    assert_eq!(gone.transition, Transition::Disappear);
    assert_eq!(gone.phase, Phase::Idle);
    assert_eq!(start.elapsed(), ms(5_300));

    let c = shown(&mut view).await;
    assert_eq!(text(&c), "C");
    assert_eq!(start.elapsed(), ms(5_600));

    let mut dropped = Vec::new();
    while let Ok(ev) = events.try_recv() {
        if ev.kind == EventKind::ItemDropped {
            dropped.extend(ev.item);
        }
    }
    assert_eq!(dropped, [ids[0]]);

    queue.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn test_pause_freezes_progress_end_to_end() {
    let start = Instant::now();
    let queue = ToastQueue::with_defaults();
    let mut view = queue.subscribe();

    queue.add("A", "info");
    shown(&mut view).await;

    time::sleep_until(start + ms(1_350)).await;
    assert_eq!(queue.current().map(|i| i.progress()), Some(0.2));

    queue.pause();
    time::sleep(Duration::from_secs(10)).await;
    assert_eq!(queue.current().map(|i| i.progress()), Some(0.2));
    assert_eq!(view.borrow().phase, Phase::Paused);

    queue.resume();
    let done = cleared(&mut view).await;
    assert_eq!(done.transition, Transition::Disappear);
    assert_eq!(start.elapsed(), ms(15_300));

    queue.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_retires_on_next_tick_and_restarts_throttle() {
    let start = Instant::now();
    let queue = ToastQueue::with_defaults();
    let mut view = queue.subscribe();

    queue.add("A", "info");
    queue.add("B", "info");
    shown(&mut view).await;

    time::sleep_until(start + ms(1_050)).await;
    queue.dismiss();
    cleared(&mut view).await;
    assert_eq!(start.elapsed(), ms(1_100));

    let b = shown(&mut view).await;
    assert_eq!(text(&b), "B");
    assert_eq!(start.elapsed(), ms(1_400));

    queue.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn test_controls_while_idle_do_not_leak_into_next_item() {
    let start = Instant::now();
    let queue = ToastQueue::with_defaults();
    let mut view = queue.subscribe();

    queue.pause();
    queue.dismiss();
    queue.add("A", "info");
    shown(&mut view).await;

    time::sleep_until(start + ms(1_350)).await;
    let now = queue.handle().presentation();
    assert_eq!(now.phase, Phase::Presenting);
    assert_eq!(now.current.map(|i| i.progress()), Some(0.2));

    queue.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn test_item_scoped_controls_ignore_retired_items() {
    let queue = ToastQueue::with_defaults();
    let handle = queue.handle();
    let mut view = handle.subscribe();

    let a = handle.add("A", "info");
    shown(&mut view).await;
    handle.dismiss_item(a);
    cleared(&mut view).await;

    let b = handle.add("B", "info");
    let shown_b = shown(&mut view).await;
    assert_eq!(shown_b.current.map(|i| i.id()), Some(b));

    // A render context still holding A's id must not freeze B.
    handle.pause_item(a);
    handle.dismiss_item(a);
    time::sleep(ms(1_050)).await;
    let now = handle.presentation();
    assert_eq!(now.phase, Phase::Presenting);
    assert_eq!(now.current.map(|i| i.progress()), Some(0.2));

    handle.pause_item(b);
    let paused = view
        .wait_for(|p| p.phase == Phase::Paused)
        .await
        .expect("queue alive")
        .clone();
    assert_eq!(paused.transition, Transition::Update);
    assert_eq!(paused.current.map(|i| i.id()), Some(b));

    queue.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn test_one_item_at_a_time() {
    let queue = ToastQueue::with_defaults();
    let mut view = queue.subscribe();
    let mut events = queue.events();

    for t in ["A", "B", "C"] {
        queue.add(t, "info");
    }
    let mut order = Vec::new();
    for _ in 0..3 {
        let p = shown(&mut view).await;
        order.push(text(&p).to_string());
        queue.dismiss();
        cleared(&mut view).await;
    }
    assert_eq!(order, ["A", "B", "C"]);

    let mut visible = None;
    while let Ok(ev) = events.try_recv() {
        match ev.kind {
            EventKind::ItemPresented => {
                assert!(visible.is_none(), "two items visible at once");
                visible = ev.item;
            }
            EventKind::ItemRetired => {
                assert_eq!(visible.take(), ev.item);
            }
            _ => {}
        }
    }
    assert!(visible.is_none());

    queue.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_full_lifecycle_and_shutdown() {
    let kinds = Arc::new(Kinds::default());
    let cfg = QueueConfig {
        appear_delay: Duration::ZERO,
        ..QueueConfig::default()
    };
    let queue = ToastQueue::builder(cfg)
        .with_subscriber(kinds.clone())
        .build()
        .expect("valid config");
    let mut view = queue.subscribe();

    queue.add("A", "info");
    shown(&mut view).await;
    queue.dismiss();
    cleared(&mut view).await;

    let late = queue.handle();
    queue.shutdown().await.expect("clean shutdown");
    assert!(late.is_closed());
    late.add("ignored", "info");
    late.pause();

    let seen = kinds.0.lock().unwrap().clone();
    assert_eq!(
        seen,
        [
            EventKind::ItemSubmitted,
            EventKind::ItemPresented,
            EventKind::ItemControlled,
            EventKind::ItemRetired,
            EventKind::QueueStopped,
        ]
    );
}

#[tokio::test]
async fn test_builder_rejects_invalid_config() {
    let cfg = QueueConfig {
        tick_period: Duration::ZERO,
        ..QueueConfig::default()
    };
    let err = ToastQueue::new(cfg).err().expect("must reject");
    assert_eq!(err.as_label(), "queue_invalid_config");
}

#[tokio::test(start_paused = true)]
async fn test_add_item_keeps_caller_id() {
    let queue = ToastQueue::with_defaults();
    let mut view = queue.subscribe();
    let item = QueueItem::with_id(crate::items::ItemId::from_raw(u64::MAX), "custom", "star");
    let id = queue.add_item(item);

    let p = shown(&mut view).await;
    assert_eq!(p.current.map(|i| i.id()), Some(id));
    queue.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn test_drop_without_shutdown_releases_subscribers() {
    let kinds = Arc::new(Kinds::default());
    let queue = ToastQueue::builder(QueueConfig::default())
        .with_subscriber(kinds.clone())
        .build()
        .expect("valid config");

    queue.add("A", "info");
    drop(queue);
    tokio::task::yield_now().await;
    time::sleep(Duration::from_secs(60)).await;

    assert_eq!(Arc::strong_count(&kinds), 1, "workers must let go of the subscriber");
    let seen = kinds.0.lock().unwrap().clone();
    assert_eq!(seen, [EventKind::ItemSubmitted, EventKind::QueueStopped]);
}
