//! # Example: basic
//!
//! Floods a queue with toasts and watches it present them one at a time.
//!
//! Shows how to:
//! - Build a [`ToastQueue`] with a custom [`QueueConfig`].
//! - Attach the [`LogWriter`] subscriber and route it through `tracing`.
//! - Drive a render surface from the [`Presentation`] watch channel.
//! - Pause, resume and dismiss the visible toast.
//!
//! ## Flow
//! ```text
//! add × 7 ──► IntakeBuffer (capacity 5, two oldest dropped)
//!                 └─► Throttle (appear_delay) ──► Slot ──► watch<Presentation> ──► render loop
//!                                                    └──► Bus ──► LogWriter ──► tracing
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=toastvisor=debug cargo run --example basic
//! ```

use std::{sync::Arc, time::Duration};

use toastvisor::{LogWriter, Presentation, QueueConfig, ToastQueue, Transition};
use tracing_subscriber::EnvFilter;

fn render(p: &Presentation) {
    match (&p.current, p.transition) {
        (Some(item), Transition::Appear) => {
            println!(
                "[ui] appear    {} {:>3.0}%  {}",
                item.icon(),
                item.progress() * 100.0,
                item.text()
            );
        }
        (Some(item), Transition::Update) => {
            println!(
                "[ui] update    {} {:>3.0}%  {} ({:?})",
                item.icon(),
                item.progress() * 100.0,
                item.text(),
                p.phase
            );
        }
        (_, _) => println!("[ui] disappear"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = QueueConfig {
        dismiss_timeout: Duration::from_secs(1),
        tick_period: Duration::from_millis(250),
        ..QueueConfig::default()
    };
    let queue = ToastQueue::builder(cfg)
        .with_subscriber(Arc::new(LogWriter::new()))
        .build()?;

    let mut view = queue.subscribe();
    let surface = tokio::spawn(async move {
        while view.changed().await.is_ok() {
            let p = view.borrow_and_update().clone();
            render(&p);
        }
    });

    for (text, icon) in [
        ("Build started", "hammer"),
        ("Copied to clipboard", "doc.on.doc"),
        ("Saved", "checkmark"),
        ("Uploaded 3 files", "icloud.and.arrow.up"),
        ("Connection restored", "wifi"),
        ("Draft deleted", "trash"),
        ("Build finished", "checkmark.seal"),
    ] {
        queue.add(text, icon);
    }

    tokio::time::sleep(Duration::from_millis(1500)).await;
    queue.pause();
    tokio::time::sleep(Duration::from_secs(1)).await;
    queue.resume();
    tokio::time::sleep(Duration::from_millis(400)).await;
    queue.dismiss();

    tokio::time::sleep(Duration::from_secs(6)).await;
    queue.shutdown().await?;
    surface.await?;
    Ok(())
}
