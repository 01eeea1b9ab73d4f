//! # Example: async_bridge
//!
//! Demonstrates handing events from the synchronous bus to async consumers.
//!
//! Handlers run on the firing thread and must not block; a listener that owns
//! a bounded `tokio::sync::mpsc` sender can forward events to a task instead.
//!
//! ## Flow
//! ```text
//! fire(OrderPlaced) ──► Forwarder.on_order (try_send) ──► [mpsc] ──► consumer task
//!                   └─► Metrics.on_order  (Monitor)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example async_bridge
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use eventvisor::{Event, EventBus, EventPriority, HandlerSet, Listener};
use tokio::sync::mpsc;

#[derive(Clone, Debug)]
struct OrderPlaced {
    id: u64,
    cents: u64,
}

impl Event for OrderPlaced {}

struct Forwarder {
    tx: mpsc::Sender<OrderPlaced>,
}

impl Listener for Forwarder {
    fn handlers(set: &mut HandlerSet<Self>) {
        set.handle::<OrderPlaced, _>("on_order", |me, order| {
            me.tx.try_send(order.clone())?;
            Ok(())
        });
    }
}

#[derive(Default)]
struct Metrics {
    total_cents: AtomicU64,
}

impl Listener for Metrics {
    fn handlers(set: &mut HandlerSet<Self>) {
        set.on::<OrderPlaced, _>("on_order", EventPriority::Monitor, |me, order| {
            me.total_cents.fetch_add(order.cents, Ordering::Relaxed);
            Ok(())
        });
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (tx, mut rx) = mpsc::channel::<OrderPlaced>(64);
    let bus = EventBus::new();
    let metrics = Arc::new(Metrics::default());

    bus.register(&Arc::new(Forwarder { tx }))?;
    bus.register(&metrics)?;

    let consumer = tokio::spawn(async move {
        let mut handled = 0;
        while let Some(order) = rx.recv().await {
            println!("[consumer] order {} ({} cents)", order.id, order.cents);
            handled += 1;
            if handled == 3 {
                break;
            }
        }
        handled
    });

    let producer = {
        let bus = bus.clone();
        tokio::task::spawn_blocking(move || {
            for id in 1..=3 {
                bus.fire(&OrderPlaced {
                    id,
                    cents: id * 250,
                })?;
            }
            Ok::<_, eventvisor::HandlerError>(())
        })
    };

    producer.await??;
    let handled = consumer.await?;
    println!(
        "[metrics]  {handled} orders, {} cents total",
        metrics.total_cents.load(Ordering::Relaxed)
    );
    Ok(())
}
