//! # Example: priority_order
//!
//! Demonstrates priority-ordered delivery, unregistration and fail-fast errors.
//!
//! Shows how to:
//! - Implement the [`Listener`] trait for two listener types.
//! - Register instances on an [`EventBus`] and fire an event.
//! - Observe that a failing handler stops delivery and its error reaches the caller.
//!
//! ## Flow
//! ```text
//! register(Billing @10), register(Audit @5)
//!     └─► fire(Ping) ──► Audit.on_ping ─► Billing.on_ping
//! unregister(Audit)
//!     └─► fire(Ping) ──► Billing.on_ping
//! register(Gate @7, refuses)
//!     └─► fire(Ping) ──► Gate.on_ping ✗ (Billing skipped, error returned)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=eventvisor=debug cargo run --example priority_order
//! ```

use std::sync::Arc;

use eventvisor::{Event, EventBus, HandlerSet, Listener};
use tracing_subscriber::EnvFilter;

struct Ping {
    seq: u32,
}

impl Event for Ping {}

struct Billing;
struct Audit;
struct Gate;

impl Listener for Billing {
    fn handlers(set: &mut HandlerSet<Self>) {
        set.on::<Ping, _>("on_ping", 10, |_, ping| {
            println!("[billing] ping #{}", ping.seq);
            Ok(())
        });
    }
}

impl Listener for Audit {
    fn handlers(set: &mut HandlerSet<Self>) {
        set.on::<Ping, _>("on_ping", 5, |_, ping| {
            println!("[audit]   ping #{}", ping.seq);
            Ok(())
        });
    }
}

impl Listener for Gate {
    fn handlers(set: &mut HandlerSet<Self>) {
        set.on::<Ping, _>("on_ping", 7, |_, ping| {
            println!("[gate]    refusing ping #{}", ping.seq);
            Err(format!("ping #{} refused", ping.seq).into())
        });
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let bus = EventBus::new();
    let billing = Arc::new(Billing);
    let audit = Arc::new(Audit);

    bus.register(&billing)?;
    bus.register(&audit)?;
    bus.fire(&Ping { seq: 1 })?;

    bus.unregister(&audit)?;
    bus.fire(&Ping { seq: 2 })?;

    bus.register(&Arc::new(Gate))?;
    match bus.fire(&Ping { seq: 3 }) {
        Ok(()) => println!("unexpected: ping #3 delivered"),
        Err(e) => println!("[caller]  fire failed: {e}"),
    }
    Ok(())
}
