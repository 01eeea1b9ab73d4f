//! # eventvisor
//!
//! **Eventvisor** is an in-process, typed event bus for Rust.
//!
//! Listeners declare which event types they handle and at which priority; a
//! publisher fires an event and every handler registered for that event type
//! runs synchronously, on the firing thread, lowest priority first. It is a
//! building block for decoupling producers and consumers of domain events
//! inside one process.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  Listener A  │   │  Listener B  │   │  Listener C  │
//!     │ (handlers()) │   │ (handlers()) │   │ (handlers()) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼ register         ▼ register         ▼ register
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  EventBus                                                         │
//! │  - Config (event / listener filters, default priority)            │
//! │  - HandlerMarker  (which declared handlers count)                 │
//! │  - InvokerFactory (how a handler body is called)                  │
//! │  - Registry: EventCategory ──► HandlerCollection                  │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!  ┌────────────┐     ┌────────────┐     ┌────────────┐
//!  │ Collection │     │ Collection │     │ Collection │   sorted by Priority,
//!  │   (Ping)   │     │   (Pong)   │     │  (Order)   │   copy-on-write
//!  └─────┬──────┘     └────────────┘     └────────────┘
//!        │ fire(&Ping): snapshot, then in order
//!        ├─► B.on_ping (priority 5)
//!        └─► A.on_ping (priority 10)
//! ```
//!
//! ### Firing
//! ```text
//! bus.fire(&event)
//!   ├─► category = EventCategory::of::<E>()
//!   ├─► no collection?  ─► Ok(())
//!   └─► collection.snapshot()          (lock released here)
//!         for rl in snapshot:
//!           rl.fire(&event)?           (first Err returned as-is, rest skipped)
//! ```
//!
//! ## Features
//! | Area              | Description                                                     | Key types / traits                        |
//! |-------------------|-----------------------------------------------------------------|-------------------------------------------|
//! | **Bus**           | Register, unregister and fire, safe from any thread.            | [`EventBus`]                              |
//! | **Listeners**     | Declare handlers explicitly per listener type.                  | [`Listener`], [`HandlerSet`]              |
//! | **Ordering**      | Lower priority first, ties in registration order.               | [`Priority`], [`EventPriority`]           |
//! | **Strategies**    | Choose which declarations count and how they are invoked.       | [`HandlerMarker`], [`InvokerFactory`]     |
//! | **Errors**        | Typed invalid-argument errors; handler errors pass through.     | [`BusError`], [`HandlerError`]            |
//! | **Configuration** | Restrict event and listener types, set the default priority.    | [`Config`], [`EventBusBuilder`]           |
//!
//! ## Optional features
//! - `traced`: exports `TracedInvokers`, which wraps each handler call in a `tracing` span.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use eventvisor::{Event, EventBus, HandlerSet, Listener};
//!
//! struct Ping;
//! impl Event for Ping {}
//!
//! type Order = Arc<Mutex<Vec<&'static str>>>;
//!
//! struct Billing(Order);
//! struct Audit(Order);
//!
//! impl Listener for Billing {
//!     fn handlers(set: &mut HandlerSet<Self>) {
//!         set.on::<Ping, _>("on_ping", 10, |me, _ping| {
//!             me.0.lock().unwrap().push("billing");
//!             Ok(())
//!         });
//!     }
//! }
//!
//! impl Listener for Audit {
//!     fn handlers(set: &mut HandlerSet<Self>) {
//!         set.on::<Ping, _>("on_ping", 5, |me, _ping| {
//!             me.0.lock().unwrap().push("audit");
//!             Ok(())
//!         });
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let order: Order = Arc::default();
//! let bus = EventBus::new();
//!
//! let billing = Arc::new(Billing(order.clone()));
//! let audit = Arc::new(Audit(order.clone()));
//! bus.register(&billing)?;
//! bus.register(&audit)?;
//!
//! bus.fire(&Ping)?;
//! assert_eq!(*order.lock().unwrap(), vec!["audit", "billing"]);
//!
//! bus.unregister(&audit)?;
//! bus.fire(&Ping)?;
//! assert_eq!(*order.lock().unwrap(), vec!["audit", "billing", "billing"]);
//! # Ok(())
//! # }
//! ```
mod core;
mod error;
mod events;
mod handlers;
mod strategy;

// ---- Public re-exports ----

pub use crate::core::{CategoryFilter, Config, EventBus, EventBusBuilder};
pub use error::{BusError, HandlerError, HandlerResult};
pub use events::{Event, EventCategory, EventPriority, Priority};
pub use handlers::{
    HandlerCollection, HandlerDecl, HandlerId, HandlerSet, Invoke, InvokeFn, InvokerRef, Listener,
    ListenerId, RegisteredListener, RegistrationKey,
};
pub use strategy::{DeclaredMarker, DirectInvokers, HandlerMarker, InvokerFactory, PrefixMarker};

// Optional: wrap handler calls in tracing spans.
// Enable with: `--features traced`
#[cfg(feature = "traced")]
pub use strategy::TracedInvokers;
