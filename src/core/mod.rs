//! # Event bus core.
//!
//! Wires configuration, strategies and the category registry together.
//!
//! ## Architecture
//! ```text
//! EventBusBuilder ──► EventBus { Arc<Inner> }
//!                        ├─ Config (event / listener filters, default priority)
//!                        ├─ HandlerMarker  (which decls are handlers)
//!                        ├─ InvokerFactory (how handlers are invoked)
//!                        └─ RwLock<HashMap<EventCategory, Arc<HandlerCollection>>>
//!
//! register(listener) ─► marker ─► invokers ─► RegisteredListener::new ─► collection(cat).register
//! unregister(listener) ─► marker ─► collection(cat).unregister(key)
//! fire(event) ─► collection(category of event)?.fire(event)
//! ```
//!
//! ## Concurrency
//! - Registry lock is held only to look up or create a collection, never while
//!   a handler runs.
//! - A collection is created exactly once per category, under the write lock.

mod builder;
mod bus;
mod config;

pub use builder::EventBusBuilder;
pub use bus::EventBus;
pub use config::{CategoryFilter, Config};
