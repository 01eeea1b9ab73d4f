//! Event data model: categories and priorities.
//!
//! This module groups the **routing keys** used by the bus:
//!
//! ## Contents
//! - [`Event`], [`EventCategory`] what can be fired and how it is routed
//! - [`Priority`], [`EventPriority`] delivery order among handlers of one category
//!
//! ## Quick reference
//! ```text
//! bus.fire(&Ping) ──► EventCategory::of::<Ping>() ──► HandlerCollection
//!                                                       (sorted by Priority, lowest first)
//! ```

mod category;
mod priority;

pub use category::{Event, EventCategory};
pub use priority::{EventPriority, Priority};
