//! Pluggable registration strategies.
//!
//! This module groups the two knobs that control **which** declared handlers
//! become registrations and **how** their bodies are invoked.
//!
//! ## Contents
//! - [`HandlerMarker`] decides whether a declaration is a handler, and at which priority
//! - [`InvokerFactory`] builds the invocable stored in each registration
//!
//! ## Quick wiring
//! ```text
//! EventBus::register(listener)
//!      └─► for decl in L::handlers:
//!           - marker.mark(decl, default_priority) → None: skip, Some(p): handler
//!           - invokers.create(decl)               → InvokerRef
//! ```
//!
//! ## Defaults
//! - [`DeclaredMarker`]: handlers declared with `on`/`handle` are marked.
//! - [`DirectInvokers`]: the declared closure is called directly.

mod invokers;
mod marker;

pub use invokers::{DirectInvokers, InvokerFactory};
pub use marker::{DeclaredMarker, HandlerMarker, PrefixMarker};

#[cfg(feature = "traced")]
pub use invokers::TracedInvokers;
