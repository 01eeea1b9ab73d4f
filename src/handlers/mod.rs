//! # Handlers: declaration, registration and per-category storage.
//!
//! This module provides the handler-related types, leaves first:
//! - [`Invoke`], [`InvokeFn`], [`InvokerRef`] the callable handler body
//! - [`Listener`], [`HandlerSet`], [`HandlerDecl`] how a listener type declares its handlers
//! - [`RegisteredListener`] one listener instance bound to one handler
//! - [`HandlerCollection`] the priority-ordered registrations of one category
//!
//! ## Flow
//! ```text
//! L::handlers(&mut HandlerSet<L>) ──► Vec<HandlerDecl>
//!        └─► HandlerMarker::mark ─► InvokerFactory::create ─► RegisteredListener::new
//!                                                                 └─► HandlerCollection::register
//! ```

mod collection;
mod decl;
mod invoke;
mod registered;

pub use collection::HandlerCollection;
pub use decl::{HandlerDecl, HandlerSet, Listener};
pub use invoke::{Invoke, InvokeFn, InvokerRef};
pub use registered::{HandlerId, ListenerId, RegisteredListener, RegistrationKey};
