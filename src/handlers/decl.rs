//! # Listener declarations.
//!
//! A [`Listener`] states its handlers explicitly by filling a [`HandlerSet`].
//! Each entry is a [`HandlerDecl`]: a named handler body for one event type,
//! optionally marked with a priority.
//!
//! ## Marking
//! ```text
//! set.on::<Ping>("on_ping", Priority(10), f)   → marked, priority 10
//! set.handle::<Ping>("on_ping", f)             → marked, bus default priority
//! set.declare::<Ping>("audit_ping", f)         → unmarked; the HandlerMarker decides
//! ```
//!
//! Whether a declaration becomes a registration is decided by the bus's
//! [`HandlerMarker`](crate::HandlerMarker), not by the declaration itself.
//!
//! ## Example
//! ```rust
//! use eventvisor::{Event, EventPriority, HandlerSet, Listener};
//!
//! struct Ping;
//! impl Event for Ping {}
//!
//! struct Audit;
//!
//! impl Listener for Audit {
//!     fn handlers(set: &mut HandlerSet<Self>) {
//!         set.on::<Ping, _>("on_ping", EventPriority::Monitor, |_me, _ping| Ok(()));
//!     }
//! }
//!
//! let decls = HandlerSet::<Audit>::collect();
//! assert_eq!(decls.len(), 1);
//! assert_eq!(decls[0].handler().name(), "on_ping");
//! ```

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

use crate::error::{BusError, HandlerResult};
use crate::events::{Event, EventCategory, Priority};
use crate::handlers::invoke::{InvokeFn, InvokerRef};
use crate::handlers::registered::HandlerId;

/// A type whose instances can be registered on an [`EventBus`](crate::EventBus).
///
/// Handlers are declared per type, once; every registered instance gets its own
/// registrations, keyed by instance identity.
pub trait Listener: Any + Send + Sync {
    /// Declares this type's handlers.
    fn handlers(set: &mut HandlerSet<Self>)
    where
        Self: Sized;
}

/// One declared handler of a listener type.
#[derive(Clone)]
pub struct HandlerDecl {
    handler: HandlerId,
    event: EventCategory,
    marked: bool,
    priority: Option<Priority>,
    invoker: InvokerRef,
}

impl HandlerDecl {
    /// Creates a declaration from its parts.
    ///
    /// Prefer [`HandlerSet`] which keeps the listener/event types consistent
    /// with the invocable.
    pub fn new(
        handler: HandlerId,
        event: EventCategory,
        marked: bool,
        priority: Option<Priority>,
        invoker: InvokerRef,
    ) -> Self {
        Self {
            handler,
            event,
            marked,
            priority,
            invoker,
        }
    }

    /// Handler identity (declaring listener type + name).
    #[inline]
    pub fn handler(&self) -> &HandlerId {
        &self.handler
    }

    /// Declared handler name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.handler.name()
    }

    /// Category of the single event parameter.
    #[inline]
    pub fn event(&self) -> EventCategory {
        self.event
    }

    /// Declaring listener type.
    #[inline]
    pub fn listener(&self) -> EventCategory {
        self.handler.listener()
    }

    /// True if declared with [`HandlerSet::on`] or [`HandlerSet::handle`].
    #[inline]
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// Explicitly declared priority, if any.
    #[inline]
    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// The declared handler body.
    #[inline]
    pub fn invoker(&self) -> &InvokerRef {
        &self.invoker
    }
}

impl fmt::Debug for HandlerDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerDecl")
            .field("handler", &self.handler)
            .field("event", &self.event)
            .field("marked", &self.marked)
            .field("priority", &self.priority)
            .finish()
    }
}

/// Collects the handler declarations of listener type `L`.
pub struct HandlerSet<L> {
    decls: Vec<HandlerDecl>,
    _listener: PhantomData<fn(&L)>,
}

impl<L: Listener> HandlerSet<L> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            decls: Vec::new(),
            _listener: PhantomData,
        }
    }

    /// Runs `L::handlers` and returns its declarations in declaration order.
    pub fn collect() -> Vec<HandlerDecl> {
        let mut set = Self::new();
        L::handlers(&mut set);
        set.decls
    }

    /// Like [`HandlerSet::collect`], but rejects a name declared twice for one event type.
    ///
    /// # Errors
    /// [`BusError::DuplicateHandler`] naming the first repeated declaration.
    pub fn try_collect() -> Result<Vec<HandlerDecl>, BusError> {
        let decls = Self::collect();
        let mut seen = HashSet::with_capacity(decls.len());
        for decl in &decls {
            if !seen.insert((decl.name(), decl.event())) {
                return Err(BusError::DuplicateHandler {
                    handler: decl.handler().to_string(),
                    event: decl.event(),
                });
            }
        }
        Ok(decls)
    }

    /// Declares a marked handler with an explicit priority.
    pub fn on<E, F>(
        &mut self,
        name: &'static str,
        priority: impl Into<Priority>,
        f: F,
    ) -> &mut Self
    where
        E: Event,
        F: Fn(&L, &E) -> HandlerResult + Send + Sync + 'static,
    {
        self.push::<E, F>(name, true, Some(priority.into()), f)
    }

    /// Declares a marked handler that uses the bus's default priority.
    pub fn handle<E, F>(&mut self, name: &'static str, f: F) -> &mut Self
    where
        E: Event,
        F: Fn(&L, &E) -> HandlerResult + Send + Sync + 'static,
    {
        self.push::<E, F>(name, true, None, f)
    }

    /// Declares an unmarked handler body.
    ///
    /// It is registered only if the bus's marker marks it by some other rule.
    pub fn declare<E, F>(&mut self, name: &'static str, f: F) -> &mut Self
    where
        E: Event,
        F: Fn(&L, &E) -> HandlerResult + Send + Sync + 'static,
    {
        self.push::<E, F>(name, false, None, f)
    }

    fn push<E, F>(
        &mut self,
        name: &'static str,
        marked: bool,
        priority: Option<Priority>,
        f: F,
    ) -> &mut Self
    where
        E: Event,
        F: Fn(&L, &E) -> HandlerResult + Send + Sync + 'static,
    {
        let handler = HandlerId::new(EventCategory::of::<L>(), name);
        let invoker: InvokerRef = InvokeFn::<L, E, F>::arc(handler.to_string(), f);
        self.decls.push(HandlerDecl::new(
            handler,
            EventCategory::of::<E>(),
            marked,
            priority,
            invoker,
        ));
        self
    }

    /// Number of declarations collected so far.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// True if nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

impl<L: Listener> Default for HandlerSet<L> {
    fn default() -> Self {
        Self::new()
    }
}
