//! # Registered listeners.
//!
//! A [`RegisteredListener`] binds one listener instance, one invocable and one
//! priority for one event category. It is immutable once built and owned by
//! the [`HandlerCollection`](crate::HandlerCollection) of its category.
//!
//! ## Identity
//! ```text
//! RegistrationKey = ListenerId (Arc allocation address) + HandlerId (listener type + name)
//! ```
//! Two registrations are the same registration iff both parts match. Listener
//! identity is by reference, never by value: two equal-looking listener
//! instances always produce distinct keys. A registration keeps its listener's
//! `Arc` alive, so the address cannot be reused while registered.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::core::EventBus;
use crate::error::{BusError, HandlerResult};
use crate::events::{EventCategory, Priority};
use crate::handlers::decl::{HandlerDecl, Listener};
use crate::handlers::invoke::InvokerRef;

/// Reference identity of a listener instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(usize);

impl ListenerId {
    /// Identity of the instance behind `listener`.
    pub fn of<L: ?Sized>(listener: &Arc<L>) -> Self {
        Self(Arc::as_ptr(listener).cast::<()>() as usize)
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Identity of a declared handler: the declaring listener type plus the handler name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId {
    listener: EventCategory,
    name: &'static str,
}

impl HandlerId {
    /// Creates a handler id.
    pub fn new(listener: EventCategory, name: &'static str) -> Self {
        Self { listener, name }
    }

    /// Declaring listener type.
    #[inline]
    pub fn listener(&self) -> EventCategory {
        self.listener
    }

    /// Declared handler name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.listener.short_name(), self.name)
    }
}

/// Key that identifies one registration inside a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegistrationKey {
    /// Listener instance.
    pub listener: ListenerId,
    /// Handler of that instance.
    pub handler: HandlerId,
}

/// One listener instance bound to one handler, priority and category.
#[derive(Clone)]
pub struct RegisteredListener {
    listener: Arc<dyn Any + Send + Sync>,
    key: RegistrationKey,
    category: EventCategory,
    priority: Priority,
    invoker: InvokerRef,
}

impl RegisteredListener {
    /// Validates `decl` against `bus` and binds it to `listener`.
    ///
    /// # Errors
    /// See [`RegisteredListener::validate`]. Additionally fails with
    /// [`BusError::TypeMismatch`] if `decl` was declared by a type other than `L`.
    pub fn new<L: Listener>(
        bus: &EventBus,
        listener: Arc<L>,
        decl: &HandlerDecl,
        invoker: InvokerRef,
    ) -> Result<Self, BusError> {
        let priority = Self::validate(bus, decl)?;
        if decl.listener() != EventCategory::of::<L>() {
            return Err(BusError::TypeMismatch {
                handler: decl.handler().to_string(),
                what: "listener",
                expected: decl.listener().name(),
            });
        }
        let key = RegistrationKey {
            listener: ListenerId::of(&listener),
            handler: *decl.handler(),
        };
        Ok(Self {
            listener,
            key,
            category: decl.event(),
            priority,
            invoker,
        })
    }

    /// Checks that `decl` can be registered on `bus` and returns its effective priority.
    ///
    /// # Errors
    /// - [`BusError::NotAHandler`] if the bus's marker does not mark it;
    /// - [`BusError::EventNotAccepted`] if its event type is outside the bus's event filter;
    /// - [`BusError::ListenerNotAccepted`] if its declaring type is outside the listener filter.
    pub fn validate(bus: &EventBus, decl: &HandlerDecl) -> Result<Priority, BusError> {
        let cfg = bus.config();
        let Some(priority) = bus.marker().mark(decl, cfg.default_priority) else {
            return Err(BusError::NotAHandler {
                handler: decl.handler().to_string(),
            });
        };
        if !cfg.event_filter.accepts(&decl.event()) {
            return Err(BusError::EventNotAccepted {
                handler: decl.handler().to_string(),
                event: decl.event(),
            });
        }
        if !cfg.listener_filter.accepts(&decl.listener()) {
            return Err(BusError::ListenerNotAccepted {
                handler: decl.handler().to_string(),
                listener: decl.listener(),
            });
        }
        Ok(priority)
    }

    /// Invokes the handler body with this registration's listener.
    #[inline]
    pub fn fire(&self, event: &dyn Any) -> HandlerResult {
        self.invoker.invoke(&*self.listener, event)
    }

    /// Registration identity.
    #[inline]
    pub fn key(&self) -> &RegistrationKey {
        &self.key
    }

    /// Listener instance identity.
    #[inline]
    pub fn listener_id(&self) -> ListenerId {
        self.key.listener
    }

    /// Handler identity.
    #[inline]
    pub fn handler(&self) -> &HandlerId {
        &self.key.handler
    }

    /// Event category this registration receives.
    #[inline]
    pub fn category(&self) -> EventCategory {
        self.category
    }

    /// Delivery priority (lower first).
    #[inline]
    pub fn priority(&self) -> Priority {
        self.priority
    }
}

impl PartialEq for RegisteredListener {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for RegisteredListener {}

impl fmt::Debug for RegisteredListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredListener")
            .field("handler", &self.key.handler)
            .field("listener", &self.key.listener)
            .field("category", &self.category)
            .field("priority", &self.priority)
            .finish()
    }
}

impl fmt::Display for RegisteredListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.key.handler, self.key.listener)
    }
}
