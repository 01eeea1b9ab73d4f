//! # Typed event bus.
//!
//! [`EventBus`] maps each [`EventCategory`] to a [`HandlerCollection`] and
//! orchestrates registration and firing.
//!
//! ## Rules
//! - **Synchronous**: `fire`, `register` and `unregister` run on the caller's thread.
//! - **Ordered**: handlers of a category run in ascending priority, ties in registration order.
//! - **No subscribers is normal**: firing an event nobody listens to does nothing.
//! - **Fail-fast**: the first handler error aborts the fire and is returned untouched;
//!   panics unwind through `fire` untouched too.
//! - **Weakly consistent**: a fire reaches every listener registered before it
//!   started; racing registrations may or may not be seen.
//! - **Atomic per listener**: `register` validates every handler before inserting any.
//! - **Idempotent**: registering an instance twice, or unregistering one that
//!   was never registered, changes nothing.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use eventvisor::{Event, EventBus, HandlerSet, Listener};
//!
//! struct Ping;
//! impl Event for Ping {}
//!
//! struct Named {
//!     name: &'static str,
//!     seen: Arc<Mutex<Vec<&'static str>>>,
//! }
//!
//! impl Listener for Named {
//!     fn handlers(set: &mut HandlerSet<Self>) {
//!         set.handle::<Ping, _>("on_ping", |me, _| {
//!             me.seen.lock().unwrap().push(me.name);
//!             Ok(())
//!         });
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let bus = EventBus::new();
//! let a = Arc::new(Named { name: "a", seen: seen.clone() });
//! bus.register(&a)?;
//! bus.fire(&Ping)?;
//! bus.unregister(&a)?;
//! bus.fire(&Ping)?;
//! assert_eq!(*seen.lock().unwrap(), vec!["a"]);
//! # Ok(())
//! # }
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::{Config, EventBusBuilder};
use crate::error::{BusError, HandlerResult};
use crate::events::{Event, EventCategory};
use crate::handlers::{
    HandlerCollection, HandlerSet, Listener, ListenerId, RegisteredListener, RegistrationKey,
};
use crate::strategy::{HandlerMarker, InvokerFactory};

struct Inner {
    handlers: RwLock<HashMap<EventCategory, Arc<HandlerCollection>>>,
    cfg: Config,
    marker: Arc<dyn HandlerMarker>,
    invokers: Arc<dyn InvokerFactory>,
}

/// In-process event bus with priority-ordered dispatch.
///
/// Cheap to clone: clones share the same registry.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<Inner>,
}

impl EventBus {
    /// Creates a bus with the default configuration and strategies.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder for a customised bus.
    pub fn builder() -> EventBusBuilder {
        EventBusBuilder::new()
    }

    pub(crate) fn new_internal(
        cfg: Config,
        marker: Arc<dyn HandlerMarker>,
        invokers: Arc<dyn InvokerFactory>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                handlers: RwLock::new(HashMap::new()),
                cfg,
                marker,
                invokers,
            }),
        }
    }

    /// Returns the bus configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.inner.cfg
    }

    /// Returns the handler-marking strategy.
    #[inline]
    pub fn marker(&self) -> &dyn HandlerMarker {
        self.inner.marker.as_ref()
    }

    /// Returns the invocable-construction strategy.
    #[inline]
    pub fn invokers(&self) -> &dyn InvokerFactory {
        self.inner.invokers.as_ref()
    }

    /// Fires `event` to every handler registered for its type.
    ///
    /// Returns `Ok(())` immediately if nobody listens to `E`.
    ///
    /// # Errors
    /// The first error returned by a handler, exactly as returned; later
    /// handlers are not invoked.
    pub fn fire<E: Event>(&self, event: &E) -> HandlerResult {
        self.dispatch(EventCategory::of::<E>(), event)
    }

    /// Fires a type-erased event, routed by its concrete type.
    ///
    /// # Errors
    /// Same as [`EventBus::fire`].
    pub fn fire_dyn(&self, event: &dyn Event) -> HandlerResult {
        self.dispatch(EventCategory::of_val(event), event)
    }

    fn dispatch(&self, category: EventCategory, event: &dyn Any) -> HandlerResult {
        match self.collection(&category) {
            Some(handlers) => handlers.fire(event),
            None => Ok(()),
        }
    }

    /// Registers every handler `L` declares and the marker accepts.
    ///
    /// All handlers are validated before any is inserted: on error nothing
    /// from this call is registered.
    ///
    /// # Errors
    /// - [`BusError::InvalidListener`] if `L` is outside the listener filter;
    /// - [`BusError::DuplicateHandler`] if `L` declares a name twice for one event type;
    /// - any error from [`RegisteredListener::validate`] or the invoker factory,
    ///   naming the offending handler.
    pub fn register<L: Listener>(&self, listener: &Arc<L>) -> Result<(), BusError> {
        self.check_listener::<L>()?;
        let default = self.inner.cfg.default_priority;

        let mut staged = Vec::new();
        for decl in HandlerSet::<L>::try_collect()? {
            if self.inner.marker.mark(&decl, default).is_none() {
                continue;
            }
            let invoker = self.inner.invokers.create(&decl)?;
            staged.push(RegisteredListener::new(
                self,
                Arc::clone(listener),
                &decl,
                invoker,
            )?);
        }

        let mut added = 0usize;
        for rl in staged {
            if self.collection_or_create(rl.category()).register(rl) {
                added += 1;
            }
        }
        tracing::debug!(
            listener = %EventCategory::of::<L>(),
            id = %ListenerId::of(listener),
            handlers = added,
            "listener registered"
        );
        Ok(())
    }

    /// Removes every registration `listener` made through [`EventBus::register`].
    ///
    /// Handlers that are not registered are skipped silently.
    ///
    /// # Errors
    /// [`BusError::InvalidListener`] if `L` is outside the listener filter, or
    /// [`BusError::DuplicateHandler`] if `L` declares a name twice for one event type.
    pub fn unregister<L: Listener>(&self, listener: &Arc<L>) -> Result<(), BusError> {
        self.check_listener::<L>()?;
        let default = self.inner.cfg.default_priority;
        let id = ListenerId::of(listener);

        let mut removed = 0usize;
        for decl in HandlerSet::<L>::try_collect()? {
            if self.inner.marker.mark(&decl, default).is_none() {
                continue;
            }
            let Some(handlers) = self.collection(&decl.event()) else {
                continue;
            };
            let key = RegistrationKey {
                listener: id,
                handler: *decl.handler(),
            };
            if handlers.unregister(&key) {
                removed += 1;
            }
        }
        tracing::debug!(
            listener = %EventCategory::of::<L>(),
            %id,
            handlers = removed,
            "listener unregistered"
        );
        Ok(())
    }

    /// Removes every registration of `listener`, whatever handler produced it.
    ///
    /// Returns how many registrations were removed.
    ///
    /// # Errors
    /// [`BusError::InvalidListener`] if `L` is outside the listener filter.
    pub fn unregister_all<L: Listener>(&self, listener: &Arc<L>) -> Result<usize, BusError> {
        self.check_listener::<L>()?;
        let id = ListenerId::of(listener);
        let collections: Vec<_> = self.inner.handlers.read().values().cloned().collect();
        let removed: usize = collections
            .iter()
            .map(|c| c.unregister_listener(id))
            .sum();
        tracing::debug!(
            listener = %EventCategory::of::<L>(),
            %id,
            handlers = removed,
            "listener fully unregistered"
        );
        Ok(removed)
    }

    /// True if `listener` currently has at least one registration.
    pub fn is_registered<L: Listener>(&self, listener: &Arc<L>) -> bool {
        let id = ListenerId::of(listener);
        self.inner
            .handlers
            .read()
            .values()
            .any(|c| c.contains_listener(id))
    }

    /// Number of registrations for `category`.
    pub fn handler_count(&self, category: &EventCategory) -> usize {
        self.collection(category).map_or(0, |c| c.len())
    }

    /// Number of registrations for event type `E`.
    pub fn handler_count_for<E: Event>(&self) -> usize {
        self.handler_count(&EventCategory::of::<E>())
    }

    /// Categories that have had at least one registration.
    pub fn categories(&self) -> Vec<EventCategory> {
        self.inner.handlers.read().keys().copied().collect()
    }

    /// Returns the collection for `category`, if one was ever created.
    pub fn collection(&self, category: &EventCategory) -> Option<Arc<HandlerCollection>> {
        self.inner.handlers.read().get(category).cloned()
    }

    fn collection_or_create(&self, category: EventCategory) -> Arc<HandlerCollection> {
        if let Some(existing) = self.collection(&category) {
            return existing;
        }
        let mut map = self.inner.handlers.write();
        let handlers = map.entry(category).or_insert_with(|| {
            tracing::trace!(%category, "handler collection created");
            Arc::new(HandlerCollection::new(category))
        });
        Arc::clone(handlers)
    }

    fn check_listener<L: Listener>(&self) -> Result<(), BusError> {
        let listener = EventCategory::of::<L>();
        if self.inner.cfg.listener_filter.accepts(&listener) {
            Ok(())
        } else {
            Err(BusError::InvalidListener { listener })
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("config", &self.inner.cfg)
            .field("marker", &self.inner.marker.name())
            .field("categories", &self.categories())
            .finish()
    }
}
