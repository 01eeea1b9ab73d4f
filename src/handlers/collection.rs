//! # Per-category handler collection.
//!
//! [`HandlerCollection`] keeps every registration for one event category,
//! sorted by ascending [`Priority`](crate::Priority), and provides the firing
//! primitive.
//!
//! ## Architecture
//! ```text
//! register / unregister                     fire(event)
//!        │                                      │
//!        ▼ (write lock, copy-on-write)          ▼ (read lock, Arc clone only)
//!   RwLock<Arc<[RegisteredListener]>> ──────► snapshot ──► rl1.fire ─► rl2.fire ─► ...
//! ```
//!
//! ## Rules
//! - **Sorted**: a snapshot is always in non-decreasing priority order.
//! - **Stable ties**: equal priorities keep insertion order.
//! - **Idempotent**: inserting a key that is already present is a no-op.
//! - **Snapshot per fire**: the lock is released before the first handler runs, so
//!   handlers may register, unregister or fire reentrantly without deadlocking.
//! - **Fail-fast**: the first handler error ends the traversal and is returned as-is.
//!
//! ## Consistency
//! A fire sees every registration that completed before it took its snapshot.
//! Registrations racing with an in-flight fire are not seen by it, and
//! registrations removed during a fire may still receive that event.

use std::any::Any;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::HandlerResult;
use crate::events::EventCategory;
use crate::handlers::registered::{ListenerId, RegisteredListener, RegistrationKey};

/// Ordered, thread-safe set of registrations for one category.
pub struct HandlerCollection {
    category: EventCategory,
    listeners: RwLock<Arc<[RegisteredListener]>>,
}

impl HandlerCollection {
    /// Creates an empty collection for `category`.
    #[must_use]
    pub fn new(category: EventCategory) -> Self {
        Self {
            category,
            listeners: RwLock::new(Arc::from(Vec::new())),
        }
    }

    /// Category served by this collection.
    #[inline]
    pub fn category(&self) -> EventCategory {
        self.category
    }

    /// Inserts `rl` after every registration with a lower or equal priority.
    ///
    /// Returns `false` if a registration with the same key is already present.
    pub fn register(&self, rl: RegisteredListener) -> bool {
        let mut guard = self.listeners.write();
        if guard.iter().any(|x| x.key() == rl.key()) {
            return false;
        }
        let at = guard.partition_point(|x| x.priority() <= rl.priority());
        let mut next = Vec::with_capacity(guard.len() + 1);
        next.extend_from_slice(&guard[..at]);
        next.push(rl);
        next.extend_from_slice(&guard[at..]);
        *guard = Arc::from(next);
        true
    }

    /// Removes the registration with `key`.
    ///
    /// Returns `false` if it was not present.
    pub fn unregister(&self, key: &RegistrationKey) -> bool {
        self.remove_where(|rl| rl.key() == key) > 0
    }

    /// Removes every registration of one listener instance; returns how many were removed.
    pub fn unregister_listener(&self, listener: ListenerId) -> usize {
        self.remove_where(|rl| rl.listener_id() == listener)
    }

    fn remove_where(&self, pred: impl Fn(&RegisteredListener) -> bool) -> usize {
        let mut guard = self.listeners.write();
        let before = guard.len();
        if !guard.iter().any(&pred) {
            return 0;
        }
        let next: Vec<RegisteredListener> =
            guard.iter().filter(|&rl| !pred(rl)).cloned().collect();
        *guard = Arc::from(next);
        before - guard.len()
    }

    /// Returns a point-in-time view of the registrations, in delivery order.
    #[inline]
    pub fn snapshot(&self) -> Arc<[RegisteredListener]> {
        Arc::clone(&self.listeners.read())
    }

    /// Delivers `event` to a snapshot of the registrations, lowest priority first.
    ///
    /// Stops at the first handler error and returns it unchanged.
    pub fn fire(&self, event: &dyn Any) -> HandlerResult {
        let snapshot = self.snapshot();
        tracing::trace!(
            category = %self.category,
            handlers = snapshot.len(),
            "dispatching event"
        );
        for rl in snapshot.iter() {
            rl.fire(event)?;
        }
        Ok(())
    }

    /// True if a registration with `key` is present.
    pub fn contains(&self, key: &RegistrationKey) -> bool {
        self.listeners.read().iter().any(|rl| rl.key() == key)
    }

    /// True if any registration belongs to `listener`.
    pub fn contains_listener(&self, listener: ListenerId) -> bool {
        self.listeners
            .read()
            .iter()
            .any(|rl| rl.listener_id() == listener)
    }

    /// Number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    /// True if there are no registrations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }
}

impl std::fmt::Debug for HandlerCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerCollection")
            .field("category", &self.category)
            .field("listeners", &self.snapshot())
            .finish()
    }
}
