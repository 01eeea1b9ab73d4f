//! # Event categories.
//!
//! An [`EventCategory`] is the stable, hashable tag the bus uses as a registry key.
//! It is derived from a Rust type ([`EventCategory::of`]) so no runtime type
//! inspection of event values is needed: the category of a fired event is its
//! concrete type.
//!
//! The same tag type also names listener types, which lets the configuration
//! filter both events and listeners with one [`CategoryFilter`](crate::CategoryFilter).
//!
//! ## Example
//! ```rust
//! use eventvisor::{Event, EventCategory};
//!
//! struct Ping;
//! impl Event for Ping {}
//!
//! let a = EventCategory::of::<Ping>();
//! let b = EventCategory::of::<Ping>();
//! assert_eq!(a, b);
//! assert!(a.name().ends_with("Ping"));
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Marker trait for values that can be fired through an [`EventBus`](crate::EventBus).
///
/// Events are caller-owned; the bus only ever hands out shared references.
/// Routing always uses the concrete type: see [`EventCategory::of_val`].
pub trait Event: Any + Send + Sync + sealed::Categorized {}

mod sealed {
    use super::EventCategory;

    /// Category of a value's concrete type. Implemented for every type and
    /// nameable only inside this crate, so it cannot be overridden.
    pub trait Categorized {
        fn concrete_category(&self) -> EventCategory;
    }

    impl<T: Send + Sync + 'static> Categorized for T {
        #[inline]
        fn concrete_category(&self) -> EventCategory {
            EventCategory::of::<T>()
        }
    }
}

/// Stable identifier of an event (or listener) type.
///
/// Equality and hashing use the [`TypeId`] only; the name is informational
/// and used in errors and logs.
#[derive(Clone, Copy)]
pub struct EventCategory {
    id: TypeId,
    name: &'static str,
}

impl EventCategory {
    /// Returns the category of type `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns the category of `event`'s concrete type.
    ///
    /// Works through `dyn Event`, so type-erased events route like typed ones.
    #[inline]
    pub fn of_val(event: &dyn Event) -> Self {
        <dyn Event as sealed::Categorized>::concrete_category(event)
    }

    /// Returns the underlying type id.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the type name without its module path (`a::b::Ping` → `Ping`).
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        match base.rfind("::") {
            Some(pos) => &self.name[pos + 2..],
            None => self.name,
        }
    }

    /// True if `value` is an instance of this category's type.
    #[inline]
    pub fn matches(&self, value: &dyn Any) -> bool {
        (*value).type_id() == self.id
    }
}

impl PartialEq for EventCategory {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventCategory {}

impl Hash for EventCategory {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventCategory").field(&self.name).finish()
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
