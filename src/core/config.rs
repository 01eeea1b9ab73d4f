//! # Bus configuration.
//!
//! Provides [`Config`] the settings that decide which handlers a bus accepts,
//! and [`CategoryFilter`] the allow-list used for event and listener types.
//!
//! Config is used in two ways:
//! 1. **Bus creation**: `EventBus::builder().with_config(cfg).build()`
//! 2. **Validation**: `RegisteredListener::validate` checks every handler against it
//!
//! ## Defaults
//! - `event_filter = Any` → handlers may take any [`Event`](crate::Event) type
//! - `listener_filter = Any` → any [`Listener`](crate::Listener) type may register
//! - `default_priority = Priority::DEFAULT` → `EventPriority::Normal`

use crate::events::{EventCategory, Priority};

/// Allow-list of categories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category is accepted.
    #[default]
    Any,
    /// Only the listed categories are accepted.
    Only(Vec<EventCategory>),
}

impl CategoryFilter {
    /// Creates a filter accepting exactly `categories`.
    pub fn only(categories: impl IntoIterator<Item = EventCategory>) -> Self {
        CategoryFilter::Only(categories.into_iter().collect())
    }

    /// True if `category` passes the filter.
    #[inline]
    pub fn accepts(&self, category: &EventCategory) -> bool {
        match self {
            CategoryFilter::Any => true,
            CategoryFilter::Only(allowed) => allowed.contains(category),
        }
    }

    /// Adds `category` to the allow-list.
    ///
    /// An `Any` filter becomes `Only([category])`.
    pub fn allow(&mut self, category: EventCategory) {
        match self {
            CategoryFilter::Any => *self = CategoryFilter::Only(vec![category]),
            CategoryFilter::Only(allowed) => {
                if !allowed.contains(&category) {
                    allowed.push(category);
                }
            }
        }
    }
}

/// Configuration for an [`EventBus`](crate::EventBus).
///
/// ## Field semantics
/// - `event_filter`: event types handlers may declare (the bus's event category)
/// - `listener_filter`: listener types that may register (the bus's listener category)
/// - `default_priority`: priority of handlers that do not declare one
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Event types a handler may accept.
    pub event_filter: CategoryFilter,

    /// Listener types that may be registered.
    pub listener_filter: CategoryFilter,

    /// Priority given to handlers declared without one.
    pub default_priority: Priority,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;

    #[test]
    fn test_default_accepts_everything() {
        let cfg = Config::default();
        assert!(cfg.event_filter.accepts(&EventCategory::of::<A>()));
        assert!(cfg.listener_filter.accepts(&EventCategory::of::<B>()));
        assert_eq!(cfg.default_priority, Priority::DEFAULT);
    }

    #[test]
    fn test_allow_narrows_any() {
        let mut filter = CategoryFilter::Any;
        filter.allow(EventCategory::of::<A>());
        filter.allow(EventCategory::of::<A>());
        assert_eq!(filter, CategoryFilter::only([EventCategory::of::<A>()]));
        assert!(filter.accepts(&EventCategory::of::<A>()));
        assert!(!filter.accepts(&EventCategory::of::<B>()));
    }
}
