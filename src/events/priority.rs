//! # Handler priorities.
//!
//! [`Priority`] is the ordering key among handlers of one category:
//! **lower values are delivered first**.
//!
//! [`EventPriority`] provides named levels for the common cases:
//!
//! ```text
//! Lowest(0) ─► Low(1) ─► Normal(2) ─► High(3) ─► Highest(4) ─► Monitor(5)
//! delivered first                                         delivered last
//! ```
//!
//! `Monitor` handlers run after every other level and should only observe the
//! outcome of an event, never act on it.

use std::fmt;

/// Ordering key for handler delivery (lower runs first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub i32);

impl Priority {
    /// Priority used when a handler does not declare one (`EventPriority::Normal`).
    pub const DEFAULT: Priority = Priority(EventPriority::Normal as i32);

    /// Returns the raw ordering value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::DEFAULT
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Priority(value)
    }
}

impl From<EventPriority> for Priority {
    fn from(level: EventPriority) -> Self {
        Priority(level as i32)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named priority levels, mapped to their ordinal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventPriority {
    /// Delivered first.
    Lowest = 0,
    /// Delivered before `Normal`.
    Low = 1,
    /// Default level.
    #[default]
    Normal = 2,
    /// Delivered after `Normal`.
    High = 3,
    /// Delivered after `High`.
    Highest = 4,
    /// Delivered last; observe only.
    Monitor = 5,
}
