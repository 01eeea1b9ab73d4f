//! Error types used by the event bus and by handlers.
//!
//! This module defines:
//!
//! - [`BusError`] — invalid-argument conditions raised by the bus itself
//!   (`register`, `unregister`, [`RegisteredListener::new`](crate::RegisteredListener::new)).
//! - [`HandlerError`] — whatever a handler body returns; the bus never wraps it.
//!
//! [`BusError`] provides helper methods (`as_label`, `as_message`) for logging/metrics.

use thiserror::Error;

use crate::events::EventCategory;

/// Error produced by a handler body.
///
/// `fire` hands this value back to its caller exactly as the handler returned it,
/// so the original error can be recovered with `downcast_ref`.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of a single handler invocation.
pub type HandlerResult = Result<(), HandlerError>;

/// # Invalid-argument errors produced by the bus.
///
/// Raised synchronously by the call that detected them and never retried.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// The listener's type is not accepted by the bus's configured listener filter.
    #[error("invalid listener type: {listener}")]
    InvalidListener {
        /// The rejected listener type.
        listener: EventCategory,
    },

    /// The marking strategy does not consider this handler an event handler.
    #[error("method must be an event handler: {handler}")]
    NotAHandler {
        /// Fully qualified handler name (`Listener::handler`).
        handler: String,
    },

    /// The handler's event type is not accepted by the bus's configured event filter.
    #[error("event handler {handler} must accept an allowed event type, got {event}")]
    EventNotAccepted {
        /// Fully qualified handler name.
        handler: String,
        /// The handler's declared event category.
        event: EventCategory,
    },

    /// The handler's declaring type is not accepted by the configured listener filter.
    #[error("listener {listener} declaring {handler} is not an allowed listener type")]
    ListenerNotAccepted {
        /// Fully qualified handler name.
        handler: String,
        /// The declaring listener type.
        listener: EventCategory,
    },

    /// The listener type declares the same handler name twice for one event type.
    #[error("handler {handler} is declared more than once for {event}")]
    DuplicateHandler {
        /// Fully qualified handler name.
        handler: String,
        /// The event category both declarations accept.
        event: EventCategory,
    },

    /// An invocable received a listener or event of a type it was not built for.
    #[error("handler {handler} invoked with mismatched {what}: expected {expected}")]
    TypeMismatch {
        /// Fully qualified handler name.
        handler: String,
        /// Which argument mismatched (`"listener"` or `"event"`).
        what: &'static str,
        /// The type the invocable expected.
        expected: &'static str,
    },
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventvisor::BusError;
    ///
    /// let err = BusError::NotAHandler { handler: "Audit::flush".into() };
    /// assert_eq!(err.as_label(), "bus_not_a_handler");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::InvalidListener { .. } => "bus_invalid_listener",
            BusError::NotAHandler { .. } => "bus_not_a_handler",
            BusError::EventNotAccepted { .. } => "bus_event_not_accepted",
            BusError::ListenerNotAccepted { .. } => "bus_listener_not_accepted",
            BusError::DuplicateHandler { .. } => "bus_duplicate_handler",
            BusError::TypeMismatch { .. } => "bus_type_mismatch",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BusError::InvalidListener { listener } => format!("listener={listener}"),
            BusError::NotAHandler { handler } => format!("handler={handler} (not marked)"),
            BusError::EventNotAccepted { handler, event } => {
                format!("handler={handler} event={event}")
            }
            BusError::ListenerNotAccepted { handler, listener } => {
                format!("handler={handler} listener={listener}")
            }
            BusError::DuplicateHandler { handler, event } => {
                format!("handler={handler} event={event} (declared twice)")
            }
            BusError::TypeMismatch {
                handler,
                what,
                expected,
            } => format!("handler={handler} {what}!={expected}"),
        }
    }

    /// Returns the offending handler name, if the error concerns a single handler.
    pub fn handler(&self) -> Option<&str> {
        match self {
            BusError::InvalidListener { .. } => None,
            BusError::NotAHandler { handler }
            | BusError::EventNotAccepted { handler, .. }
            | BusError::ListenerNotAccepted { handler, .. }
            | BusError::DuplicateHandler { handler, .. }
            | BusError::TypeMismatch { handler, .. } => Some(handler),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;

    #[test]
    fn test_labels_are_stable() {
        let err = BusError::InvalidListener {
            listener: EventCategory::of::<Ping>(),
        };
        assert_eq!(err.as_label(), "bus_invalid_listener");
        assert!(err.handler().is_none());

        let err = BusError::EventNotAccepted {
            handler: "Audit::on_ping".into(),
            event: EventCategory::of::<Ping>(),
        };
        assert_eq!(err.as_label(), "bus_event_not_accepted");
        assert_eq!(err.handler(), Some("Audit::on_ping"));
    }

    #[test]
    fn test_duplicate_handler_has_own_label() {
        let err = BusError::DuplicateHandler {
            handler: "Audit::on_ping".into(),
            event: EventCategory::of::<Ping>(),
        };
        assert_eq!(err.as_label(), "bus_duplicate_handler");
        assert_eq!(err.handler(), Some("Audit::on_ping"));
        assert!(err.as_message().contains("declared twice"));
    }

    #[test]
    fn test_display_names_the_handler() {
        let err = BusError::NotAHandler {
            handler: "Audit::flush".into(),
        };
        assert!(err.to_string().contains("Audit::flush"));
        assert!(err.as_message().contains("Audit::flush"));
    }

    #[test]
    fn test_handler_error_downcasts_to_original() {
        let err: HandlerError = Box::new(BusError::NotAHandler {
            handler: "x".into(),
        });
        assert!(err.downcast_ref::<BusError>().is_some());
    }
}
