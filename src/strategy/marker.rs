//! # Handler marking strategies.
//!
//! A [`HandlerMarker`] looks at a [`HandlerDecl`] and answers "is this an event
//! handler, and at which priority?". Returning `None` means the declaration is
//! skipped by `register`/`unregister`.
//!
//! - [`DeclaredMarker`] marks exactly the declarations made with
//!   [`HandlerSet::on`](crate::HandlerSet::on) or [`HandlerSet::handle`](crate::HandlerSet::handle) (default).
//! - [`PrefixMarker`] marks every declaration whose name starts with a prefix,
//!   marked or not.
//! - Any `Fn(&HandlerDecl, Priority) -> Option<Priority>` closure is a marker too.
//!
//! ## Example
//! ```rust
//! use eventvisor::{EventBus, HandlerDecl, Priority};
//!
//! // Mark everything, but push handlers of `Audit` listeners to the end.
//! let bus = EventBus::builder()
//!     .with_marker(|decl: &HandlerDecl, default: Priority| {
//!         if decl.listener().short_name() == "Audit" {
//!             Some(Priority(i32::MAX))
//!         } else {
//!             Some(decl.priority().unwrap_or(default))
//!         }
//!     })
//!     .build();
//! # let _ = bus;
//! ```

use std::borrow::Cow;

use crate::events::Priority;
use crate::handlers::HandlerDecl;

/// Decides which declarations are handlers and their effective priority.
pub trait HandlerMarker: Send + Sync + 'static {
    /// Returns the handler's priority, or `None` if `decl` is not a handler.
    ///
    /// `default` is the bus's configured default priority.
    fn mark(&self, decl: &HandlerDecl, default: Priority) -> Option<Priority>;

    /// Returns the marker name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<F> HandlerMarker for F
where
    F: Fn(&HandlerDecl, Priority) -> Option<Priority> + Send + Sync + 'static,
{
    fn mark(&self, decl: &HandlerDecl, default: Priority) -> Option<Priority> {
        self(decl, default)
    }
}

/// Marks declarations made with `on`/`handle`; uses the declared priority or the default.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeclaredMarker;

impl HandlerMarker for DeclaredMarker {
    fn mark(&self, decl: &HandlerDecl, default: Priority) -> Option<Priority> {
        decl.is_marked().then(|| decl.priority().unwrap_or(default))
    }

    fn name(&self) -> &'static str {
        "declared"
    }
}

/// Marks every declaration whose name starts with `prefix` (e.g. `"on_"`).
#[derive(Clone, Debug)]
pub struct PrefixMarker {
    prefix: Cow<'static, str>,
}

impl PrefixMarker {
    /// Creates a marker for names starting with `prefix`.
    pub fn new(prefix: impl Into<Cow<'static, str>>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl HandlerMarker for PrefixMarker {
    fn mark(&self, decl: &HandlerDecl, default: Priority) -> Option<Priority> {
        decl.name()
            .starts_with(self.prefix.as_ref())
            .then(|| decl.priority().unwrap_or(default))
    }

    fn name(&self) -> &'static str {
        "prefix"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Event;
    use crate::handlers::{HandlerSet, Listener};

    struct Ping;
    impl Event for Ping {}

    struct Mixed;

    impl Listener for Mixed {
        fn handlers(set: &mut HandlerSet<Self>) {
            set.on::<Ping, _>("on_ping", Priority(-3), |_, _| Ok(()))
                .handle::<Ping, _>("audit", |_, _| Ok(()))
                .declare::<Ping, _>("on_plain", |_, _| Ok(()))
                .declare::<Ping, _>("helper", |_, _| Ok(()));
        }
    }

    fn marks(marker: &dyn HandlerMarker) -> Vec<Option<Priority>> {
        HandlerSet::<Mixed>::collect()
            .iter()
            .map(|d| marker.mark(d, Priority(100)))
            .collect()
    }

    #[test]
    fn test_declared_marker() {
        assert_eq!(
            marks(&DeclaredMarker),
            vec![Some(Priority(-3)), Some(Priority(100)), None, None]
        );
    }

    #[test]
    fn test_prefix_marker() {
        assert_eq!(
            marks(&PrefixMarker::new("on_")),
            vec![Some(Priority(-3)), None, Some(Priority(100)), None]
        );
    }

    #[test]
    fn test_closure_marker() {
        let only_helpers =
            |d: &HandlerDecl, _: Priority| (d.name() == "helper").then_some(Priority(1));
        assert_eq!(
            marks(&only_helpers),
            vec![None, None, None, Some(Priority(1))]
        );
    }
}
