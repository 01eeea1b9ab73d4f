//! # Invocable construction strategies.
//!
//! An [`InvokerFactory`] turns a [`HandlerDecl`] into the [`InvokerRef`] stored
//! in a registration. It runs once per registration, never per fire.
//!
//! - [`DirectInvokers`] reuses the declared closure as-is (default).
//! - `TracedInvokers` (feature `traced`) wraps every call in a `tracing` span.

use crate::error::BusError;
use crate::handlers::{HandlerDecl, InvokerRef};

/// Builds the invocable for one declared handler.
pub trait InvokerFactory: Send + Sync + 'static {
    /// Creates the invocable for `decl`.
    ///
    /// # Errors
    /// Implementations may reject a declaration with a [`BusError`]; the whole
    /// `register` call then fails without inserting anything.
    fn create(&self, decl: &HandlerDecl) -> Result<InvokerRef, BusError>;
}

/// Calls the declared closure directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectInvokers;

impl InvokerFactory for DirectInvokers {
    fn create(&self, decl: &HandlerDecl) -> Result<InvokerRef, BusError> {
        Ok(decl.invoker().clone())
    }
}

#[cfg(feature = "traced")]
pub use traced::TracedInvokers;

#[cfg(feature = "traced")]
mod traced {
    use std::any::Any;
    use std::sync::Arc;

    use super::InvokerFactory;
    use crate::error::{BusError, HandlerResult};
    use crate::events::EventCategory;
    use crate::handlers::{HandlerDecl, Invoke, InvokerRef};

    /// Wraps each handler call in a TRACE-level `handler` span.
    ///
    /// The span carries `handler` and `category` fields. Handler errors are
    /// returned unchanged and not logged.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct TracedInvokers;

    impl InvokerFactory for TracedInvokers {
        fn create(&self, decl: &HandlerDecl) -> Result<InvokerRef, BusError> {
            Ok(Arc::new(Traced {
                handler: decl.handler().to_string(),
                category: decl.event(),
                inner: decl.invoker().clone(),
            }))
        }
    }

    struct Traced {
        handler: String,
        category: EventCategory,
        inner: InvokerRef,
    }

    impl Invoke for Traced {
        fn invoke(&self, listener: &dyn Any, event: &dyn Any) -> HandlerResult {
            let span = tracing::trace_span!(
                "handler",
                handler = %self.handler,
                category = %self.category
            );
            let _enter = span.enter();
            self.inner.invoke(listener, event)
        }
    }

    #[cfg(test)]
    mod tests {
        use std::sync::atomic::{AtomicUsize, Ordering};

        use super::*;
        use crate::events::Event;
        use crate::handlers::{HandlerSet, Listener};

        struct Ping;
        impl Event for Ping {}

        struct Counter(AtomicUsize);

        impl Listener for Counter {
            fn handlers(set: &mut HandlerSet<Self>) {
                set.handle::<Ping, _>("on_ping", |me, _| {
                    me.0.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                });
            }
        }

        #[test]
        fn test_traced_invoker_delegates() {
            let decl = &HandlerSet::<Counter>::collect()[0];
            let inv = TracedInvokers.create(decl).unwrap();
            let counter = Counter(AtomicUsize::new(0));
            inv.invoke(&counter, &Ping).unwrap();
            assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::events::Event;
    use crate::handlers::{HandlerSet, Listener};

    struct Ping;
    impl Event for Ping {}

    struct Quiet;

    impl Listener for Quiet {
        fn handlers(set: &mut HandlerSet<Self>) {
            set.handle::<Ping, _>("on_ping", |_, _| Ok(()));
        }
    }

    #[test]
    fn test_direct_invokers_reuse_declared_closure() {
        let decl = &HandlerSet::<Quiet>::collect()[0];
        let inv = DirectInvokers.create(decl).unwrap();
        assert!(Arc::ptr_eq(&inv, decl.invoker()));
    }
}
