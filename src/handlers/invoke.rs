//! # Invocables: the callable half of a handler.
//!
//! [`Invoke`] is the opaque capability the bus calls with `(listener, event)`.
//! Both arguments arrive type-erased (`&dyn Any`); an implementation recovers the
//! concrete types it was built for. The common handle type is [`InvokerRef`],
//! an `Arc<dyn Invoke>` shared between a declaration and its registrations.
//!
//! [`InvokeFn`] is the closure-backed implementation produced by
//! [`HandlerSet`](crate::HandlerSet). It never panics on a type mismatch; it
//! returns [`BusError::TypeMismatch`] instead.
//!
//! ## Example
//! ```rust
//! use std::any::Any;
//! use eventvisor::{Event, Invoke, InvokeFn, InvokerRef};
//!
//! struct Counter;
//! struct Ping;
//! impl Event for Ping {}
//!
//! let inv: InvokerRef = InvokeFn::arc("on_ping", |_c: &Counter, _e: &Ping| Ok(()));
//! assert!(inv.invoke(&Counter as &dyn Any, &Ping as &dyn Any).is_ok());
//! assert!(inv.invoke(&Ping as &dyn Any, &Ping as &dyn Any).is_err());
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{BusError, HandlerResult};
use crate::events::Event;

/// Shared handle to an invocable.
pub type InvokerRef = Arc<dyn Invoke>;

/// Executes one handler body for a listener and an event.
///
/// Implementations must be cheap to call repeatedly and safe to call from
/// several threads at once.
pub trait Invoke: Send + Sync + 'static {
    /// Runs the handler body.
    ///
    /// Errors returned here reach the caller of `fire` unchanged.
    fn invoke(&self, listener: &dyn Any, event: &dyn Any) -> HandlerResult;
}

/// Closure-backed invocable for listener type `L` and event type `E`.
pub struct InvokeFn<L, E, F> {
    name: Cow<'static, str>,
    f: F,
    _types: PhantomData<fn(&L, &E)>,
}

impl<L, E, F> InvokeFn<L, E, F>
where
    L: Any + Send + Sync,
    E: Event,
    F: Fn(&L, &E) -> HandlerResult + Send + Sync + 'static,
{
    /// Creates a new closure-backed invocable.
    ///
    /// `name` only appears in [`BusError::TypeMismatch`] errors.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
            _types: PhantomData,
        }
    }

    /// Creates the invocable and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }

    fn mismatch(&self, what: &'static str, expected: &'static str) -> HandlerResult {
        Err(Box::new(BusError::TypeMismatch {
            handler: self.name.to_string(),
            what,
            expected,
        }))
    }
}

impl<L, E, F> Invoke for InvokeFn<L, E, F>
where
    L: Any + Send + Sync,
    E: Event,
    F: Fn(&L, &E) -> HandlerResult + Send + Sync + 'static,
{
    fn invoke(&self, listener: &dyn Any, event: &dyn Any) -> HandlerResult {
        let Some(listener) = listener.downcast_ref::<L>() else {
            return self.mismatch("listener", std::any::type_name::<L>());
        };
        let Some(event) = event.downcast_ref::<E>() else {
            return self.mismatch("event", std::any::type_name::<E>());
        };
        (self.f)(listener, event)
    }
}

impl<L, E, F> fmt::Debug for InvokeFn<L, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvokeFn")
            .field("name", &self.name)
            .field("listener", &std::any::type_name::<L>())
            .field("event", &std::any::type_name::<E>())
            .finish()
    }
}
