use std::sync::Arc;

use crate::{
    core::{CategoryFilter, Config, EventBus},
    events::{Event, EventCategory, Priority},
    handlers::Listener,
    strategy::{DeclaredMarker, DirectInvokers, HandlerMarker, InvokerFactory},
};

/// Builder for constructing an [`EventBus`] with custom strategies.
pub struct EventBusBuilder {
    cfg: Config,
    marker: Arc<dyn HandlerMarker>,
    invokers: Arc<dyn InvokerFactory>,
}

impl EventBusBuilder {
    /// Creates a builder with the default configuration and strategies.
    pub fn new() -> Self {
        Self {
            cfg: Config::default(),
            marker: Arc::new(DeclaredMarker),
            invokers: Arc::new(DirectInvokers),
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the handler-marking strategy.
    pub fn with_marker(mut self, marker: impl HandlerMarker) -> Self {
        self.marker = Arc::new(marker);
        self
    }

    /// Sets the invocable-construction strategy.
    pub fn with_invokers(mut self, invokers: impl InvokerFactory) -> Self {
        self.invokers = Arc::new(invokers);
        self
    }

    /// Sets the event filter.
    pub fn with_event_filter(mut self, filter: CategoryFilter) -> Self {
        self.cfg.event_filter = filter;
        self
    }

    /// Sets the listener filter.
    pub fn with_listener_filter(mut self, filter: CategoryFilter) -> Self {
        self.cfg.listener_filter = filter;
        self
    }

    /// Adds `E` to the accepted event types.
    ///
    /// The first call narrows the bus from "any event" to the listed ones.
    pub fn accept_event<E: Event>(mut self) -> Self {
        self.cfg.event_filter.allow(EventCategory::of::<E>());
        self
    }

    /// Adds `L` to the accepted listener types.
    ///
    /// The first call narrows the bus from "any listener" to the listed ones.
    pub fn accept_listener<L: Listener>(mut self) -> Self {
        self.cfg.listener_filter.allow(EventCategory::of::<L>());
        self
    }

    /// Sets the priority of handlers declared without one.
    pub fn with_default_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.cfg.default_priority = priority.into();
        self
    }

    /// Builds the bus.
    pub fn build(self) -> EventBus {
        tracing::debug!(
            marker = self.marker.name(),
            default_priority = %self.cfg.default_priority,
            "event bus created"
        );
        EventBus::new_internal(self.cfg, self.marker, self.invokers)
    }
}

impl Default for EventBusBuilder {
    fn default() -> Self {
        Self::new()
    }
}
