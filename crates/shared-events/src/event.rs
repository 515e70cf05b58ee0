//! # Event
//!
//! A named, typed list of handlers.

use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::trace;

/// Callback invoked with a reference to the event payload.
pub type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Event::attach`], used to detach later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Observer registry for a single event kind.
pub struct Event<T> {
    name: &'static str,
    handlers: RwLock<Vec<(SubscriptionId, Handler<T>)>>,
    next_id: AtomicU64,
    triggered: AtomicU64,
}

impl<T> Event<T> {
    /// Create an empty registry. `name` is used in trace output only.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            handlers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
            triggered: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register a handler.
    pub fn attach<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.write().push((id, Arc::new(handler)));
        trace!(event = self.name, subscription = id.0, "Handler attached");
        id
    }

    /// Remove a handler. Returns `false` if it was not attached.
    pub fn detach(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(sub, _)| *sub != id);
        before != handlers.len()
    }

    /// Invoke every handler with `payload`.
    ///
    /// Returns the number of handlers invoked.
    pub fn trigger(&self, payload: &T) -> usize {
        let snapshot: Vec<Handler<T>> = self
            .handlers
            .read()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        self.triggered.fetch_add(1, Ordering::Relaxed);
        trace!(event = self.name, handlers = snapshot.len(), "Event triggered");

        for handler in &snapshot {
            handler(payload);
        }
        snapshot.len()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Total number of times this event was triggered.
    #[must_use]
    pub fn triggered_count(&self) -> u64 {
        self.triggered.load(Ordering::Relaxed)
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("subscribers", &self.subscriber_count())
            .field("triggered", &self.triggered_count())
            .finish()
    }
}
