//! Resize fan-out
//!
//! [`ThemeBroadcaster`] wires a [`ThemeStore`] to a window's resize signal.
//! It registers exactly one store listener, which re-measures the viewport
//! and updates the shared metric. Each render root then gets its own
//! [`Subscription`], a listener kept in step with the store listener that
//! hands the root a fresh snapshot after the store has been updated.
//!
//! Because the store listener is registered first and subscriptions share
//! its throttle phase, a subscriber never copies a metric older than the one
//! the store has just written.

use crate::compose::ComposedTheme;
use crate::state::ThemeStore;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use vista_core::{event_types, EventSource, InstanceId, ListenerKey};

/// Default coalescing interval for resize listeners
pub const THROTTLE_INTERVAL: Duration = Duration::from_millis(30);

/// Tag of the store's own resize listener
pub const STORE_LISTENER_TAG: &str = "theme-store";

/// Connects one [`ThemeStore`] to one resize [`EventSource`]
pub struct ThemeBroadcaster {
    store: Arc<ThemeStore>,
    resize: EventSource,
    interval: Duration,
    store_listener: ListenerKey,
}

impl ThemeBroadcaster {
    /// Register the store listener on `resize`.
    ///
    /// The listener stays registered until the broadcaster is dropped.
    pub fn install(store: Arc<ThemeStore>, resize: &EventSource, interval: Duration) -> Self {
        let listener_store = Arc::clone(&store);
        let store_listener = resize.on(
            STORE_LISTENER_TAG,
            event_types::RESIZE,
            interval,
            move |_| {
                listener_store.refresh_viewport_metric();
            },
        );

        tracing::debug!(?interval, "theme broadcaster installed");

        Self {
            store,
            resize: resize.clone(),
            interval,
            store_listener,
        }
    }

    pub fn store(&self) -> &Arc<ThemeStore> {
        &self.store
    }

    /// Window event source carrying resize and lifecycle events
    pub fn resize_source(&self) -> &EventSource {
        &self.resize
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the store listener is still registered
    pub fn is_listening(&self) -> bool {
        self.resize.contains(self.store_listener)
    }

    /// Deliver a snapshot of the store to `on_update` after every
    /// (coalesced) resize, until the returned subscription is cancelled.
    pub fn subscribe<F>(&self, id: InstanceId, on_update: F) -> Subscription
    where
        F: FnMut(ComposedTheme) + 'static,
    {
        let cancelled = Rc::new(Cell::new(false));
        let mut listener = SnapshotListener {
            id,
            store: Arc::clone(&self.store),
            cancelled: Rc::clone(&cancelled),
            on_update,
        };

        let key = self.resize.on_synced(
            self.store_listener,
            id.tag(),
            event_types::RESIZE,
            self.interval,
            move |_| {
                listener.deliver();
            },
        );

        tracing::debug!(%id, listeners = self.resize.listener_count(), "subscribed");

        Subscription {
            id,
            key,
            source: self.resize.clone(),
            cancelled,
        }
    }
}

impl Drop for ThemeBroadcaster {
    fn drop(&mut self) {
        self.resize.off(self.store_listener);
    }
}

impl std::fmt::Debug for ThemeBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeBroadcaster")
            .field("interval", &self.interval)
            .field("listening", &self.is_listening())
            .finish_non_exhaustive()
    }
}

/// The callback side of a [`Subscription`]
struct SnapshotListener<F> {
    id: InstanceId,
    store: Arc<ThemeStore>,
    cancelled: Rc<Cell<bool>>,
    on_update: F,
}

impl<F> SnapshotListener<F>
where
    F: FnMut(ComposedTheme),
{
    /// Hand the subscriber a snapshot unless it has been torn down.
    ///
    /// A dispatch already in progress can still reach a cancelled listener,
    /// so the flag is checked on every call.
    fn deliver(&mut self) -> bool {
        if self.cancelled.get() {
            tracing::trace!(id = %self.id, "dropping update for torn-down subscriber");
            return false;
        }
        (self.on_update)(self.store.snapshot());
        true
    }
}

/// Keeps a subscriber attached to a [`ThemeBroadcaster`].
///
/// Cancelling (or dropping) the subscription removes its listener and stops
/// any delivery still in flight.
pub struct Subscription {
    id: InstanceId,
    key: ListenerKey,
    source: EventSource,
    cancelled: Rc<Cell<bool>>,
}

impl Subscription {
    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        !self.cancelled.get()
    }

    /// Stop deliveries and remove the listener.
    ///
    /// Idempotent: returns `true` only for the call that cancelled.
    pub fn cancel(&self) -> bool {
        if self.cancelled.replace(true) {
            return false;
        }
        let removed = self.source.off(self.key);
        tracing::debug!(
            id = %self.id,
            removed,
            remaining = self.source.listener_count(),
            "subscription cancelled"
        );
        true
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
