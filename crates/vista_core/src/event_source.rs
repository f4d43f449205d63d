//! Tagged, throttled event listeners
//!
//! [`EventSource`] is the window-level signal hub: hosts feed it platform
//! events (resize, focus, ...) and components register callbacks against it.
//! Every listener carries
//!
//! - a tag naming its owner (e.g. `theme-store`, `root-7`), so all of an
//!   owner's listeners can be removed in one call,
//! - its own [`Throttle`], so bursts of events are coalesced per listener.
//!
//! # Dispatch
//!
//! Listeners run in registration order on the calling thread. The set of
//! recipients is captured before any callback runs and no internal borrow is
//! held while callbacks execute, so a callback may freely register or remove
//! listeners. A listener removed by an earlier callback of the same dispatch
//! still receives that dispatch; owners that tear down in response to events
//! must guard their callbacks accordingly.
//!
//! Trailing (deferred) deliveries are not timer driven. The host calls
//! [`EventSource::flush_due`] from its event loop, using
//! [`EventSource::next_deadline`] to know when to wake up.

use crate::events::{Event, EventType};
use crate::throttle::Throttle;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

new_key_type! {
    /// Handle to a registered listener
    pub struct ListenerKey;
}

/// Listener callback type
pub type ListenerCallback = Box<dyn FnMut(&Event)>;

struct Listener {
    tag: String,
    event_type: EventType,
    /// Registration order
    seq: u64,
    throttle: RefCell<Throttle<Event>>,
    callback: RefCell<ListenerCallback>,
}

impl Listener {
    /// Run the callback. A listener that is already running cannot take the
    /// event now, so it is queued as the listener's trailing call instead.
    fn deliver(&self, event: Event) -> bool {
        match self.callback.try_borrow_mut() {
            Ok(mut callback) => {
                callback(&event);
                true
            }
            Err(_) => {
                tracing::debug!(tag = %self.tag, "listener busy; queueing re-entrant delivery");
                self.throttle.borrow_mut().requeue(event);
                false
            }
        }
    }
}

#[derive(Default)]
struct EventSourceInner {
    listeners: SlotMap<ListenerKey, Rc<Listener>>,
    next_seq: u64,
}

type Recipients = SmallVec<[Rc<Listener>; 8]>;

/// Single-threaded hub of tagged, throttled listeners.
///
/// Cloning an `EventSource` yields another handle to the same listeners.
#[derive(Clone, Default)]
pub struct EventSource {
    inner: Rc<RefCell<EventSourceInner>>,
}

impl EventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for events of `event_type`, coalesced to at most
    /// one delivery per `interval`.
    pub fn on<F>(
        &self,
        tag: impl Into<String>,
        event_type: EventType,
        interval: Duration,
        callback: F,
    ) -> ListenerKey
    where
        F: FnMut(&Event) + 'static,
    {
        let tag = tag.into();
        let mut inner = self.inner.borrow_mut();
        let seq = inner.next_seq;
        inner.next_seq += 1;

        tracing::trace!(%tag, event_type, ?interval, "registering listener");
        inner.listeners.insert(Rc::new(Listener {
            tag,
            event_type,
            seq,
            throttle: RefCell::new(Throttle::new(interval)),
            callback: RefCell::new(Box::new(callback)),
        }))
    }

    /// Like [`EventSource::on`], but the new listener starts from the
    /// throttle phase of `anchor`, including any queued trailing call.
    ///
    /// From then on both make identical delivery decisions, and the anchor,
    /// registered earlier, always runs first. If `anchor` is gone, listens
    /// for another event type or uses another interval, the listener starts
    /// with a fresh throttle of `interval`.
    pub fn on_synced<F>(
        &self,
        anchor: ListenerKey,
        tag: impl Into<String>,
        event_type: EventType,
        interval: Duration,
        callback: F,
    ) -> ListenerKey
    where
        F: FnMut(&Event) + 'static,
    {
        let tag = tag.into();
        let mut inner = self.inner.borrow_mut();
        let throttle = match inner.listeners.get(anchor) {
            Some(anchor)
                if anchor.event_type == event_type
                    && anchor.throttle.borrow().interval() == interval =>
            {
                anchor.throttle.borrow().clone()
            }
            _ => {
                tracing::debug!(%tag, "sync anchor unavailable; starting a fresh throttle");
                Throttle::new(interval)
            }
        };
        let seq = inner.next_seq;
        inner.next_seq += 1;

        tracing::trace!(%tag, event_type, "registering synced listener");
        inner.listeners.insert(Rc::new(Listener {
            tag,
            event_type,
            seq,
            throttle: RefCell::new(throttle),
            callback: RefCell::new(Box::new(callback)),
        }))
    }

    /// Remove a listener. Returns `true` only for the call that removed it.
    pub fn off(&self, key: ListenerKey) -> bool {
        // Dropped after the borrow ends: the callback may own handles to us
        let removed = self.inner.borrow_mut().listeners.remove(key);
        removed.is_some()
    }

    /// Remove every listener registered under `tag`, returning how many
    pub fn off_tag(&self, tag: &str) -> usize {
        let removed: Vec<Rc<Listener>> = {
            let mut inner = self.inner.borrow_mut();
            let keys: Vec<ListenerKey> = inner
                .listeners
                .iter()
                .filter(|(_, listener)| listener.tag == tag)
                .map(|(key, _)| key)
                .collect();
            keys.into_iter()
                .filter_map(|key| inner.listeners.remove(key))
                .collect()
        };
        removed.len()
    }

    pub fn contains(&self, key: ListenerKey) -> bool {
        self.inner.borrow().listeners.contains_key(key)
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Number of listeners registered under `tag`
    pub fn tagged_count(&self, tag: &str) -> usize {
        self.inner
            .borrow()
            .listeners
            .values()
            .filter(|listener| listener.tag == tag)
            .count()
    }

    /// Emit an event now
    pub fn emit(&self, event: &Event) -> usize {
        self.emit_at(event, Instant::now())
    }

    /// Emit an event observed at `now`.
    ///
    /// Returns the number of listeners that received it immediately; the
    /// rest queued it as their trailing call.
    pub fn emit_at(&self, event: &Event, now: Instant) -> usize {
        let recipients = self.recipients(|listener| listener.event_type == event.event_type);

        let mut delivered = 0;
        for listener in recipients {
            let ready = listener.throttle.borrow_mut().offer(event.clone(), now);
            if let Some(event) = ready {
                if listener.deliver(event) {
                    delivered += 1;
                }
            }
        }
        delivered
    }

    /// Deliver every trailing call that is due at `now`
    pub fn flush_due(&self, now: Instant) -> usize {
        let recipients = self.recipients(|listener| listener.throttle.borrow().is_pending());

        let mut delivered = 0;
        for listener in recipients {
            let due = listener.throttle.borrow_mut().take_due(now);
            if let Some(event) = due {
                tracing::trace!(tag = %listener.tag, "flushing trailing call");
                if listener.deliver(event) {
                    delivered += 1;
                }
            }
        }
        delivered
    }

    /// Earliest instant at which a trailing call becomes due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner
            .borrow()
            .listeners
            .values()
            .filter_map(|listener| listener.throttle.borrow().deadline())
            .min()
    }

    /// Snapshot matching listeners in registration order, releasing the
    /// borrow before anything is invoked.
    fn recipients(&self, filter: impl Fn(&Listener) -> bool) -> Recipients {
        let inner = self.inner.borrow();
        let mut recipients: Recipients = inner
            .listeners
            .values()
            .filter(|listener| filter(listener))
            .cloned()
            .collect();
        recipients.sort_by_key(|listener| listener.seq);
        recipients
    }
}

impl std::fmt::Debug for EventSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSource")
            .field("listener_count", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_types;
    use std::cell::Cell;

    const WAIT: Duration = Duration::from_millis(30);

    fn counter() -> (Rc<Cell<u32>>, impl FnMut(&Event) + 'static) {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        (count, move |_: &Event| count_clone.set(count_clone.get() + 1))
    }

    #[test]
    fn test_off_removes_exactly_once() {
        let source = EventSource::new();
        let (_, callback) = counter();
        let key = source.on("a", event_types::RESIZE, WAIT, callback);

        assert!(source.contains(key));
        assert!(source.off(key));
        assert!(!source.off(key));
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn test_off_tag_only_removes_matching_listeners() {
        let source = EventSource::new();
        source.on("root-1", event_types::RESIZE, WAIT, |_| {});
        source.on("root-1", event_types::MOUNT, WAIT, |_| {});
        source.on("root-2", event_types::RESIZE, WAIT, |_| {});

        assert_eq!(source.off_tag("root-1"), 2);
        assert_eq!(source.off_tag("root-1"), 0);
        assert_eq!(source.tagged_count("root-2"), 1);
    }

    #[test]
    fn test_emit_filters_by_event_type() {
        let source = EventSource::new();
        let (resizes, on_resize) = counter();
        let (mounts, on_mount) = counter();
        source.on("a", event_types::RESIZE, WAIT, on_resize);
        source.on("a", event_types::MOUNT, WAIT, on_mount);

        assert_eq!(source.emit(&Event::resize(800, 600)), 1);
        assert_eq!(resizes.get(), 1);
        assert_eq!(mounts.get(), 0);
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let source = EventSource::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let order = order.clone();
            source.on(name, event_types::RESIZE, WAIT, move |_| order.borrow_mut().push(name));
        }
        // Free a slot and re-register so slot order differs from registration order
        let key = source.on("temp", event_types::RESIZE, WAIT, |_| {});
        source.off(key);
        source.off_tag("first");
        let order_clone = order.clone();
        source.on("fourth", event_types::RESIZE, WAIT, move |_| {
            order_clone.borrow_mut().push("fourth")
        });

        source.emit(&Event::resize(1, 1));
        assert_eq!(*order.borrow(), vec!["second", "third", "fourth"]);
    }

    #[test]
    fn test_burst_is_coalesced_into_trailing_delivery() {
        let t0 = Instant::now();
        let source = EventSource::new();
        let last_width = Rc::new(Cell::new(0));
        let last_width_clone = last_width.clone();
        source.on("a", event_types::RESIZE, WAIT, move |event| {
            last_width_clone.set(event.size().map(|(w, _)| w).unwrap_or(0));
        });

        assert_eq!(source.emit_at(&Event::resize(100, 1), t0), 1);
        assert_eq!(source.emit_at(&Event::resize(200, 1), t0 + Duration::from_millis(5)), 0);
        assert_eq!(source.emit_at(&Event::resize(300, 1), t0 + Duration::from_millis(10)), 0);
        assert_eq!(last_width.get(), 100);

        assert_eq!(source.next_deadline(), Some(t0 + WAIT));
        assert_eq!(source.flush_due(t0 + Duration::from_millis(20)), 0);
        assert_eq!(source.flush_due(t0 + WAIT), 1);
        assert_eq!(last_width.get(), 300);
        assert_eq!(source.next_deadline(), None);
    }

    #[test]
    fn test_removed_listener_loses_its_trailing_call() {
        let t0 = Instant::now();
        let source = EventSource::new();
        let (count, callback) = counter();
        let key = source.on("a", event_types::RESIZE, WAIT, callback);

        source.emit_at(&Event::resize(1, 1), t0);
        source.emit_at(&Event::resize(2, 1), t0 + Duration::from_millis(1));
        source.off(key);

        assert_eq!(source.flush_due(t0 + WAIT), 0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_synced_listener_inherits_throttle_phase() {
        let t0 = Instant::now();
        let source = EventSource::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let anchor_order = order.clone();
        let anchor = source.on("anchor", event_types::RESIZE, WAIT, move |event| {
            anchor_order.borrow_mut().push(("anchor", event.size()));
        });

        source.emit_at(&Event::resize(100, 1), t0);
        // Anchor now holds a trailing call
        source.emit_at(&Event::resize(200, 1), t0 + Duration::from_millis(10));

        let follower_order = order.clone();
        let follower = source.on_synced(anchor, "follower", event_types::RESIZE, WAIT, move |event| {
            follower_order.borrow_mut().push(("follower", event.size()));
        });

        // A fresh listener would fire immediately here; a synced one defers
        assert_eq!(source.emit_at(&Event::resize(300, 1), t0 + Duration::from_millis(20)), 0);
        assert_eq!(source.flush_due(t0 + WAIT), 2);

        assert_eq!(
            *order.borrow(),
            vec![
                ("anchor", Some((100, 1))),
                ("anchor", Some((300, 1))),
                ("follower", Some((300, 1))),
            ]
        );

        source.off(anchor);
        assert!(source.contains(follower));

        // Without an anchor the listener behaves like a plain one
        let (count, callback) = counter();
        source.on_synced(anchor, "orphan", event_types::RESIZE, WAIT, callback);
        source.emit_at(&Event::resize(400, 1), t0 + Duration::from_millis(35));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_callback_can_remove_listeners_during_dispatch() {
        let source = EventSource::new();
        let (late_count, late_callback) = counter();

        let source_clone = source.clone();
        source.on("remover", event_types::RESIZE, WAIT, move |_| {
            source_clone.off_tag("late");
        });
        source.on("late", event_types::RESIZE, WAIT, late_callback);

        // Recipients were captured before the remover ran
        assert_eq!(source.emit(&Event::resize(1, 1)), 2);
        assert_eq!(late_count.get(), 1);
        assert_eq!(source.tagged_count("late"), 0);
    }

    #[test]
    fn test_reentrant_emit_is_queued_for_busy_listener() {
        let t0 = Instant::now();
        let source = EventSource::new();
        let widths = Rc::new(RefCell::new(Vec::new()));
        let sink = widths.clone();
        let source_clone = source.clone();
        source.on("echo", event_types::RESIZE, WAIT, move |event| {
            let width = event.size().map(|(width, _)| width);
            sink.borrow_mut().push(width);
            if width == Some(100) {
                // Arrives after the interval, while this listener is running
                source_clone.emit_at(&Event::resize(200, 1), t0 + WAIT);
            }
        });

        assert_eq!(source.emit_at(&Event::resize(100, 1), t0), 1);
        assert_eq!(*widths.borrow(), vec![Some(100)]);

        // The nested event is not lost
        assert_eq!(source.next_deadline(), Some(t0 + WAIT + WAIT));
        assert_eq!(source.flush_due(t0 + WAIT + WAIT), 1);
        assert_eq!(*widths.borrow(), vec![Some(100), Some(200)]);
    }

    #[test]
    fn test_synced_listener_with_other_interval_starts_fresh() {
        let t0 = Instant::now();
        let source = EventSource::new();
        let anchor = source.on("anchor", event_types::RESIZE, WAIT, |_| {});
        source.emit_at(&Event::resize(100, 1), t0);

        let (count, callback) = counter();
        source.on_synced(anchor, "slow", event_types::RESIZE, WAIT * 2, callback);

        // Inside the anchor's window, but the fresh throttle fires
        source.emit_at(&Event::resize(200, 1), t0 + Duration::from_millis(10));
        assert_eq!(count.get(), 1);
        assert_eq!(source.next_deadline(), Some(t0 + WAIT));
    }
}
