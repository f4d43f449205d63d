use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};
use vista_core::{
    event_types, Component, ContextProvider, Event, EventSource, InstanceId, Lifecycle,
    LifecycleEvent, LifecyclePhase,
};

const WAIT: Duration = Duration::from_millis(30);

/// Minimal component that listens for resizes while mounted
struct Watcher {
    id: InstanceId,
    source: EventSource,
    lifecycle: Lifecycle,
    resizes: Rc<Cell<u32>>,
}

impl Watcher {
    fn new(source: &EventSource) -> Self {
        Self {
            id: InstanceId::next(),
            source: source.clone(),
            lifecycle: Lifecycle::new(),
            resizes: Rc::new(Cell::new(0)),
        }
    }
}

impl Component for Watcher {
    fn did_mount(&mut self) {
        if self.lifecycle.send(LifecycleEvent::Mount).is_some() {
            let resizes = self.resizes.clone();
            self.source
                .on(self.id.tag(), event_types::RESIZE, WAIT, move |_| {
                    resizes.set(resizes.get() + 1)
                });
        }
    }

    fn will_unmount(&mut self) {
        if self.lifecycle.send(LifecycleEvent::Unmount).is_some() {
            self.source.off_tag(&self.id.tag());
        }
    }
}

#[test]
fn mount_unmount_churn_leaves_no_listeners() {
    let source = EventSource::new();
    let baseline = source.listener_count();

    let mut watchers: Vec<Watcher> = (0..50).map(|_| Watcher::new(&source)).collect();
    for watcher in watchers.iter_mut() {
        watcher.did_mount();
    }
    assert_eq!(source.listener_count(), baseline + 50);

    source.emit(&Event::resize(800, 600));
    assert!(watchers.iter().all(|w| w.resizes.get() == 1));

    for watcher in watchers.iter_mut() {
        watcher.will_unmount();
        // A second unmount is rejected by the lifecycle
        watcher.will_unmount();
        assert_eq!(watcher.lifecycle.phase(), LifecyclePhase::Unmounted);
    }
    assert_eq!(source.listener_count(), baseline);
}

#[test]
fn tags_are_unique_per_instance() {
    let source = EventSource::new();
    let mut a = Watcher::new(&source);
    let mut b = Watcher::new(&source);
    assert_ne!(a.id.tag(), b.id.tag());

    a.did_mount();
    b.did_mount();
    a.will_unmount();

    assert_eq!(source.tagged_count(&a.id.tag()), 0);
    assert_eq!(source.tagged_count(&b.id.tag()), 1);
}

#[test]
fn host_loop_drains_trailing_deliveries() {
    let t0 = Instant::now();
    let source = EventSource::new();
    let widths = Rc::new(RefCell::new(Vec::new()));
    let sink = widths.clone();
    source.on("host", event_types::RESIZE, WAIT, move |event| {
        if let Some((width, _)) = event.size() {
            sink.borrow_mut().push(width);
        }
    });

    for (step, width) in [100, 200, 300, 400].into_iter().enumerate() {
        source.emit_at(&Event::resize(width, 1), t0 + Duration::from_millis(step as u64 * 5));
    }

    // Host wakes at the reported deadline
    let deadline = source.next_deadline().unwrap();
    assert_eq!(deadline, t0 + WAIT);
    source.flush_due(deadline);

    assert_eq!(*widths.borrow(), vec![100, 400]);
    assert_eq!(source.next_deadline(), None);
}

#[test]
fn provider_renders_children_with_latest_value() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut provider: ContextProvider<u32> = ContextProvider::new();
    for name in ["header", "body"] {
        let seen = seen.clone();
        provider.push(move |value: &u32| seen.borrow_mut().push((name, *value)));
    }

    provider.provide(&1);
    provider.provide(&2);

    assert_eq!(
        *seen.borrow(),
        vec![("header", 1), ("body", 1), ("header", 2), ("body", 2)]
    );
}
