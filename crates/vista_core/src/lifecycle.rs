//! Component lifecycle state machine
//!
//! Every component instance moves through
//! `Created -> Mounted -> Unmounted`. There is no way back from
//! `Unmounted`; an instance that is torn down before it was ever mounted
//! goes straight from `Created` to `Unmounted`.

use crate::events::{event_types, EventType};
use smallvec::SmallVec;

/// Lifecycle phase of a component instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    /// Constructed, not yet attached
    Created,
    /// Attached and receiving updates
    Mounted,
    /// Torn down; terminal
    Unmounted,
}

/// Input driving the lifecycle state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Mount,
    Unmount,
}

impl LifecycleEvent {
    /// Matching window event type
    pub fn event_type(self) -> EventType {
        match self {
            Self::Mount => event_types::MOUNT,
            Self::Unmount => event_types::UNMOUNT,
        }
    }
}

const TRANSITIONS: [(LifecyclePhase, LifecycleEvent, LifecyclePhase); 3] = [
    (
        LifecyclePhase::Created,
        LifecycleEvent::Mount,
        LifecyclePhase::Mounted,
    ),
    (
        LifecyclePhase::Created,
        LifecycleEvent::Unmount,
        LifecyclePhase::Unmounted,
    ),
    (
        LifecyclePhase::Mounted,
        LifecycleEvent::Unmount,
        LifecyclePhase::Unmounted,
    ),
];

/// Hooks a host calls around attaching and detaching a component
pub trait Component {
    /// Called once after the component is attached
    fn did_mount(&mut self);

    /// Called once before the component is detached
    fn will_unmount(&mut self);
}

/// Lifecycle tracker for one component instance
#[derive(Clone, Debug)]
pub struct Lifecycle {
    current: LifecyclePhase,
    /// History of transitions (for debugging)
    history: SmallVec<[(LifecyclePhase, LifecycleEvent, LifecyclePhase); 2]>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            current: LifecyclePhase::Created,
            history: SmallVec::new(),
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.current
    }

    pub fn is_in(&self, phase: LifecyclePhase) -> bool {
        self.current == phase
    }

    pub fn history(&self) -> &[(LifecyclePhase, LifecycleEvent, LifecyclePhase)] {
        &self.history
    }

    /// Check if an event can trigger a transition from the current phase
    pub fn can_send(&self, event: LifecycleEvent) -> bool {
        self.target(event).is_some()
    }

    /// Apply an event. Returns the new phase, or `None` if the event is not
    /// valid in the current phase (the phase is left unchanged).
    pub fn send(&mut self, event: LifecycleEvent) -> Option<LifecyclePhase> {
        let from = self.current;
        let Some(to) = self.target(event) else {
            tracing::warn!(?from, ?event, "ignoring invalid lifecycle transition");
            return None;
        };

        self.current = to;
        self.history.push((from, event, to));
        Some(to)
    }

    fn target(&self, event: LifecycleEvent) -> Option<LifecyclePhase> {
        TRANSITIONS
            .iter()
            .find(|(from, on, _)| *from == self.current && *on == event)
            .map(|(_, _, to)| *to)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_then_unmount() {
        let mut lifecycle = Lifecycle::new();
        assert!(lifecycle.is_in(LifecyclePhase::Created));

        assert_eq!(
            lifecycle.send(LifecycleEvent::Mount),
            Some(LifecyclePhase::Mounted)
        );
        assert_eq!(
            lifecycle.send(LifecycleEvent::Unmount),
            Some(LifecyclePhase::Unmounted)
        );
        assert_eq!(lifecycle.history().len(), 2);
    }

    #[test]
    fn test_unmounted_is_terminal() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.send(LifecycleEvent::Mount);
        lifecycle.send(LifecycleEvent::Unmount);

        assert!(!lifecycle.can_send(LifecycleEvent::Mount));
        assert_eq!(lifecycle.send(LifecycleEvent::Mount), None);
        assert_eq!(lifecycle.send(LifecycleEvent::Unmount), None);
        assert!(lifecycle.is_in(LifecyclePhase::Unmounted));
        assert_eq!(lifecycle.history().len(), 2);
    }

    #[test]
    fn test_double_mount_is_rejected() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.send(LifecycleEvent::Mount);
        assert_eq!(lifecycle.send(LifecycleEvent::Mount), None);
        assert!(lifecycle.is_in(LifecyclePhase::Mounted));
    }

    #[test]
    fn test_unmount_before_mount() {
        let mut lifecycle = Lifecycle::new();
        assert_eq!(
            lifecycle.send(LifecycleEvent::Unmount),
            Some(LifecyclePhase::Unmounted)
        );
        assert_eq!(
            lifecycle.history(),
            &[(
                LifecyclePhase::Created,
                LifecycleEvent::Unmount,
                LifecyclePhase::Unmounted
            )]
        );
    }

    #[test]
    fn test_event_types() {
        assert_eq!(LifecycleEvent::Mount.event_type(), event_types::MOUNT);
        assert_eq!(LifecycleEvent::Unmount.event_type(), event_types::UNMOUNT);
    }
}
