//! Event types
//!
//! Window-level signals delivered to listeners registered on an
//! [`EventSource`](crate::event_source::EventSource).

use crate::lifecycle::LifecycleEvent;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const RESIZE: EventType = 40;

    // Element lifecycle events
    pub const MOUNT: EventType = 60;
    pub const UNMOUNT: EventType = 61;
}

/// A window-level event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    /// Id of the emitting window (0 for the primary window) or component
    pub target: u64,
    pub data: EventData,
    /// Milliseconds since the host's epoch, as reported by the host
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Resize { width: u32, height: u32 },
    None,
}

impl Event {
    /// A resize of the primary window to `width` x `height` logical pixels
    pub fn resize(width: u32, height: u32) -> Self {
        Self {
            event_type: event_types::RESIZE,
            target: 0,
            data: EventData::Resize { width, height },
            timestamp: 0,
        }
    }

    /// A lifecycle transition of the component identified by `target`
    pub fn lifecycle(event: LifecycleEvent, target: u64) -> Self {
        Self {
            event_type: event.event_type(),
            target,
            data: EventData::None,
            timestamp: 0,
        }
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Logical size carried by a resize event
    pub fn size(&self) -> Option<(u32, u32)> {
        match self.data {
            EventData::Resize { width, height } => Some((width, height)),
            EventData::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_event() {
        let event = Event::resize(1280, 720).with_timestamp(42);
        assert_eq!(event.event_type, event_types::RESIZE);
        assert_eq!(event.size(), Some((1280, 720)));
        assert_eq!(event.timestamp, 42);
    }

    #[test]
    fn test_lifecycle_event() {
        let event = Event::lifecycle(LifecycleEvent::Unmount, 7);
        assert_eq!(event.event_type, event_types::UNMOUNT);
        assert_eq!(event.target, 7);
        assert_eq!(event.size(), None);
    }
}
