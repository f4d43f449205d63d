//! Vista Core Runtime
//!
//! This crate provides the framework primitives the rest of Vista builds on:
//!
//! - **Events**: Window-level signals such as resize and focus
//! - **Event Source**: Tagged listeners with per-listener throttling
//! - **Lifecycle**: The `Created -> Mounted -> Unmounted` component state machine
//! - **Context**: Ambient injection of a value into descendant content
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use vista_core::{event_types, Event, EventSource};
//!
//! let source = EventSource::new();
//! let key = source.on("demo", event_types::RESIZE, Duration::from_millis(30), |event| {
//!     println!("resized to {:?}", event.size());
//! });
//!
//! source.emit(&Event::resize(1280, 720));
//! assert!(source.off(key));
//! ```

pub mod color;
pub mod context;
pub mod event_source;
pub mod events;
pub mod id;
pub mod lifecycle;
pub mod throttle;

pub use color::{Color, ColorParseError};
pub use context::{Consumer, ContextProvider};
pub use event_source::{EventSource, ListenerCallback, ListenerKey};
pub use events::{event_types, Event, EventData, EventType};
pub use id::InstanceId;
pub use lifecycle::{Component, Lifecycle, LifecycleEvent, LifecyclePhase};
pub use throttle::Throttle;
