//! Vista Theme System
//!
//! One canonical theme per process, shared by any number of independently
//! mounted render roots and kept in sync with the viewport width.
//!
//! # Overview
//!
//! - **Tokens**: Palettes, densities, lengths and structural constants
//! - **Composition**: Merging one palette and one density into a [`ComposedTheme`]
//! - **Viewport**: The screen-size metric used for breakpoint checks
//! - **Store**: The shared [`ThemeStore`], mutated only by resize handling
//! - **Broadcast**: Throttled fan-out of store updates to subscribers
//! - **Render roots**: Components that hand their own theme copy to descendants
//!
//! # Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use std::sync::Arc;
//! use vista_core::{Event, EventSource};
//! use vista_theme::{HostViewport, ThemeBroadcaster, ThemeConfig, ThemeRenderRoot, ThemeStore};
//!
//! let config = ThemeConfig::default();
//! let viewport = Arc::new(HostViewport::new(1280.0));
//! let store = Arc::new(ThemeStore::from_config(&config, viewport.clone())?);
//!
//! let resize = EventSource::new();
//! let broadcaster = Rc::new(ThemeBroadcaster::install(
//!     store,
//!     &resize,
//!     config.throttle_interval(),
//! ));
//!
//! let mut root = ThemeRenderRoot::new(&broadcaster, vec![]);
//! root.mount();
//!
//! viewport.set_width(640.0);
//! resize.emit(&Event::resize(640, 480));
//! assert!(root.theme().is_screen_below("58.75rem"));
//! # Ok::<(), vista_theme::ThemeError>(())
//! ```
//!
//! # Update flow
//!
//! ```text
//! resize ──> store listener ──> ThemeStore::refresh_viewport_metric
//!        └─> root listeners ──> snapshot ──> ThemeRenderRoot ──> descendants
//! ```
//!
//! The store listener is registered first and every root listener shares
//! its throttle phase, so roots always copy the metric the store has just
//! written.

pub mod broadcaster;
pub mod compose;
pub mod config;
pub mod error;
pub mod root;
pub mod state;
pub mod tokens;
pub mod viewport;

pub use broadcaster::{Subscription, ThemeBroadcaster, STORE_LISTENER_TAG, THROTTLE_INTERVAL};
pub use compose::{
    compose_theme, ComposedTheme, DividerScale, SpacingScale, ThemeComposer, ThemeSelection,
};
pub use config::{ThemeConfig, DEFAULT_THROTTLE_MS};
pub use error::{Result, ThemeError};
pub use root::ThemeRenderRoot;
pub use state::ThemeStore;
pub use tokens::*;
pub use viewport::{HostViewport, ViewportSource, ViewportTracker, REFERENCE_FONT_SIZE};
