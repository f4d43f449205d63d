//! Shared theme state
//!
//! [`ThemeStore`] holds the one canonical [`ComposedTheme`] of the process.
//! Palette and density are fixed when the store is built; the only mutation
//! is [`ThemeStore::refresh_viewport_metric`], which rewrites the
//! screen-size metric. Readers always receive owned snapshots, never a
//! reference into the store.
//!
//! A store is usually built once at startup, installed with
//! [`ThemeStore::init`] and shared from there, but it can equally be
//! constructed and passed around explicitly.

use crate::compose::{ComposedTheme, ThemeComposer, ThemeSelection};
use crate::config::ThemeConfig;
use crate::error::Result;
use crate::tokens::{DensityTable, PaletteTable};
use crate::viewport::{ViewportSource, ViewportTracker};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Global theme store instance
static THEME_STORE: OnceLock<Arc<ThemeStore>> = OnceLock::new();

/// Canonical theme state shared by every render root
pub struct ThemeStore {
    selection: ThemeSelection,
    tracker: ViewportTracker,
    viewport: Box<dyn ViewportSource>,
    theme: RwLock<ComposedTheme>,
    /// Number of metric refreshes applied
    version: AtomicU64,
}

impl ThemeStore {
    /// Compose the selected theme and take the initial viewport metric
    pub fn new(
        palettes: PaletteTable,
        densities: DensityTable,
        selection: ThemeSelection,
        tracker: ViewportTracker,
        viewport: impl ViewportSource + 'static,
    ) -> Result<Self> {
        let composer = ThemeComposer::new(palettes, densities);
        Self::with_composer(&composer, selection, tracker, viewport)
    }

    /// Build from configuration: palette/density tables, selection and
    /// reference font size all come from `config`.
    pub fn from_config(
        config: &ThemeConfig,
        viewport: impl ViewportSource + 'static,
    ) -> Result<Self> {
        let composer = config.composer()?;
        Self::with_composer(&composer, config.selection(), config.tracker(), viewport)
    }

    pub fn with_composer(
        composer: &ThemeComposer,
        selection: ThemeSelection,
        tracker: ViewportTracker,
        viewport: impl ViewportSource + 'static,
    ) -> Result<Self> {
        tracker.validate()?;
        let mut theme = composer.compose_selection(&selection)?;
        theme.screen_size = tracker.current_screen_size(&viewport);

        tracing::debug!(
            palette = %selection.palette,
            density = %selection.density,
            screen_size = theme.screen_size,
            "theme store initialized"
        );

        Ok(Self {
            selection,
            tracker,
            viewport: Box::new(viewport),
            theme: RwLock::new(theme),
            version: AtomicU64::new(0),
        })
    }

    /// Install `store` as the process-wide instance.
    ///
    /// The first call wins. Later calls leave the installed store in place,
    /// log a warning and return it.
    pub fn init(store: ThemeStore) -> Arc<ThemeStore> {
        let mut installed_now = false;
        let installed = THEME_STORE.get_or_init(|| {
            installed_now = true;
            Arc::new(store)
        });
        if !installed_now {
            tracing::warn!("ThemeStore::init called more than once; keeping the first store");
        }
        Arc::clone(installed)
    }

    /// Get the process-wide store
    pub fn get() -> Arc<ThemeStore> {
        Arc::clone(
            THEME_STORE
                .get()
                .expect("ThemeStore not initialized. Call ThemeStore::init() at app startup."),
        )
    }

    /// Try to get the process-wide store (returns None if not initialized)
    pub fn try_get() -> Option<Arc<ThemeStore>> {
        THEME_STORE.get().cloned()
    }

    /// An owned copy of the current theme
    pub fn snapshot(&self) -> ComposedTheme {
        self.theme
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current screen-size metric
    pub fn screen_size(&self) -> f64 {
        self.theme
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .screen_size
    }

    pub fn selection(&self) -> &ThemeSelection {
        &self.selection
    }

    pub fn tracker(&self) -> ViewportTracker {
        self.tracker
    }

    /// Number of metric refreshes applied so far
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Re-measure the viewport and overwrite the screen-size metric.
    ///
    /// Nothing else in the theme changes. Returns the new metric.
    pub fn refresh_viewport_metric(&self) -> f64 {
        let screen_size = self.tracker.current_screen_size(self.viewport.as_ref());
        let previous = {
            let mut theme = self.theme.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut theme.screen_size, screen_size)
        };
        self.version.fetch_add(1, Ordering::SeqCst);

        tracing::debug!(previous, screen_size, "viewport metric refreshed");
        screen_size
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("selection", &self.selection)
            .field("screen_size", &self.screen_size())
            .field("version", &self.version())
            .finish_non_exhaustive()
    }
}
