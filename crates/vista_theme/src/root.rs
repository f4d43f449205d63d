//! Theme render root
//!
//! A [`ThemeRenderRoot`] owns a subtree of descendant content and renders it
//! against its own copy of the shared theme. The copy is taken when the root
//! is built and replaced after every coalesced resize while the root is
//! mounted. Roots never share a theme value with each other or with the
//! store.
//!
//! ```text
//! Created --mount--> Mounted (subscribed) --unmount--> Unmounted
//!    \________________________unmount_______________________/
//! ```

use crate::broadcaster::{Subscription, ThemeBroadcaster};
use crate::compose::ComposedTheme;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use vista_core::{
    Component, Consumer, ContextProvider, Event, InstanceId, Lifecycle, LifecycleEvent,
    LifecyclePhase,
};

/// Local render state, shared with the root's resize subscription
struct RootState {
    theme: RefCell<ComposedTheme>,
    /// Update that arrived while descendants were rendering
    deferred: RefCell<Option<ComposedTheme>>,
    provider: RefCell<ContextProvider<ComposedTheme>>,
    renders: Cell<u64>,
}

impl RootState {
    fn apply(&self, theme: ComposedTheme) {
        match self.theme.try_borrow_mut() {
            Ok(mut local) => *local = theme,
            Err(_) => {
                tracing::debug!("deferring theme update until descendants finish rendering");
                *self.deferred.borrow_mut() = Some(theme);
                return;
            }
        }
        self.render();
    }

    fn render(&self) {
        {
            let theme = self.theme.borrow();
            match self.provider.try_borrow_mut() {
                Ok(mut provider) => provider.provide(&theme),
                Err(_) => {
                    tracing::warn!("render requested while descendants are rendering");
                    return;
                }
            }
            self.renders.set(self.renders.get() + 1);
        }

        let deferred = self.deferred.borrow_mut().take();
        if let Some(theme) = deferred {
            self.apply(theme);
        }
    }
}

/// Supplies a [`ComposedTheme`] to descendant content
pub struct ThemeRenderRoot {
    id: InstanceId,
    broadcaster: Rc<ThemeBroadcaster>,
    state: Rc<RootState>,
    lifecycle: Lifecycle,
    subscription: Option<Subscription>,
}

impl ThemeRenderRoot {
    /// Build a root over `children`, starting from a snapshot of the store
    pub fn new(
        broadcaster: &Rc<ThemeBroadcaster>,
        children: Vec<Box<dyn Consumer<ComposedTheme>>>,
    ) -> Self {
        let id = InstanceId::next();
        let theme = broadcaster.store().snapshot();
        tracing::trace!(%id, screen_size = theme.screen_size, "render root created");

        Self {
            id,
            broadcaster: Rc::clone(broadcaster),
            state: Rc::new(RootState {
                theme: RefCell::new(theme),
                deferred: RefCell::new(None),
                provider: RefCell::new(ContextProvider::with_children(children)),
                renders: Cell::new(0),
            }),
            lifecycle: Lifecycle::new(),
            subscription: None,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.lifecycle.phase()
    }

    /// Whether resize updates currently reach this root
    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    /// Attach the root: subscribe to resize updates and render once
    pub fn mount(&mut self) {
        self.did_mount();
    }

    /// Detach the root. Pending or in-flight updates are discarded.
    pub fn unmount(&mut self) {
        self.will_unmount();
    }

    /// An owned copy of the local theme
    pub fn theme(&self) -> ComposedTheme {
        self.state.theme.borrow().clone()
    }

    /// Edit the local theme. Other roots and the store are unaffected, and
    /// the next resize update overwrites the edit.
    pub fn with_theme_mut<R>(&self, f: impl FnOnce(&mut ComposedTheme) -> R) -> R {
        f(&mut self.state.theme.borrow_mut())
    }

    /// Render descendants with the local theme
    pub fn render(&self) {
        self.state.render();
    }

    /// Number of completed renders
    pub fn render_count(&self) -> u64 {
        self.state.renders.get()
    }

    /// Copy the store's current theme into local state and re-render.
    ///
    /// Does nothing unless the root is mounted and subscribed.
    pub(crate) fn sync_to_shared_state(&self) -> bool {
        if !self.lifecycle.is_in(LifecyclePhase::Mounted) || !self.is_subscribed() {
            tracing::trace!(id = %self.id, "ignoring sync on inactive root");
            return false;
        }
        self.state.apply(self.broadcaster.store().snapshot());
        true
    }

    /// Emit a lifecycle event for this root on the window event source
    fn announce(&self, event: LifecycleEvent) {
        self.broadcaster
            .resize_source()
            .emit(&Event::lifecycle(event, self.id.to_raw()));
    }

    fn watch_screen_size(&mut self) {
        let state = Rc::clone(&self.state);
        let subscription = self
            .broadcaster
            .subscribe(self.id, move |theme| state.apply(theme));
        if let Some(previous) = self.subscription.replace(subscription) {
            tracing::warn!(id = %self.id, "replacing an existing subscription");
            previous.cancel();
        }
    }
}

impl Component for ThemeRenderRoot {
    fn did_mount(&mut self) {
        if self.lifecycle.send(LifecycleEvent::Mount).is_none() {
            return;
        }
        self.watch_screen_size();
        tracing::debug!(id = %self.id, "render root mounted");
        // The store may have moved on since this root was built
        self.sync_to_shared_state();
        self.announce(LifecycleEvent::Mount);
    }

    fn will_unmount(&mut self) {
        if self.lifecycle.send(LifecycleEvent::Unmount).is_none() {
            return;
        }
        if let Some(subscription) = &self.subscription {
            subscription.cancel();
        }
        tracing::debug!(id = %self.id, "render root unmounted");
        self.announce(LifecycleEvent::Unmount);
    }
}

impl Drop for ThemeRenderRoot {
    fn drop(&mut self) {
        if !self.lifecycle.is_in(LifecyclePhase::Unmounted) {
            self.will_unmount();
        }
    }
}

impl std::fmt::Debug for ThemeRenderRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeRenderRoot")
            .field("id", &self.id)
            .field("phase", &self.phase())
            .field("subscribed", &self.is_subscribed())
            .field("renders", &self.render_count())
            .finish()
    }
}
