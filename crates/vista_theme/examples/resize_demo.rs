//! Resize Demo
//!
//! Drives two render roots through a simulated resize burst and prints the
//! breakpoint each one sees:
//! - Loads an optional TOML theme config
//! - Feeds resize events through a throttled event source
//! - Flushes trailing deliveries the way a host event loop would
//!
//! Run with: cargo run -p vista_theme --example resize_demo [-- theme.toml]
//! Set RUST_LOG=vista_theme=debug to watch the store and subscriptions.

use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use vista_core::{Consumer, Event, EventSource};
use vista_theme::{
    ComposedTheme, HostViewport, ThemeBroadcaster, ThemeConfig, ThemeRenderRoot, ThemeStore,
};

fn main() -> vista_theme::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ThemeConfig::load(path)?,
        None => ThemeConfig::default(),
    };

    let viewport = Arc::new(HostViewport::new(1440.0));
    let store = ThemeStore::init(ThemeStore::from_config(&config, viewport.clone())?);

    let resize = EventSource::new();
    let broadcaster = Rc::new(ThemeBroadcaster::install(
        store,
        &resize,
        config.throttle_interval(),
    ));

    let mut sidebar = ThemeRenderRoot::new(&broadcaster, vec![layout_printer("sidebar")]);
    let mut content = ThemeRenderRoot::new(&broadcaster, vec![layout_printer("content")]);
    sidebar.mount();
    content.mount();

    let start = Instant::now();
    for (step, width) in [1200u32, 1000, 900, 700, 400, 300].into_iter().enumerate() {
        viewport.set_width(f64::from(width));
        let at = start + Duration::from_millis(step as u64 * 8);
        resize.emit_at(&Event::resize(width, 800), at);
    }

    while let Some(deadline) = resize.next_deadline() {
        resize.flush_due(deadline);
    }

    let vars = content.theme().to_variable_map();
    println!(
        "final: screenSize={} smallScreenSize={} mediumSpacing={}",
        vars["screenSize"], vars["smallScreenSize"], vars["mediumSpacing"]
    );

    sidebar.unmount();
    content.unmount();
    Ok(())
}

fn layout_printer(name: &'static str) -> Box<dyn Consumer<ComposedTheme>> {
    Box::new(move |theme: &ComposedTheme| {
        let layout = if theme.is_screen_below(&theme.breakpoints.mobile.to_string()) {
            "mobile"
        } else if theme.is_screen_below(&theme.breakpoints.small.to_string()) {
            "small"
        } else {
            "wide"
        };
        println!("{name}: screen size {:.2} -> {layout}", theme.screen_size);
    })
}
