//! Structural tokens shared by every theme
//!
//! Border radius, responsive breakpoints, stacking layers, transition
//! durations and font sizes do not vary with palette or density.

use super::length::Length;
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Corner radius applied to bordered surfaces
pub const BORDER_RADIUS: Length = Length::px(1.0);

/// Responsive breakpoints, compared against the screen-size metric
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Breakpoints {
    pub minimum: Length,
    pub mobile: Length,
    pub small: Length,
    pub medium: Length,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            minimum: Length::rem(20.0),
            mobile: Length::rem(26.25),
            small: Length::rem(58.75),
            medium: Length::rem(90.0),
        }
    }
}

/// Stacking order of overlay layers
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ZIndexLayers {
    pub menubar: i32,
    pub lightbox: i32,
    pub loading_companion: i32,
    pub slideout: i32,
    pub content: i32,
    pub confirmation: i32,
    pub help: i32,
    pub vertical_menu: i32,
    pub dropdown: i32,
    pub menu_item: i32,
    pub blocking: i32,
}

impl Default for ZIndexLayers {
    fn default() -> Self {
        Self {
            menubar: 101,
            lightbox: 101,
            loading_companion: 101,
            slideout: 103,
            content: 101,
            confirmation: 103,
            help: 104,
            vertical_menu: 101,
            dropdown: 103,
            menu_item: 102,
            blocking: 105,
        }
    }
}

impl ZIndexLayers {
    pub(crate) fn variables(&self) -> [(&'static str, i32); 11] {
        [
            ("zIndexMenubar", self.menubar),
            ("zIndexLightbox", self.lightbox),
            ("zIndexLoadingCompanion", self.loading_companion),
            ("zIndexSlideout", self.slideout),
            ("zIndexContent", self.content),
            ("zIndexConfirmation", self.confirmation),
            ("zIndexHelp", self.help),
            ("zIndexVerticalMenu", self.vertical_menu),
            ("zIndexDropdown", self.dropdown),
            ("zIndexMenuItem", self.menu_item),
            ("zIndexBlocking", self.blocking),
        ]
    }
}

/// Transition durations
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Transitions {
    /// General transitions; zero disables them
    #[serde(serialize_with = "serialize_seconds")]
    pub transition_time: Duration,
    /// Transitions of core layout elements
    #[serde(serialize_with = "serialize_seconds")]
    pub core_transition_time: Duration,
}

impl Default for Transitions {
    fn default() -> Self {
        Self {
            transition_time: Duration::ZERO,
            core_transition_time: Duration::from_millis(250),
        }
    }
}

/// `250ms` -> `"0.25s"`
pub(crate) fn format_seconds(duration: Duration) -> String {
    format!("{}s", duration.as_secs_f64())
}

fn serialize_seconds<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_seconds(*duration))
}

/// Font size scale
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FontSizes {
    pub minimum: Length,
    pub medium: Length,
    pub large: Length,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            minimum: Length::rem(1.0),
            medium: Length::rem(1.2),
            large: Length::rem(1.4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(Duration::ZERO), "0s");
        assert_eq!(format_seconds(Duration::from_millis(250)), "0.25s");
    }

    #[test]
    fn test_blocking_layer_is_topmost() {
        let layers = ZIndexLayers::default();
        let top = layers.variables().iter().map(|(_, z)| *z).max();
        assert_eq!(top, Some(layers.blocking));
    }
}
