//! Viewport tracking
//!
//! The screen-size metric is the viewport width expressed in reference font
//! units: `inner_width / 16` with the default tracker. Breakpoints are
//! compared against this metric, so a `58.75rem` breakpoint trips at a
//! viewport 940 pixels wide.
//!
//! The metric is recomputed on demand and never cached here; holders of a
//! theme keep their own copy.

use crate::error::{Result, ThemeError};
use crate::tokens::Length;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Pixels per metric unit
pub const REFERENCE_FONT_SIZE: f64 = 16.0;

/// Provides the current viewport width in logical pixels
pub trait ViewportSource: Send + Sync {
    fn inner_width(&self) -> f64;
}

impl<T: ViewportSource + ?Sized> ViewportSource for Arc<T> {
    fn inner_width(&self) -> f64 {
        (**self).inner_width()
    }
}

/// A viewport whose width is pushed by the host.
///
/// Suits windowing backends that report sizes through resize events, as
/// well as headless rendering and tests.
#[derive(Debug)]
pub struct HostViewport {
    width_bits: AtomicU64,
}

impl HostViewport {
    pub fn new(width: f64) -> Self {
        Self {
            width_bits: AtomicU64::new(width.to_bits()),
        }
    }

    pub fn set_width(&self, width: f64) {
        self.width_bits.store(width.to_bits(), Ordering::SeqCst);
    }

    pub fn width(&self) -> f64 {
        f64::from_bits(self.width_bits.load(Ordering::SeqCst))
    }
}

impl ViewportSource for HostViewport {
    fn inner_width(&self) -> f64 {
        self.width()
    }
}

/// Computes the screen-size metric and compares it with breakpoints
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTracker {
    reference_font_size: f64,
}

impl ViewportTracker {
    pub fn new(reference_font_size: f64) -> Self {
        Self {
            reference_font_size,
        }
    }

    /// The reference font size must be finite and positive
    pub fn validate(&self) -> Result<()> {
        let size = self.reference_font_size;
        if !size.is_finite() || size <= 0.0 {
            return Err(ThemeError::NonPositiveLength {
                field: "reference_font_size",
                value: size.to_string(),
            });
        }
        Ok(())
    }

    pub fn reference_font_size(&self) -> f64 {
        self.reference_font_size
    }

    /// Metric for the viewport's current width
    pub fn current_screen_size(&self, source: &dyn ViewportSource) -> f64 {
        self.screen_size_for_width(source.inner_width())
    }

    pub fn screen_size_for_width(&self, width: f64) -> f64 {
        width / self.reference_font_size
    }

    /// `metric < threshold`, with the threshold given as a length string.
    /// Equal values are not below.
    pub fn is_below(metric: f64, threshold: &str) -> Result<bool> {
        let threshold = Length::parse(threshold)?;
        Ok(Self::is_below_length(metric, threshold))
    }

    pub fn is_below_length(metric: f64, threshold: Length) -> bool {
        metric < threshold.value
    }
}

impl Default for ViewportTracker {
    fn default() -> Self {
        Self::new(REFERENCE_FONT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_is_width_over_reference() {
        let viewport = HostViewport::new(1440.0);
        let tracker = ViewportTracker::default();
        assert_eq!(tracker.current_screen_size(&viewport), 90.0);

        viewport.set_width(320.0);
        assert_eq!(tracker.current_screen_size(&viewport), 20.0);
    }

    #[test]
    fn test_is_below_is_strict() {
        assert!(ViewportTracker::is_below(58.0, "58.75rem").unwrap());
        assert!(!ViewportTracker::is_below(58.75, "58.75rem").unwrap());
        assert!(!ViewportTracker::is_below(90.0, "58.75rem").unwrap());
    }

    #[test]
    fn test_is_below_rejects_bad_threshold() {
        assert!(ViewportTracker::is_below(10.0, "wide").is_err());
    }

    #[test]
    fn test_validate_reference_font_size() {
        assert!(ViewportTracker::default().validate().is_ok());
        assert!(ViewportTracker::new(0.0).validate().is_err());
        assert!(ViewportTracker::new(-16.0).validate().is_err());
        assert!(ViewportTracker::new(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_shared_source() {
        let viewport = Arc::new(HostViewport::new(800.0));
        let source: Box<dyn ViewportSource> = Box::new(viewport.clone());
        viewport.set_width(960.0);
        assert_eq!(source.inner_width(), 960.0);
    }
}
