//! The core `Effect` trait every background effect implements.
//!
//! The original components leaned on a UI framework for mount/unmount and
//! per-frame callbacks; here the lifecycle is explicit. An effect is a
//! state machine advanced by `tick(dt)` from whatever render loop the host
//! provides, with optional hooks for resize and pointer events. The trait
//! is object-safe so a [`Stage`](crate::stage::Stage) can own a
//! heterogeneous stack of `Box<dyn Effect>`.

use crate::error::BackdropError;
use serde_json::Value;

/// Viewport dimensions in display units, read at mount and on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport. Negative dimensions are clamped to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// True when the viewport has no drawable area.
    ///
    /// Effects respond to a degenerate viewport with empty geometry, never
    /// with an error.
    pub fn is_degenerate(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A self-contained animated background effect.
///
/// Implementations own their buffers exclusively; nothing outside the
/// effect reads or writes them, so per-frame in-place mutation needs no
/// synchronization.
///
/// Effects construct in the running state (mounting implies starting).
/// [`stop`](Effect::stop) halts per-frame work, making subsequent ticks
/// no-ops, and [`start`](Effect::start) resumes it. Both are idempotent.
pub trait Effect {
    /// Resume animating.
    fn start(&mut self);

    /// Halt animating; subsequent ticks are no-ops until [`Effect::start`].
    fn stop(&mut self);

    /// Whether the effect is currently animating.
    fn is_running(&self) -> bool;

    /// Advance the animation by `dt` seconds and refresh derived buffers.
    ///
    /// Called once per display refresh while mounted, never concurrently.
    /// Must return `Ok(())` without touching any buffer while stopped.
    fn tick(&mut self, dt: f64) -> Result<(), BackdropError>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// Recompute layout for a new viewport.
    ///
    /// No-op by default; effects with viewport-derived geometry override it.
    fn resize(&mut self, viewport: Viewport) {
        let _ = viewport;
    }

    /// Pointer moved to `(x, y)` in viewport coordinates.
    ///
    /// Event-driven, interleaved with `tick` on the same thread; handlers
    /// must stay O(owned geometry). Ignored by default; only effects that
    /// intentionally capture pointer movement override it.
    fn pointer_moved(&mut self, x: f64, y: f64) {
        let _ = (x, y);
    }
}
