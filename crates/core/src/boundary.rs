//! Failure isolation for mounted effects.
//!
//! A [`Boundary`] wraps an effect built from a factory closure. Any error
//! from construction or a tick moves the boundary into a failed state in
//! which it renders nothing and keeps the rest of the stage usable; the
//! host surfaces [`Boundary::failure`] in its fallback UI and calls
//! [`Boundary::retry`] for a full re-initialization; there is no partial
//! recovery path.

use crate::effect::{Effect, Viewport};
use crate::error::BackdropError;
use serde_json::{json, Value};

/// Factory that builds (or rebuilds) the wrapped effect from scratch.
pub type EffectFactory = Box<dyn Fn() -> Result<Box<dyn Effect>, BackdropError>>;

/// Isolation wrapper that contains effect failures.
///
/// Implements [`Effect`] itself, so a stage mounts it like any other layer.
pub struct Boundary {
    factory: EffectFactory,
    effect: Option<Box<dyn Effect>>,
    failure: Option<String>,
}

impl Boundary {
    /// Builds the boundary and immediately runs the factory once.
    ///
    /// A factory error does not propagate: the boundary starts failed and
    /// can be retried.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn Effect>, BackdropError> + 'static,
    {
        let mut boundary = Self {
            factory: Box::new(factory),
            effect: None,
            failure: None,
        };
        boundary.remount();
        boundary
    }

    fn remount(&mut self) {
        match (self.factory)() {
            Ok(effect) => {
                self.effect = Some(effect);
                self.failure = None;
            }
            Err(e) => {
                self.effect = None;
                self.failure = Some(e.to_string());
            }
        }
    }

    /// True when the wrapped effect has failed and nothing is rendered.
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// The failure message shown by the host's fallback UI, if any.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Rebuilds the effect from scratch via the factory.
    ///
    /// User-initiated remount; the previous effect instance is discarded
    /// entirely.
    pub fn retry(&mut self) {
        self.remount();
    }
}

impl Effect for Boundary {
    fn start(&mut self) {
        if let Some(effect) = &mut self.effect {
            effect.start();
        }
    }

    fn stop(&mut self) {
        if let Some(effect) = &mut self.effect {
            effect.stop();
        }
    }

    fn is_running(&self) -> bool {
        self.effect.as_ref().is_some_and(|effect| effect.is_running())
    }

    fn tick(&mut self, dt: f64) -> Result<(), BackdropError> {
        if let Some(effect) = &mut self.effect {
            if let Err(e) = effect.tick(dt) {
                self.failure = Some(e.to_string());
                self.effect = None;
            }
        }
        Ok(())
    }

    fn params(&self) -> Value {
        match &self.effect {
            Some(effect) => effect.params(),
            None => json!({ "failed": self.failure }),
        }
    }

    fn param_schema(&self) -> Value {
        match &self.effect {
            Some(effect) => effect.param_schema(),
            None => json!({}),
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        if let Some(effect) = &mut self.effect {
            effect.resize(viewport);
        }
    }

    fn pointer_moved(&mut self, x: f64, y: f64) {
        if let Some(effect) = &mut self.effect {
            effect.pointer_moved(x, y);
        }
    }
}
