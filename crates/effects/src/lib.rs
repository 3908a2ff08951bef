#![deny(unsafe_code)]
//! Effect registry: maps effect names to implementations and provides
//! CPU-side snapshot rendering.
//!
//! This crate sits between `backdrop-core` (which defines the `Effect`
//! trait) and the individual effect crates. Both the CLI and any host
//! embedding depend on this crate to avoid duplicating dispatch logic.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use backdrop_core::error::BackdropError;
use backdrop_core::{Effect, Theme, Viewport};
use backdrop_particles::{ParticleField, ParticleParams};
use backdrop_proximity::ProximityGrid;
use backdrop_surface::SurfaceRenderer;
use serde_json::Value;

/// All available effect names.
const EFFECT_NAMES: &[&str] = &["surface", "proximity", "particles"];

/// Enumeration of all available background effects.
///
/// Wraps each effect implementation and delegates `Effect` trait methods.
/// Use [`EffectKind::from_name`] for string-based construction (CLI, host
/// embeddings).
pub enum EffectKind {
    /// Noise-displaced animated point surface.
    Surface(SurfaceRenderer),
    /// Pointer-reactive tile grid with glow dots.
    Proximity(ProximityGrid),
    /// Ambient drifting particle cloud.
    Particles(ParticleField),
}

impl EffectKind {
    /// Constructs an effect by name.
    ///
    /// Returns `BackdropError::UnknownEffect` if the name is not recognized.
    pub fn from_name(
        name: &str,
        viewport: Viewport,
        seed: u64,
        params: &Value,
        theme: &Theme,
    ) -> Result<Self, BackdropError> {
        match name {
            "surface" => Ok(EffectKind::Surface(SurfaceRenderer::from_json(params, seed))),
            "proximity" => Ok(EffectKind::Proximity(ProximityGrid::from_json(
                params, viewport, seed, theme,
            ))),
            "particles" => Ok(EffectKind::Particles(ParticleField::new(
                ParticleParams::from_json(params),
                seed,
            ))),
            _ => Err(BackdropError::UnknownEffect(name.to_string())),
        }
    }

    /// Returns a slice of all recognized effect names.
    pub fn list_effects() -> &'static [&'static str] {
        EFFECT_NAMES
    }
}

impl Effect for EffectKind {
    fn start(&mut self) {
        match self {
            EffectKind::Surface(e) => e.start(),
            EffectKind::Proximity(e) => e.start(),
            EffectKind::Particles(e) => e.start(),
        }
    }

    fn stop(&mut self) {
        match self {
            EffectKind::Surface(e) => e.stop(),
            EffectKind::Proximity(e) => e.stop(),
            EffectKind::Particles(e) => e.stop(),
        }
    }

    fn is_running(&self) -> bool {
        match self {
            EffectKind::Surface(e) => e.is_running(),
            EffectKind::Proximity(e) => e.is_running(),
            EffectKind::Particles(e) => e.is_running(),
        }
    }

    fn tick(&mut self, dt: f64) -> Result<(), BackdropError> {
        match self {
            EffectKind::Surface(e) => e.tick(dt),
            EffectKind::Proximity(e) => e.tick(dt),
            EffectKind::Particles(e) => e.tick(dt),
        }
    }

    fn params(&self) -> Value {
        match self {
            EffectKind::Surface(e) => e.params(),
            EffectKind::Proximity(e) => e.params(),
            EffectKind::Particles(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EffectKind::Surface(e) => e.param_schema(),
            EffectKind::Proximity(e) => e.param_schema(),
            EffectKind::Particles(e) => e.param_schema(),
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        match self {
            EffectKind::Surface(e) => e.resize(viewport),
            EffectKind::Proximity(e) => e.resize(viewport),
            EffectKind::Particles(e) => e.resize(viewport),
        }
    }

    fn pointer_moved(&mut self, x: f64, y: f64) {
        match self {
            EffectKind::Surface(e) => e.pointer_moved(x, y),
            EffectKind::Proximity(e) => e.pointer_moved(x, y),
            EffectKind::Particles(e) => e.pointer_moved(x, y),
        }
    }
}
