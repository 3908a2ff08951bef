#![deny(unsafe_code)]
//! Core types and traits for the backdrop-engine animated background system.
//!
//! Provides the `Effect` trait and `Stage` scheduler, the `NoiseField`
//! procedural generator, `PointLattice` geometry, color types (`Srgb`,
//! `OkLab`, `OkLch`), `HeightGradient`, `Theme`, `Easing`, `Xorshift64`
//! PRNG, `Recipe`, `Boundary` failure isolation, and parameter helpers.

pub mod boundary;
pub mod color;
pub mod easing;
pub mod effect;
pub mod error;
pub mod gradient;
pub mod lattice;
pub mod noise;
pub mod params;
pub mod prng;
pub mod recipe;
pub mod stage;
pub mod theme;

#[cfg(feature = "render")]
pub mod render;

pub use boundary::Boundary;
pub use color::{LinearRgb, OkLab, OkLch, Srgb};
pub use easing::Easing;
pub use effect::{Effect, Viewport};
pub use error::BackdropError;
pub use gradient::HeightGradient;
pub use lattice::PointLattice;
pub use noise::NoiseField;
pub use prng::Xorshift64;
pub use recipe::Recipe;
pub use stage::{LayerId, Stage};
pub use theme::Theme;
