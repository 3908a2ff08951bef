//! OpenGL ES 3.0 rendering infrastructure for the point-field pipeline.
//!
//! This module is only available when the `render` feature is enabled.
//! It provides GPU context initialization with capability detection,
//! shader compilation and linking, and the displaced point-field program.
//!
//! # Module overview
//!
//! - [`context`] -- GPU context wrapper with point-size capability probe.
//! - [`shader`] -- Shader compilation, linking, and error formatting.
//! - [`points`] -- GLSL sources and uniform cache for the point field.
//!
//! Everything here degrades rather than crashes: construction errors
//! surface as [`BackdropError`](crate::error::BackdropError) values the
//! host contains behind a [`Boundary`](crate::boundary::Boundary).

pub mod context;
pub mod points;
pub mod shader;

pub use context::GpuContext;
pub use points::{PointPipeline, POINT_FIELD_FRAGMENT_SHADER, POINT_FIELD_VERTEX_SHADER};
pub use shader::{compile_program, compile_shader, format_shader_error, link_program};
