//! GPU context wrapper with capability detection.
//!
//! `GpuContext` wraps a `glow::Context` and probes the aliased point-size
//! range at initialization. The point-field pipeline draws `gl.POINTS`
//! whose size is set per vertex, so a context that cannot rasterize
//! points at all is unusable and must be reported before any frame runs.

use crate::error::BackdropError;

/// Wraps a `glow::Context` with the detected point-size capability.
///
/// Created once at initialization. A context reporting a zero maximum
/// point size cannot draw the effect; anything else works, with sizes
/// clamped into the supported range.
pub struct GpuContext {
    gl: glow::Context,
    point_size_range: (f32, f32),
}

impl GpuContext {
    /// Creates a new `GpuContext` by wrapping the given GL context and
    /// querying the aliased point-size range.
    ///
    /// # Errors
    ///
    /// Returns `BackdropError::ContextUnavailable` if the context reports
    /// a degenerate (zero) maximum point size.
    #[allow(unsafe_code)]
    pub fn new(gl: glow::Context) -> Result<Self, BackdropError> {
        use glow::HasContext;

        let mut range = [0.0_f32; 2];
        // SAFETY: glow wraps raw GL calls as unsafe. ALIASED_POINT_SIZE_RANGE
        // is a valid two-component float query on every GL / GLES profile.
        unsafe { gl.get_parameter_f32_slice(glow::ALIASED_POINT_SIZE_RANGE, &mut range) };

        if range[1] <= 0.0 {
            return Err(BackdropError::ContextUnavailable(
                "context reports a zero point-size range".to_string(),
            ));
        }

        Ok(Self {
            gl,
            point_size_range: (range[0], range[1]),
        })
    }

    /// Returns a reference to the underlying `glow::Context`.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Consumes this wrapper and returns the underlying `glow::Context`.
    pub fn into_gl(self) -> glow::Context {
        self.gl
    }

    /// The `(min, max)` point sizes the context can rasterize.
    pub fn point_size_range(&self) -> (f32, f32) {
        self.point_size_range
    }

    /// Clamps a requested point size into the supported range.
    pub fn clamp_point_size(&self, size: f32) -> f32 {
        size.clamp(self.point_size_range.0, self.point_size_range.1)
    }
}
