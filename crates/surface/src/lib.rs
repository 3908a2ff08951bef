#![deny(unsafe_code)]
//! Noise-displaced animated point surface.
//!
//! A fixed lattice of points reads two octaves of drifting gradient noise
//! every frame: the blended height lifts each point's y component in
//! place, shades it through a three-stop gradient, and sizes it by
//! distance from the camera eye. Planar coordinates and buffer layout
//! never change after construction, so the per-frame work is pure
//! recomputation over preallocated storage.

use backdrop_core::error::BackdropError;
use backdrop_core::params::{param_f64, param_usize};
use backdrop_core::{Effect, HeightGradient, NoiseField, PointLattice, Srgb};
use glam::Vec3;
use serde_json::{json, Value};

/// Default lattice rows.
const DEFAULT_ROWS: usize = 180;
/// Default lattice columns.
const DEFAULT_COLS: usize = 180;
/// Default spacing between lattice points.
const DEFAULT_SPACING: f64 = 0.08;
/// Default displacement amplitude applied to the blended noise height.
const DEFAULT_AMPLITUDE: f64 = 0.6;
/// Default noise drift speed in field units per second.
const DEFAULT_SPEED: f64 = 0.25;
/// Default noise frequency scale.
const DEFAULT_SCALE: f64 = 1.8;
/// Default numerator of the perspective size attenuation.
const DEFAULT_SIZE_SCALE: f64 = 12.0;
/// Default smallest rendered point size.
const DEFAULT_MIN_POINT_SIZE: f64 = 1.5;
/// Default largest rendered point size.
const DEFAULT_MAX_POINT_SIZE: f64 = 6.0;

/// Camera eye the point sizes attenuate against. Matches the host page's
/// fixed camera hovering above and in front of the sheet.
const CAMERA_EYE: Vec3 = Vec3::new(0.0, 3.2, 4.6);

/// Tunable parameters for a [`SurfaceRenderer`].
#[derive(Debug, Clone, Copy)]
pub struct SurfaceParams {
    /// Lattice rows. Zero renders nothing.
    pub rows: usize,
    /// Lattice columns. Zero renders nothing.
    pub cols: usize,
    /// Spacing between adjacent lattice points.
    pub spacing: f64,
    /// Displacement amplitude applied to the blended noise height.
    pub amplitude: f64,
    /// Noise drift speed.
    pub speed: f64,
    /// Noise frequency scale.
    pub scale: f64,
    /// Numerator of the perspective size attenuation.
    pub size_scale: f64,
    /// Smallest rendered point size.
    pub min_point_size: f64,
    /// Largest rendered point size.
    pub max_point_size: f64,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            spacing: DEFAULT_SPACING,
            amplitude: DEFAULT_AMPLITUDE,
            speed: DEFAULT_SPEED,
            scale: DEFAULT_SCALE,
            size_scale: DEFAULT_SIZE_SCALE,
            min_point_size: DEFAULT_MIN_POINT_SIZE,
            max_point_size: DEFAULT_MAX_POINT_SIZE,
        }
    }
}

impl SurfaceParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            rows: param_usize(params, "rows", DEFAULT_ROWS),
            cols: param_usize(params, "cols", DEFAULT_COLS),
            spacing: param_f64(params, "spacing", DEFAULT_SPACING),
            amplitude: param_f64(params, "amplitude", DEFAULT_AMPLITUDE),
            speed: param_f64(params, "speed", DEFAULT_SPEED),
            scale: param_f64(params, "scale", DEFAULT_SCALE),
            size_scale: param_f64(params, "size_scale", DEFAULT_SIZE_SCALE),
            min_point_size: param_f64(params, "min_point_size", DEFAULT_MIN_POINT_SIZE),
            max_point_size: param_f64(params, "max_point_size", DEFAULT_MAX_POINT_SIZE),
        }
    }
}

/// Animated surface of noise-displaced points.
///
/// The lattice, color, and size buffers share index order for the
/// renderer's lifetime; every tick rewrites heights, colors, and sizes in
/// place without reallocating.
pub struct SurfaceRenderer {
    params: SurfaceParams,
    noise: NoiseField,
    gradient: HeightGradient,
    lattice: PointLattice,
    colors: Vec<Srgb>,
    sizes: Vec<f32>,
    elapsed: f64,
    running: bool,
}

impl SurfaceRenderer {
    /// Builds the lattice and derived buffers; the noise field is seeded
    /// from the low 32 bits of `seed`.
    pub fn new(params: SurfaceParams, seed: u64) -> Self {
        let lattice = PointLattice::generate(params.rows, params.cols, params.spacing as f32);
        let count = lattice.len();
        let mut renderer = Self {
            params,
            noise: NoiseField::new(seed as u32),
            gradient: HeightGradient::emerald(),
            lattice,
            colors: vec![
                Srgb {
                    r: 0.0,
                    g: 0.0,
                    b: 0.0
                };
                count
            ],
            sizes: vec![0.0; count],
            elapsed: 0.0,
            running: true,
        };
        renderer.refresh();
        renderer
    }

    /// Builds a renderer from a JSON params object.
    pub fn from_json(json_params: &Value, seed: u64) -> Self {
        Self::new(SurfaceParams::from_json(json_params), seed)
    }

    /// Replaces the effect-intrinsic gradient.
    pub fn set_gradient(&mut self, gradient: HeightGradient) {
        self.gradient = gradient;
        self.refresh();
    }

    /// The displaced point lattice for the current frame.
    pub fn lattice(&self) -> &PointLattice {
        &self.lattice
    }

    /// Per-point colors, index-aligned with the lattice.
    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// Per-point sizes, index-aligned with the lattice.
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Elapsed animation time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// The camera eye the sizes attenuate against.
    pub fn camera_eye(&self) -> Vec3 {
        CAMERA_EYE
    }

    /// Recomputes heights, colors, and sizes for the current clock.
    fn refresh(&mut self) {
        let p = self.params;
        let t = self.elapsed;
        for i in 0..self.lattice.len() {
            let (x, z) = self.lattice.planar(i);
            let raw = self
                .noise
                .height(f64::from(x), f64::from(z), t, p.scale, p.speed);
            self.lattice.set_height(i, (raw * p.amplitude) as f32);

            // Color tracks the raw height, not the amplified one, so the
            // gradient spans the same range at any amplitude.
            let mix = (raw * 0.5 + 0.5).clamp(0.0, 1.0);
            self.colors[i] = self.gradient.shade(mix);

            let point = Vec3::new(x, self.lattice.height(i), z);
            let dist = f64::from(point.distance(CAMERA_EYE));
            self.sizes[i] =
                (p.size_scale / dist.max(1e-6)).clamp(p.min_point_size, p.max_point_size) as f32;
        }
    }
}

impl Effect for SurfaceRenderer {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn tick(&mut self, dt: f64) -> Result<(), BackdropError> {
        if !self.running {
            return Ok(());
        }
        self.elapsed += dt;
        self.refresh();
        Ok(())
    }

    fn params(&self) -> Value {
        json!({
            "rows": self.params.rows,
            "cols": self.params.cols,
            "spacing": self.params.spacing,
            "amplitude": self.params.amplitude,
            "speed": self.params.speed,
            "scale": self.params.scale,
            "size_scale": self.params.size_scale,
            "min_point_size": self.params.min_point_size,
            "max_point_size": self.params.max_point_size,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "rows": {
                "type": "integer",
                "default": DEFAULT_ROWS,
                "min": 0,
                "max": 512,
                "description": "Lattice rows"
            },
            "cols": {
                "type": "integer",
                "default": DEFAULT_COLS,
                "min": 0,
                "max": 512,
                "description": "Lattice columns"
            },
            "spacing": {
                "type": "number",
                "default": DEFAULT_SPACING,
                "min": 0.001,
                "max": 10.0,
                "description": "Spacing between adjacent lattice points"
            },
            "amplitude": {
                "type": "number",
                "default": DEFAULT_AMPLITUDE,
                "min": 0.0,
                "max": 5.0,
                "description": "Displacement amplitude"
            },
            "speed": {
                "type": "number",
                "default": DEFAULT_SPEED,
                "min": 0.0,
                "max": 5.0,
                "description": "Noise drift speed"
            },
            "scale": {
                "type": "number",
                "default": DEFAULT_SCALE,
                "min": 0.01,
                "max": 20.0,
                "description": "Noise frequency scale"
            },
            "size_scale": {
                "type": "number",
                "default": DEFAULT_SIZE_SCALE,
                "min": 0.1,
                "max": 100.0,
                "description": "Numerator of the perspective size attenuation"
            },
            "min_point_size": {
                "type": "number",
                "default": DEFAULT_MIN_POINT_SIZE,
                "min": 0.1,
                "max": 64.0,
                "description": "Smallest rendered point size"
            },
            "max_point_size": {
                "type": "number",
                "default": DEFAULT_MAX_POINT_SIZE,
                "min": 0.1,
                "max": 64.0,
                "description": "Largest rendered point size"
            }
        })
    }
}
