#![deny(unsafe_code)]
//! Pointer-reactive tile grid.
//!
//! The viewport is covered by fixed-size tiles; on every pointer move each
//! tile measures its center's distance to the pointer and flips between
//! `Far` and `Near` around a threshold. Visual scale and opacity ease
//! toward the state's targets over a short duration rather than snapping
//! or springing, so rapid pointer movement retargets transitions without
//! oscillation. Tile geometry is recomputed only on resize.
//!
//! An independent set of glow dots drifts across the viewport on looping
//! paths, unaffected by the pointer.

use backdrop_core::error::BackdropError;
use backdrop_core::params::{param_f64, param_usize};
use backdrop_core::{Easing, Effect, Srgb, Theme, Viewport};
use backdrop_particles::{ParticleField, ParticleParams};
use glam::Vec3;
use serde_json::{json, Value};

/// Default tile edge length in viewport units.
const DEFAULT_TILE_SIZE: f64 = 50.0;
/// Default distance below which a tile counts as near the pointer.
const DEFAULT_NEAR_THRESHOLD: f64 = 100.0;
/// Default transition duration in seconds.
const DEFAULT_TRANSITION_DURATION: f64 = 0.3;
/// Default scale of a far tile.
const DEFAULT_FAR_SCALE: f64 = 1.0;
/// Default scale of a near tile.
const DEFAULT_NEAR_SCALE: f64 = 1.05;
/// Default opacity of a far tile.
const DEFAULT_FAR_OPACITY: f64 = 0.3;
/// Default opacity of a near tile.
const DEFAULT_NEAR_OPACITY: f64 = 0.8;
/// Default number of drifting glow dots.
const DEFAULT_GLOW_COUNT: usize = 20;

/// Tunable parameters for a [`ProximityGrid`].
///
/// The threshold and duration defaults match the host page's original
/// values but are plain configuration, not constants.
#[derive(Debug, Clone, Copy)]
pub struct ProximityParams {
    /// Tile edge length in viewport units.
    pub tile_size: f64,
    /// Distance below which a tile transitions to `Near`.
    pub near_threshold: f64,
    /// Seconds a scale/opacity transition takes to settle.
    pub transition_duration: f64,
    /// Scale target while far.
    pub far_scale: f64,
    /// Scale target while near.
    pub near_scale: f64,
    /// Opacity target while far.
    pub far_opacity: f64,
    /// Opacity target while near.
    pub near_opacity: f64,
    /// Number of drifting glow dots scattered over the viewport.
    pub glow_count: usize,
}

impl Default for ProximityParams {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            near_threshold: DEFAULT_NEAR_THRESHOLD,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            far_scale: DEFAULT_FAR_SCALE,
            near_scale: DEFAULT_NEAR_SCALE,
            far_opacity: DEFAULT_FAR_OPACITY,
            near_opacity: DEFAULT_NEAR_OPACITY,
            glow_count: DEFAULT_GLOW_COUNT,
        }
    }
}

impl ProximityParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            tile_size: param_f64(params, "tile_size", DEFAULT_TILE_SIZE),
            near_threshold: param_f64(params, "near_threshold", DEFAULT_NEAR_THRESHOLD),
            transition_duration: param_f64(
                params,
                "transition_duration",
                DEFAULT_TRANSITION_DURATION,
            ),
            far_scale: param_f64(params, "far_scale", DEFAULT_FAR_SCALE),
            near_scale: param_f64(params, "near_scale", DEFAULT_NEAR_SCALE),
            far_opacity: param_f64(params, "far_opacity", DEFAULT_FAR_OPACITY),
            near_opacity: param_f64(params, "near_opacity", DEFAULT_NEAR_OPACITY),
            glow_count: param_usize(params, "glow_count", DEFAULT_GLOW_COUNT),
        }
    }
}

/// Proximity state of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    Far,
    Near,
}

/// Scalar easing toward a target over a normalized progress clock.
///
/// Retargeting mid-flight restarts the ramp from the current value, so a
/// stream of pointer events can never make the output jump.
#[derive(Debug, Clone, Copy)]
struct AnimatedScalar {
    from: f64,
    to: f64,
    progress: f64,
}

impl AnimatedScalar {
    fn settled(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            progress: 1.0,
        }
    }

    fn retarget(&mut self, target: f64, easing: Easing) {
        if target != self.to {
            self.from = self.value(easing);
            self.to = target;
            self.progress = 0.0;
        }
    }

    fn advance(&mut self, dt: f64, duration: f64) {
        if duration <= 0.0 {
            self.progress = 1.0;
        } else {
            self.progress = (self.progress + dt / duration).min(1.0);
        }
    }

    fn value(&self, easing: Easing) -> f64 {
        self.from + easing.apply(self.progress) * (self.to - self.from)
    }
}

/// One cell of the grid overlay.
#[derive(Debug, Clone, Copy)]
pub struct ProximityTile {
    origin_x: f64,
    origin_y: f64,
    size: f64,
    state: TileState,
    distance: f64,
    scale: AnimatedScalar,
    opacity: AnimatedScalar,
}

impl ProximityTile {
    /// Top-left corner in viewport coordinates.
    pub fn origin(&self) -> (f64, f64) {
        (self.origin_x, self.origin_y)
    }

    /// Tile edge length.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Tile center in viewport coordinates.
    pub fn center(&self) -> (f64, f64) {
        (
            self.origin_x + self.size * 0.5,
            self.origin_y + self.size * 0.5,
        )
    }

    /// Current proximity state.
    pub fn state(&self) -> TileState {
        self.state
    }

    /// Distance from the tile center to the last pointer position.
    pub fn distance_to_pointer(&self) -> f64 {
        self.distance
    }
}

/// Pointer-reactive tile grid with drifting glow dots.
pub struct ProximityGrid {
    params: ProximityParams,
    easing: Easing,
    viewport: Viewport,
    pointer: (f64, f64),
    cols: usize,
    rows: usize,
    tiles: Vec<ProximityTile>,
    glow: ParticleField,
    glow_color: Srgb,
    seed: u64,
    running: bool,
}

impl ProximityGrid {
    /// Lays out the grid for `viewport` and scatters the glow dots.
    ///
    /// The glow color comes from the host theme; tile geometry is derived
    /// from the viewport and stays fixed until the next resize. A
    /// degenerate viewport yields an empty grid.
    pub fn new(params: ProximityParams, viewport: Viewport, seed: u64, theme: &Theme) -> Self {
        let mut grid = Self {
            params,
            easing: Easing::default(),
            viewport,
            pointer: (0.0, 0.0),
            cols: 0,
            rows: 0,
            tiles: Vec::new(),
            glow: build_glow(params, viewport, seed),
            glow_color: theme.primary,
            seed,
            running: true,
        };
        grid.rebuild();
        grid
    }

    /// Builds a grid from a JSON params object.
    pub fn from_json(
        json_params: &Value,
        viewport: Viewport,
        seed: u64,
        theme: &Theme,
    ) -> Self {
        Self::new(ProximityParams::from_json(json_params), viewport, seed, theme)
    }

    /// Tiles in row-major order.
    pub fn tiles(&self) -> &[ProximityTile] {
        &self.tiles
    }

    /// Grid columns for the current viewport.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Grid rows for the current viewport.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Last pointer position, `(0, 0)` before the first event.
    pub fn pointer(&self) -> (f64, f64) {
        self.pointer
    }

    /// The drifting glow-dot field.
    pub fn glow(&self) -> &ParticleField {
        &self.glow
    }

    /// Theme-supplied color of the glow dots and tile accents.
    pub fn glow_color(&self) -> Srgb {
        self.glow_color
    }

    /// Current eased scale of tile `index`.
    pub fn tile_scale(&self, index: usize) -> f64 {
        self.tiles[index].scale.value(self.easing)
    }

    /// Current eased opacity of tile `index`.
    pub fn tile_opacity(&self, index: usize) -> f64 {
        self.tiles[index].opacity.value(self.easing)
    }

    /// Recomputes tile geometry for the current viewport.
    ///
    /// Visual state restarts settled at the far targets; the glow field is
    /// rescattered over the new viewport from the stored seed.
    fn rebuild(&mut self) {
        let p = self.params;
        if self.viewport.is_degenerate() || p.tile_size <= 0.0 {
            self.cols = 0;
            self.rows = 0;
            self.tiles.clear();
        } else {
            self.cols = (self.viewport.width / p.tile_size).ceil() as usize;
            self.rows = (self.viewport.height / p.tile_size).ceil() as usize;
            self.tiles = (0..self.rows * self.cols)
                .map(|index| {
                    let col = index % self.cols;
                    let row = index / self.cols;
                    ProximityTile {
                        origin_x: col as f64 * p.tile_size,
                        origin_y: row as f64 * p.tile_size,
                        size: p.tile_size,
                        state: TileState::Far,
                        distance: f64::INFINITY,
                        scale: AnimatedScalar::settled(p.far_scale),
                        opacity: AnimatedScalar::settled(p.far_opacity),
                    }
                })
                .collect();
            self.retarget_tiles();
        }
        self.glow = build_glow(p, self.viewport, self.seed);
    }

    /// Re-derives distance, state, and animation targets for every tile
    /// from the current pointer. O(tile count).
    fn retarget_tiles(&mut self) {
        let (px, py) = self.pointer;
        let p = self.params;
        let easing = self.easing;
        for tile in &mut self.tiles {
            let (cx, cy) = tile.center();
            let (dx, dy) = (px - cx, py - cy);
            tile.distance = (dx * dx + dy * dy).sqrt();
            tile.state = if tile.distance < p.near_threshold {
                TileState::Near
            } else {
                TileState::Far
            };
            let (scale, opacity) = match tile.state {
                TileState::Near => (p.near_scale, p.near_opacity),
                TileState::Far => (p.far_scale, p.far_opacity),
            };
            tile.scale.retarget(scale, easing);
            tile.opacity.retarget(opacity, easing);
        }
    }
}

fn build_glow(params: ProximityParams, viewport: Viewport, seed: u64) -> ParticleField {
    let glow_params = ParticleParams {
        count: if viewport.is_degenerate() {
            0
        } else {
            params.glow_count
        },
        ..ParticleParams::default()
    };
    ParticleField::in_region(
        glow_params,
        Vec3::ZERO,
        Vec3::new(viewport.width as f32, viewport.height as f32, 0.0),
        seed,
    )
}

impl Effect for ProximityGrid {
    fn start(&mut self) {
        self.running = true;
        self.glow.start();
    }

    fn stop(&mut self) {
        self.running = false;
        self.glow.stop();
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn tick(&mut self, dt: f64) -> Result<(), BackdropError> {
        if !self.running {
            return Ok(());
        }
        let duration = self.params.transition_duration;
        for tile in &mut self.tiles {
            tile.scale.advance(dt, duration);
            tile.opacity.advance(dt, duration);
        }
        self.glow.tick(dt)
    }

    fn params(&self) -> Value {
        json!({
            "tile_size": self.params.tile_size,
            "near_threshold": self.params.near_threshold,
            "transition_duration": self.params.transition_duration,
            "far_scale": self.params.far_scale,
            "near_scale": self.params.near_scale,
            "far_opacity": self.params.far_opacity,
            "near_opacity": self.params.near_opacity,
            "glow_count": self.params.glow_count,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "tile_size": {
                "type": "number",
                "default": DEFAULT_TILE_SIZE,
                "min": 1.0,
                "max": 1000.0,
                "description": "Tile edge length in viewport units"
            },
            "near_threshold": {
                "type": "number",
                "default": DEFAULT_NEAR_THRESHOLD,
                "min": 0.0,
                "max": 10000.0,
                "description": "Distance below which a tile counts as near"
            },
            "transition_duration": {
                "type": "number",
                "default": DEFAULT_TRANSITION_DURATION,
                "min": 0.0,
                "max": 10.0,
                "description": "Seconds a scale/opacity transition takes"
            },
            "far_scale": {
                "type": "number",
                "default": DEFAULT_FAR_SCALE,
                "min": 0.0,
                "max": 4.0,
                "description": "Scale target while far"
            },
            "near_scale": {
                "type": "number",
                "default": DEFAULT_NEAR_SCALE,
                "min": 0.0,
                "max": 4.0,
                "description": "Scale target while near"
            },
            "far_opacity": {
                "type": "number",
                "default": DEFAULT_FAR_OPACITY,
                "min": 0.0,
                "max": 1.0,
                "description": "Opacity target while far"
            },
            "near_opacity": {
                "type": "number",
                "default": DEFAULT_NEAR_OPACITY,
                "min": 0.0,
                "max": 1.0,
                "description": "Opacity target while near"
            },
            "glow_count": {
                "type": "integer",
                "default": DEFAULT_GLOW_COUNT,
                "min": 0,
                "max": 500,
                "description": "Number of drifting glow dots"
            }
        })
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.rebuild();
    }

    fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer = (x, y);
        self.retarget_tiles();
    }
}
