//! Pure-computation RGBA rasterization of effect frames.
//!
//! This module is always available (no feature gate) so that the `png`
//! snapshot path and any host-side preview can share the same conversion.
//! Everything here is CPU math over the effects' public buffers; the GPU
//! path renders the same state through the `render` feature of
//! `backdrop-core` instead.

use crate::EffectKind;
use backdrop_core::{Srgb, Theme};
use backdrop_particles::ParticleField;
use backdrop_proximity::ProximityGrid;
use backdrop_surface::SurfaceRenderer;
use glam::{EulerRot, Mat3, Mat4, Vec3};

/// Vertical field of view of the snapshot camera, in radians.
const FOV_Y: f32 = 0.872; // 50 degrees
/// Near/far planes of the snapshot camera.
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;
/// Opacity of surface points; the GPU path gets this from the soft rim.
const SURFACE_ALPHA: f64 = 0.9;
/// Base radius of a glow dot in pixels.
const GLOW_RADIUS: f64 = 2.0;

/// Rasterizes any effect over the theme background.
///
/// The buffer length is `width * height * 4`; zero dimensions yield an
/// empty buffer.
pub fn effect_to_rgba(effect: &EffectKind, theme: &Theme, width: usize, height: usize) -> Vec<u8> {
    match effect {
        EffectKind::Surface(e) => surface_to_rgba(e, theme.background, width, height),
        EffectKind::Proximity(e) => proximity_to_rgba(e, theme.background, width, height),
        EffectKind::Particles(e) => particles_to_rgba(e, theme.background, width, height),
    }
}

/// Projects the displaced lattice through a fixed perspective camera and
/// splats one disc per point, sized by the renderer's attenuation.
pub fn surface_to_rgba(
    surface: &SurfaceRenderer,
    background: Srgb,
    width: usize,
    height: usize,
) -> Vec<u8> {
    let mut buf = solid_background(background, width, height);
    if buf.is_empty() {
        return buf;
    }

    let view = Mat4::look_at_rh(surface.camera_eye(), Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh(FOV_Y, width as f32 / height as f32, Z_NEAR, Z_FAR);
    let view_proj = proj * view;

    let lattice = surface.lattice();
    for i in 0..lattice.len() {
        let (x, z) = lattice.planar(i);
        let point = Vec3::new(x, lattice.height(i), z);
        if let Some((sx, sy)) = project(point, &view_proj, width, height) {
            let radius = f64::from(surface.sizes()[i]) * 0.5;
            splat_disc(&mut buf, width, height, sx, sy, radius, surface.colors()[i], SURFACE_ALPHA);
        }
    }
    buf
}

/// Draws each tile's eased outline and fill, then the glow dots on top.
pub fn proximity_to_rgba(
    grid: &ProximityGrid,
    background: Srgb,
    width: usize,
    height: usize,
) -> Vec<u8> {
    let mut buf = solid_background(background, width, height);
    if buf.is_empty() {
        return buf;
    }

    let accent = grid.glow_color();
    for (i, tile) in grid.tiles().iter().enumerate() {
        let (cx, cy) = tile.center();
        let half = tile.size() * grid.tile_scale(i) * 0.5;
        let opacity = grid.tile_opacity(i);
        fill_rect(
            &mut buf,
            width,
            height,
            cx - half,
            cy - half,
            cx + half,
            cy + half,
            accent,
            opacity * 0.12,
        );
        stroke_rect(
            &mut buf,
            width,
            height,
            cx - half,
            cy - half,
            cx + half,
            cy + half,
            accent,
            opacity,
        );
    }

    let glow = grid.glow();
    for i in 0..glow.len() {
        let fade = glow.fade(i);
        let pos = glow.position(i);
        splat_disc(
            &mut buf,
            width,
            height,
            f64::from(pos.x),
            f64::from(pos.y),
            GLOW_RADIUS * fade,
            accent,
            fade,
        );
    }
    buf
}

/// Applies the cloud rotation, projects each particle from a camera pulled
/// back past the spawn cube, and splats a faded disc per particle.
pub fn particles_to_rgba(
    field: &ParticleField,
    background: Srgb,
    width: usize,
    height: usize,
) -> Vec<u8> {
    let mut buf = solid_background(background, width, height);
    if buf.is_empty() {
        return buf;
    }

    let bounds = field.drift_params().bounds as f32;
    let r = field.rotation();
    let rotation = Mat3::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
    let eye = Vec3::new(0.0, 0.0, bounds * 2.2 + 1.0);
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh(FOV_Y, width as f32 / height as f32, Z_NEAR, Z_FAR);
    let view_proj = proj * view;

    for i in 0..field.len() {
        let point = rotation * field.position(i);
        if let Some((sx, sy)) = project(point, &view_proj, width, height) {
            let fade = field.fade(i);
            splat_disc(
                &mut buf,
                width,
                height,
                sx,
                sy,
                1.0 + fade,
                field.tint(i),
                fade,
            );
        }
    }
    buf
}

/// Allocates an opaque buffer filled with the background color.
///
/// Zero dimensions yield an empty buffer.
pub fn solid_background(background: Srgb, width: usize, height: usize) -> Vec<u8> {
    let [r, g, b] = background.to_bytes();
    let mut buf = Vec::new();
    buf.resize(width * height * 4, 0);
    for px in buf.chunks_exact_mut(4) {
        px.copy_from_slice(&[r, g, b, 255]);
    }
    buf
}

/// Perspective projection into pixel coordinates.
///
/// Returns `None` for points behind the camera.
fn project(point: Vec3, view_proj: &Mat4, width: usize, height: usize) -> Option<(f64, f64)> {
    let clip = *view_proj * point.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    Some((
        f64::from((ndc_x + 1.0) * 0.5) * width as f64,
        f64::from((1.0 - ndc_y) * 0.5) * height as f64,
    ))
}

/// Alpha-blends one pixel over the buffer. Out-of-bounds writes are
/// silently dropped.
fn blend_pixel(buf: &mut [u8], width: usize, height: usize, x: i64, y: i64, color: [u8; 3], alpha: f64) {
    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
        return;
    }
    let alpha = alpha.clamp(0.0, 1.0);
    let idx = (y as usize * width + x as usize) * 4;
    for c in 0..3 {
        let dst = f64::from(buf[idx + c]);
        let src = f64::from(color[c]);
        buf[idx + c] = (src * alpha + dst * (1.0 - alpha)).round() as u8;
    }
    // The canvas is opaque; alpha stays 255.
}

/// Splats a soft-edged disc centered at `(cx, cy)`.
fn splat_disc(
    buf: &mut [u8],
    width: usize,
    height: usize,
    cx: f64,
    cy: f64,
    radius: f64,
    color: Srgb,
    alpha: f64,
) {
    if radius <= 0.0 {
        return;
    }
    let bytes = color.to_bytes();
    let r_ceil = radius.ceil() as i64;
    let (icx, icy) = (cx.round() as i64, cy.round() as i64);
    for dy in -r_ceil..=r_ceil {
        for dx in -r_ceil..=r_ceil {
            let dist = ((dx * dx + dy * dy) as f64).sqrt();
            if dist > radius {
                continue;
            }
            // Fade the outer pixel ring so discs read as dots, not squares.
            let edge = (radius - dist).min(1.0);
            blend_pixel(buf, width, height, icx + dx, icy + dy, bytes, alpha * edge);
        }
    }
}

/// Fills an axis-aligned rect given in float viewport coordinates.
fn fill_rect(
    buf: &mut [u8],
    width: usize,
    height: usize,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    color: Srgb,
    alpha: f64,
) {
    let bytes = color.to_bytes();
    for y in y0.floor() as i64..y1.ceil() as i64 {
        for x in x0.floor() as i64..x1.ceil() as i64 {
            blend_pixel(buf, width, height, x, y, bytes, alpha);
        }
    }
}

/// Strokes a 1px axis-aligned rect outline.
fn stroke_rect(
    buf: &mut [u8],
    width: usize,
    height: usize,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    color: Srgb,
    alpha: f64,
) {
    let bytes = color.to_bytes();
    let (ix0, iy0) = (x0.round() as i64, y0.round() as i64);
    let (ix1, iy1) = (x1.round() as i64, y1.round() as i64);
    for x in ix0..=ix1 {
        blend_pixel(buf, width, height, x, iy0, bytes, alpha);
        blend_pixel(buf, width, height, x, iy1, bytes, alpha);
    }
    for y in iy0..=iy1 {
        blend_pixel(buf, width, height, ix0, y, bytes, alpha);
        blend_pixel(buf, width, height, ix1, y, bytes, alpha);
    }
}
