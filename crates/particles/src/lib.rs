#![deny(unsafe_code)]
//! Ambient drifting particle cloud.
//!
//! A fixed-size set of decorative points, each drifting from a random
//! start to a random end position on its own clock, fading in and out as
//! it goes, looping forever. Per-particle phase offsets keep the set from
//! moving in lockstep. The whole cloud rotates slowly for extra depth.
//!
//! All randomness comes from an explicit seeded PRNG at construction, so
//! a seed fully determines the animation; after that the field carries no
//! random state at all.

use backdrop_core::error::BackdropError;
use backdrop_core::params::{param_f64, param_usize};
use backdrop_core::prng::Xorshift64;
use backdrop_core::{Effect, Srgb};
use glam::Vec3;
use serde_json::{json, Value};

/// Default particle count.
const DEFAULT_COUNT: usize = 2000;
/// Default half-extent of the symmetric spawn cube.
const DEFAULT_BOUNDS: f64 = 10.0;
/// Default shortest drift duration in seconds.
const DEFAULT_MIN_DURATION: f64 = 8.0;
/// Default longest drift duration in seconds.
const DEFAULT_MAX_DURATION: f64 = 12.0;
/// Default maximum phase offset in seconds.
const DEFAULT_MAX_PHASE: f64 = 5.0;

/// Per-axis rotation rates of the whole cloud in radians per second.
const ROTATION_RATES: Vec3 = Vec3::new(-0.1, -1.0 / 15.0, -0.05);

/// Tunable parameters for a [`ParticleField`].
#[derive(Debug, Clone, Copy)]
pub struct ParticleParams {
    /// Number of particles generated at construction.
    pub count: usize,
    /// Half-extent of the symmetric spawn cube around the origin.
    pub bounds: f64,
    /// Shortest drift duration in seconds.
    pub min_duration: f64,
    /// Longest drift duration in seconds.
    pub max_duration: f64,
    /// Maximum phase offset in seconds, drawn uniformly per particle.
    pub max_phase: f64,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            bounds: DEFAULT_BOUNDS,
            min_duration: DEFAULT_MIN_DURATION,
            max_duration: DEFAULT_MAX_DURATION,
            max_phase: DEFAULT_MAX_PHASE,
        }
    }
}

impl ParticleParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            count: param_usize(params, "count", DEFAULT_COUNT),
            bounds: param_f64(params, "bounds", DEFAULT_BOUNDS),
            min_duration: param_f64(params, "min_duration", DEFAULT_MIN_DURATION),
            max_duration: param_f64(params, "max_duration", DEFAULT_MAX_DURATION),
            max_phase: param_f64(params, "max_phase", DEFAULT_MAX_PHASE),
        }
    }
}

/// One looping drift path, generated once at construction.
#[derive(Debug, Clone, Copy)]
pub struct DriftParticle {
    start: Vec3,
    end: Vec3,
    phase_offset: f64,
    duration: f64,
    tint: f64,
}

/// Decorative particle cloud with independent looping drift animations.
pub struct ParticleField {
    params: ParticleParams,
    particles: Vec<DriftParticle>,
    elapsed: f64,
    rotation: Vec3,
    running: bool,
}

impl ParticleField {
    /// Generates a field inside the symmetric cube `[-bounds, bounds]^3`.
    pub fn new(params: ParticleParams, seed: u64) -> Self {
        let b = params.bounds as f32;
        Self::in_region(params, Vec3::splat(-b), Vec3::splat(b), seed)
    }

    /// Generates a field inside an explicit axis-aligned region.
    ///
    /// Used by overlay effects that scatter glow dots over the viewport
    /// instead of a world-space cube.
    pub fn in_region(params: ParticleParams, min: Vec3, max: Vec3, seed: u64) -> Self {
        let mut rng = Xorshift64::new(seed);
        let particles = (0..params.count)
            .map(|_| {
                let start = random_point(&mut rng, min, max);
                let end = random_point(&mut rng, min, max);
                let duration = rng
                    .next_range(params.min_duration, params.max_duration)
                    .max(1e-6);
                let phase_offset = rng.next_range(0.0, params.max_phase);
                let tint = rng.next_f64();
                DriftParticle {
                    start,
                    end,
                    phase_offset,
                    duration,
                    tint,
                }
            })
            .collect();
        Self {
            params,
            particles,
            elapsed: 0.0,
            rotation: Vec3::ZERO,
            running: true,
        }
    }

    /// The parameters the field was generated with.
    pub fn drift_params(&self) -> ParticleParams {
        self.params
    }

    /// Number of particles in the field.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Returns true if the field holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Elapsed animation time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Accumulated cloud rotation in radians per axis.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Normalized loop phase of particle `index` in [0, 1).
    pub fn phase(&self, index: usize) -> f64 {
        let p = &self.particles[index];
        ((self.elapsed + p.phase_offset) / p.duration).fract()
    }

    /// Current position of particle `index` along its drift path.
    pub fn position(&self, index: usize) -> Vec3 {
        let p = &self.particles[index];
        p.start.lerp(p.end, self.phase(index) as f32)
    }

    /// Current fade of particle `index`: 0 at the loop seams, 1 mid-drift.
    ///
    /// Drives both opacity and scale so particles appear, swell, and
    /// vanish instead of teleporting back to their start point.
    pub fn fade(&self, index: usize) -> f64 {
        let u = self.phase(index);
        1.0 - (2.0 * u - 1.0).abs()
    }

    /// Intrinsic tint of particle `index`: a random luminance pushed
    /// slightly toward blue, matching the cloud's cool cast.
    pub fn tint(&self, index: usize) -> Srgb {
        let t = self.particles[index].tint;
        Srgb {
            r: t,
            g: t * 0.8,
            b: (t * 1.2).min(1.0),
        }
    }
}

fn random_point(rng: &mut Xorshift64, min: Vec3, max: Vec3) -> Vec3 {
    Vec3::new(
        rng.next_range_f32(min.x, max.x),
        rng.next_range_f32(min.y, max.y),
        rng.next_range_f32(min.z, max.z),
    )
}

impl Effect for ParticleField {
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
        self.rotation += ROTATION_RATES * dt as f32;
        Ok(())
    }

    fn params(&self) -> Value {
        json!({
            "count": self.params.count,
            "bounds": self.params.bounds,
            "min_duration": self.params.min_duration,
            "max_duration": self.params.max_duration,
            "max_phase": self.params.max_phase,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "count": {
                "type": "integer",
                "default": DEFAULT_COUNT,
                "min": 0,
                "max": 10000,
                "description": "Number of particles generated at mount"
            },
            "bounds": {
                "type": "number",
                "default": DEFAULT_BOUNDS,
                "min": 0.0,
                "max": 100.0,
                "description": "Half-extent of the spawn cube"
            },
            "min_duration": {
                "type": "number",
                "default": DEFAULT_MIN_DURATION,
                "min": 0.1,
                "max": 60.0,
                "description": "Shortest drift duration in seconds"
            },
            "max_duration": {
                "type": "number",
                "default": DEFAULT_MAX_DURATION,
                "min": 0.1,
                "max": 60.0,
                "description": "Longest drift duration in seconds"
            },
            "max_phase": {
                "type": "number",
                "default": DEFAULT_MAX_PHASE,
                "min": 0.0,
                "max": 60.0,
                "description": "Maximum per-particle phase offset in seconds"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> ParticleParams {
        ParticleParams {
            count: 50,
            ..ParticleParams::default()
        }
    }

    #[test]
    fn new_generates_requested_count() {
        let field = ParticleField::new(small_params(), 42);
        assert_eq!(field.len(), 50);
    }

    #[test]
    fn zero_count_yields_empty_field() {
        let params = ParticleParams {
            count: 0,
            ..ParticleParams::default()
        };
        let mut field = ParticleField::new(params, 42);
        assert!(field.is_empty());
        field.tick(0.016).unwrap();
    }

    #[test]
    fn same_seed_produces_identical_animations() {
        let mut a = ParticleField::new(small_params(), 7);
        let mut b = ParticleField::new(small_params(), 7);
        for _ in 0..100 {
            a.tick(0.016).unwrap();
            b.tick(0.016).unwrap();
        }
        for i in 0..a.len() {
            assert_eq!(a.position(i), b.position(i), "particle {i} diverged");
            assert_eq!(a.fade(i).to_bits(), b.fade(i).to_bits());
        }
    }

    #[test]
    fn different_seeds_produce_different_clouds() {
        let a = ParticleField::new(small_params(), 1);
        let b = ParticleField::new(small_params(), 2);
        let differs = (0..a.len()).any(|i| a.position(i) != b.position(i));
        assert!(differs, "seeds 1 and 2 produced identical clouds");
    }

    #[test]
    fn positions_stay_inside_the_spawn_cube() {
        let mut field = ParticleField::new(small_params(), 42);
        let b = field.params.bounds as f32 + 1e-3;
        for _ in 0..500 {
            field.tick(0.05).unwrap();
            for i in 0..field.len() {
                let p = field.position(i);
                for c in [p.x, p.y, p.z] {
                    assert!(
                        (-b..=b).contains(&c),
                        "particle {i} escaped the cube: {p:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn fade_stays_in_unit_interval_across_loops() {
        let mut field = ParticleField::new(small_params(), 42);
        // Long enough to wrap every particle's loop several times.
        for _ in 0..2000 {
            field.tick(0.05).unwrap();
            for i in 0..field.len() {
                let f = field.fade(i);
                assert!((0.0..=1.0).contains(&f), "fade {f} out of range");
            }
        }
    }

    #[test]
    fn drift_loops_back_after_one_duration() {
        let params = ParticleParams {
            count: 1,
            max_phase: 0.0,
            min_duration: 2.0,
            max_duration: 2.0,
            ..ParticleParams::default()
        };
        let mut field = ParticleField::new(params, 9);
        let start = field.position(0);
        // Advance exactly one loop; 0.5 is exact in binary, so four ticks
        // land the clock on the loop seam with no rounding drift.
        for _ in 0..4 {
            field.tick(0.5).unwrap();
        }
        let after = field.position(0);
        assert!(
            (after - start).length() < 1e-3,
            "particle did not return to its start: {start:?} -> {after:?}"
        );
    }

    #[test]
    fn phase_offsets_desynchronize_particles() {
        let field = ParticleField::new(small_params(), 42);
        let first = field.phase(0);
        let any_different = (1..field.len()).any(|i| (field.phase(i) - first).abs() > 1e-6);
        assert!(any_different, "all particles share the same phase");
    }

    #[test]
    fn stop_freezes_drift_and_rotation() {
        let mut field = ParticleField::new(small_params(), 42);
        field.tick(0.5).unwrap();
        let pos = field.position(0);
        let rot = field.rotation();

        field.stop();
        field.tick(0.5).unwrap();
        assert_eq!(field.position(0), pos);
        assert_eq!(field.rotation(), rot);

        field.start();
        field.tick(0.5).unwrap();
        assert_ne!(field.position(0), pos);
    }

    #[test]
    fn cloud_rotation_accumulates_with_time() {
        let mut field = ParticleField::new(small_params(), 42);
        assert_eq!(field.rotation(), Vec3::ZERO);
        for _ in 0..60 {
            field.tick(1.0 / 60.0).unwrap();
        }
        let r = field.rotation();
        assert!((r.x - -0.1).abs() < 1e-4, "x rotation after 1s: {}", r.x);
        assert!(r.y < 0.0 && r.z < 0.0);
    }

    #[test]
    fn tint_components_stay_in_gamut() {
        let field = ParticleField::new(small_params(), 42);
        for i in 0..field.len() {
            let c = field.tint(i);
            for comp in [c.r, c.g, c.b] {
                assert!((0.0..=1.0).contains(&comp), "tint component {comp}");
            }
        }
    }

    #[test]
    fn in_region_respects_explicit_bounds() {
        let params = ParticleParams {
            count: 30,
            ..ParticleParams::default()
        };
        let field =
            ParticleField::in_region(params, Vec3::ZERO, Vec3::new(800.0, 600.0, 0.0), 42);
        for i in 0..field.len() {
            let p = field.position(i);
            assert!((0.0..=800.0).contains(&p.x));
            assert!((0.0..=600.0).contains(&p.y));
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn params_round_trip_through_json() {
        let field = ParticleField::new(small_params(), 42);
        let json = field.params();
        let restored = ParticleParams::from_json(&json);
        assert_eq!(restored.count, 50);
        assert_eq!(restored.bounds, field.params.bounds);
    }

    #[test]
    fn param_schema_documents_every_param() {
        let field = ParticleField::new(small_params(), 42);
        let schema = field.param_schema();
        for key in ["count", "bounds", "min_duration", "max_duration", "max_phase"] {
            assert!(schema.get(key).is_some(), "schema missing {key}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fade_and_phase_stay_normalized_for_any_seed(
                seed: u64,
                elapsed in 0.0_f64..1000.0,
            ) {
                let params = ParticleParams {
                    count: 10,
                    ..ParticleParams::default()
                };
                let mut field = ParticleField::new(params, seed);
                field.tick(elapsed).unwrap();
                for i in 0..field.len() {
                    let u = field.phase(i);
                    prop_assert!((0.0..1.0).contains(&u), "phase {u} for seed {seed}");
                    let f = field.fade(i);
                    prop_assert!((0.0..=1.0).contains(&f), "fade {f} for seed {seed}");
                }
            }
        }
    }
}
