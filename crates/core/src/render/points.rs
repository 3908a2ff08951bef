//! The displaced point-field shader program.
//!
//! Displacement runs on the GPU: the vertex stage samples two octaves of
//! simplex noise at the point's planar coordinates offset by time, lifts
//! the point by the blended height, and sizes it by view-space depth.
//! The fragment stage shades a soft disc through a three-stop gradient
//! keyed on the interpolated height.

use crate::error::BackdropError;
use crate::render::context::GpuContext;
use crate::render::shader::compile_program;

/// GLSL ES 3.0 vertex shader for the displaced point field.
///
/// Expects interleaved `[x, y, z]` positions at attribute location 0;
/// the y component is ignored and recomputed from the noise field, so the
/// CPU never has to upload fresh positions after the initial buffer.
pub const POINT_FIELD_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;

uniform mat4 u_model_view;
uniform mat4 u_projection;
uniform float u_time;
uniform float u_amp;
uniform float u_speed;
uniform float u_scale;
uniform float u_size_scale;
uniform vec2 u_size_clamp;

out float v_height;

vec2 hash(vec2 p) {
    p = vec2(dot(p, vec2(127.1, 311.7)), dot(p, vec2(269.5, 183.3)));
    return -1.0 + 2.0 * fract(sin(p) * 43758.5453123);
}

float noise(in vec2 p) {
    const float K1 = 0.366025404; // (sqrt(3)-1)/2
    const float K2 = 0.211324865; // (3-sqrt(3))/6
    vec2 i = floor(p + (p.x + p.y) * K1);
    vec2 a = p - i + (i.x + i.y) * K2;
    vec2 o = (a.x > a.y) ? vec2(1.0, 0.0) : vec2(0.0, 1.0);
    vec2 b = a - o + K2;
    vec2 c = a - 1.0 + 2.0 * K2;
    vec3 h = max(0.5 - vec3(dot(a, a), dot(b, b), dot(c, c)), 0.0);
    vec3 n = h * h * h * h * vec3(dot(a, hash(i + 0.0)), dot(b, hash(i + o)), dot(c, hash(i + 1.0)));
    return dot(n, vec3(70.0));
}

void main() {
    vec3 p = a_position;
    float h = noise(vec2(p.x, p.z) * u_scale + vec2(u_time * u_speed, u_time * u_speed * 0.6));
    h += 0.5 * noise(vec2(p.x * u_scale * 2.0 - u_time * u_speed * 0.3, p.z * u_scale * 2.0));
    v_height = h;
    p.y = h * u_amp;
    vec4 mv = u_model_view * vec4(p, 1.0);
    gl_Position = u_projection * mv;
    gl_PointSize = clamp(u_size_scale / -mv.z, u_size_clamp.x, u_size_clamp.y);
}
"#;

/// GLSL ES 3.0 fragment shader for the displaced point field.
///
/// Discards outside the unit disc, applies the three-stop height gradient
/// (`mix(u_low, mix(u_base, u_accent, t), t)`), and fades the rim with a
/// smoothstep so the points read as soft dots rather than squares.
pub const POINT_FIELD_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

uniform vec3 u_low;
uniform vec3 u_base;
uniform vec3 u_accent;

in float v_height;
out vec4 frag_color;

void main() {
    vec2 uv = gl_PointCoord - 0.5;
    float d = length(uv);
    if (d > 0.5) {
        discard;
    }
    float t = clamp(v_height * 0.5 + 0.5, 0.0, 1.0);
    vec3 col = mix(u_low, mix(u_base, u_accent, t), t);
    float a = smoothstep(0.5, 0.45, d);
    frag_color = vec4(col, a);
}
"#;

/// Uniform locations the point-field program exposes.
///
/// Locations are `Option` because a driver may optimize any of them out;
/// setting an absent uniform is a silent no-op, matching GL semantics.
pub struct PointUniforms {
    pub model_view: Option<glow::UniformLocation>,
    pub projection: Option<glow::UniformLocation>,
    pub time: Option<glow::UniformLocation>,
    pub amp: Option<glow::UniformLocation>,
    pub speed: Option<glow::UniformLocation>,
    pub scale: Option<glow::UniformLocation>,
    pub size_scale: Option<glow::UniformLocation>,
    pub size_clamp: Option<glow::UniformLocation>,
    pub low: Option<glow::UniformLocation>,
    pub base: Option<glow::UniformLocation>,
    pub accent: Option<glow::UniformLocation>,
}

/// Compiled point-field program with cached uniform locations.
pub struct PointPipeline {
    program: glow::Program,
    uniforms: PointUniforms,
}

impl PointPipeline {
    /// Compiles and links the point-field program and resolves its
    /// uniform locations.
    ///
    /// # Errors
    ///
    /// Returns the shader compile or link error, which the isolation
    /// boundary above the effect turns into a static fallback.
    #[allow(unsafe_code)]
    pub fn new(ctx: &GpuContext) -> Result<Self, BackdropError> {
        use glow::HasContext;

        let gl = ctx.gl();
        let program = compile_program(gl, POINT_FIELD_VERTEX_SHADER, POINT_FIELD_FRAGMENT_SHADER)?;

        // SAFETY: program was just linked successfully on this context;
        // uniform location queries are read-only.
        let uniforms = unsafe {
            PointUniforms {
                model_view: gl.get_uniform_location(program, "u_model_view"),
                projection: gl.get_uniform_location(program, "u_projection"),
                time: gl.get_uniform_location(program, "u_time"),
                amp: gl.get_uniform_location(program, "u_amp"),
                speed: gl.get_uniform_location(program, "u_speed"),
                scale: gl.get_uniform_location(program, "u_scale"),
                size_scale: gl.get_uniform_location(program, "u_size_scale"),
                size_clamp: gl.get_uniform_location(program, "u_size_clamp"),
                low: gl.get_uniform_location(program, "u_low"),
                base: gl.get_uniform_location(program, "u_base"),
                accent: gl.get_uniform_location(program, "u_accent"),
            }
        };

        Ok(Self { program, uniforms })
    }

    /// The linked program handle.
    pub fn program(&self) -> glow::Program {
        self.program
    }

    /// Cached uniform locations.
    pub fn uniforms(&self) -> &PointUniforms {
        &self.uniforms
    }

    /// Deletes the program. Call before dropping the context.
    #[allow(unsafe_code)]
    pub fn destroy(self, ctx: &GpuContext) {
        use glow::HasContext;
        // SAFETY: the program handle is valid for this context and is not
        // used again after deletion.
        unsafe { ctx.gl().delete_program(self.program) };
    }
}
