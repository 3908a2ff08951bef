//! Shader compilation and linking helpers for OpenGL ES 3.0.
//!
//! Compilation and linking require a live `glow::Context`; the log
//! formatting is pure string processing and testable without one.
//! Failures surface as [`BackdropError::ShaderCompile`] /
//! [`BackdropError::ShaderLink`] so the isolation boundary above the
//! effect can contain them.

use crate::error::BackdropError;

/// Formats a shader compilation error for human-readable debugging.
///
/// Prepends right-aligned line numbers to each line of `source`, then
/// appends the driver's error `log`, so messages that reference line
/// numbers can be correlated with the actual GLSL.
///
/// Both `source` and `log` may be empty; every combination is handled.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let source_lines: Vec<&str> = if source.is_empty() {
        Vec::new()
    } else {
        source.lines().collect()
    };

    let line_count = source_lines.len();
    let width = if line_count == 0 {
        1
    } else {
        line_count.to_string().len()
    };

    let numbered: String = source_lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1, width = width))
        .collect::<Vec<_>>()
        .join("\n");

    match (numbered.is_empty(), log.is_empty()) {
        (true, true) => String::new(),
        (true, false) => log.to_string(),
        (false, true) => numbered,
        (false, false) => format!("{numbered}\n\n{log}"),
    }
}

/// Compiles a single shader stage.
///
/// # Errors
///
/// Returns `BackdropError::ShaderCompile` with a line-numbered source
/// listing if the GLSL fails to compile.
#[allow(unsafe_code)]
pub fn compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    source: &str,
) -> Result<glow::Shader, BackdropError> {
    use glow::HasContext;

    let stage_name = match shader_type {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    };

    // SAFETY: glow wraps raw GL calls as unsafe. We pass valid shader_type
    // constants and valid source strings. Resource cleanup is handled on
    // all error paths.
    let shader = unsafe {
        gl.create_shader(shader_type)
            .map_err(|e| BackdropError::ShaderCompile {
                stage: stage_name.to_string(),
                log: e,
            })?
    };

    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
    }

    let compiled = unsafe { gl.get_shader_compile_status(shader) };

    if compiled {
        Ok(shader)
    } else {
        let info_log = unsafe { gl.get_shader_info_log(shader) };
        unsafe { gl.delete_shader(shader) };
        Err(BackdropError::ShaderCompile {
            stage: stage_name.to_string(),
            log: format_shader_error(source, &info_log),
        })
    }
}

/// Links a vertex and fragment shader into a program.
///
/// Attaches both shaders, links, and detaches them afterward (the program
/// retains its own copies).
///
/// # Errors
///
/// Returns `BackdropError::ShaderLink` with the driver's info log if
/// linking fails.
#[allow(unsafe_code)]
pub fn link_program(
    gl: &glow::Context,
    vertex: glow::Shader,
    fragment: glow::Shader,
) -> Result<glow::Program, BackdropError> {
    use glow::HasContext;

    // SAFETY: shader handles come from compile_shader and are valid for
    // this context; the program is deleted on the error path.
    let program = unsafe { gl.create_program().map_err(BackdropError::ShaderLink)? };

    unsafe {
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
    }

    let linked = unsafe { gl.get_program_link_status(program) };

    if linked {
        Ok(program)
    } else {
        let info_log = unsafe { gl.get_program_info_log(program) };
        unsafe { gl.delete_program(program) };
        Err(BackdropError::ShaderLink(info_log))
    }
}

/// Compiles both stages and links them, cleaning up the intermediate
/// shader objects on every path.
#[allow(unsafe_code)]
pub fn compile_program(
    gl: &glow::Context,
    vertex_source: &str,
    fragment_source: &str,
) -> Result<glow::Program, BackdropError> {
    use glow::HasContext;

    let vertex = compile_shader(gl, glow::VERTEX_SHADER, vertex_source)?;
    let fragment = match compile_shader(gl, glow::FRAGMENT_SHADER, fragment_source) {
        Ok(f) => f,
        Err(e) => {
            // SAFETY: vertex is a valid shader handle for this context.
            unsafe { gl.delete_shader(vertex) };
            return Err(e);
        }
    };

    let result = link_program(gl, vertex, fragment);

    // SAFETY: the linked program keeps its own copies; the shader objects
    // are no longer needed either way.
    unsafe {
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);
    }

    result
}
