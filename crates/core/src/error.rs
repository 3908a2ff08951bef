//! Error types for the backdrop-engine core.

use thiserror::Error;

/// Errors produced by effect construction, rendering, and snapshot operations.
#[derive(Debug, Error)]
pub enum BackdropError {
    /// The environment could not provide a usable graphics context.
    #[error("rendering context unavailable: {0}")]
    ContextUnavailable(String),

    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}):\n{log}")]
    ShaderCompile {
        stage: String,
        log: String,
    },

    /// A shader program failed to link.
    #[error("shader link error:\n{0}")]
    ShaderLink(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A theme name was not recognized.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    /// An effect name was not recognized by the registry.
    #[error("unknown effect: {0}")]
    UnknownEffect(String),

    /// Snapshot dimensions were zero or overflowed the pixel buffer.
    #[error("invalid dimensions: width and height must be non-zero and in range")]
    InvalidDimensions,

    /// An I/O failure while writing a snapshot.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_unavailable_includes_reason() {
        let err = BackdropError::ContextUnavailable("no GL driver".into());
        let msg = format!("{err}");
        assert!(
            msg.contains("no GL driver"),
            "expected reason in message, got: {msg}"
        );
    }

    #[test]
    fn shader_compile_includes_stage_and_log() {
        let err = BackdropError::ShaderCompile {
            stage: "vertex".into(),
            log: "0:12: syntax error".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("vertex"), "missing stage in: {msg}");
        assert!(msg.contains("syntax error"), "missing log in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let err = BackdropError::InvalidColor("bad hex".into());
        let msg = format!("{err}");
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn unknown_effect_includes_name() {
        let err = BackdropError::UnknownEffect("vortex".into());
        let msg = format!("{err}");
        assert!(msg.contains("vortex"), "missing effect name in: {msg}");
    }

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let err = BackdropError::InvalidDimensions;
        let msg = format!("{err}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn backdrop_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BackdropError>();
    }

    #[test]
    fn backdrop_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<BackdropError>();
    }
}
