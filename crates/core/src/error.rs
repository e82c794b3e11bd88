//! Error types for the huewheel core.

use thiserror::Error;

/// Errors produced by picker construction, configuration and color parsing.
#[derive(Debug, Error)]
pub enum PickerError {
    /// Width or height was zero, or a picker surface was not square.
    #[error("invalid dimensions: width and height must be non-zero, and equal for a picker")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A configuration value was out of its accepted range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// An interaction script could not be parsed.
    #[error("invalid script: {0}")]
    InvalidScript(String),

    /// An I/O failure (snapshot writing).
    #[error("I/O error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let err = PickerError::InvalidDimensions;
        let msg = format!("{err}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_color_includes_message() {
        let err = PickerError::InvalidColor("bad hex".into());
        let msg = format!("{err}");
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn invalid_config_includes_message() {
        let err = PickerError::InvalidConfig("marker_width must be positive".into());
        assert!(err.to_string().contains("marker_width"));
    }

    #[test]
    fn invalid_script_includes_message() {
        let err = PickerError::InvalidScript("unknown action".into());
        assert!(err.to_string().contains("unknown action"));
    }

    #[test]
    fn picker_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PickerError>();
    }

    #[test]
    fn picker_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<PickerError>();
    }
}
