//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: picker error (bad dimensions or config)
//! - 11: I/O error (script read, snapshot write)
//! - 12: input error (bad color, bad script, bad JSON config)
//! - 13: serialization error

use huewheel_core::PickerError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    Picker(PickerError),
    Io(String),
    Input(String),
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Picker(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Picker(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<PickerError> for CliError {
    fn from(e: PickerError) -> Self {
        match e {
            PickerError::Io(msg) => CliError::Io(msg),
            e @ (PickerError::InvalidColor(_) | PickerError::InvalidScript(_)) => {
                CliError::Input(e.to_string())
            }
            other => CliError::Picker(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
