//! Picker configuration: surface size and marker diameter.
//!
//! Configs come either from serde (scripts embed one) or from a loose JSON
//! object via [`PickerConfig::from_json`], which accepts the camelCase key
//! `markerWidth` as well as `marker_width`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PickerError;

pub const DEFAULT_SIZE: usize = 300;
pub const DEFAULT_MARKER_WIDTH: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Side length of the square surface, in pixels.
    pub size: usize,
    /// Diameter of the selection markers, in pixels.
    #[serde(alias = "markerWidth")]
    pub marker_width: f64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            marker_width: DEFAULT_MARKER_WIDTH,
        }
    }
}

/// Looks up the first present key among `names`.
fn lookup<'p, 'n>(params: &'p Value, names: &[&'n str]) -> Option<(&'n str, &'p Value)> {
    names
        .iter()
        .find_map(|&name| params.get(name).map(|v| (name, v)))
}

fn type_error(name: &str, expected: &str, got: &Value) -> PickerError {
    PickerError::InvalidConfig(format!("'{name}' must be {expected}, got {got}"))
}

impl PickerConfig {
    /// Reads a config from a JSON object, using defaults for missing keys.
    ///
    /// Keys that are present with the wrong JSON type, and values that fail
    /// [`validate`](Self::validate), are errors.
    pub fn from_json(params: &Value) -> Result<Self, PickerError> {
        let mut config = Self::default();
        if let Some((name, v)) = lookup(params, &["size"]) {
            config.size = v
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| type_error(name, "a non-negative integer", v))?;
        }
        if let Some((name, v)) = lookup(params, &["marker_width", "markerWidth"]) {
            config.marker_width = v.as_f64().ok_or_else(|| type_error(name, "a number", v))?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_marker_width(mut self, marker_width: f64) -> Self {
        self.marker_width = marker_width;
        self
    }

    /// Checks that the size is non-zero and the marker width is a positive,
    /// finite number no wider than the surface.
    pub fn validate(&self) -> Result<(), PickerError> {
        if self.size == 0 {
            return Err(PickerError::InvalidDimensions);
        }
        if !self.marker_width.is_finite() || self.marker_width <= 0.0 {
            return Err(PickerError::InvalidConfig(format!(
                "marker_width must be a positive number, got {}",
                self.marker_width
            )));
        }
        if self.marker_width > self.size as f64 {
            return Err(PickerError::InvalidConfig(format!(
                "marker_width {} exceeds surface size {}",
                self.marker_width, self.size
            )));
        }
        Ok(())
    }
}
