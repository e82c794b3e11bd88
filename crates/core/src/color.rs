//! RGB and HSL color types and the conversions between them.
//!
//! `Rgb` holds 8-bit channels, `Hsl` holds hue in degrees and saturation and
//! lightness in percent. Conversions are pure functions. `rgb_to_hsl` rounds
//! each component to the nearest whole unit, which is what every readout and
//! notification carries; `rgb_to_hsl_exact` keeps full precision.

use crate::error::PickerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 8-bit RGB color.
///
/// Serializes as a `[r, g, b]` array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSL color: hue in degrees, saturation and lightness in percent.
///
/// Serializes as a `[h, s, l]` array.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// A resolved color in both representations.
///
/// This is the payload of every "color picked" notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub rgb: Rgb,
    pub hsl: Hsl,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Parses `"#rrggbb"`, `"rrggbb"` or the 3-digit shorthand `"#rgb"`
    /// (case insensitive).
    ///
    /// Returns `PickerError::InvalidColor` for anything else.
    pub fn from_hex(hex: &str) -> Result<Rgb, PickerError> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PickerError::InvalidColor(format!("non-hex characters in {hex:?}")));
        }
        let digit = |i: usize, len: usize| {
            u8::from_str_radix(&hex[i..i + len], 16)
                .map_err(|e| PickerError::InvalidColor(format!("invalid component: {e}")))
        };
        match hex.len() {
            3 => Ok(Rgb::new(digit(0, 1)? * 17, digit(1, 1)? * 17, digit(2, 1)? * 17)),
            6 => Ok(Rgb::new(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?)),
            n => Err(PickerError::InvalidColor(format!(
                "expected 3 or 6 hex digits, got {n}"
            ))),
        }
    }

    /// Formats the color as `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Returns the channels as an array.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb::new(r, g, b)
    }
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f64; 3] {
        [self.h, self.s, self.l]
    }
}

impl From<[f64; 3]> for Hsl {
    fn from([h, s, l]: [f64; 3]) -> Self {
        Hsl::new(h, s, l)
    }
}

impl Color {
    /// Resolves an RGB color, deriving its rounded HSL form.
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            rgb,
            hsl: rgb_to_hsl(rgb),
        }
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <[u8; 3]>::deserialize(deserializer).map(Rgb::from)
    }
}

impl Serialize for Hsl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Hsl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <[f64; 3]>::deserialize(deserializer).map(Hsl::from)
    }
}

/// Converts RGB to HSL without rounding. Hue lies in [0, 360).
///
/// Achromatic colors (all channels equal) have hue and saturation 0.
pub fn rgb_to_hsl_exact(c: Rgb) -> Hsl {
    let r = c.r as f64 / 255.0;
    let g = c.g as f64 / 255.0;
    let b = c.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let sector = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl::new(sector * 60.0, s * 100.0, l * 100.0)
}

/// Converts RGB to HSL, rounding hue to the nearest degree and saturation and
/// lightness to the nearest percent.
///
/// A hue that rounds up to 360 wraps to 0.
pub fn rgb_to_hsl(c: Rgb) -> Hsl {
    let exact = rgb_to_hsl_exact(c);
    Hsl::new(exact.h.round() % 360.0, exact.s.round(), exact.l.round())
}

/// Interpolates one channel from the `p`/`q` terms at hue offset `t` (in turns).
fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Scales a unit channel to 8 bits. Out-of-range values saturate, NaN maps to 0.
fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Converts HSL to RGB.
///
/// Any finite hue is accepted and wrapped into [0, 360). Saturation and
/// lightness are not clamped: out-of-range values produce whatever the
/// formula yields, saturated into 0–255 per channel.
pub fn hsl_to_rgb(c: Hsl) -> Rgb {
    let h = c.h.rem_euclid(360.0) / 360.0;
    let s = c.s / 100.0;
    let l = c.l / 100.0;

    if s == 0.0 {
        let v = to_channel(l);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        to_channel(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_channel(p, q, h)),
        to_channel(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

/// Distance between two hues on the color wheel, in degrees.
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}
