#![deny(unsafe_code)]
//! Core of the huewheel HSL color picker.
//!
//! Provides the color math (`Rgb`, `Hsl`, conversions), the `Surface` drawing
//! abstraction with an in-memory `PixelSurface`, the `Shape`/`Pickable` traits,
//! the `HueRing` and `SaturationSquare` shapes with their `Marker`, and the
//! `ColorPicker` controller that routes pointer events and notifies observers.

pub mod color;
pub mod config;
pub mod error;
pub mod hue_ring;
pub mod marker;
pub mod picker;
pub mod shape;
pub mod square;
pub mod surface;

pub use color::{hsl_to_rgb, hue_distance, rgb_to_hsl, rgb_to_hsl_exact, Color, Hsl, Rgb};
pub use config::PickerConfig;
pub use error::PickerError;
pub use hue_ring::HueRing;
pub use marker::Marker;
pub use picker::{
    ColorPicker, Cursor, ListenerId, PointerEvent, PointerKind, PointerSource, SurfaceOrigin,
};
pub use shape::{Bounds, Pickable, Region, Shape};
pub use square::SaturationSquare;
pub use surface::{ImageData, PixelSurface, Stroke, Surface};
