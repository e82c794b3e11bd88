//! PNG export of a picker surface.
//!
//! Feature-gated behind `png` (default on) so the replay machinery can be used
//! without pulling in the `image` crate.

use huewheel_core::{PickerError, PixelSurface, Rgb, Surface};
use std::path::Path;

use crate::pixel::surface_to_rgba;

/// Writes the surface as a PNG, flattened over `background` if given.
///
/// Returns `PickerError::InvalidDimensions` if the surface dimensions overflow
/// `u32`, or `PickerError::Io` on write failure.
pub fn write_png(
    surface: &PixelSurface,
    background: Option<Rgb>,
    path: &Path,
) -> Result<(), PickerError> {
    let rgba = surface_to_rgba(surface, background);
    let w = u32::try_from(surface.width()).map_err(|_| PickerError::InvalidDimensions)?;
    let h = u32::try_from(surface.height()).map_err(|_| PickerError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| PickerError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| PickerError::Io(e.to_string()))?;
    tracing::info!(path = %path.display(), width = w, height = h, "wrote snapshot");
    Ok(())
}
