//! RGBA buffer preparation for export.
//!
//! The picker leaves everything outside the ring and square transparent.
//! Exporters can keep that alpha or flatten it over a solid background.

use huewheel_core::{PixelSurface, Rgb};

/// Copies the surface's RGBA8 buffer, optionally composited over `background`.
///
/// With a background every output pixel is opaque: each channel becomes
/// `src * a + bg * (1 - a)` rounded, with `a` the source alpha.
pub fn surface_to_rgba(surface: &PixelSurface, background: Option<Rgb>) -> Vec<u8> {
    let rgba = surface.as_rgba();
    let Some(bg) = background else {
        return rgba.to_vec();
    };
    let bg = bg.to_array();
    rgba.chunks_exact(4)
        .flat_map(|px| {
            let a = px[3] as f64 / 255.0;
            let mix = |src: u8, dst: u8| (src as f64 * a + dst as f64 * (1.0 - a)).round() as u8;
            [mix(px[0], bg[0]), mix(px[1], bg[1]), mix(px[2], bg[2]), 255u8]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use huewheel_core::{ColorPicker, PickerConfig};

    fn picker_surface() -> PixelSurface {
        ColorPicker::from_config(PickerConfig::default().with_size(100))
            .unwrap()
            .into_surface()
    }

    #[test]
    fn correct_length() {
        let surface = PixelSurface::new(8, 4).unwrap();
        assert_eq!(surface_to_rgba(&surface, None).len(), 8 * 4 * 4);
        assert_eq!(surface_to_rgba(&surface, Some(Rgb::WHITE)).len(), 8 * 4 * 4);
    }

    #[test]
    fn without_background_keeps_transparency() {
        let surface = picker_surface();
        let buf = surface_to_rgba(&surface, None);
        assert_eq!(buf, surface.as_rgba());
        // Top-left corner lies outside the ring.
        assert_eq!(&buf[..4], &[0, 0, 0, 0]);
    }

    #[test]
    fn background_makes_every_pixel_opaque() {
        let surface = picker_surface();
        let buf = surface_to_rgba(&surface, Some(Rgb::new(10, 20, 30)));
        for (i, &byte) in buf.iter().enumerate() {
            if i % 4 == 3 {
                assert_eq!(byte, 255, "alpha at pixel {} should be 255", i / 4);
            }
        }
        assert_eq!(&buf[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn opaque_pixels_are_unchanged_by_background() {
        let surface = picker_surface();
        let flat = surface_to_rgba(&surface, Some(Rgb::BLACK));
        // Mid-band on the right: hue 0, fully opaque red.
        let i = (50 * 100 + 95) * 4;
        assert_eq!(&surface.as_rgba()[i..i + 4], &[255, 0, 0, 255]);
        assert_eq!(&flat[i..i + 4], &[255, 0, 0, 255]);
    }
}
