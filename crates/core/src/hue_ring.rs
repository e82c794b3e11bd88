//! Hue ring: an annulus mapping angle to hue.
//!
//! The ring is centered in its bounds with outer radius `width / 2` and a band
//! one tenth of the width thick. Angle 0 points right and angles grow
//! clockwise in surface coordinates (y down), so hue 90 sits at the bottom.

use glam::DVec2;

use crate::color::{hsl_to_rgb, rgb_to_hsl, Hsl, Rgb};
use crate::marker::Marker;
use crate::shape::{Bounds, Pickable, Shape};
use crate::surface::Surface;

/// Saturation and lightness of every color painted on the ring.
const RING_SATURATION: f64 = 100.0;
const RING_LIGHTNESS: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct HueRing {
    bounds: Bounds,
    outer_radius: f64,
    inner_radius: f64,
    outer_r2: f64,
    inner_r2: f64,
    marker: Marker,
}

impl HueRing {
    /// Creates a ring inside `bounds`, its marker resting at hue 0 on the mid-band.
    pub fn new(bounds: Bounds, marker_size: f64) -> Self {
        let outer_radius = bounds.width() / 2.0;
        let inner_radius = outer_radius - bounds.width() / 10.0;
        let mut ring = Self {
            bounds,
            outer_radius,
            inner_radius,
            outer_r2: outer_radius * outer_radius,
            inner_r2: inner_radius * inner_radius,
            marker: Marker::new(bounds.center(), marker_size),
        };
        ring.marker = Marker::new(ring.point_for_hue(0.0), marker_size);
        ring
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Radius of the middle of the band, where the marker is placed.
    pub fn band_radius(&self) -> f64 {
        self.inner_radius + (self.outer_radius - self.inner_radius) / 2.0
    }

    /// Hue in degrees, in [0, 360), at the angle of `p` around the center.
    /// Rounded to two decimals.
    pub fn hue_at(&self, p: DVec2) -> f64 {
        let d = p - self.bounds.center();
        let degrees = d.y.atan2(d.x).to_degrees().rem_euclid(360.0);
        (degrees * 100.0).round() / 100.0
    }

    /// The point on the mid-band at angle `hue`.
    pub fn point_for_hue(&self, hue: f64) -> DVec2 {
        let radians = hue.to_radians();
        self.bounds.center() + self.band_radius() * DVec2::new(radians.cos(), radians.sin())
    }

    /// Silently moves the marker to hue `hsl.h`. Saturation and lightness are ignored.
    pub fn set_hsl(&mut self, surface: &mut dyn Surface, hsl: Hsl) {
        let p = self.point_for_hue(hsl.h);
        self.pick_silently(surface, p);
    }

    /// Silently moves the marker to the hue of `rgb`.
    pub fn set_rgb(&mut self, surface: &mut dyn Surface, rgb: Rgb) {
        self.set_hsl(surface, rgb_to_hsl(rgb));
    }
}

impl Shape for HueRing {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Annulus test: `inner^2 <= |p - center|^2 <= outer^2`.
    fn contains_point(&self, p: DVec2) -> bool {
        let r2 = p.distance_squared(self.bounds.center());
        r2 >= self.inner_r2 && r2 <= self.outer_r2
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.render_region(surface, self.bounds.region());
        self.marker.draw(surface);
    }
}

impl Pickable for HueRing {
    fn color_at(&self, p: DVec2) -> Rgb {
        hsl_to_rgb(Hsl::new(self.hue_at(p), RING_SATURATION, RING_LIGHTNESS))
    }

    fn marker(&self) -> &Marker {
        &self.marker
    }

    fn marker_mut(&mut self) -> &mut Marker {
        &mut self.marker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hue_distance;
    use crate::surface::PixelSurface;

    fn ring() -> HueRing {
        HueRing::new(Bounds::new(0.0, 0.0, 300.0, 300.0), 10.0)
    }

    #[test]
    fn radii_follow_width() {
        let ring = ring();
        assert_eq!(ring.outer_radius(), 150.0);
        assert_eq!(ring.inner_radius(), 120.0);
        assert_eq!(ring.band_radius(), 135.0);
    }

    #[test]
    fn inner_edge_on_horizontal_axis_is_inside() {
        let ring = ring();
        let c = ring.bounds().center();
        assert!(ring.contains_point(DVec2::new(c.x + ring.inner_radius(), c.y)));
        assert!(ring.contains_point(DVec2::new(c.x + ring.outer_radius(), c.y)));
    }

    #[test]
    fn points_just_off_the_band_are_outside() {
        let ring = ring();
        let c = ring.bounds().center();
        assert!(!ring.contains_point(DVec2::new(c.x + ring.inner_radius() - 1.0, c.y)));
        assert!(!ring.contains_point(DVec2::new(c.x + ring.outer_radius() + 1.0, c.y)));
        assert!(!ring.contains_point(c));
    }

    #[test]
    fn marker_starts_at_hue_zero_on_mid_band() {
        let ring = ring();
        assert_eq!(ring.marker().position(), DVec2::new(285.0, 150.0));
    }

    #[test]
    fn hue_follows_angle() {
        let ring = ring();
        assert_eq!(ring.hue_at(DVec2::new(285.0, 150.0)), 0.0);
        assert_eq!(ring.hue_at(DVec2::new(150.0, 285.0)), 90.0);
        assert_eq!(ring.hue_at(DVec2::new(15.0, 150.0)), 180.0);
        assert_eq!(ring.hue_at(DVec2::new(150.0, 15.0)), 270.0);
    }

    #[test]
    fn color_at_right_is_red() {
        let ring = ring();
        assert_eq!(ring.color_at(DVec2::new(285.0, 150.0)), Rgb::new(255, 0, 0));
    }

    #[test]
    fn color_at_is_fully_saturated_mid_lightness() {
        let ring = ring();
        let p = DVec2::new(150.0, 285.0);
        assert_eq!(ring.color_at(p), hsl_to_rgb(Hsl::new(90.0, 100.0, 50.0)));
    }

    #[test]
    fn draw_paints_band_and_clears_hole() {
        let mut surface = PixelSurface::new(300, 300).unwrap();
        let ring = ring();
        ring.draw(&mut surface);

        assert_eq!(surface.pixel(150, 150), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(285, 150), Some([255, 0, 0, 255]));
        let band = surface.pixel(150, 20).unwrap();
        assert_eq!(band[3], 255);
    }

    #[test]
    fn pick_returns_hue_under_point() {
        let mut surface = PixelSurface::new(300, 300).unwrap();
        let mut ring = ring();
        ring.draw(&mut surface);

        let color = ring.pick(&mut surface, DVec2::new(150.2, 284.8));
        assert_eq!(ring.marker().position(), DVec2::new(150.0, 285.0));
        assert_eq!(color.hsl.h, 90.0);
        assert_eq!(color.hsl.s, 100.0);
        assert_eq!(color.hsl.l, 50.0);
    }

    #[test]
    fn set_hsl_moves_marker_to_hue_angle() {
        let mut surface = PixelSurface::new(300, 300).unwrap();
        let mut ring = ring();
        ring.draw(&mut surface);

        ring.set_hsl(&mut surface, Hsl::new(180.0, 10.0, 90.0));
        assert_eq!(ring.marker().position(), DVec2::new(15.0, 150.0));

        ring.set_rgb(&mut surface, Rgb::new(0, 0, 255));
        let hue = ring.hue_at(ring.marker().position());
        assert!(hue_distance(hue, 240.0) < 1.0, "hue {hue}");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn marker_placed_for_hue_reads_back_that_hue(h in 0u16..360) {
                let ring = ring();
                let p = ring.point_for_hue(h as f64).round();
                prop_assert!(ring.contains_point(p));
                // Rounding to a pixel moves the angle by under half a degree
                // at the mid-band radius.
                prop_assert!(hue_distance(ring.hue_at(p), h as f64) < 0.5);
            }
        }
    }
}
