//! Circular selection marker.
//!
//! Unlike other shapes, a marker is positioned by its center. It is drawn as a
//! white circle inside a slightly larger black one so that it stays visible on
//! any background.

use glam::DVec2;

use crate::color::Rgb;
use crate::shape::{Bounds, Region, Shape};
use crate::surface::{Stroke, Surface};

/// Extra pixels redrawn around the marker's box to cover anti-aliased edges.
pub const REDRAW_PADDING: usize = 4;

/// Small circle marking the selected point of its owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    position: DVec2,
    size: f64,
    line_width: f64,
}

impl Marker {
    /// Creates a marker of diameter `size` centered at the rounded `center`.
    pub fn new(center: DVec2, size: f64) -> Self {
        Self {
            position: center.round(),
            size,
            line_width: 1.0,
        }
    }

    /// Center of the marker.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Moves the center to `(round(x), round(y))`.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = DVec2::new(x, y).round();
    }

    /// Top-left corner of the marker's box.
    pub fn top_left(&self) -> DVec2 {
        self.position - DVec2::splat(self.size / 2.0)
    }

    fn radius(&self) -> f64 {
        self.size / 2.0
    }

    /// The pixels the marker may have touched: its box plus anti-aliasing padding.
    pub fn dirty_region(&self) -> Region {
        Region::covering(self.top_left(), DVec2::splat(self.size)).padded(REDRAW_PADDING)
    }
}

impl Shape for Marker {
    fn bounds(&self) -> Bounds {
        let top_left = self.top_left();
        Bounds::new(top_left.x, top_left.y, self.size, self.size)
    }

    /// Disc test out to the outer (black) circle.
    fn contains_point(&self, p: DVec2) -> bool {
        p.distance(self.position) <= self.radius() + 1.0
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let r = self.radius();
        surface.stroke_circle(
            self.position,
            r,
            Stroke {
                color: Rgb::WHITE,
                line_width: self.line_width,
            },
        );
        surface.stroke_circle(
            self.position,
            r + 1.0,
            Stroke {
                color: Rgb::BLACK,
                line_width: self.line_width,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PixelSurface;

    #[test]
    fn new_rounds_center() {
        let marker = Marker::new(DVec2::new(10.4, 20.6), 10.0);
        assert_eq!(marker.position(), DVec2::new(10.0, 21.0));
    }

    #[test]
    fn top_left_is_center_minus_half_size() {
        let marker = Marker::new(DVec2::new(50.0, 60.0), 10.0);
        assert_eq!(marker.top_left(), DVec2::new(45.0, 55.0));
    }

    #[test]
    fn dirty_region_pads_box_by_four() {
        let marker = Marker::new(DVec2::new(50.0, 60.0), 10.0);
        assert_eq!(marker.dirty_region(), Region::new(41, 51, 18, 18));
    }

    #[test]
    fn dirty_region_of_odd_size_covers_half_pixels() {
        let marker = Marker::new(DVec2::new(50.0, 60.0), 9.0);
        // Box spans 45.5..54.5, which covers pixels 45..55.
        assert_eq!(marker.dirty_region(), Region::new(41, 51, 18, 18));
    }

    #[test]
    fn contains_point_is_disc_test() {
        let marker = Marker::new(DVec2::new(50.0, 50.0), 10.0);
        assert!(marker.contains_point(DVec2::new(50.0, 50.0)));
        assert!(marker.contains_point(DVec2::new(56.0, 50.0)));
        assert!(!marker.contains_point(DVec2::new(55.0, 55.0)));
    }

    #[test]
    fn draw_stays_inside_dirty_region() {
        let mut surface = PixelSurface::new(60, 60).unwrap();
        let marker = Marker::new(DVec2::new(30.0, 30.0), 10.0);
        marker.draw(&mut surface);

        let dirty = marker.dirty_region();
        for y in 0..60i64 {
            for x in 0..60i64 {
                let inside = x >= dirty.x
                    && x < dirty.x + dirty.width as i64
                    && y >= dirty.y
                    && y < dirty.y + dirty.height as i64;
                if !inside {
                    assert_eq!(surface.pixel(x, y), Some([0, 0, 0, 0]), "pixel ({x}, {y})");
                }
            }
        }
        // The center pixel is left untouched so the owner's color shows through.
        assert_eq!(surface.pixel(30, 30), Some([0, 0, 0, 0]));
        assert!(surface.pixel(36, 30).unwrap()[3] > 0);
    }
}
