//! Positioned shapes: bounds, hit-testing and the area-fill rendering primitive.
//!
//! Every shape has rectangular [`Bounds`] and a containment test. Shapes that
//! carry a color gradient implement [`Pickable`], which adds `color_at` and the
//! shared marker protocol: redraw the marker's old dirty rectangle, move the
//! marker, draw it again, and resolve the color under it.

use glam::DVec2;
use tracing::trace;

use crate::color::{Color, Rgb};
use crate::marker::Marker;
use crate::surface::Surface;

/// Axis-aligned rectangle with a derived center.
///
/// The top-left corner is rounded to whole pixels whenever it is set, so that
/// hit-testing and rendering agree on pixel boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    origin: DVec2,
    size: DVec2,
    center: DVec2,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut bounds = Self {
            origin: DVec2::ZERO,
            size: DVec2::new(width, height),
            center: DVec2::ZERO,
        };
        bounds.set_position(x, y);
        bounds
    }

    /// Moves the top-left corner to `(round(x), round(y))` and recomputes the center.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.origin = DVec2::new(x, y).round();
        self.center = self.origin + (self.size / 2.0).round();
    }

    pub fn x(&self) -> f64 {
        self.origin.x
    }

    pub fn y(&self) -> f64 {
        self.origin.y
    }

    pub fn width(&self) -> f64 {
        self.size.x
    }

    pub fn height(&self) -> f64 {
        self.size.y
    }

    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    /// Half-open containment: `[x, x + width) x [y, y + height)`.
    pub fn contains(&self, p: DVec2) -> bool {
        let end = self.origin + self.size;
        p.x >= self.origin.x && p.x < end.x && p.y >= self.origin.y && p.y < end.y
    }

    /// The pixel region covering these bounds.
    pub fn region(&self) -> Region {
        Region::covering(self.origin, self.size)
    }
}

/// An integer pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: i64,
    pub y: i64,
    pub width: usize,
    pub height: usize,
}

impl Region {
    pub fn new(x: i64, y: i64, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest pixel region containing the rectangle at `origin` with `size`.
    pub fn covering(origin: DVec2, size: DVec2) -> Self {
        let start = origin.floor();
        let end = (origin + size).ceil();
        Self {
            x: start.x as i64,
            y: start.y as i64,
            width: (end.x - start.x).max(0.0) as usize,
            height: (end.y - start.y).max(0.0) as usize,
        }
    }

    /// Grows the region by `padding` pixels on every side.
    pub fn padded(self, padding: usize) -> Self {
        Self {
            x: self.x - padding as i64,
            y: self.y - padding as i64,
            width: self.width + 2 * padding,
            height: self.height + 2 * padding,
        }
    }

    fn right(&self) -> i64 {
        self.x + self.width as i64
    }

    fn bottom(&self) -> i64 {
        self.y + self.height as i64
    }

    /// Whether the two regions share at least one pixel.
    pub fn intersects(&self, other: &Region) -> bool {
        self.intersection(other).is_some()
    }

    /// The pixels shared by both regions, if any.
    pub fn intersection(&self, other: &Region) -> Option<Region> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(Region::new(x, y, (right - x) as usize, (bottom - y) as usize))
    }

    /// Smallest region containing both.
    pub fn union(&self, other: &Region) -> Region {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Region::new(x, y, (right - x) as usize, (bottom - y) as usize)
    }
}

/// A positioned display object on the surface.
pub trait Shape {
    /// Rectangular bounds of the shape.
    fn bounds(&self) -> Bounds;

    /// Whether `p` hits the shape. Defaults to the half-open bounds test.
    fn contains_point(&self, p: DVec2) -> bool {
        self.bounds().contains(p)
    }

    /// Renders the whole shape.
    fn draw(&self, surface: &mut dyn Surface);
}

/// A shape whose pixels are a function of position and that owns a marker
/// indicating the selected point.
pub trait Pickable: Shape {
    /// The color this shape paints at `p`, computed rather than read back.
    fn color_at(&self, p: DVec2) -> Rgb;

    fn marker(&self) -> &Marker;

    fn marker_mut(&mut self) -> &mut Marker;

    /// Fills `region`: pixels inside the shape get `color_at` (opaque), every
    /// other pixel becomes fully transparent.
    fn render_region(&self, surface: &mut dyn Surface, region: Region) {
        trace!(?region, "render region");
        let mut block = surface.get_image_data(region.x, region.y, region.width, region.height);
        for row in 0..region.height {
            for col in 0..region.width {
                let p = DVec2::new(
                    (region.x + col as i64) as f64,
                    (region.y + row as i64) as f64,
                );
                let rgba = if self.contains_point(p) {
                    let c = self.color_at(p);
                    [c.r, c.g, c.b, 255]
                } else {
                    [0, 0, 0, 0]
                };
                block.set_pixel(col, row, rgba);
            }
        }
        surface.put_image_data(&block, region.x, region.y);
    }

    /// Erases the marker at its old position, moves it to `p` and draws it.
    fn move_marker(&mut self, surface: &mut dyn Surface, p: DVec2) {
        let dirty = self.marker().dirty_region();
        self.render_region(surface, dirty);
        self.marker_mut().set_position(p.x, p.y);
        self.marker().draw(surface);
    }

    /// Moves the marker to the rounded point without resolving a color.
    fn pick_silently(&mut self, surface: &mut dyn Surface, p: DVec2) {
        self.move_marker(surface, p.round());
    }

    /// Moves the marker to the rounded point and returns the color under it.
    fn pick(&mut self, surface: &mut dyn Surface, p: DVec2) -> Color {
        self.pick_silently(surface, p);
        self.marker_color(surface)
    }

    /// Reads back the color under the marker.
    fn marker_color(&self, surface: &dyn Surface) -> Color {
        color_at_point(surface, self.marker().position())
    }
}

/// Reads the rendered pixel at `p` back from the surface.
///
/// Only meaningful once the shape under `p` has been drawn.
pub fn color_at_point(surface: &dyn Surface, p: DVec2) -> Color {
    let p = p.floor();
    let block = surface.get_image_data(p.x as i64, p.y as i64, 1, 1);
    let [r, g, b, _] = block.pixel(0, 0);
    Color::from_rgb(Rgb::new(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PixelSurface;

    /// Solid rectangle used to exercise the default trait methods.
    struct Swatch {
        bounds: Bounds,
        fill: Rgb,
        marker: Marker,
    }

    impl Swatch {
        fn new(bounds: Bounds, fill: Rgb) -> Self {
            Self {
                marker: Marker::new(bounds.center(), 4.0),
                bounds,
                fill,
            }
        }
    }

    impl Shape for Swatch {
        fn bounds(&self) -> Bounds {
            self.bounds
        }

        fn draw(&self, surface: &mut dyn Surface) {
            self.render_region(surface, self.bounds.region());
            self.marker.draw(surface);
        }
    }

    impl Pickable for Swatch {
        fn color_at(&self, _p: DVec2) -> Rgb {
            self.fill
        }

        fn marker(&self) -> &Marker {
            &self.marker
        }

        fn marker_mut(&mut self) -> &mut Marker {
            &mut self.marker
        }
    }

    #[test]
    fn set_position_rounds_and_recomputes_center() {
        let mut bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        bounds.set_position(2.4, 7.6);
        assert_eq!(bounds.origin(), DVec2::new(2.0, 8.0));
        assert_eq!(bounds.center(), DVec2::new(7.0, 13.0));
    }

    #[test]
    fn center_rounds_half_size() {
        let bounds = Bounds::new(0.0, 0.0, 5.0, 5.0);
        assert_eq!(bounds.center(), DVec2::new(3.0, 3.0));
    }

    #[test]
    fn contains_is_half_open() {
        let bounds = Bounds::new(10.0, 20.0, 5.0, 5.0);
        assert!(bounds.contains(DVec2::new(10.0, 20.0)));
        assert!(bounds.contains(DVec2::new(14.9, 24.9)));
        assert!(!bounds.contains(DVec2::new(15.0, 22.0)));
        assert!(!bounds.contains(DVec2::new(12.0, 25.0)));
        assert!(!bounds.contains(DVec2::new(9.9, 22.0)));
    }

    #[test]
    fn region_covering_fractional_rect_expands_outward() {
        let region = Region::covering(DVec2::new(1.5, 2.5), DVec2::new(3.0, 3.0));
        assert_eq!(region, Region::new(1, 2, 4, 4));
    }

    #[test]
    fn padded_region_grows_every_side() {
        let region = Region::new(5, 5, 10, 10).padded(4);
        assert_eq!(region, Region::new(1, 1, 18, 18));
    }

    #[test]
    fn intersection_of_overlapping_regions() {
        let a = Region::new(0, 0, 10, 10);
        let b = Region::new(5, -3, 10, 6);
        assert_eq!(a.intersection(&b), Some(Region::new(5, 0, 5, 3)));
        assert!(a.intersects(&b));
    }

    #[test]
    fn touching_regions_do_not_intersect() {
        let a = Region::new(0, 0, 10, 10);
        assert_eq!(a.intersection(&Region::new(10, 0, 5, 5)), None);
        assert!(!a.intersects(&Region::new(0, 10, 5, 5)));
        assert!(!a.intersects(&Region::new(2, 2, 0, 4)));
    }

    #[test]
    fn union_is_bounding_box() {
        let a = Region::new(0, 0, 4, 4);
        let b = Region::new(10, -2, 2, 2);
        assert_eq!(a.union(&b), Region::new(0, -2, 12, 6));
    }

    #[test]
    fn render_region_clears_pixels_outside_shape() {
        let mut surface = PixelSurface::new(20, 20).unwrap();
        let swatch = Swatch::new(Bounds::new(5.0, 5.0, 10.0, 10.0), Rgb::new(0, 0, 255));
        swatch.render_region(&mut surface, Region::new(0, 0, 20, 20));

        assert_eq!(surface.pixel(5, 5), Some([0, 0, 255, 255]));
        assert_eq!(surface.pixel(14, 14), Some([0, 0, 255, 255]));
        assert_eq!(surface.pixel(15, 15), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn render_region_only_touches_requested_block() {
        let mut surface = PixelSurface::new(20, 20).unwrap();
        let swatch = Swatch::new(Bounds::new(0.0, 0.0, 20.0, 20.0), Rgb::new(9, 9, 9));
        swatch.render_region(&mut surface, Region::new(2, 2, 3, 3));
        assert_eq!(surface.pixel(2, 2), Some([9, 9, 9, 255]));
        assert_eq!(surface.pixel(5, 5), Some([0, 0, 0, 0]));
    }

    #[test]
    fn pick_moves_marker_and_reads_color() {
        let mut surface = PixelSurface::new(40, 40).unwrap();
        let mut swatch = Swatch::new(Bounds::new(0.0, 0.0, 40.0, 40.0), Rgb::new(10, 200, 30));
        swatch.draw(&mut surface);

        let color = swatch.pick(&mut surface, DVec2::new(30.4, 9.6));
        assert_eq!(swatch.marker().position(), DVec2::new(30.0, 10.0));
        assert_eq!(color.rgb, Rgb::new(10, 200, 30));
    }

    #[test]
    fn move_marker_erases_old_marker() {
        let mut surface = PixelSurface::new(40, 40).unwrap();
        let mut swatch = Swatch::new(Bounds::new(0.0, 0.0, 40.0, 40.0), Rgb::new(10, 200, 30));
        swatch.draw(&mut surface);
        let fresh = surface.clone();

        let start = swatch.marker().position();
        swatch.pick_silently(&mut surface, DVec2::new(5.0, 5.0));
        swatch.pick_silently(&mut surface, start);

        assert_eq!(surface, fresh);
    }

    #[test]
    fn color_at_point_reads_pixel() {
        let mut surface = PixelSurface::new(4, 4).unwrap();
        let swatch = Swatch::new(Bounds::new(0.0, 0.0, 4.0, 4.0), Rgb::new(255, 0, 0));
        swatch.render_region(&mut surface, swatch.bounds().region());
        let color = color_at_point(&surface, DVec2::new(1.0, 2.0));
        assert_eq!(color.rgb, Rgb::new(255, 0, 0));
        assert_eq!(color.hsl.h, 0.0);
        assert_eq!(color.hsl.s, 100.0);
    }
}
