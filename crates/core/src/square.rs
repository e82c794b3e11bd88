//! Saturation/lightness square for a single hue.
//!
//! Saturation grows left to right, lightness falls top to bottom. The square
//! remembers the hue it was last drawn for; changing the hue requires a full
//! redraw because every pixel depends on it.

use glam::DVec2;
use tracing::debug;

use crate::color::{hsl_to_rgb, rgb_to_hsl, Color, Hsl, Rgb};
use crate::marker::Marker;
use crate::shape::{Bounds, Pickable, Shape};
use crate::surface::Surface;

#[derive(Debug, Clone)]
pub struct SaturationSquare {
    bounds: Bounds,
    hue: f64,
    marker: Marker,
}

impl SaturationSquare {
    /// Creates a square for hue 0 with its marker at the center.
    pub fn new(bounds: Bounds, marker_size: f64) -> Self {
        let middle = bounds.origin() + DVec2::new(bounds.width(), bounds.height()) / 2.0;
        Self {
            bounds,
            hue: 0.0,
            marker: Marker::new(middle, marker_size),
        }
    }

    /// The hue the square was last drawn for.
    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Saturation and lightness at `p` for the current hue.
    pub fn hsl_at(&self, p: DVec2) -> Hsl {
        let rel = p - self.bounds.origin();
        Hsl::new(
            self.hue,
            rel.x / self.bounds.width() * 100.0,
            100.0 - rel.y / self.bounds.height() * 100.0,
        )
    }

    /// The point showing `saturation` and `lightness`, kept on the square's
    /// last pixel column and row so that full saturation or zero lightness
    /// still reads back a pixel of the square.
    pub fn point_for(&self, saturation: f64, lightness: f64) -> DVec2 {
        let origin = self.bounds.origin();
        let x = saturation / 100.0 * self.bounds.width() + origin.x;
        let y = (100.0 - lightness) / 100.0 * self.bounds.height() + origin.y;
        let last = origin + DVec2::new(self.bounds.width(), self.bounds.height()) - 1.0;
        DVec2::new(x, y).clamp(origin, last.max(origin))
    }

    /// Stores `hue` and redraws the square and its marker without resolving a color.
    pub fn draw_hue_silently(&mut self, surface: &mut dyn Surface, hue: f64) {
        self.hue = hue;
        self.draw(surface);
    }

    /// Stores `hue`, redraws, and returns the color now under the marker.
    pub fn draw_hue(&mut self, surface: &mut dyn Surface, hue: f64) -> Color {
        self.draw_hue_silently(surface, hue);
        self.marker_color(surface)
    }

    /// Redraws for `hsl.h`, then picks the point for `hsl.s` / `hsl.l`.
    ///
    /// The hue has to reach the surface before the pick reads its pixel back.
    pub fn set_hsl(&mut self, surface: &mut dyn Surface, hsl: Hsl) -> Color {
        let p = self.point_for(hsl.s, hsl.l);
        debug!(?hsl, x = p.x, y = p.y, "square set_hsl");
        self.draw_hue_silently(surface, hsl.h);
        self.pick(surface, p)
    }

    pub fn set_rgb(&mut self, surface: &mut dyn Surface, rgb: Rgb) -> Color {
        self.set_hsl(surface, rgb_to_hsl(rgb))
    }
}

impl Shape for SaturationSquare {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.render_region(surface, self.bounds.region());
        self.marker.draw(surface);
    }
}

impl Pickable for SaturationSquare {
    fn color_at(&self, p: DVec2) -> Rgb {
        hsl_to_rgb(self.hsl_at(p))
    }

    fn marker(&self) -> &Marker {
        &self.marker
    }

    fn marker_mut(&mut self) -> &mut Marker {
        &mut self.marker
    }
}
