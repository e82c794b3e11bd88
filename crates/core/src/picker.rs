//! The picker controller: a hue ring around a saturation/lightness square.
//!
//! The controller owns the surface and both shapes. Pointer presses, and
//! moves while a drag is active, are routed to the first shape containing the
//! point (ring, then square). A hue pick redraws the square for the new hue;
//! every square pick or programmatic setter ends in one outward "color picked"
//! notification delivered to all subscribers.
//!
//! Each shape only knows how to redraw itself, so after a shape moves its
//! marker or redraws, the controller repaints the affected marker boxes from
//! both shapes and both markers. The surface then always matches what a full
//! [`ColorPicker::draw`] would produce.

use glam::DVec2;
use tracing::{debug, info, trace};

use crate::color::{Color, Hsl, Rgb};
use crate::config::PickerConfig;
use crate::error::PickerError;
use crate::hue_ring::HueRing;
use crate::shape::{Bounds, Pickable, Region, Shape};
use crate::square::SaturationSquare;
use crate::surface::{PixelSurface, Surface};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A pointer event in client (page viewport) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub client: DVec2,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Down,
            client: DVec2::new(x, y),
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Move,
            client: DVec2::new(x, y),
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Up,
            client: DVec2::new(x, y),
        }
    }
}

/// Where the surface sits on the page: its element offset and the current
/// page scroll.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceOrigin {
    pub offset: DVec2,
    pub scroll: DVec2,
}

impl SurfaceOrigin {
    /// Converts client coordinates to surface-local coordinates.
    pub fn to_local(&self, client: DVec2) -> DVec2 {
        client - self.offset + self.scroll
    }
}

/// Pointer cursor the host should show over the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
}

/// A source of pointer events, such as a UI toolkit's event queue.
pub trait PointerSource {
    fn next_event(&mut self) -> Option<PointerEvent>;
}

impl<I: Iterator<Item = PointerEvent>> PointerSource for I {
    fn next_event(&mut self) -> Option<PointerEvent> {
        self.next()
    }
}

/// Handle returned by [`ColorPicker::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&Color)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    HueRing,
    Square,
}

#[derive(Debug, Clone, Copy)]
enum Notification {
    HuePicked(Color),
    SquarePicked(Color),
}

/// Interactive color picker over a drawing surface.
pub struct ColorPicker<S: Surface = PixelSurface> {
    surface: S,
    config: PickerConfig,
    hue_ring: HueRing,
    square: SaturationSquare,
    origin: SurfaceOrigin,
    dragging: bool,
    cursor: Cursor,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl ColorPicker<PixelSurface> {
    /// Builds an in-memory surface of `config.size` pixels square and a picker on it.
    pub fn from_config(config: PickerConfig) -> Result<Self, PickerError> {
        config.validate()?;
        let surface = PixelSurface::new(config.size, config.size)?;
        Self::new(surface, config)
    }
}

impl<S: Surface> ColorPicker<S> {
    /// Lays out the ring and square on `surface` and draws them.
    ///
    /// The surface must be square; its side overrides `config.size`. The ring
    /// spans the whole surface; the square has half its side and is centered
    /// in the ring.
    pub fn new(surface: S, config: PickerConfig) -> Result<Self, PickerError> {
        if surface.height() == 0 || surface.width() != surface.height() {
            return Err(PickerError::InvalidDimensions);
        }
        let config = config.with_size(surface.width());
        config.validate()?;

        let width = surface.width() as f64;
        let height = surface.height() as f64;
        let hue_ring = HueRing::new(Bounds::new(0.0, 0.0, width, height), config.marker_width);

        let side = width / 2.0;
        let pos = hue_ring.bounds().center().x - side / 2.0;
        let square = SaturationSquare::new(Bounds::new(pos, pos, side, side), config.marker_width);

        info!(
            width = surface.width(),
            height = surface.height(),
            marker_width = config.marker_width,
            "color picker created"
        );

        let mut picker = Self {
            surface,
            config,
            hue_ring,
            square,
            origin: SurfaceOrigin::default(),
            dragging: false,
            cursor: Cursor::Default,
            listeners: Vec::new(),
            next_listener: 0,
        };
        picker.draw();
        Ok(picker)
    }

    /// Fully redraws the ring and the square, then notifies subscribers of the
    /// color under the square's marker.
    pub fn draw(&mut self) {
        self.hue_ring.draw(&mut self.surface);
        let hue = self.square.hue();
        let color = self.square.draw_hue(&mut self.surface, hue);
        self.dispatch(Notification::SquarePicked(color));
    }

    /// Runs a shape operation, then repaints every marker box it may have
    /// touched, before and after the operation.
    fn repairing<T>(
        &mut self,
        op: impl FnOnce(&mut HueRing, &mut SaturationSquare, &mut dyn Surface) -> T,
    ) -> T {
        let before = self.marker_regions();
        let out = op(&mut self.hue_ring, &mut self.square, &mut self.surface);
        let after = self.marker_regions();
        for region in before.into_iter().chain(after) {
            self.repaint(region);
        }
        out
    }

    fn marker_regions(&self) -> [Region; 2] {
        [
            self.hue_ring.marker().dirty_region(),
            self.square.marker().dirty_region(),
        ]
    }

    /// Redraws `region` exactly as a full redraw would leave it.
    ///
    /// The region is first grown to enclose any marker box it touches, so
    /// every marker stroke lands on freshly painted pixels.
    fn repaint(&mut self, region: Region) {
        let markers = self.marker_regions();
        let mut area = region;
        loop {
            let grown = markers
                .iter()
                .filter(|m| m.intersects(&area))
                .fold(area, |acc, m| acc.union(m));
            if grown == area {
                break;
            }
            area = grown;
        }
        trace!(?area, "repaint");

        self.hue_ring.render_region(&mut self.surface, area);
        if let Some(inner) = area.intersection(&self.square.bounds().region()) {
            self.square.render_region(&mut self.surface, inner);
        }
        if markers[0].intersects(&area) {
            self.hue_ring.marker().draw(&mut self.surface);
        }
        if markers[1].intersects(&area) {
            self.square.marker().draw(&mut self.surface);
        }
    }

    /// The color under the square's marker.
    pub fn get_color(&self) -> Color {
        self.square.marker_color(&self.surface)
    }

    pub fn get_rgb(&self) -> Rgb {
        self.get_color().rgb
    }

    pub fn get_hsl(&self) -> Hsl {
        self.get_color().hsl
    }

    /// Moves both markers to `rgb` and notifies subscribers once.
    pub fn set_rgb(&mut self, rgb: Rgb) {
        debug!(?rgb, "set_rgb");
        self.repairing(|ring, square, surface| {
            ring.set_rgb(surface, rgb);
            square.set_rgb(surface, rgb);
        });
        self.dispatch(Notification::SquarePicked(self.get_color()));
    }

    /// Moves both markers to `hsl` and notifies subscribers once.
    pub fn set_hsl(&mut self, hsl: Hsl) {
        debug!(?hsl, "set_hsl");
        self.repairing(|ring, square, surface| {
            ring.set_hsl(surface, hsl);
            square.set_hsl(surface, hsl);
        });
        self.dispatch(Notification::SquarePicked(self.get_color()));
    }

    /// Parses a hex color and applies it with [`set_rgb`](Self::set_rgb).
    ///
    /// Malformed input leaves the picker untouched.
    pub fn set_hex(&mut self, hex: &str) -> Result<(), PickerError> {
        let rgb = Rgb::from_hex(hex)?;
        self.set_rgb(rgb);
        Ok(())
    }

    /// Registers a callback for "color picked" notifications.
    pub fn subscribe(&mut self, listener: impl FnMut(&Color) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Handles one pointer event given in client coordinates.
    pub fn handle(&mut self, event: PointerEvent) {
        let p = self.origin.to_local(event.client);
        match event.kind {
            PointerKind::Down => self.pointer_down(p),
            PointerKind::Move => self.pointer_move(p),
            PointerKind::Up => self.pointer_up(),
        }
    }

    /// Drains `source`, handling every event. Returns the number handled.
    pub fn process(&mut self, source: &mut dyn PointerSource) -> usize {
        let mut handled = 0;
        while let Some(event) = source.next_event() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    /// Starts a drag and picks at surface-local `p`.
    pub fn pointer_down(&mut self, p: DVec2) {
        self.dragging = true;
        self.interact(p);
    }

    /// Updates the hover cursor and, while dragging, picks at `p`.
    pub fn pointer_move(&mut self, p: DVec2) {
        self.cursor = match self.target_at(p) {
            Some(_) => Cursor::Crosshair,
            None => Cursor::Default,
        };
        if self.dragging {
            self.interact(p);
        }
    }

    /// Ends the drag, wherever the pointer is.
    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn origin(&self) -> SurfaceOrigin {
        self.origin
    }

    /// Updates the element offset and page scroll used to translate events.
    pub fn set_origin(&mut self, origin: SurfaceOrigin) {
        self.origin = origin;
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn hue_ring(&self) -> &HueRing {
        &self.hue_ring
    }

    pub fn square(&self) -> &SaturationSquare {
        &self.square
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    fn target_at(&self, p: DVec2) -> Option<Target> {
        if self.hue_ring.contains_point(p) {
            Some(Target::HueRing)
        } else if self.square.contains_point(p) {
            Some(Target::Square)
        } else {
            None
        }
    }

    fn interact(&mut self, p: DVec2) {
        let p = p.round();
        match self.target_at(p) {
            Some(Target::HueRing) => {
                self.repairing(|ring, _, surface| ring.pick_silently(surface, p));
                let color = self.hue_ring.marker_color(&self.surface);
                self.dispatch(Notification::HuePicked(color));
            }
            Some(Target::Square) => {
                self.repairing(|_, square, surface| square.pick_silently(surface, p));
                self.dispatch(Notification::SquarePicked(self.get_color()));
            }
            None => trace!(x = p.x, y = p.y, "pointer outside both shapes"),
        }
    }

    fn dispatch(&mut self, notification: Notification) {
        match notification {
            Notification::HuePicked(color) => {
                debug!(hue = color.hsl.h, "hue picked");
                let hue = color.hsl.h;
                self.repairing(|_, square, surface| square.draw_hue_silently(surface, hue));
                self.dispatch(Notification::SquarePicked(self.get_color()));
            }
            Notification::SquarePicked(color) => {
                debug!(rgb = %color.rgb.to_hex(), "color picked");
                for (_, listener) in self.listeners.iter_mut() {
                    listener(&color);
                }
            }
        }
    }
}
