//! Viewport and coordinate transformation.
//!
//! Converts between screen space (viewport pixels, 0,0 at top-left) and
//! world space (background image pixels). Both spaces have +Y pointing
//! down, so the mapping is a uniform scale plus a translation:
//!
//! ```text
//! world  = (screen - offset) / zoom
//! screen = world * zoom + offset
//! ```
//!
//! The view state is never part of the design and never enters history.

use std::fmt;

use sitemark_core::constants::{MAX_ZOOM, MIN_ZOOM, VIEW_PADDING};

use crate::geometry::Bounds;
use crate::model::Point;

/// Zoom and pan state plus the size of the drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    offset_x: f64,
    offset_y: f64,
    width: f64,
    height: f64,
}

impl Viewport {
    /// Creates a viewport at zoom 1 with the world origin at the top-left.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            width,
            height,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// World-to-screen translation.
    pub fn offset(&self) -> Point {
        Point::new(self.offset_x, self.offset_y)
    }

    /// Sets the zoom level about the screen origin, clamped to
    /// `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn set_offset(&mut self, x: f64, y: f64) {
        self.offset_x = x;
        self.offset_y = y;
    }

    /// Pans by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    pub fn to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset_x) / self.zoom,
            (screen.y - self.offset_y) / self.zoom,
        )
    }

    pub fn to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.zoom + self.offset_x,
            world.y * self.zoom + self.offset_y,
        )
    }

    /// Converts a screen-space distance (e.g. a snap radius) to world units.
    pub fn screen_to_world_distance(&self, pixels: f64) -> f64 {
        pixels / self.zoom
    }

    /// Multiplies the zoom by `factor` keeping the world point under
    /// `screen` fixed on screen.
    pub fn zoom_at(&mut self, screen: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor = self.to_world(screen);
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.zoom = new_zoom;
        self.offset_x = screen.x - anchor.x * new_zoom;
        self.offset_y = screen.y - anchor.y * new_zoom;
    }

    /// Changes the surface size keeping the world point that was at the
    /// old centre at the new centre.
    pub fn resize(&mut self, width: f64, height: f64) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let center = self.to_world(Point::new(self.width / 2.0, self.height / 2.0));
        self.width = width;
        self.height = height;
        self.center_on(center);
    }

    /// Pans so that `world` sits in the middle of the surface.
    pub fn center_on(&mut self, world: Point) {
        self.offset_x = self.width / 2.0 - world.x * self.zoom;
        self.offset_y = self.height / 2.0 - world.y * self.zoom;
    }

    /// Fits the given world bounds into the surface, reserving `padding`
    /// (fraction of the surface) on each side, and centres them.
    pub fn fit_to_bounds(&mut self, bounds: &Bounds, padding: f64) {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return;
        }
        let padding_factor = 1.0 - padding * 2.0;
        let zoom_x = self.width * padding_factor / bounds.width();
        let zoom_y = self.height * padding_factor / bounds.height();
        self.zoom = zoom_x.min(zoom_y).clamp(MIN_ZOOM, MAX_ZOOM);
        self.center_on(bounds.center());
    }

    /// [`Viewport::fit_to_bounds`] with the default padding.
    pub fn fit_to_view(&mut self, bounds: &Bounds) {
        self.fit_to_bounds(bounds, VIEW_PADDING);
    }

    /// World-space rectangle currently visible.
    pub fn visible_bounds(&self) -> Bounds {
        Bounds::from_corners(
            self.to_world(Point::new(0.0, 0.0)),
            self.to_world(Point::new(self.width, self.height)),
        )
    }

    /// Resets to zoom 1 with the world origin at the top-left.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Offset: ({:.1}, {:.1})",
            self.zoom, self.offset_x, self.offset_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
