//! Zoom and fit mathematics.
//!
//! The zoom scale is the number of screen pixels per view unit. It is
//! independent of rotation: fitting uses the rotated page size, but the
//! scale itself applies the same way to both axes.

use crate::space::{Rect, ScreenPoint, ScreenRect, ViewPoint, ViewRect};
use crate::transform::DocSize;

/// Smallest scale allowed unless configured otherwise.
pub const DEFAULT_MIN_SCALE: f64 = 0.1;

/// Largest scale allowed unless configured otherwise.
pub const DEFAULT_MAX_SCALE: f64 = 5.0;

/// Clamped zoom scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    scale: f64,
    min: f64,
    max: f64,
}

impl Zoom {
    /// Create a zoom with the given bounds; `scale` is clamped into them.
    pub fn new(scale: f64, min: f64, max: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        let mut zoom = Self {
            scale: min.max(1.0).min(max),
            min,
            max,
        };
        zoom.set(scale);
        zoom
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Set a new scale, clamped. Non-finite values are ignored.
    /// Returns the scale now in effect.
    pub fn set(&mut self, scale: f64) -> f64 {
        if scale.is_finite() {
            self.scale = scale.clamp(self.min, self.max);
        }
        self.scale
    }

    /// Zoom in by a factor (e.g., 1.2 for 20% zoom in).
    pub fn zoom_in(&mut self, factor: f64) -> f64 {
        self.set(self.scale * factor)
    }

    /// Zoom out by a factor (e.g., 1.2 for 20% zoom out).
    pub fn zoom_out(&mut self, factor: f64) -> f64 {
        self.set(self.scale / factor)
    }

    /// Back to 1:1, or the nearest bound if 1 is outside them.
    pub fn reset(&mut self) -> f64 {
        self.set(1.0)
    }

    /// Scale so the page width fills `container_width` pixels.
    ///
    /// `view` is the page size as rendered, i.e. already rotated. Nothing
    /// changes if either the page or the container is empty.
    pub fn fit_width(&mut self, container_width: f64, view: DocSize) -> f64 {
        if !view.is_loaded() || container_width <= 0.0 {
            return self.scale;
        }
        self.set(container_width / view.width)
    }

    /// Scale so the whole page fits inside the container.
    pub fn fit_page(&mut self, container_width: f64, container_height: f64, view: DocSize) -> f64 {
        if !view.is_loaded() || container_width <= 0.0 || container_height <= 0.0 {
            return self.scale;
        }
        let sx = container_width / view.width;
        let sy = container_height / view.height;
        self.set(sx.min(sy))
    }

    pub fn to_screen(&self, rect: &ViewRect) -> ScreenRect {
        rect.recast(self.scale)
    }

    pub fn to_view(&self, rect: &ScreenRect) -> ViewRect {
        rect.recast(1.0 / self.scale)
    }

    pub fn point_to_view(&self, point: &ScreenPoint) -> ViewPoint {
        point.recast(1.0 / self.scale)
    }

    /// Convert a pixel distance to view units.
    pub fn length_to_view(&self, pixels: f64) -> f64 {
        pixels / self.scale
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new(1.0, DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE)
    }
}

/// Page outline in screen pixels at the given zoom.
pub fn page_outline(view: DocSize, zoom: &Zoom) -> ScreenRect {
    zoom.to_screen(&Rect::new(0.0, 0.0, view.width, view.height))
}
