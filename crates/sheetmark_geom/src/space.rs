//! Points and rectangles tagged with their coordinate space.
//!
//! Canonical, view and screen rectangles share the same shape, which makes
//! them easy to mix up. Each one carries a zero-sized marker so that a
//! `ViewRect` cannot be passed where a `CanonicalRect` is expected; the only
//! way across is through [`crate::to_view`], [`crate::to_canonical`] or the
//! [`crate::Zoom`] conversions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Document coordinates at 0° rotation (PDF points or image pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Canonical;

/// Document coordinates as currently rendered (after rotation), unscaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct View;

/// View coordinates multiplied by the zoom scale; what pointer events use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Screen;

// ============================================================================
// Point
// ============================================================================

/// A 2D point in space `S`.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Point<S> {
    pub x: f64,
    pub y: f64,
    #[serde(skip)]
    space: PhantomData<S>,
}

pub type CanonicalPoint = Point<Canonical>;
pub type ViewPoint = Point<View>;
pub type ScreenPoint = Point<Screen>;

impl<S> Point<S> {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            space: PhantomData,
        }
    }

    /// Offset from `origin` to `self`.
    pub fn delta_from(&self, origin: &Point<S>) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }

    /// Distance to another point in the same space.
    pub fn distance_to(&self, other: &Point<S>) -> f64 {
        let (dx, dy) = self.delta_from(other);
        (dx * dx + dy * dy).sqrt()
    }

    pub(crate) fn recast<T>(&self, factor: f64) -> Point<T> {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl<S> fmt::Debug for Point<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ============================================================================
// Rect
// ============================================================================

/// An axis-aligned rectangle in space `S`.
///
/// `width` and `height` can be negative while a handle is being dragged;
/// [`Rect::normalized`] folds such a rectangle back so the size is
/// non-negative. Anything stored or committed is normalized.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Rect<S> {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip)]
    space: PhantomData<S>,
}

pub type CanonicalRect = Rect<Canonical>;
pub type ViewRect = Rect<View>;
pub type ScreenRect = Rect<Screen>;

impl<S> Rect<S> {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            space: PhantomData,
        }
    }

    /// Axis-aligned bounding box of two corner points, always normalized.
    pub fn from_corners(a: Point<S>, b: Point<S>) -> Self {
        Self::new(
            a.x.min(b.x),
            a.y.min(b.y),
            (a.x - b.x).abs(),
            (a.y - b.y).abs(),
        )
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_normalized(&self) -> bool {
        self.width >= 0.0 && self.height >= 0.0
    }

    /// Flip a negative width or height so the rectangle covers the same area
    /// with a non-negative size.
    pub fn normalized(self) -> Self {
        let mut rect = self;
        if rect.width < 0.0 {
            rect.x += rect.width;
            rect.width = -rect.width;
        }
        if rect.height < 0.0 {
            rect.y += rect.height;
            rect.height = -rect.height;
        }
        rect
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: &Point<S>) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Component-wise comparison within `epsilon`.
    pub fn approx_eq(&self, other: &Rect<S>, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.width - other.width).abs() <= epsilon
            && (self.height - other.height).abs() <= epsilon
    }

    /// Same numbers in a different space. Only the conversion functions of
    /// this crate are allowed to do this.
    pub(crate) fn reinterpret<T>(&self) -> Rect<T> {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub(crate) fn recast<T>(&self, factor: f64) -> Rect<T> {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

impl<S> fmt::Debug for Rect<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rect")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
