//! Sheet geometry.
//!
//! Pure coordinate math for the annotation editor: rectangles tagged with the
//! space they live in, the four supported page rotations, the mapping between
//! canonical (unrotated) and view (rotated) space, and zoom/fit scaling into
//! screen pixels.
//!
//! Nothing here holds editor state. Every function takes its inputs by value
//! and returns a new value, so the whole crate can be tested in isolation.

mod error;
mod rotation;
mod space;
mod transform;
mod zoom;

pub use error::GeomError;
pub use rotation::{Rotation, normalize_degrees};
pub use space::{
    Canonical, CanonicalPoint, CanonicalRect, Point, Rect, Screen, ScreenPoint, ScreenRect, View,
    ViewPoint, ViewRect,
};
pub use transform::{DocSize, ViewportTransform, to_canonical, to_view};
pub use zoom::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, Zoom, page_outline};
