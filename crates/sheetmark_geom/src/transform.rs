//! Mapping between canonical and view space.
//!
//! Boxes are stored relative to the unrotated page. When the page is shown
//! rotated, each stored box is projected with [`to_view`]; whatever the user
//! draws or drags on the rotated page comes back through [`to_canonical`].
//! The two are exact inverses for all four rotations, which is what keeps a
//! saved box in the same place on the sheet however often the page is turned.

use crate::space::{CanonicalRect, Rect, ViewRect};
use crate::{GeomError, Rotation};
use serde::{Deserialize, Serialize};

/// Natural size of a page at 0° rotation, in canonical units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DocSize {
    pub width: f64,
    pub height: f64,
}

impl DocSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Validating constructor for sizes coming from a decoder or a file.
    pub fn try_new(width: f64, height: f64) -> Result<Self, GeomError> {
        let size = Self::new(width, height);
        if size.is_loaded() {
            Ok(size)
        } else {
            Err(GeomError::InvalidDimensions { width, height })
        }
    }

    /// Both dimensions are finite and positive.
    pub fn is_loaded(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Size of the page as rendered at `rotation`.
    pub fn rotated(&self, rotation: Rotation) -> DocSize {
        if rotation.swaps_axes() {
            DocSize::new(self.height, self.width)
        } else {
            *self
        }
    }
}

/// Rotate `rect` inside a `src_w` x `src_h` frame.
fn rotate_in_frame<S, T>(rect: &Rect<S>, rotation: Rotation, src_w: f64, src_h: f64) -> Rect<T> {
    let (x, y, width, height) = (rect.x, rect.y, rect.width, rect.height);
    match rotation {
        Rotation::Deg0 => rect.reinterpret(),
        Rotation::Deg90 => Rect::new(src_h - y - height, x, height, width),
        Rotation::Deg180 => Rect::new(src_w - x - width, src_h - y - height, width, height),
        Rotation::Deg270 => Rect::new(y, src_w - x - width, height, width),
    }
}

/// Project a canonical rectangle onto the page as rendered at `rotation`.
pub fn to_view(rect: &CanonicalRect, rotation: Rotation, doc: DocSize) -> ViewRect {
    rotate_in_frame(rect, rotation, doc.width, doc.height)
}

/// Bring a view rectangle back to canonical space.
///
/// Applies the inverse rotation using the *view* frame as the source, whose
/// width and height are swapped relative to `doc` at 90° and 270°.
pub fn to_canonical(rect: &ViewRect, rotation: Rotation, doc: DocSize) -> CanonicalRect {
    let view = doc.rotated(rotation);
    rotate_in_frame(rect, rotation.inverse(), view.width, view.height)
}

/// A document size and rotation bundled for repeated conversions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportTransform {
    pub doc: DocSize,
    pub rotation: Rotation,
}

impl ViewportTransform {
    pub fn new(doc: DocSize, rotation: Rotation) -> Self {
        Self { doc, rotation }
    }

    pub fn to_view(&self, rect: &CanonicalRect) -> ViewRect {
        to_view(rect, self.rotation, self.doc)
    }

    pub fn to_canonical(&self, rect: &ViewRect) -> CanonicalRect {
        to_canonical(rect, self.rotation, self.doc)
    }

    /// Page size in view space.
    pub fn view_size(&self) -> DocSize {
        self.doc.rotated(self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn sample_rects() -> Vec<CanonicalRect> {
        vec![
            CanonicalRect::new(10.0, 20.0, 100.0, 50.0),
            CanonicalRect::new(0.0, 0.0, 600.0, 800.0),
            CanonicalRect::new(0.1, 799.3, 12.25, 0.7),
            CanonicalRect::new(-40.0, 35.5, 3.0, 1000.0),
            CanonicalRect::new(1e6, -1e6, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_concrete_90_degree_example() {
        let doc = DocSize::new(600.0, 800.0);
        let canonical = CanonicalRect::new(10.0, 20.0, 100.0, 50.0);

        let view = to_view(&canonical, Rotation::Deg90, doc);
        assert_eq!(view, ViewRect::new(730.0, 10.0, 50.0, 100.0));

        let back = to_canonical(&view, Rotation::Deg90, doc);
        assert_eq!(back, canonical);
    }

    #[test]
    fn test_each_rotation_formula() {
        let doc = DocSize::new(600.0, 800.0);
        let r = CanonicalRect::new(10.0, 20.0, 100.0, 50.0);

        assert_eq!(
            to_view(&r, Rotation::Deg0, doc),
            ViewRect::new(10.0, 20.0, 100.0, 50.0)
        );
        assert_eq!(
            to_view(&r, Rotation::Deg180, doc),
            ViewRect::new(600.0 - 10.0 - 100.0, 800.0 - 20.0 - 50.0, 100.0, 50.0)
        );
        assert_eq!(
            to_view(&r, Rotation::Deg270, doc),
            ViewRect::new(20.0, 600.0 - 10.0 - 100.0, 50.0, 100.0)
        );
    }

    #[test]
    fn test_round_trip_all_rotations() {
        for doc in [
            DocSize::new(600.0, 800.0),
            DocSize::new(1.0, 1.0),
            DocSize::new(2384.0, 1684.0),
        ] {
            for &rotation in Rotation::all() {
                for rect in sample_rects() {
                    let view = to_view(&rect, rotation, doc);
                    let back = to_canonical(&view, rotation, doc);
                    assert!(
                        back.approx_eq(&rect, EPSILON),
                        "{:?} at {:?} on {:?} came back as {:?}",
                        rect,
                        rotation,
                        doc,
                        back
                    );
                }
            }
        }
    }

    #[test]
    fn test_identity_at_zero() {
        let doc = DocSize::new(123.0, 456.0);
        for rect in sample_rects() {
            assert_eq!(to_view(&rect, Rotation::Deg0, doc), rect.reinterpret());
            let view: ViewRect = rect.reinterpret();
            assert_eq!(to_canonical(&view, Rotation::Deg0, doc), rect);
        }
    }

    #[test]
    fn test_dimension_swap_on_quarter_turns() {
        let doc = DocSize::new(600.0, 800.0);
        for rotation in [Rotation::Deg90, Rotation::Deg270] {
            for rect in sample_rects() {
                let view = to_view(&rect, rotation, doc);
                assert_eq!(view.width, rect.height);
                assert_eq!(view.height, rect.width);
            }
        }
    }

    #[test]
    fn test_full_page_stays_full_page() {
        let doc = DocSize::new(600.0, 800.0);
        let page = CanonicalRect::new(0.0, 0.0, 600.0, 800.0);
        for &rotation in Rotation::all() {
            let t = ViewportTransform::new(doc, rotation);
            let size = t.view_size();
            assert_eq!(
                t.to_view(&page),
                ViewRect::new(0.0, 0.0, size.width, size.height)
            );
        }
    }

    #[test]
    fn test_doc_size_validation() {
        assert!(DocSize::try_new(600.0, 800.0).is_ok());
        assert!(DocSize::try_new(0.0, 800.0).is_err());
        assert!(DocSize::try_new(600.0, f64::NAN).is_err());
        assert!(!DocSize::default().is_loaded());
    }
}
