//! Gesture states and the per-gesture rectangle math.

use sheetmark_geom::{ScreenPoint, ScreenRect, ViewRect, Zoom};

/// One of the four corner handles of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Handle {
    pub fn all() -> &'static [Handle] {
        &[
            Handle::NorthWest,
            Handle::NorthEast,
            Handle::SouthWest,
            Handle::SouthEast,
        ]
    }

    /// Short compass name (`nw`, `ne`, `sw`, `se`).
    pub fn name(&self) -> &'static str {
        match self {
            Handle::NorthWest => "nw",
            Handle::NorthEast => "ne",
            Handle::SouthWest => "sw",
            Handle::SouthEast => "se",
        }
    }

    fn moves_top(&self) -> bool {
        matches!(self, Handle::NorthWest | Handle::NorthEast)
    }

    fn moves_left(&self) -> bool {
        matches!(self, Handle::NorthWest | Handle::SouthWest)
    }

    /// Where this handle sits on `rect`.
    pub fn position(&self, rect: &ScreenRect) -> ScreenPoint {
        let x = if self.moves_left() { rect.x } else { rect.right() };
        let y = if self.moves_top() { rect.y } else { rect.bottom() };
        ScreenPoint::new(x, y)
    }

    /// Drag this handle of `rect` by (`dx`, `dy`) view units.
    ///
    /// West handles move the left edge, east handles the right edge, and
    /// likewise north/south for top/bottom. Dragging past the opposite edge
    /// flips the rectangle instead of giving it a negative size.
    pub fn apply(&self, rect: &ViewRect, dx: f64, dy: f64) -> ViewRect {
        let mut r = *rect;
        if self.moves_left() {
            r.x += dx;
            r.width -= dx;
        } else {
            r.width += dx;
        }
        if self.moves_top() {
            r.y += dy;
            r.height -= dy;
        } else {
            r.height += dy;
        }
        r.normalized()
    }
}

/// The gesture in progress. At most one at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    /// Nothing in progress.
    #[default]
    Idle,
    /// Drawing a new box from `origin` to `current` (screen pixels).
    Creating {
        origin: ScreenPoint,
        current: ScreenPoint,
    },
    /// Dragging an existing box by its body.
    Moving {
        id: String,
        start: ScreenPoint,
        original: ViewRect,
    },
    /// Dragging one corner of an existing box.
    Resizing {
        id: String,
        handle: Handle,
        start: ScreenPoint,
        original: ViewRect,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn is_creating(&self) -> bool {
        matches!(self, Gesture::Creating { .. })
    }

    /// Id of the box being moved or resized.
    pub fn target(&self) -> Option<&str> {
        match self {
            Gesture::Moving { id, .. } | Gesture::Resizing { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Live rectangle of a creation drag, normalized.
    pub fn creation_rect(&self) -> Option<ScreenRect> {
        match self {
            Gesture::Creating { origin, current } => {
                Some(ScreenRect::from_corners(*origin, *current))
            }
            _ => None,
        }
    }

    /// Rectangle of the edited box with the pointer at `point`.
    ///
    /// The pointer delta since gesture start is converted to view units by
    /// dividing by the zoom scale, then applied to the box as it was when
    /// the gesture started.
    pub fn edited_rect(&self, point: &ScreenPoint, zoom: &Zoom) -> Option<ViewRect> {
        match self {
            Gesture::Moving {
                start, original, ..
            } => {
                let (dx, dy) = point.delta_from(start);
                let (dx, dy) = (zoom.length_to_view(dx), zoom.length_to_view(dy));
                Some(original.translated(dx, dy))
            }
            Gesture::Resizing {
                handle,
                start,
                original,
                ..
            } => {
                let (dx, dy) = point.delta_from(start);
                Some(handle.apply(
                    original,
                    zoom.length_to_view(dx),
                    zoom.length_to_view(dy),
                ))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zoom(scale: f64) -> Zoom {
        Zoom::new(scale, 0.1, 5.0)
    }

    #[test]
    fn test_se_handle_grows() {
        let r = ViewRect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(
            Handle::SouthEast.apply(&r, 5.0, 7.0),
            ViewRect::new(10.0, 10.0, 25.0, 27.0)
        );
    }

    #[test]
    fn test_se_handle_flips_past_left_edge() {
        let r = ViewRect::new(10.0, 10.0, 20.0, 20.0);
        let out = Handle::SouthEast.apply(&r, -30.0, 0.0);
        // x' = x + w + dx when w + dx < 0
        assert_eq!(out, ViewRect::new(0.0, 10.0, 10.0, 20.0));
        assert!(out.is_normalized());
    }

    #[test]
    fn test_nw_handle_moves_origin() {
        let r = ViewRect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(
            Handle::NorthWest.apply(&r, 4.0, -6.0),
            ViewRect::new(14.0, 4.0, 16.0, 26.0)
        );
    }

    #[test]
    fn test_ne_and_sw_handles() {
        let r = ViewRect::new(10.0, 10.0, 20.0, 20.0);
        assert_eq!(
            Handle::NorthEast.apply(&r, 5.0, 5.0),
            ViewRect::new(10.0, 15.0, 25.0, 15.0)
        );
        assert_eq!(
            Handle::SouthWest.apply(&r, 5.0, 5.0),
            ViewRect::new(15.0, 10.0, 15.0, 25.0)
        );
    }

    #[test]
    fn test_nw_handle_flips_both_axes() {
        let r = ViewRect::new(10.0, 10.0, 20.0, 20.0);
        let out = Handle::NorthWest.apply(&r, 30.0, 25.0);
        assert_eq!(out, ViewRect::new(30.0, 30.0, 10.0, 5.0));
    }

    #[test]
    fn test_handle_positions() {
        let r = ScreenRect::new(0.0, 0.0, 10.0, 20.0);
        assert_eq!(Handle::NorthWest.position(&r), ScreenPoint::new(0.0, 0.0));
        assert_eq!(Handle::NorthEast.position(&r), ScreenPoint::new(10.0, 0.0));
        assert_eq!(Handle::SouthWest.position(&r), ScreenPoint::new(0.0, 20.0));
        assert_eq!(Handle::SouthEast.position(&r), ScreenPoint::new(10.0, 20.0));
    }

    #[test]
    fn test_move_delta_divided_by_scale() {
        let g = Gesture::Moving {
            id: "a".into(),
            start: ScreenPoint::new(100.0, 100.0),
            original: ViewRect::new(0.0, 0.0, 50.0, 50.0),
        };
        let out = g.edited_rect(&ScreenPoint::new(120.0, 110.0), &zoom(2.0));
        assert_eq!(out, Some(ViewRect::new(10.0, 5.0, 50.0, 50.0)));
    }

    #[test]
    fn test_creation_rect_normalized_mid_drag() {
        let g = Gesture::Creating {
            origin: ScreenPoint::new(50.0, 50.0),
            current: ScreenPoint::new(20.0, 70.0),
        };
        assert_eq!(
            g.creation_rect(),
            Some(ScreenRect::new(20.0, 50.0, 30.0, 20.0))
        );
        let anywhere = ScreenPoint::new(0.0, 0.0);
        assert!(g.edited_rect(&anywhere, &zoom(1.0)).is_none());
    }
}
