//! Pointer-driven creation, move and resize of boxes.
//!
//! The controller works in screen pixels for hit testing and in view units
//! for the rectangles it reports. It knows the zoom scale but nothing about
//! rotation or pages: the host projects the current page's boxes into view
//! space, feeds them in with every event, and converts whatever comes back
//! to canonical space itself.
//!
//! A change is always reported as the complete box set of the page, never
//! as a single edited box.

mod capture;
mod gesture;

pub use capture::{NoCapture, PointerCapture};
pub use gesture::{Gesture, Handle};

use crate::config::{DEFAULT_HANDLE_RADIUS, DEFAULT_MIN_BOX_SIZE, EditorConfig};
use crate::model::{BoxKind, ViewBox};
use capture::CaptureGuard;
use sheetmark_geom::{ScreenPoint, ScreenRect, ViewRect, Zoom};

/// Thresholds used by the controller, all in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionSettings {
    /// A drawn box must be wider and taller than this to be kept
    pub min_box_size: f64,
    /// Distance from a corner within which the handle is grabbed
    pub handle_radius: f64,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            min_box_size: DEFAULT_MIN_BOX_SIZE,
            handle_radius: DEFAULT_HANDLE_RADIUS,
        }
    }
}

impl From<&EditorConfig> for SelectionSettings {
    fn from(config: &EditorConfig) -> Self {
        Self {
            min_box_size: config.min_box_size,
            handle_radius: config.handle_radius,
        }
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A corner handle of `boxes[index]`
    Handle { index: usize, handle: Handle },
    /// The body of `boxes[index]`
    Body { index: usize },
    /// Empty page area
    Canvas,
}

/// Find what lies under `point`.
///
/// Later boxes are drawn on top, so they are tested first. For each box its
/// corner handles are tried before its body, so a handle can be grabbed just
/// outside the box, but a box drawn over another one hides the lower box's
/// corners.
pub fn hit_test(
    point: &ScreenPoint,
    boxes: &[ViewBox],
    zoom: &Zoom,
    handle_radius: f64,
) -> HitTarget {
    for (index, view_box) in boxes.iter().enumerate().rev() {
        let rect = zoom.to_screen(&view_box.rect);
        for &handle in Handle::all() {
            if handle.position(&rect).distance_to(point) <= handle_radius {
                return HitTarget::Handle { index, handle };
            }
        }
        if rect.contains(point) {
            return HitTarget::Body { index };
        }
    }
    HitTarget::Canvas
}

/// What a completed or in-progress gesture did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Moved,
    Resized,
}

/// Updated box set for the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChange {
    pub kind: ChangeKind,
    /// Box that was created or edited
    pub id: String,
    /// Every box of the page, in view space, with the change applied
    pub boxes: Vec<ViewBox>,
}

/// Gesture state machine for one page overlay.
pub struct SelectionController<C: PointerCapture = NoCapture> {
    settings: SelectionSettings,
    gesture: Gesture,
    /// Whether empty-canvas drags draw new boxes
    active: bool,
    /// Kind assigned to new boxes
    kind: BoxKind,
    selected: Option<String>,
    capture: CaptureGuard<C>,
}

impl SelectionController<NoCapture> {
    pub fn new(settings: SelectionSettings) -> Self {
        Self::with_capture(settings, NoCapture)
    }
}

impl Default for SelectionController<NoCapture> {
    fn default() -> Self {
        Self::new(SelectionSettings::default())
    }
}

impl<C: PointerCapture> SelectionController<C> {
    /// Create a controller that acquires `capture` for each gesture.
    pub fn with_capture(settings: SelectionSettings, capture: C) -> Self {
        Self {
            settings,
            gesture: Gesture::Idle,
            active: false,
            kind: BoxKind::default(),
            selected: None,
            capture: CaptureGuard::new(capture),
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the pointer capture is currently held.
    pub fn is_capturing(&self) -> bool {
        self.capture.is_held()
    }

    /// Turn box drawing on or off. Turning it off drops any gesture in
    /// progress without reporting it.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.cancel();
        }
    }

    pub fn deactivate(&mut self) {
        self.set_active(false);
    }

    /// Abandon the current gesture, if any. Nothing is emitted.
    pub fn cancel(&mut self) {
        if !self.gesture.is_idle() {
            log::debug!("Gesture cancelled: {:?}", self.gesture);
        }
        self.gesture = Gesture::Idle;
        self.capture.release();
    }

    pub fn kind(&self) -> BoxKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: BoxKind) {
        self.kind = kind;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, id: Option<String>) {
        self.selected = id;
    }

    /// Drop every reference to a box that no longer exists.
    pub fn forget(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        if self.gesture.target() == Some(id) {
            self.cancel();
        }
    }

    /// Rectangle being drawn, in view units, for live display.
    pub fn preview(&self, zoom: &Zoom) -> Option<ViewRect> {
        self.gesture
            .creation_rect()
            .map(|rect| zoom.to_view(&rect))
    }

    /// Corner handle positions of `rect` on screen.
    pub fn handle_positions(rect: &ViewRect, zoom: &Zoom) -> [(Handle, ScreenPoint); 4] {
        let screen = zoom.to_screen(rect);
        [
            Handle::NorthWest,
            Handle::NorthEast,
            Handle::SouthWest,
            Handle::SouthEast,
        ]
        .map(|handle| (handle, handle.position(&screen)))
    }

    /// Start a gesture. Returns true if one started.
    ///
    /// Ignored while another gesture is in flight, so a press elsewhere
    /// during a drag can't start a second one.
    pub fn pointer_down(
        &mut self,
        point: ScreenPoint,
        boxes: &[ViewBox],
        zoom: &Zoom,
    ) -> bool {
        if !self.gesture.is_idle() {
            return false;
        }

        match hit_test(&point, boxes, zoom, self.settings.handle_radius) {
            HitTarget::Handle { index, handle } => {
                let target = &boxes[index];
                log::debug!("Resize {} from {} handle", target.id, handle.name());
                self.selected = Some(target.id.clone());
                self.gesture = Gesture::Resizing {
                    id: target.id.clone(),
                    handle,
                    start: point,
                    original: target.rect,
                };
            }
            HitTarget::Body { index } => {
                let target = &boxes[index];
                log::debug!("Move {}", target.id);
                self.selected = Some(target.id.clone());
                self.gesture = Gesture::Moving {
                    id: target.id.clone(),
                    start: point,
                    original: target.rect,
                };
            }
            HitTarget::Canvas => {
                self.selected = None;
                if !self.active {
                    return false;
                }
                log::debug!("Create {} box at {:?}", self.kind.name(), point);
                self.gesture = Gesture::Creating {
                    origin: point,
                    current: point,
                };
            }
        }

        self.capture.acquire();
        true
    }

    /// Track the pointer. Moves and resizes report the page on every call;
    /// creation only updates [`SelectionController::preview`].
    pub fn pointer_move(
        &mut self,
        point: ScreenPoint,
        boxes: &[ViewBox],
        zoom: &Zoom,
    ) -> Option<SelectionChange> {
        if let Gesture::Creating { current, .. } = &mut self.gesture {
            *current = point;
            return None;
        }
        self.edit_change(&point, boxes, zoom)
    }

    /// Finish the gesture. A drawn box that is too small is dropped.
    pub fn pointer_up(
        &mut self,
        point: ScreenPoint,
        boxes: &[ViewBox],
        zoom: &Zoom,
    ) -> Option<SelectionChange> {
        if self.gesture.is_idle() {
            return None;
        }

        let origin = match &self.gesture {
            Gesture::Creating { origin, .. } => Some(*origin),
            _ => None,
        };
        let change = match origin {
            Some(origin) => {
                let rect = ScreenRect::from_corners(origin, point);
                self.commit_creation(&rect, boxes, zoom)
            }
            None => self.edit_change(&point, boxes, zoom),
        };

        self.gesture = Gesture::Idle;
        self.capture.release();
        change
    }

    fn commit_creation(
        &mut self,
        rect: &ScreenRect,
        boxes: &[ViewBox],
        zoom: &Zoom,
    ) -> Option<SelectionChange> {
        let min = self.settings.min_box_size;
        if rect.width <= min || rect.height <= min {
            log::debug!(
                "Discarded {:.1}x{:.1} box (minimum {})",
                rect.width,
                rect.height,
                min
            );
            return None;
        }

        let id = uuid::Uuid::new_v4().to_string();
        let created = ViewBox::new(id.clone(), self.kind, zoom.to_view(rect));
        log::debug!(
            "Created {} box {} at {:?}",
            self.kind.name(),
            id,
            created.rect
        );

        let mut page = boxes.to_vec();
        page.push(created);
        self.selected = Some(id.clone());
        Some(SelectionChange {
            kind: ChangeKind::Created,
            id,
            boxes: page,
        })
    }

    fn edit_change(
        &self,
        point: &ScreenPoint,
        boxes: &[ViewBox],
        zoom: &Zoom,
    ) -> Option<SelectionChange> {
        let id = self.gesture.target()?;
        let rect = self.gesture.edited_rect(point, zoom)?;
        if !boxes.iter().any(|b| b.id == id) {
            return None;
        }

        let kind = match self.gesture {
            Gesture::Resizing { .. } => ChangeKind::Resized,
            _ => ChangeKind::Moved,
        };
        let page = boxes
            .iter()
            .map(|b| {
                if b.id == id {
                    ViewBox::new(b.id.clone(), b.kind, rect)
                } else {
                    b.clone()
                }
            })
            .collect();

        Some(SelectionChange {
            kind,
            id: id.to_string(),
            boxes: page,
        })
    }
}
