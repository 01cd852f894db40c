//! Page-level coordination of the annotation editor.
//!
//! [`Editor`] owns the authoritative box collection in canonical space. For
//! display it filters the collection to the current page and projects each
//! box into view space. Pointer events go to the [`SelectionController`]
//! together with that projection; when the controller reports a change, the
//! editor converts the page's boxes back to canonical space and replaces the
//! current page's boxes wholesale. Boxes on other pages are never touched.

use crate::config::EditorConfig;
use crate::error::{Error, Result};
use crate::model::{BBox, BoxKind, DEFAULT_PAGE, ViewBox};
use crate::persist::SavePayload;
use crate::selection::{
    NoCapture, PointerCapture, SelectionChange, SelectionController, SelectionSettings,
};
use sheetmark_geom::{
    DocSize, Rotation, ScreenPoint, ScreenRect, ViewRect, ViewportTransform, Zoom, page_outline,
};
use std::collections::HashSet;

/// Annotation editor for one document.
pub struct Editor {
    config: EditorConfig,
    /// Natural page size; `None` until a document is loaded
    doc: Option<DocSize>,
    page_count: u32,
    page: u32,
    rotation: Rotation,
    zoom: Zoom,
    boxes: Vec<BBox>,
    selection: SelectionController<Box<dyn PointerCapture>>,
    /// Set on any change to the collection, cleared on save
    dirty: bool,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_capture(config, NoCapture)
    }

    /// Create an editor whose gestures acquire `capture`.
    pub fn with_capture(config: EditorConfig, capture: impl PointerCapture + 'static) -> Self {
        let mut selection = SelectionController::with_capture(
            SelectionSettings::from(&config),
            Box::new(capture) as Box<dyn PointerCapture>,
        );
        selection.set_kind(config.default_kind);
        let zoom = Zoom::new(config.initial_scale, config.min_scale, config.max_scale);
        Self {
            config,
            doc: None,
            page_count: 0,
            page: DEFAULT_PAGE,
            rotation: Rotation::Deg0,
            zoom,
            boxes: Vec::new(),
            selection,
            dirty: false,
        }
    }

    // ========================================================================
    // Document lifecycle
    // ========================================================================

    /// Load a document, seeding the collection with `initial`.
    ///
    /// Fails on invalid dimensions or duplicate box ids; on failure the
    /// editor is left as it was.
    pub fn load_document(
        &mut self,
        doc: DocSize,
        page_count: u32,
        initial: Vec<BBox>,
    ) -> Result<()> {
        self.load_document_with_rotation(doc, page_count, initial, Rotation::Deg0)
    }

    /// Like [`Editor::load_document`], restoring a saved rotation.
    ///
    /// Rectangles with a negative size are flipped to the same area.
    pub fn load_document_with_rotation(
        &mut self,
        doc: DocSize,
        page_count: u32,
        mut initial: Vec<BBox>,
        rotation: Rotation,
    ) -> Result<()> {
        let doc = DocSize::try_new(doc.width, doc.height)?;

        let mut seen = HashSet::new();
        for bbox in &initial {
            if !seen.insert(bbox.id.as_str()) {
                return Err(Error::DuplicateId(bbox.id.clone()));
            }
        }
        for bbox in &mut initial {
            bbox.rect = bbox.rect.normalized();
        }

        self.selection.cancel();
        self.selection.select(None);
        self.doc = Some(doc);
        self.page_count = page_count.max(1);
        self.page = DEFAULT_PAGE;
        self.rotation = rotation;
        self.zoom.set(self.config.initial_scale);
        self.boxes = initial;
        self.dirty = false;

        log::info!(
            "Loaded {}x{} document, {} page(s), {} box(es), rotation {}",
            doc.width,
            doc.height,
            self.page_count,
            self.boxes.len(),
            rotation.degrees()
        );
        Ok(())
    }

    /// Load a document from a previously saved payload.
    pub fn load_payload(
        &mut self,
        doc: DocSize,
        page_count: u32,
        payload: &SavePayload,
    ) -> Result<()> {
        let boxes = payload.boxes()?;
        self.load_document_with_rotation(doc, page_count, boxes, payload.rotation())
    }

    /// Drop the document and all of its boxes.
    pub fn close_document(&mut self) {
        self.selection.cancel();
        self.selection.select(None);
        self.doc = None;
        self.page_count = 0;
        self.page = DEFAULT_PAGE;
        self.rotation = Rotation::Deg0;
        self.boxes.clear();
        self.dirty = false;
        log::info!("Document closed");
    }

    pub fn has_document(&self) -> bool {
        self.doc.is_some_and(|d| d.is_loaded())
    }

    fn transform(&self) -> Option<ViewportTransform> {
        self.doc
            .filter(DocSize::is_loaded)
            .map(|doc| ViewportTransform::new(doc, self.rotation))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Page size as currently rendered.
    pub fn view_size(&self) -> Option<DocSize> {
        self.transform().map(|t| t.view_size())
    }

    /// Page outline in screen pixels at the current zoom.
    pub fn page_outline(&self) -> Option<ScreenRect> {
        self.view_size().map(|size| page_outline(size, &self.zoom))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn scale(&self) -> f64 {
        self.zoom.scale()
    }

    /// All boxes, every page, canonical space.
    pub fn boxes(&self) -> &[BBox] {
        &self.boxes
    }

    pub fn boxes_on_page(&self, page: u32) -> impl Iterator<Item = &BBox> {
        self.boxes.iter().filter(move |b| b.page == page)
    }

    pub fn get(&self, id: &str) -> Option<&BBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.selected()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Current page's boxes in view space. Empty until a document with a
    /// usable size is loaded.
    pub fn view_boxes(&self) -> Vec<ViewBox> {
        let Some(transform) = self.transform() else {
            return Vec::new();
        };
        self.boxes_on_page(self.page)
            .map(|b| {
                let rect = transform.to_view(&b.rect);
                ViewBox::new(b.id.clone(), b.kind, rect)
            })
            .collect()
    }

    /// Box being drawn, in view space.
    pub fn preview(&self) -> Option<ViewRect> {
        self.selection.preview(&self.zoom)
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    /// Press at `point` (screen pixels relative to the page origin).
    pub fn pointer_down(&mut self, point: ScreenPoint) -> bool {
        if !self.has_document() {
            return false;
        }
        let boxes = self.view_boxes();
        self.selection.pointer_down(point, &boxes, &self.zoom)
    }

    /// Pointer moved. Returns true if the collection changed.
    pub fn pointer_move(&mut self, point: ScreenPoint) -> bool {
        let boxes = self.view_boxes();
        let change = self.selection.pointer_move(point, &boxes, &self.zoom);
        self.apply_change(change)
    }

    /// Pointer released. Returns true if the collection changed.
    pub fn pointer_up(&mut self, point: ScreenPoint) -> bool {
        let boxes = self.view_boxes();
        let change = self.selection.pointer_up(point, &boxes, &self.zoom);
        self.apply_change(change)
    }

    fn apply_change(&mut self, change: Option<SelectionChange>) -> bool {
        let Some(change) = change else {
            return false;
        };
        log::debug!("{:?} {}", change.kind, change.id);
        self.apply_page_change(change.boxes)
    }

    /// Replace every box of the current page with `page_boxes` (view space).
    ///
    /// Boxes on the current page that are missing from `page_boxes` are
    /// removed; boxes on other pages pass through unchanged.
    pub fn apply_page_change(&mut self, page_boxes: Vec<ViewBox>) -> bool {
        let Some(transform) = self.transform() else {
            return false;
        };
        let page = self.page;

        let mut next: Vec<BBox> = self.boxes.drain(..).filter(|b| b.page != page).collect();
        next.extend(page_boxes.into_iter().map(|vb| {
            let rect = transform.to_canonical(&vb.rect);
            BBox::new(vb.id, vb.kind, rect, page)
        }));
        self.boxes = next;
        self.dirty = true;
        true
    }

    // ========================================================================
    // Collection edits
    // ========================================================================

    /// Remove a box. Clears the selection if it was the selected one.
    pub fn delete(&mut self, id: &str) -> Option<BBox> {
        let index = self.boxes.iter().position(|b| b.id == id)?;
        let removed = self.boxes.remove(index);
        self.selection.forget(id);
        self.dirty = true;
        log::info!("Deleted {} box {}", removed.kind.name(), removed.id);
        Some(removed)
    }

    /// Delete the selected box, if any.
    pub fn delete_selected(&mut self) -> Option<BBox> {
        let id = self.selection.selected()?.to_string();
        self.delete(&id)
    }

    /// Change what an existing box marks.
    pub fn set_box_kind(&mut self, id: &str, kind: BoxKind) -> bool {
        match self.boxes.iter_mut().find(|b| b.id == id) {
            Some(bbox) if bbox.kind != kind => {
                bbox.kind = kind;
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Kind given to boxes drawn from now on.
    pub fn set_draw_kind(&mut self, kind: BoxKind) {
        self.selection.set_kind(kind);
    }

    pub fn draw_kind(&self) -> BoxKind {
        self.selection.kind()
    }

    /// Enable or disable drawing new boxes. Disabling drops any gesture.
    pub fn set_active(&mut self, active: bool) {
        self.selection.set_active(active);
    }

    pub fn is_active(&self) -> bool {
        self.selection.is_active()
    }

    /// Tool switched off or escape pressed.
    pub fn deactivate(&mut self) {
        self.selection.deactivate();
    }

    // ========================================================================
    // Page and rotation
    // ========================================================================

    /// Show another page, clamped to the document. Returns the page shown.
    pub fn set_page(&mut self, page: u32) -> u32 {
        let page = page.clamp(DEFAULT_PAGE, self.page_count.max(DEFAULT_PAGE));
        if page != self.page {
            self.selection.cancel();
            self.selection.select(None);
            self.page = page;
            log::debug!("Page {}/{}", page, self.page_count);
        }
        self.page
    }

    pub fn next_page(&mut self) -> u32 {
        self.set_page(self.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> u32 {
        self.set_page(self.page.saturating_sub(1))
    }

    /// Rotate the whole document. Stored boxes are not modified; only their
    /// projection changes.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        if rotation != self.rotation {
            self.selection.cancel();
            self.rotation = rotation;
            log::info!("Rotation {}", rotation.degrees());
        }
    }

    pub fn rotate_cw(&mut self) -> Rotation {
        self.set_rotation(self.rotation.rotate_cw());
        self.rotation
    }

    pub fn rotate_ccw(&mut self) -> Rotation {
        self.set_rotation(self.rotation.rotate_ccw());
        self.rotation
    }

    // ========================================================================
    // Zoom
    // ========================================================================

    pub fn set_scale(&mut self, scale: f64) -> f64 {
        self.zoom.set(scale)
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.zoom.zoom_in(self.config.zoom_step)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.zoom.zoom_out(self.config.zoom_step)
    }

    /// Fit the rotated page width into a container `width` pixels wide.
    pub fn fit_width(&mut self, width: f64) -> f64 {
        let Some(view) = self.view_size() else {
            return self.zoom.scale();
        };
        let padding = self.config.fit_padding * 2.0;
        self.zoom.fit_width(width - padding, view)
    }

    /// Fit the whole rotated page into a container.
    pub fn fit_page(&mut self, width: f64, height: f64) -> f64 {
        let Some(view) = self.view_size() else {
            return self.zoom.scale();
        };
        let padding = self.config.fit_padding * 2.0;
        self.zoom.fit_page(width - padding, height - padding, view)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Build the save request body and mark the collection clean.
    pub fn save_payload(&mut self) -> Result<SavePayload> {
        if !self.has_document() {
            return Err(Error::NoDocument);
        }
        let payload = SavePayload::from_boxes(&self.boxes, self.rotation)?;
        self.dirty = false;
        log::info!(
            "Prepared save of {} box(es) at rotation {}",
            self.boxes.len(),
            self.rotation.degrees()
        );
        Ok(payload)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
