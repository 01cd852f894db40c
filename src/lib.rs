//! Sheetmark - drawing-sheet region annotator
//!
//! Marks rectangular regions (title block, front/side/plan views) on the pages
//! of a technical drawing. Boxes are stored in the page's natural orientation
//! and projected through the current rotation and zoom for display and
//! editing, so rotating the document never rewrites stored geometry.
//!
//! - [`editor::Editor`] owns the box collection and coordinates pages,
//!   rotation, zoom and pointer input.
//! - [`selection::SelectionController`] is the gesture state machine for
//!   creating, moving and resizing boxes.
//! - [`persist::SavePayload`] is the body handed to the storage backend.
//!
//! Rendering and the document viewer itself are left to the host.

pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod persist;
pub mod selection;

pub use config::EditorConfig;
pub use editor::Editor;
pub use error::{Error, Result};
pub use model::{BBox, BoxKind, ViewBox};
pub use persist::SavePayload;
pub use selection::{PointerCapture, SelectionController};

pub use sheetmark_geom as geom;
