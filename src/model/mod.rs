//! Data models for the annotation editor.

mod bbox;

pub use bbox::{BBox, BoxKind, DEFAULT_PAGE, ViewBox};
