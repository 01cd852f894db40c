//! Drawing annotation boxes.

use serde::{Deserialize, Serialize};
use sheetmark_geom::{CanonicalRect, ViewRect};

/// Page a box lands on when the stored record has no page.
pub const DEFAULT_PAGE: u32 = 1;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

/// What a box marks on the drawing sheet. Assigned by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxKind {
    /// Title block
    #[default]
    Title,
    /// Front elevation
    Front,
    /// Side elevation
    Side,
    /// Plan view
    Plan,
}

impl BoxKind {
    /// Get the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            BoxKind::Title => "Title",
            BoxKind::Front => "Front",
            BoxKind::Side => "Side",
            BoxKind::Plan => "Plan",
        }
    }
}

/// A stored annotation: a rectangle in canonical space on one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Unique within the document
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BoxKind,
    pub rect: CanonicalRect,
    /// 1-based page number
    #[serde(default = "default_page")]
    pub page: u32,
}

impl BBox {
    pub fn new(id: impl Into<String>, kind: BoxKind, rect: CanonicalRect, page: u32) -> Self {
        Self {
            id: id.into(),
            kind,
            rect,
            page,
        }
    }
}

/// A box of the current page, projected into view space for display and
/// interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewBox {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BoxKind,
    pub rect: ViewRect,
}

impl ViewBox {
    pub fn new(id: impl Into<String>, kind: BoxKind, rect: ViewRect) -> Self {
        Self {
            id: id.into(),
            kind,
            rect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_to_one() {
        let json = r#"{"id":"a","type":"plan","rect":{"x":1,"y":2,"width":3,"height":4}}"#;
        let bbox: BBox = serde_json::from_str(json).unwrap();
        assert_eq!(bbox.page, 1);
        assert_eq!(bbox.kind, BoxKind::Plan);
        assert_eq!(bbox.rect, CanonicalRect::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let bbox = BBox::new(
            "t1",
            BoxKind::Title,
            CanonicalRect::new(0.0, 0.0, 10.0, 10.0),
            2,
        );
        let json = serde_json::to_string(&bbox).unwrap();
        assert!(json.contains(r#""type":"title""#));
        assert!(json.contains(r#""page":2"#));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{"id":"a","type":"section","rect":{"x":0,"y":0,"width":1,"height":1}}"#;
        assert!(serde_json::from_str::<BBox>(json).is_err());
    }
}
