//! Save payload handed to the persistence collaborator.
//!
//! The backend stores the box list as a JSON string inside the request body,
//! next to the document rotation:
//!
//! ```json
//! {
//!   "coordinates": "[{\"id\":\"…\",\"type\":\"title\",\"rect\":{…},\"page\":1}]",
//!   "rotation": 90
//! }
//! ```
//!
//! Sending it is the host's job; this module only builds and reads it.

use crate::error::Result;
use crate::model::{BBox, DEFAULT_PAGE};
use serde::{Deserialize, Serialize};
use sheetmark_geom::Rotation;

/// Body of a save request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePayload {
    /// JSON-encoded `BBox[]`
    #[serde(default)]
    pub coordinates: String,
    /// Rotation in degrees
    #[serde(default)]
    pub rotation: i32,
}

impl SavePayload {
    pub fn from_boxes(boxes: &[BBox], rotation: Rotation) -> Result<Self> {
        Ok(Self {
            coordinates: serde_json::to_string(boxes)?,
            rotation: rotation.degrees(),
        })
    }

    /// Decode the stored boxes.
    pub fn boxes(&self) -> Result<Vec<BBox>> {
        parse_boxes(&self.coordinates)
    }

    /// Stored rotation; anything other than a quarter turn reads as 0.
    pub fn rotation(&self) -> Rotation {
        Rotation::from_degrees_lossy(self.rotation)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Parse a stored box array. Blank input is an empty collection.
///
/// Page numbers below 1 are moved to page 1, and rectangles with a negative
/// size are flipped to cover the same area.
pub fn parse_boxes(json: &str) -> Result<Vec<BBox>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut boxes: Vec<BBox> = serde_json::from_str(json)?;
    for bbox in &mut boxes {
        bbox.rect = bbox.rect.normalized();
        if bbox.page < DEFAULT_PAGE {
            log::warn!(
                "Box {} has page {}, using {}",
                bbox.id,
                bbox.page,
                DEFAULT_PAGE
            );
            bbox.page = DEFAULT_PAGE;
        }
    }
    Ok(boxes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::BoxKind;
    use sheetmark_geom::CanonicalRect;

    #[test]
    fn test_payload_shape() {
        let boxes = vec![BBox::new(
            "b1",
            BoxKind::Front,
            CanonicalRect::new(10.0, 20.0, 100.0, 50.0),
            2,
        )];
        let payload = SavePayload::from_boxes(&boxes, Rotation::Deg90).unwrap();
        assert_eq!(payload.rotation, 90);

        let body: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert!(body["coordinates"].is_string());
        assert_eq!(body["rotation"], 90);

        let coordinates = body["coordinates"].as_str().unwrap();
        let inner: serde_json::Value = serde_json::from_str(coordinates).unwrap();
        assert_eq!(inner[0]["type"], "front");
        assert_eq!(inner[0]["page"], 2);
        assert_eq!(inner[0]["rect"]["width"], 100.0);

        let json = payload.to_json().unwrap();
        let back = SavePayload::from_json(&json).unwrap();
        assert_eq!(back.boxes().unwrap(), boxes);
        assert_eq!(back.rotation(), Rotation::Deg90);
    }

    #[test]
    fn test_blank_coordinates_are_empty() {
        assert!(parse_boxes("").unwrap().is_empty());
        assert!(parse_boxes("  \n").unwrap().is_empty());
        let payload = SavePayload::from_json("{}").unwrap();
        assert!(payload.boxes().unwrap().is_empty());
        assert_eq!(payload.rotation(), Rotation::Deg0);
    }

    #[test]
    fn test_page_zero_moves_to_first_page() {
        let json = r#"[{"id":"a","type":"side","rect":{"x":0,"y":0,"width":5,"height":5},"page":0}]"#;
        assert_eq!(parse_boxes(json).unwrap()[0].page, 1);
    }

    #[test]
    fn test_negative_size_is_normalized() {
        let json = r#"[{"id":"a","type":"plan","rect":{"x":50,"y":60,"width":-20,"height":-30}}]"#;
        let boxes = parse_boxes(json).unwrap();
        assert_eq!(boxes[0].rect, CanonicalRect::new(30.0, 30.0, 20.0, 30.0));
        assert!(boxes[0].rect.is_normalized());
    }

    #[test]
    fn test_unsupported_rotation_reads_as_zero() {
        let payload = SavePayload::from_json(r#"{"coordinates":"[]","rotation":45}"#).unwrap();
        assert_eq!(payload.rotation(), Rotation::Deg0);
        let payload = SavePayload::from_json(r#"{"coordinates":"[]","rotation":-90}"#).unwrap();
        assert_eq!(payload.rotation(), Rotation::Deg270);
    }

    #[test]
    fn test_malformed_coordinates() {
        let payload = SavePayload {
            coordinates: "[{".to_string(),
            rotation: 0,
        };
        assert!(matches!(payload.boxes(), Err(Error::Json(_))));
    }
}
