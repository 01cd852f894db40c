//! Page rotation in quarter turns.

use crate::GeomError;
use serde::{Deserialize, Serialize};

/// Fold any integer angle into `[0, 360)`.
pub fn normalize_degrees(degrees: i32) -> i32 {
    ((degrees % 360) + 360) % 360
}

/// Clockwise rotation applied to the whole document.
///
/// Serialized as the plain number of degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Parse a rotation, accepting any angle congruent to a quarter turn
    /// (so `-90` and `450` are fine) and rejecting everything else.
    pub fn from_degrees(degrees: i32) -> Result<Self, GeomError> {
        match normalize_degrees(degrees) {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(GeomError::UnsupportedRotation(degrees)),
        }
    }

    /// Like [`Rotation::from_degrees`], but an unsupported angle falls back
    /// to no rotation instead of failing.
    pub fn from_degrees_lossy(degrees: i32) -> Self {
        Self::from_degrees(degrees).unwrap_or_else(|e| {
            log::warn!("{}, treating as 0", e);
            Rotation::Deg0
        })
    }

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Quarter turn clockwise.
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// Quarter turn counter-clockwise.
    pub fn rotate_ccw(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg270,
            Rotation::Deg90 => Rotation::Deg0,
            Rotation::Deg180 => Rotation::Deg90,
            Rotation::Deg270 => Rotation::Deg180,
        }
    }

    /// The rotation that undoes this one: `(360 - r) % 360`.
    pub fn inverse(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg0,
            Rotation::Deg90 => Rotation::Deg270,
            Rotation::Deg180 => Rotation::Deg180,
            Rotation::Deg270 => Rotation::Deg90,
        }
    }

    /// Whether width and height trade places under this rotation.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    pub fn all() -> &'static [Rotation] {
        &[
            Rotation::Deg0,
            Rotation::Deg90,
            Rotation::Deg180,
            Rotation::Deg270,
        ]
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<i32> for Rotation {
    type Error = GeomError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0), 0);
        assert_eq!(normalize_degrees(360), 0);
        assert_eq!(normalize_degrees(-90), 270);
        assert_eq!(normalize_degrees(450), 90);
        assert_eq!(normalize_degrees(-720), 0);
    }

    #[test]
    fn test_from_degrees() {
        assert_eq!(Rotation::from_degrees(90), Ok(Rotation::Deg90));
        assert_eq!(Rotation::from_degrees(-90), Ok(Rotation::Deg270));
        assert_eq!(
            Rotation::from_degrees(45),
            Err(GeomError::UnsupportedRotation(45))
        );
        assert_eq!(Rotation::from_degrees_lossy(45), Rotation::Deg0);
    }

    #[test]
    fn test_cw_and_ccw_cycle() {
        for &r in Rotation::all() {
            assert_eq!(r.rotate_cw().rotate_ccw(), r);
            assert_eq!(r.rotate_cw().rotate_cw().rotate_cw().rotate_cw(), r);
            assert_eq!(
                r.inverse().degrees(),
                normalize_degrees(360 - r.degrees())
            );
        }
    }

    #[test]
    fn test_serde_as_degrees() {
        assert_eq!(serde_json::to_string(&Rotation::Deg270).unwrap(), "270");
        let r: Rotation = serde_json::from_str("180").unwrap();
        assert_eq!(r, Rotation::Deg180);
        assert!(serde_json::from_str::<Rotation>("45").is_err());
    }
}
