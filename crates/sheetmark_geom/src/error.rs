//! Error types for geometry construction.

use thiserror::Error;

/// Errors raised when building geometry values from untrusted input.
///
/// The transform and zoom math itself never fails; these only come up at the
/// boundaries where a rotation or a document size is parsed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    /// Rotation is not a multiple of 90 degrees
    #[error("Unsupported rotation: {0} degrees (expected 0, 90, 180 or 270)")]
    UnsupportedRotation(i32),

    /// Document dimensions are zero, negative or not finite
    #[error("Invalid document dimensions: {width} x {height}")]
    InvalidDimensions {
        /// Width that was rejected
        width: f64,
        /// Height that was rejected
        height: f64,
    },
}
