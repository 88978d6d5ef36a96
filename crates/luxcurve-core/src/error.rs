//! Error types for curve editing.

use thiserror::Error;

/// Errors raised by curve mutation preconditions.
///
/// These indicate a broken UI invariant (a gesture addressed a point that
/// does not exist, or tried to delete an anchor). They are logged and
/// swallowed at the controller level, never shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CurveError {
    #[error("point index {index} out of range (curve has {len} points)")]
    OutOfRange { index: usize, len: usize },
    #[error("point {index} is a boundary anchor and is not deletable")]
    BoundaryViolation { index: usize },
}
