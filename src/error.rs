//! Error types for table reconstruction.
//!
//! This module defines all error types that can occur while turning page
//! geometry into tables. Per-block failures are reported through
//! [`BlockDiagnostic`](crate::pipeline::BlockDiagnostic) and never abort the
//! remaining blocks of a page.

use std::fmt;

/// Result type alias for reconstruction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Coordinate axis of a grid boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    /// Horizontal axis (column boundaries)
    X,
    /// Vertical axis (row boundaries)
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// Error types that can occur during table reconstruction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A rectangle corner does not resolve to any boundary of its block.
    ///
    /// Boundaries are derived from the same rectangles, so this is an
    /// internal consistency failure. It is fatal to the block only.
    #[error("Geometry inconsistency: {axis} coordinate {value} matches no grid boundary")]
    GeometryInconsistency {
        /// Axis on which the lookup failed
        axis: Axis,
        /// Coordinate that failed to resolve
        value: f32,
    },

    /// Two rectangles stamp the same grid cell (strict overlap mode only).
    #[error("Overlap detected at cell ({row}, {col}): rectangle {second} overwrites rectangle {first}")]
    OverlapDetected {
        /// Block-local id of the rectangle stamped first
        first: u32,
        /// Block-local id of the rectangle stamped second
        second: u32,
        /// Grid row of the contested cell
        row: usize,
        /// Grid column of the contested cell
        col: usize,
    },

    /// Content supplied by the document layer is not the rectangle/text model.
    #[error("Content model mismatch: expected {expected}, found {found}")]
    ContentModelMismatch {
        /// What the reconstruction engine expected
        expected: String,
        /// What the content source actually provided
        found: String,
    },

    /// A content source was asked for a page it does not have.
    #[error("Page {page} out of range (document has {count} pages)")]
    PageOutOfRange {
        /// Requested page index (0-based)
        page: usize,
        /// Number of pages available
        count: usize,
    },

    /// Invalid reconstruction configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
