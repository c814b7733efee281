//! Debug snapshots of reconstructed blocks.
//!
//! A [`BlockSnapshot`] records the rectangles of one block and the occupancy
//! of its grid, and serializes to JSON for offline inspection. Snapshots are
//! keyed by page and by the block's ordinal on that page, both supplied by
//! the caller.
//!
//! ## Example
//!
//! ```
//! use table_oxide::debug::BlockSnapshot;
//! use table_oxide::geometry::Rect;
//! use table_oxide::layout::Grid;
//!
//! let snapshot = BlockSnapshot::capture(0, 1, &[Rect::new(0.0, 0.0, 10.0, 5.0)], &Grid::new(1, 1));
//! let json = snapshot.to_json().unwrap();
//! assert!(json.contains("\"ordinal\": 1"));
//! ```

use serde::Serialize;

use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::Grid;

/// Serializable view of one block and its grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSnapshot {
    /// Page index (0-based)
    pub page: usize,
    /// Block position on the page (0-based)
    pub ordinal: usize,
    /// Block rectangles as `[x0, y0, x1, y1]`, in stamping order
    pub rects: Vec<[f32; 4]>,
    /// Grid rows, `O` for occupied and `X` for empty cells
    pub occupancy: Vec<String>,
}

impl BlockSnapshot {
    /// Capture a block after its grid has been stamped.
    pub fn capture(page: usize, ordinal: usize, rects: &[Rect], grid: &Grid) -> Self {
        Self {
            page,
            ordinal,
            rects: rects.iter().map(Rect::to_array).collect(),
            occupancy: grid.occupancy_diagram(),
        }
    }

    /// Suggested file stem for persisting the snapshot.
    pub fn file_stem(&self) -> String {
        format!("page{:04}_block{:03}", self.page, self.ordinal)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
