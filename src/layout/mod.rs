//! Layout reconstruction algorithms.
//!
//! This module turns a page's rectangles and text runs into table structure:
//! - Rectangle normalization and minimal-rectangle filtering
//! - Page segmentation into vertically contiguous blocks
//! - Grid boundary inference and cell stamping
//! - Rowspan/colspan resolution and text-to-cell binding
//! - Reading-order sections for text outside tables

pub mod axis;
pub mod binder;
pub mod grid;
pub mod normalizer;
pub mod row_flow;
pub mod segmenter;
pub mod span;

// Re-export main types
pub use axis::{AxisCoordinateSet, AxisIndex};
pub use binder::{BoundText, CellText, CellTextBinder};
pub use grid::{CellState, Grid, RectId};
pub use normalizer::{minimal_rects, normalize_rect, normalize_text};
pub use row_flow::{group_rows, RowFlowExtractor, TextRow};
pub use segmenter::{Block, PageSegmenter};
pub use span::{resolve_spans, CellSpan, ResolvedGrid, SpanKind};
