// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::needless_range_loop)]
#![allow(clippy::should_implement_trait)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Table Oxide
//!
//! Ruled-table reconstruction for fixed-layout pages.
//!
//! Given the axis-aligned rectangles a page draws as decoration (cell fills,
//! borders, rules) and the text runs placed on it, this crate infers the
//! row/column grid that produced the drawing, merges cells rendered as larger
//! rectangles into rowspan/colspan cells, binds every text run to exactly one
//! cell and emits HTML tables. Text outside every table is read in row order
//! and split into sections.
//!
//! ## Core Features
//!
//! - **Coordinate normalization**: bottom-up source space flipped top-down
//! - **Minimal-rectangle filtering**: duplicate border strokes removed
//! - **Page segmentation**: vertically contiguous blocks become independent tables
//! - **Grid inference**: ε-merged axis boundaries, three-state cell grid
//! - **Span resolution**: rowspan/colspan runs and greedily grown empty gaps
//! - **Text binding**: half-open anchor lookup, one cell per run
//! - **Reading order**: baseline rows, section terminators, multi-page continuity
//!
//! ## Quick Start
//!
//! ```
//! use table_oxide::content::{MemoryContentSource, PageContent, TextRun};
//! use table_oxide::geometry::Rect;
//! use table_oxide::{reconstruct_document, ReconstructionConfig};
//!
//! # fn main() -> table_oxide::Result<()> {
//! // Source coordinates are bottom-up: y = 0 is the bottom of the page.
//! let page = PageContent::new(800.0)
//!     .with_rect(Rect::new(50.0, 700.0, 150.0, 720.0))
//!     .with_rect(Rect::new(150.0, 700.0, 250.0, 720.0))
//!     .with_text(TextRun::new(55.0, 705.0, "Quarter"))
//!     .with_text(TextRun::new(155.0, 705.0, "Q1"));
//!
//! let source = MemoryContentSource::new(vec![page]);
//! let config = ReconstructionConfig::default().with_table_attributes("");
//! let doc = reconstruct_document(&source, config)?;
//!
//! let table = doc.tables().next().unwrap();
//! assert_eq!(table.markup, "<table><tr><td>Quarter</td><td>Q1</td></tr></table>");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Geometry and page content
pub mod content;
pub mod geometry;

// Layout reconstruction
pub mod layout;

// Output
pub mod converters;

// Orchestration
pub mod pipeline;

// Debugging
pub mod debug;

// Re-exports
pub use config::{BodyWindow, ReconstructionConfig};
pub use content::{ContentSource, JsonContentSource, MemoryContentSource, PageContent, TextRun};
pub use error::{Error, Result};
pub use geometry::{Point, Rect, Tolerance};
pub use pipeline::{
    build_table, reconstruct_block, reconstruct_document, DocumentReconstruction,
    DocumentReconstructor, PageReconstruction, PageReconstructor, ReconstructedTable,
};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
