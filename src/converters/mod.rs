//! Output converters for reconstructed tables.
//!
//! - **HTML**: `<table>` markup with rowspan/colspan and `<br/>` line breaks
//!
//! # Examples
//!
//! ```
//! use table_oxide::content::TextRun;
//! use table_oxide::geometry::Rect;
//! use table_oxide::pipeline::build_table;
//! use table_oxide::ReconstructionConfig;
//!
//! # fn main() -> table_oxide::Result<()> {
//! let config = ReconstructionConfig::new().with_table_attributes("");
//! let table = build_table(
//!     &[Rect::new(0.0, 0.0, 10.0, 5.0)],
//!     &[TextRun::new(5.0, 2.0, "Q1")],
//!     &config,
//! )?;
//! assert_eq!(table.unwrap().markup, "<table><tr><td>Q1</td></tr></table>");
//! # Ok(())
//! # }
//! ```

pub mod html;

pub use html::{escape_html, TableRenderer};
