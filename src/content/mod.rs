//! Page content supplied by the document layer.
//!
//! The reconstruction engine does not parse documents. A host hands it, per
//! page, the rectangles drawn as decoration and the text runs placed on the
//! page, both in the source's native bottom-up coordinate space. This module
//! defines that contract and two ready-made sources.

pub mod json;

pub use json::JsonContentSource;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Rect;

/// A positioned run of text.
///
/// `(x, y)` is the baseline anchor: the left edge and the baseline of a
/// contiguous run of glyphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// Left edge of the run
    pub x: f32,
    /// Baseline of the run
    pub y: f32,
    /// Literal string content
    pub text: String,
}

impl TextRun {
    /// Create a new text run.
    pub fn new(x: f32, y: f32, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
        }
    }
}

/// Everything the engine needs from one page.
///
/// Rectangles and runs are listed in emission order, which is the draw order
/// (for rectangles) and the reading order as drawn (for text).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// Rectangles in bottom-up source coordinates
    pub rects: Vec<Rect>,
    /// Text runs in bottom-up source coordinates
    pub texts: Vec<TextRun>,
    /// Reference height used to flip the y axis
    pub content_height: f32,
    /// Page body bound, in bottom-up source coordinates
    pub media_box: Option<Rect>,
}

impl PageContent {
    /// Create page content with the given reference height.
    pub fn new(content_height: f32) -> Self {
        Self {
            content_height,
            ..Default::default()
        }
    }

    /// Add a rectangle.
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rects.push(rect);
        self
    }

    /// Add a text run.
    pub fn with_text(mut self, run: TextRun) -> Self {
        self.texts.push(run);
        self
    }

    /// Set the media box.
    pub fn with_media_box(mut self, media_box: Rect) -> Self {
        self.media_box = Some(media_box);
        self
    }
}

/// Source of per-page content.
///
/// Implemented by the host on top of its document parser and content-stream
/// interpreter. Implementations report data that cannot be read as the
/// rectangle/text model with [`Error::ContentModelMismatch`].
pub trait ContentSource {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Content of page `page` (0-based).
    fn page_content(&self, page: usize) -> Result<PageContent>;
}

/// A content source backed by pages already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentSource {
    pages: Vec<PageContent>,
}

impl MemoryContentSource {
    /// Create a source over the given pages.
    pub fn new(pages: Vec<PageContent>) -> Self {
        Self { pages }
    }

    /// Append a page.
    pub fn push(&mut self, page: PageContent) {
        self.pages.push(page);
    }
}

impl ContentSource for MemoryContentSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_content(&self, page: usize) -> Result<PageContent> {
        self.pages.get(page).cloned().ok_or(Error::PageOutOfRange {
            page,
            count: self.pages.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_content_builder() {
        let page = PageContent::new(842.0)
            .with_rect(Rect::new(0.0, 0.0, 10.0, 5.0))
            .with_text(TextRun::new(5.0, 2.0, "Q1"))
            .with_media_box(Rect::new(0.0, 0.0, 595.0, 842.0));
        assert_eq!(page.rects.len(), 1);
        assert_eq!(page.texts[0].text, "Q1");
        assert_eq!(page.content_height, 842.0);
        assert!(page.media_box.is_some());
    }

    #[test]
    fn test_memory_source_out_of_range() {
        let mut source = MemoryContentSource::default();
        assert_eq!(source.page_count(), 0);
        source.push(PageContent::new(100.0));
        assert_eq!(source.page_count(), 1);
        assert!(source.page_content(0).is_ok());
        assert!(matches!(
            source.page_content(1),
            Err(Error::PageOutOfRange { page: 1, count: 1 })
        ));
    }
}
