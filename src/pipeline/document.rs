//! Whole-document reconstruction over a [`ContentSource`].

use crate::config::ReconstructionConfig;
use crate::content::ContentSource;
use crate::error::{Error, Result};
use crate::pipeline::{PageReconstruction, PageReconstructor, ReconstructedTable};

/// A page whose content could not be read.
#[derive(Debug)]
pub struct PageFailure {
    /// Page index (0-based)
    pub page: usize,
    /// Error reported by the content source
    pub error: Error,
}

/// Everything recovered from a document.
#[derive(Debug, Default)]
pub struct DocumentReconstruction {
    /// Successfully read pages, in page order
    pub pages: Vec<PageReconstruction>,
    /// Pages whose content could not be read
    pub failures: Vec<PageFailure>,
    /// Section still open after the last page
    pub trailing_section: Option<String>,
}

impl DocumentReconstruction {
    /// All tables, in page order.
    pub fn tables(&self) -> impl Iterator<Item = &ReconstructedTable> {
        self.pages.iter().flat_map(|p| p.tables.iter())
    }

    /// All reading-order sections, including the trailing one.
    pub fn sections(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|p| p.sections.iter().map(String::as_str))
            .chain(self.trailing_section.as_deref())
            .collect()
    }
}

/// Walks every page of a content source.
///
/// Reading-order sections continue across page boundaries. A page whose
/// content cannot be read is reported in
/// [`DocumentReconstruction::failures`] and does not stop the document.
#[derive(Debug, Clone)]
pub struct DocumentReconstructor {
    page: PageReconstructor,
}

impl DocumentReconstructor {
    /// Create a reconstructor, validating `config`.
    pub fn new(config: ReconstructionConfig) -> Result<Self> {
        Ok(Self {
            page: PageReconstructor::new(config)?,
        })
    }

    /// The per-page reconstructor.
    pub fn page_reconstructor(&self) -> &PageReconstructor {
        &self.page
    }

    /// Reconstruct every page of `source`.
    pub fn reconstruct<S: ContentSource + ?Sized>(&self, source: &S) -> DocumentReconstruction {
        let mut flow = self.page.row_flow();
        let mut result = DocumentReconstruction::default();

        for page in 0..source.page_count() {
            match source.page_content(page) {
                Ok(content) => {
                    result.pages.push(self.page.reconstruct(page, &content, &mut flow));
                },
                Err(error) => {
                    log::warn!("Page {}: content unreadable: {}", page, error);
                    result.failures.push(PageFailure { page, error });
                },
            }
        }
        result.trailing_section = flow.finish();

        log::debug!(
            "Document: {} pages read, {} failed, {} tables",
            result.pages.len(),
            result.failures.len(),
            result.tables().count()
        );
        result
    }
}

/// Reconstruct a whole document with `config`.
pub fn reconstruct_document<S: ContentSource + ?Sized>(
    source: &S,
    config: ReconstructionConfig,
) -> Result<DocumentReconstruction> {
    Ok(DocumentReconstructor::new(config)?.reconstruct(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{MemoryContentSource, PageContent, TextRun};
    use crate::geometry::Rect;

    #[test]
    fn test_sections_continue_across_pages() {
        let source = MemoryContentSource::new(vec![
            PageContent::new(100.0).with_text(TextRun::new(0.0, 10.0, "first ")),
            PageContent::new(100.0)
                .with_text(TextRun::new(0.0, 90.0, "half"))
                .with_text(TextRun::new(0.0, 80.0, " "))
                .with_text(TextRun::new(0.0, 70.0, "tail")),
        ]);
        let doc = reconstruct_document(&source, ReconstructionConfig::default()).unwrap();
        assert_eq!(doc.pages.len(), 2);
        assert!(doc.pages[0].sections.is_empty());
        assert_eq!(doc.pages[1].sections, vec!["first half"]);
        assert_eq!(doc.trailing_section.as_deref(), Some("tail"));
        assert_eq!(doc.sections(), vec!["first half", "tail"]);
    }

    #[test]
    fn test_page_reconstructor_shares_config() {
        let config = ReconstructionConfig::new().with_tolerance(1.5).with_table_attributes("");
        let reconstructor = DocumentReconstructor::new(config).unwrap();
        let page = reconstructor.page_reconstructor();
        assert_eq!(page.config().tolerance, 1.5);

        let content = PageContent::new(20.0)
            .with_rect(Rect::new(0.0, 0.0, 10.0, 20.0))
            .with_rect(Rect::new(10.0, 0.0, 20.0, 20.0));
        let single = page.reconstruct(0, &content, &mut page.row_flow());
        let doc = reconstructor.reconstruct(&MemoryContentSource::new(vec![content]));
        assert_eq!(single.tables[0].markup, doc.pages[0].tables[0].markup);
    }

    #[test]
    fn test_empty_document() {
        let doc = reconstruct_document(&MemoryContentSource::default(), ReconstructionConfig::default())
            .unwrap();
        assert!(doc.pages.is_empty());
        assert_eq!(doc.tables().count(), 0);
        assert!(doc.trailing_section.is_none());
    }
}
