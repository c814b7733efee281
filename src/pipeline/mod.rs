//! Page and document reconstruction pipeline.
//!
//! ```text
//! PageContent (bottom-up rects + text runs)
//!     ↓
//! [normalizer] (axis flip, minimal-rectangle filter)
//!     ↓
//! [PageSegmenter] (blocks)
//!     ↓ per block
//! [AxisIndex → Grid → spans → text binding → TableRenderer]
//!     ↓
//! ReconstructedTable[]          runs not bound to any table
//!                                   ↓
//!                           [RowFlowExtractor]
//!                                   ↓
//!                              sections
//! ```
//!
//! Failures are local: a block that cannot be reconstructed is recorded as a
//! [`BlockDiagnostic`] and the remaining blocks are still processed, and a
//! page whose content cannot be read is recorded as a [`PageFailure`].

pub mod block;
pub mod document;

pub use block::{build_table, reconstruct_block, BlockOutcome, ReconstructedTable, SkipReason};
pub use document::{reconstruct_document, DocumentReconstruction, DocumentReconstructor, PageFailure};

use crate::config::ReconstructionConfig;
use crate::content::{PageContent, TextRun};
use crate::debug::BlockSnapshot;
use crate::error::Result;
use crate::geometry::Rect;
use crate::layout::{
    minimal_rects, normalize_rect, normalize_text, PageSegmenter, RowFlowExtractor,
};
use block::{classify, Classified};

/// A block of a page that produced no table.
#[derive(Debug)]
pub struct BlockDiagnostic {
    /// Page index (0-based)
    pub page: usize,
    /// Block position on the page (0-based)
    pub ordinal: usize,
    /// Bounding box of the block, normalized coordinates
    pub bounds: Option<Rect>,
    /// Why the block was skipped
    pub reason: SkipReason,
}

/// Everything recovered from one page.
#[derive(Debug, Default)]
pub struct PageReconstruction {
    /// Page index (0-based)
    pub page: usize,
    /// Tables, top to bottom
    pub tables: Vec<ReconstructedTable>,
    /// Reading-order sections completed on this page
    pub sections: Vec<String>,
    /// Blocks that produced no table
    pub diagnostics: Vec<BlockDiagnostic>,
    /// Block snapshots, when enabled
    pub snapshots: Vec<BlockSnapshot>,
}

impl PageReconstruction {
    /// Diagnostics caused by errors rather than by a
    /// non-table block.
    pub fn failures(&self) -> impl Iterator<Item = &BlockDiagnostic> {
        self.diagnostics.iter().filter(|d| d.reason.is_failure())
    }
}

/// Reconstructs the tables and reading-order text of single pages.
///
/// # Examples
///
/// ```
/// use table_oxide::content::{PageContent, TextRun};
/// use table_oxide::geometry::Rect;
/// use table_oxide::pipeline::PageReconstructor;
/// use table_oxide::ReconstructionConfig;
///
/// # fn main() -> table_oxide::Result<()> {
/// let reconstructor = PageReconstructor::new(ReconstructionConfig::default())?;
/// let page = PageContent::new(100.0)
///     .with_rect(Rect::new(0.0, 80.0, 50.0, 100.0))
///     .with_rect(Rect::new(50.0, 80.0, 100.0, 100.0))
///     .with_text(TextRun::new(5.0, 90.0, "left"))
///     .with_text(TextRun::new(55.0, 90.0, "right"))
///     .with_text(TextRun::new(0.0, 40.0, "Prose below the table."));
///
/// let mut flow = reconstructor.row_flow();
/// let result = reconstructor.reconstruct(0, &page, &mut flow);
/// assert_eq!(result.tables.len(), 1);
/// assert_eq!(flow.finish().as_deref(), Some("Prose below the table."));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PageReconstructor {
    config: ReconstructionConfig,
}

impl PageReconstructor {
    /// Create a reconstructor, validating `config`.
    pub fn new(config: ReconstructionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReconstructionConfig {
        &self.config
    }

    /// A row-flow extractor configured like this reconstructor.
    pub fn row_flow(&self) -> RowFlowExtractor {
        RowFlowExtractor::new(self.config.tol())
            .with_window(self.config.body_window)
            .with_drop_folio(self.config.drop_folio)
    }

    /// Reconstruct one page.
    ///
    /// Runs not bound into any table are fed to `flow`, which may carry an
    /// unterminated section over from the previous page.
    pub fn reconstruct(
        &self,
        page: usize,
        content: &PageContent,
        flow: &mut RowFlowExtractor,
    ) -> PageReconstruction {
        let height = content.content_height;
        let tol = self.config.tol();

        let rects: Vec<Rect> = content.rects.iter().map(|r| normalize_rect(r, height)).collect();
        let texts: Vec<TextRun> = content.texts.iter().map(|t| normalize_text(t, height)).collect();
        let rects = minimal_rects(&rects, tol);

        let mut segmenter = PageSegmenter::new(tol, self.config.gap_threshold);
        if self.config.clip_to_media_box {
            if let Some(media_box) = content.media_box {
                segmenter = segmenter.with_bound(normalize_rect(&media_box, height));
            }
        }
        let blocks = segmenter.segment(&rects);

        let mut result = PageReconstruction {
            page,
            ..Default::default()
        };
        let mut taken = vec![false; texts.len()];

        for (ordinal, block) in blocks.iter().enumerate() {
            let reason = match classify(&block.rects, &texts, &self.config) {
                Ok(Classified::Table(assembled)) => {
                    for &i in &assembled.table.consumed {
                        taken[i] = true;
                    }
                    if self.config.collect_snapshots {
                        result.snapshots.push(BlockSnapshot::capture(
                            page,
                            ordinal,
                            &block.rects,
                            &assembled.grid,
                        ));
                    }
                    result.tables.push(assembled.table);
                    continue;
                },
                Ok(Classified::Skipped(reason)) => {
                    log::debug!("Page {} block {}: no table ({:?})", page, ordinal, reason);
                    reason
                },
                Err(e) => {
                    log::warn!("Page {} block {}: skipped: {}", page, ordinal, e);
                    SkipReason::Failed(e)
                },
            };
            result.diagnostics.push(BlockDiagnostic {
                page,
                ordinal,
                bounds: block.bounds(),
                reason,
            });
        }

        let remaining: Vec<TextRun> = texts
            .into_iter()
            .zip(taken)
            .filter_map(|(run, taken)| (!taken).then_some(run))
            .collect();
        result.sections = flow.push_page(&remaining);

        log::debug!(
            "Page {}: {} blocks, {} tables, {} sections",
            page,
            blocks.len(),
            result.tables.len(),
            result.sections.len()
        );
        result
    }
}
