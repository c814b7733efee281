//! Reconstruction of a single block.
//!
//! ```text
//! Block rects ─▶ AxisIndex ─▶ Grid ─▶ ResolvedGrid ─▶ BoundText ─▶ markup
//! ```

use crate::config::ReconstructionConfig;
use crate::content::TextRun;
use crate::converters::TableRenderer;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::layout::{
    resolve_spans, AxisIndex, CellSpan, CellText, CellTextBinder, Grid, ResolvedGrid,
};

/// A table recovered from one block.
#[derive(Debug, Clone)]
pub struct ReconstructedTable {
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
    /// Emitted spans, row-major
    pub spans: Vec<CellSpan>,
    /// Bound text per span, indexed like `spans`
    pub cells: Vec<CellText>,
    /// `<table>` markup
    pub markup: String,
    /// Bounding box of the block's rectangles
    pub bounds: Option<Rect>,
    /// Indices of the text runs bound into the table, ascending
    pub consumed: Vec<usize>,
}

impl ReconstructedTable {
    /// Text of every span, lines joined by `\n`, in emission order.
    pub fn cell_texts(&self) -> Vec<String> {
        self.cells.iter().map(|c| c.join("\n")).collect()
    }
}

/// Why a block produced no table.
#[derive(Debug)]
pub enum SkipReason {
    /// Too few distinct x boundaries to form columns
    TooFewColumns {
        /// Distinct x boundaries in the block
        found: usize,
        /// Configured minimum
        required: usize,
    },
    /// The grid has zero rows or columns
    EmptyGrid,
    /// Reconstruction failed
    Failed(Error),
}

impl SkipReason {
    /// Whether the block was abandoned because of an error.
    pub fn is_failure(&self) -> bool {
        matches!(self, SkipReason::Failed(_))
    }
}

/// Outcome of reconstructing one block.
#[derive(Debug)]
pub enum BlockOutcome {
    /// The block became a table
    Table(ReconstructedTable),
    /// The block is not a table
    Skipped(SkipReason),
}

pub(crate) struct Assembled {
    pub(crate) table: ReconstructedTable,
    pub(crate) grid: Grid,
}

pub(crate) enum Classified {
    Table(Assembled),
    Skipped(SkipReason),
}

/// Build a table from normalized rectangles, without a column threshold.
///
/// Returns `Ok(None)` when the grid has no cells. Text runs are matched
/// against the grid; their indices in `texts` are reported in
/// [`ReconstructedTable::consumed`].
///
/// # Examples
///
/// ```
/// use table_oxide::content::TextRun;
/// use table_oxide::geometry::Rect;
/// use table_oxide::pipeline::build_table;
/// use table_oxide::ReconstructionConfig;
///
/// # fn main() -> table_oxide::Result<()> {
/// let table = build_table(
///     &[Rect::new(0.0, 0.0, 10.0, 5.0)],
///     &[TextRun::new(5.0, 2.0, "Q1")],
///     &ReconstructionConfig::default(),
/// )?
/// .unwrap();
/// assert_eq!((table.rows, table.cols), (1, 1));
/// assert!(table.markup.ends_with("<tr><td>Q1</td></tr></table>"));
/// # Ok(())
/// # }
/// ```
pub fn build_table(
    rects: &[Rect],
    texts: &[TextRun],
    config: &ReconstructionConfig,
) -> Result<Option<ReconstructedTable>> {
    let axes = AxisIndex::from_rects(rects, config.tol());
    Ok(assemble(rects, texts, &axes, config)?.map(|a| a.table))
}

/// Reconstruct one block, applying the column threshold.
///
/// A block with fewer than `config.min_x_boundaries` distinct x boundaries
/// is skipped as likely decoration. Errors are returned to the caller.
pub fn reconstruct_block(
    rects: &[Rect],
    texts: &[TextRun],
    config: &ReconstructionConfig,
) -> Result<BlockOutcome> {
    Ok(match classify(rects, texts, config)? {
        Classified::Table(assembled) => BlockOutcome::Table(assembled.table),
        Classified::Skipped(reason) => BlockOutcome::Skipped(reason),
    })
}

pub(crate) fn classify(
    rects: &[Rect],
    texts: &[TextRun],
    config: &ReconstructionConfig,
) -> Result<Classified> {
    let axes = AxisIndex::from_rects(rects, config.tol());
    if axes.xs.len() < config.min_x_boundaries {
        return Ok(Classified::Skipped(SkipReason::TooFewColumns {
            found: axes.xs.len(),
            required: config.min_x_boundaries,
        }));
    }
    Ok(match assemble(rects, texts, &axes, config)? {
        Some(assembled) => Classified::Table(assembled),
        None => Classified::Skipped(SkipReason::EmptyGrid),
    })
}

fn assemble(
    rects: &[Rect],
    texts: &[TextRun],
    axes: &AxisIndex,
    config: &ReconstructionConfig,
) -> Result<Option<Assembled>> {
    let mut grid = Grid::build(rects, axes, config.strict_overlap)?;
    if grid.is_empty() {
        return Ok(None);
    }
    if log::log_enabled!(log::Level::Trace) {
        for line in grid.occupancy_diagram() {
            log::trace!("  {}", line);
        }
    }

    let resolved: ResolvedGrid = resolve_spans(&mut grid, rects.len());
    let bound = CellTextBinder::new(config.tol(), config.boundary_epsilon)
        .with_trim(config.trim_cell_text)
        .bind(texts, &grid, axes, &resolved);
    let markup = TableRenderer::new()
        .with_attributes(config.table_attributes.as_str())
        .render(&resolved, &bound);

    log::debug!(
        "Block of {} rectangles: {}x{} grid, {} spans, {} runs bound",
        rects.len(),
        grid.rows(),
        grid.cols(),
        resolved.len(),
        bound.consumed.len()
    );

    let bounds = rects
        .split_first()
        .map(|(first, rest)| rest.iter().fold(*first, |acc, r| acc.union(r)));

    Ok(Some(Assembled {
        table: ReconstructedTable {
            rows: grid.rows(),
            cols: grid.cols(),
            spans: resolved.spans().to_vec(),
            cells: bound.cells,
            markup,
            bounds,
            consumed: bound.consumed,
        },
        grid,
    }))
}
