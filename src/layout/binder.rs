//! Text-to-cell binding.
//!
//! Each text run is located on the grid by its baseline anchor with a
//! half-open interval test on both axes, so a run sitting exactly on a
//! boundary shared by two cells binds to exactly one of them. The run then
//! belongs to the span of the rectangle owning that grid cell. Runs that land
//! in a gap are consumed by the table without contributing text; runs outside
//! the grid are left for other blocks and the reading-order pass.

use crate::content::TextRun;
use crate::geometry::Tolerance;
use crate::layout::axis::AxisIndex;
use crate::layout::grid::Grid;
use crate::layout::span::ResolvedGrid;

/// Text bound into one span, one entry per baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellText {
    /// Lines in the order they were bound
    pub lines: Vec<String>,
}

impl CellText {
    /// Whether no text was bound.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined with `sep`.
    pub fn join(&self, sep: &str) -> String {
        self.lines.join(sep)
    }
}

/// Result of binding a page's runs into one block.
#[derive(Debug, Clone, Default)]
pub struct BoundText {
    /// Bound text per span, indexed like [`ResolvedGrid::spans`]
    pub cells: Vec<CellText>,
    /// Indices of the runs inside this block's grid, ascending
    pub consumed: Vec<usize>,
}

impl BoundText {
    /// Text of the span at emission index `index`.
    pub fn cell(&self, index: usize) -> Option<&CellText> {
        self.cells.get(index)
    }
}

/// Assigns text runs to resolved spans.
#[derive(Debug, Clone)]
pub struct CellTextBinder {
    tol: Tolerance,
    shift: f32,
    trim: bool,
}

impl CellTextBinder {
    /// Create a binder.
    ///
    /// `shift` moves both ends of every interval towards the origin, so an
    /// anchor up to `shift` before a boundary already counts as past it.
    pub fn new(tol: Tolerance, shift: f32) -> Self {
        Self {
            tol,
            shift,
            trim: true,
        }
    }

    /// Trim whitespace around each run before appending it.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Bind `texts` into the spans of `resolved`.
    ///
    /// Runs are visited in document order. Within a span, a run whose
    /// baseline differs from the previous run's starts a new line.
    pub fn bind(
        &self,
        texts: &[TextRun],
        grid: &Grid,
        axes: &AxisIndex,
        resolved: &ResolvedGrid,
    ) -> BoundText {
        let mut cells = vec![CellText::default(); resolved.len()];
        let mut baselines: Vec<Option<f32>> = vec![None; resolved.len()];
        let mut consumed = Vec::new();

        for (i, run) in texts.iter().enumerate() {
            let Some((row, col)) = self.locate(run, grid, axes) else {
                continue;
            };
            consumed.push(i);
            let Some(span) = grid.owner(row, col).and_then(|id| resolved.span_index_of(id)) else {
                continue;
            };

            let text = if self.trim { run.text.trim() } else { run.text.as_str() };
            if text.is_empty() {
                continue;
            }
            let same_line = baselines[span].is_some_and(|prev| self.tol.same(prev, run.y));
            let lines = &mut cells[span].lines;
            match lines.last_mut() {
                Some(line) if same_line => line.push_str(text),
                _ => lines.push(text.to_string()),
            }
            baselines[span] = Some(run.y);
        }

        BoundText { cells, consumed }
    }

    /// Grid cell containing the run's anchor.
    fn locate(&self, run: &TextRun, grid: &Grid, axes: &AxisIndex) -> Option<(usize, usize)> {
        let col = axes.xs.interval_of(run.x, self.shift)?;
        let row = axes.ys.interval_of(run.y, self.shift)?;
        if row >= grid.rows() || col >= grid.cols() {
            return None;
        }
        Some((row, col))
    }
}
