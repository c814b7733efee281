//! Span resolution.
//!
//! Walks a [`Grid`] row-major and coalesces cells into rowspan/colspan runs.
//! Every grid cell is covered by exactly one emitted span: occupied cells by
//! the span of their rectangle (first encounter wins), empty regions by
//! greedily grown gap spans that are marked [`CellState::EmittedGap`] as they
//! are emitted.

use crate::layout::grid::{CellState, Grid, RectId};

/// What a span holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// An empty placeholder filling an uncovered region
    Gap,
    /// The region owned by a rectangle
    Cell(RectId),
}

/// One emitted table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    /// Grid row of the top-left cell
    pub row: usize,
    /// Grid column of the top-left cell
    pub col: usize,
    /// Rows covered (at least 1)
    pub rowspan: usize,
    /// Columns covered (at least 1)
    pub colspan: usize,
    /// Gap or owning rectangle
    pub kind: SpanKind,
}

impl CellSpan {
    /// Whether `(row, col)` lies inside the span.
    pub fn covers(&self, row: usize, col: usize) -> bool {
        row >= self.row
            && row < self.row + self.rowspan
            && col >= self.col
            && col < self.col + self.colspan
    }
}

/// Spans of one block, grouped by the grid row they start in.
#[derive(Debug, Clone, Default)]
pub struct ResolvedGrid {
    /// `rows[r]` lists the spans starting in row `r`, left to right
    pub rows: Vec<Vec<CellSpan>>,
    /// Number of grid columns
    pub cols: usize,
    by_rect: Vec<Option<usize>>,
    flat: Vec<CellSpan>,
}

impl ResolvedGrid {
    /// All spans in emission order.
    pub fn spans(&self) -> &[CellSpan] {
        &self.flat
    }

    /// Emission index of the span owned by `id`.
    pub fn span_index_of(&self, id: RectId) -> Option<usize> {
        self.by_rect.get(id.index()).copied().flatten()
    }

    /// Number of spans.
    pub fn len(&self) -> usize {
        self.flat.len()
    }

    /// Whether no span was emitted.
    pub fn is_empty(&self) -> bool {
        self.flat.is_empty()
    }
}

/// Coalesce `grid` into spans.
///
/// `rect_count` sizes the processed-identity set; every [`RectId`] stamped
/// into the grid must be below it.
///
/// Gap cells are marked in `grid` as they are emitted, so the grid is
/// consumed by this pass.
pub fn resolve_spans(grid: &mut Grid, rect_count: usize) -> ResolvedGrid {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut processed = vec![false; rect_count];
    let mut by_rect = vec![None; rect_count];
    let mut out: Vec<Vec<CellSpan>> = vec![Vec::new(); rows];
    let mut flat = Vec::new();

    for row in 0..rows {
        for col in 0..cols {
            let span = match grid.get(row, col) {
                CellState::EmittedGap => continue,
                CellState::Empty => gap_span(grid, row, col),
                CellState::Occupied(id) => {
                    if processed[id.index()] {
                        continue;
                    }
                    processed[id.index()] = true;
                    by_rect[id.index()] = Some(flat.len());
                    rect_span(grid, row, col, id)
                },
            };
            out[row].push(span);
            flat.push(span);
        }
    }

    ResolvedGrid {
        rows: out,
        cols,
        by_rect,
        flat,
    }
}

/// Grow a gap right along the row, then down while every column stays empty.
fn gap_span(grid: &mut Grid, row: usize, col: usize) -> CellSpan {
    fn is_empty(grid: &Grid, r: usize, c: usize) -> bool {
        grid.get(r, c) == CellState::Empty
    }

    let mut colspan = 1;
    while col + colspan < grid.cols() && is_empty(grid, row, col + colspan) {
        colspan += 1;
    }
    let mut rowspan = 1;
    while row + rowspan < grid.rows()
        && (col..col + colspan).all(|c| is_empty(grid, row + rowspan, c))
    {
        rowspan += 1;
    }

    for r in row..row + rowspan {
        for c in col..col + colspan {
            grid.set(r, c, CellState::EmittedGap);
        }
    }

    CellSpan {
        row,
        col,
        rowspan,
        colspan,
        kind: SpanKind::Gap,
    }
}

/// Run-length of `id` to the right along the row and down the column.
fn rect_span(grid: &Grid, row: usize, col: usize, id: RectId) -> CellSpan {
    let owned = CellState::Occupied(id);
    let colspan = (col..grid.cols())
        .take_while(|&c| grid.get(row, c) == owned)
        .count();
    let rowspan = (row..grid.rows())
        .take_while(|&r| grid.get(r, col) == owned)
        .count();
    CellSpan {
        row,
        col,
        rowspan,
        colspan,
        kind: SpanKind::Cell(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Tolerance};
    use crate::layout::axis::AxisIndex;

    fn resolve(rects: &[Rect]) -> ResolvedGrid {
        let axes = AxisIndex::from_rects(rects, Tolerance::new(1.0));
        let mut grid = Grid::build(rects, &axes, false).unwrap();
        resolve_spans(&mut grid, rects.len())
    }

    fn dims(span: &CellSpan) -> (usize, usize, usize, usize) {
        (span.row, span.col, span.rowspan, span.colspan)
    }

    #[test]
    fn test_quadrants_are_unit_spans() {
        let resolved = resolve(&[
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(10.0, 0.0, 20.0, 10.0),
            Rect::new(0.0, 10.0, 10.0, 20.0),
            Rect::new(10.0, 10.0, 20.0, 20.0),
        ]);
        assert_eq!(resolved.len(), 4);
        assert!(resolved.spans().iter().all(|s| s.rowspan == 1 && s.colspan == 1));
        assert_eq!(resolved.rows[0].len(), 2);
        assert_eq!(resolved.rows[1].len(), 2);
    }

    #[test]
    fn test_wide_rect_gets_colspan() {
        let resolved = resolve(&[
            Rect::new(0.0, 0.0, 20.0, 10.0),
            Rect::new(0.0, 10.0, 10.0, 20.0),
            Rect::new(10.0, 10.0, 20.0, 20.0),
        ]);
        assert_eq!(dims(&resolved.rows[0][0]), (0, 0, 1, 2));
        assert_eq!(resolved.rows[1].len(), 2);
    }

    #[test]
    fn test_tall_rect_gets_rowspan() {
        let resolved = resolve(&[
            Rect::new(0.0, 0.0, 10.0, 20.0),
            Rect::new(10.0, 0.0, 20.0, 10.0),
            Rect::new(10.0, 10.0, 20.0, 20.0),
        ]);
        assert_eq!(dims(&resolved.rows[0][0]), (0, 0, 2, 1));
        assert_eq!(resolved.rows[1].len(), 1);
        assert_eq!(dims(&resolved.rows[1][0]), (1, 1, 1, 1));
    }

    #[test]
    fn test_gap_grows_right_then_down() {
        // 3x3 grid: left column, centre and bottom-right covered
        let resolved = resolve(&[
            Rect::new(0.0, 0.0, 10.0, 30.0),
            Rect::new(20.0, 20.0, 30.0, 30.0),
            Rect::new(10.0, 10.0, 20.0, 20.0),
        ]);
        let gaps: Vec<_> = resolved
            .spans()
            .iter()
            .filter(|s| s.kind == SpanKind::Gap)
            .map(dims)
            .collect();
        assert_eq!(gaps, vec![(0, 1, 1, 2), (1, 2, 1, 1), (2, 1, 1, 1)]);
    }

    #[test]
    fn test_gap_stops_when_any_column_is_taken() {
        let resolved = resolve(&[
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(20.0, 10.0, 30.0, 20.0),
            Rect::new(0.0, 20.0, 30.0, 30.0),
        ]);
        let gap = resolved.rows[0][1];
        assert_eq!(dims(&gap), (0, 1, 1, 2));
        assert_eq!(gap.kind, SpanKind::Gap);
    }

    #[test]
    fn test_every_cell_covered_exactly_once() {
        let resolved = resolve(&[
            Rect::new(0.0, 0.0, 10.0, 30.0),
            Rect::new(20.0, 20.0, 30.0, 30.0),
            Rect::new(10.0, 0.0, 30.0, 10.0),
        ]);
        for row in 0..3 {
            for col in 0..3 {
                let covering = resolved.spans().iter().filter(|s| s.covers(row, col)).count();
                assert_eq!(covering, 1, "cell ({}, {})", row, col);
            }
        }
    }

    #[test]
    fn test_span_index_lookup() {
        let resolved = resolve(&[
            Rect::new(10.0, 0.0, 20.0, 10.0),
            Rect::new(0.0, 0.0, 10.0, 10.0),
        ]);
        assert_eq!(resolved.span_index_of(RectId(1)), Some(0));
        assert_eq!(resolved.span_index_of(RectId(0)), Some(1));
        assert_eq!(resolved.span_index_of(RectId(7)), None);
    }
}
