//! Cell grid construction.
//!
//! Each rectangle of a block is stamped onto a `rows × cols` grid indexed by
//! the block's [`AxisIndex`]. Rectangles are identified by small integer ids
//! (their position in the block), stamped in draw order. When two rectangles
//! overlap, the one stamped last owns the contested cells.

use std::fmt;

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::layout::axis::AxisIndex;

/// Block-local rectangle identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RectId(pub u32);

impl RectId {
    /// Position of the rectangle in its block.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// No rectangle covers the cell and no gap span includes it yet
    Empty,
    /// The cell belongs to a rectangle
    Occupied(RectId),
    /// The cell is part of an already emitted empty span
    EmittedGap,
}

/// A `rows × cols` grid of cell states, stored row-major.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
    overlaps: usize,
}

impl Grid {
    /// Allocate an all-empty grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellState::Empty; rows * cols],
            overlaps: 0,
        }
    }

    /// Stamp every rectangle onto a grid sized by `axes`.
    ///
    /// A corner that matches no boundary fails with
    /// [`Error::GeometryInconsistency`]. With `strict` set, a cell stamped by
    /// two rectangles fails with [`Error::OverlapDetected`]; otherwise the
    /// later rectangle silently wins.
    pub fn build(rects: &[Rect], axes: &AxisIndex, strict: bool) -> Result<Self> {
        let mut grid = Grid::new(axes.rows(), axes.cols());
        for (i, rect) in rects.iter().enumerate() {
            let id = RectId(i as u32);
            let (r0, r1, c0, c1) = axes.resolve(rect)?;
            grid.stamp(id, r0..r1, c0..c1, strict)?;
        }
        if grid.overlaps > 0 {
            log::debug!("{} grid cells restamped by overlapping rectangles", grid.overlaps);
        }
        Ok(grid)
    }

    fn stamp(
        &mut self,
        id: RectId,
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
        strict: bool,
    ) -> Result<()> {
        for row in rows {
            for col in cols.clone() {
                let cell = &mut self.cells[row * self.cols + col];
                if let CellState::Occupied(prev) = *cell {
                    if strict {
                        return Err(Error::OverlapDetected {
                            first: prev.0,
                            second: id.0,
                            row,
                            col,
                        });
                    }
                    self.overlaps += 1;
                }
                *cell = CellState::Occupied(id);
            }
        }
        Ok(())
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Number of cell stamps that replaced another rectangle.
    pub fn overlaps(&self) -> usize {
        self.overlaps
    }

    /// State of the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> CellState {
        self.cells[row * self.cols + col]
    }

    /// Owner of the cell at `(row, col)`, if any.
    pub fn owner(&self, row: usize, col: usize) -> Option<RectId> {
        match self.get(row, col) {
            CellState::Occupied(id) => Some(id),
            _ => None,
        }
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, state: CellState) {
        self.cells[row * self.cols + col] = state;
    }

    /// Render the grid as one line per row: `O` occupied, `X` not.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::layout::Grid;
    ///
    /// let grid = Grid::new(2, 3);
    /// assert_eq!(grid.occupancy_diagram(), vec!["XXX", "XXX"]);
    /// ```
    pub fn occupancy_diagram(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        CellState::Occupied(_) => 'O',
                        _ => 'X',
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Axis;
    use crate::geometry::Tolerance;

    fn build(rects: &[Rect], strict: bool) -> Result<Grid> {
        let axes = AxisIndex::from_rects(rects, Tolerance::new(1.0));
        Grid::build(rects, &axes, strict)
    }

    #[test]
    fn test_single_rect_fills_one_cell() {
        let grid = build(&[Rect::new(0.0, 0.0, 10.0, 5.0)], false).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (1, 1));
        assert_eq!(grid.owner(0, 0), Some(RectId(0)));
    }

    #[test]
    fn test_wide_rect_stamps_every_column() {
        let rects = vec![
            Rect::new(0.0, 0.0, 10.0, 5.0),
            Rect::new(10.0, 0.0, 20.0, 5.0),
            Rect::new(0.0, 5.0, 20.0, 10.0),
        ];
        let grid = build(&rects, false).unwrap();
        assert_eq!(grid.owner(0, 0), Some(RectId(0)));
        assert_eq!(grid.owner(0, 1), Some(RectId(1)));
        assert_eq!(grid.owner(1, 0), Some(RectId(2)));
        assert_eq!(grid.owner(1, 1), Some(RectId(2)));
    }

    #[test]
    fn test_uncovered_cells_stay_empty() {
        let rects = vec![Rect::new(0.0, 0.0, 10.0, 5.0), Rect::new(10.0, 5.0, 20.0, 10.0)];
        let grid = build(&rects, false).unwrap();
        assert_eq!(grid.get(0, 1), CellState::Empty);
        assert_eq!(grid.get(1, 0), CellState::Empty);
        assert_eq!(grid.occupancy_diagram(), vec!["OX", "XO"]);
    }

    #[test]
    fn test_last_stamped_wins() {
        let frame = Rect::new(0.0, 0.0, 20.0, 10.0);
        let cell = Rect::new(0.0, 0.0, 10.0, 5.0);
        let grid = build(&[frame, cell], false).unwrap();
        assert_eq!(grid.owner(0, 0), Some(RectId(1)));
        assert_eq!(grid.owner(1, 1), Some(RectId(0)));
        assert_eq!(grid.overlaps(), 1);
    }

    #[test]
    fn test_strict_mode_reports_overlap() {
        let frame = Rect::new(0.0, 0.0, 20.0, 10.0);
        let cell = Rect::new(0.0, 0.0, 10.0, 5.0);
        let err = build(&[frame, cell], true).unwrap_err();
        assert!(matches!(
            err,
            Error::OverlapDetected {
                first: 0,
                second: 1,
                row: 0,
                col: 0
            }
        ));
    }

    #[test]
    fn test_foreign_rect_is_inconsistent() {
        let axes = AxisIndex::from_rects(&[Rect::new(0.0, 0.0, 10.0, 5.0)], Tolerance::new(1.0));
        let err = Grid::build(&[Rect::new(0.0, 0.0, 10.0, 50.0)], &axes, false).unwrap_err();
        assert!(matches!(err, Error::GeometryInconsistency { axis: Axis::Y, .. }));
    }
}
