//! Page segmentation into independent table blocks.
//!
//! Rectangles are ordered top to bottom and split wherever the vertical gap
//! between consecutive rectangles reaches the gap threshold. Each resulting
//! [`Block`] is reconstructed as its own table.
//!
//! Rectangles are ordered with [`f32::total_cmp`] on their raw extents, which
//! is a total order, and gaps are measured on those extents. Once a block is
//! closed its members are snapped to the block's own
//! [`AxisCoordinateSet`](crate::layout::AxisCoordinateSet)s, so no block's
//! boundaries depend on another block.

use std::cmp::Ordering;

use crate::geometry::{Point, Rect, Tolerance};
use crate::layout::axis::AxisIndex;

/// A vertically contiguous cluster of rectangles.
///
/// Rectangles are in draw order with canonical coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Member rectangles
    pub rects: Vec<Rect>,
}

impl Block {
    /// Number of rectangles in the block.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Whether the block has no rectangles.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Bounding box of all member rectangles.
    pub fn bounds(&self) -> Option<Rect> {
        let (first, rest) = self.rects.split_first()?;
        Some(rest.iter().fold(*first, |acc, r| acc.union(r)))
    }
}

/// Splits a page's rectangles into blocks.
#[derive(Debug, Clone)]
pub struct PageSegmenter {
    tol: Tolerance,
    gap_threshold: f32,
    bound: Option<Rect>,
}

impl PageSegmenter {
    /// Create a segmenter.
    pub fn new(tol: Tolerance, gap_threshold: f32) -> Self {
        Self {
            tol,
            gap_threshold,
            bound: None,
        }
    }

    /// Drop rectangles whose vertical extent leaves `bound`.
    pub fn with_bound(mut self, bound: Rect) -> Self {
        self.bound = Some(bound);
        self
    }

    /// Partition normalized rectangles into blocks.
    ///
    /// Ruling lines (width or height within ε) never seed a grid boundary
    /// and are dropped, as are consecutive ε-duplicates. Gaps are measured
    /// on the raw extents; snapping happens per block.
    pub fn segment(&self, rects: &[Rect]) -> Vec<Block> {
        let mut ordered: Vec<(usize, Rect)> = rects
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, r)| self.in_bound(r) && !self.is_degenerate(r))
            .collect();
        let usable = ordered.len();
        ordered.sort_by(|(ia, a), (ib, b)| sort_key(a, b).then(ia.cmp(ib)));
        ordered.dedup_by(|(_, next), (_, kept)| self.same_rect(next, kept));

        let mut blocks = Vec::new();
        let mut current: Vec<(usize, Rect)> = Vec::new();
        let mut last: Option<Rect> = None;
        for (idx, rect) in ordered {
            if let Some(prev) = last {
                if rect.min.y - prev.max.y >= self.gap_threshold {
                    self.flush(&mut current, &mut blocks);
                }
            }
            current.push((idx, rect));
            last = Some(rect);
        }
        self.flush(&mut current, &mut blocks);

        log::debug!(
            "Segmented {} rectangles ({} usable) into {} blocks",
            rects.len(),
            usable,
            blocks.len()
        );
        blocks
    }

    /// Restore draw order and snap the members to the block's own boundaries.
    fn flush(&self, current: &mut Vec<(usize, Rect)>, blocks: &mut Vec<Block>) {
        if current.is_empty() {
            return;
        }
        current.sort_by_key(|(idx, _)| *idx);
        let raw: Vec<Rect> = current.drain(..).map(|(_, r)| r).collect();

        let axes = AxisIndex::from_rects(&raw, self.tol);
        let snap = |r: &Rect| Rect {
            min: Point::new(
                axes.xs.snap(r.min.x).unwrap_or(r.min.x),
                axes.ys.snap(r.min.y).unwrap_or(r.min.y),
            ),
            max: Point::new(
                axes.xs.snap(r.max.x).unwrap_or(r.max.x),
                axes.ys.snap(r.max.y).unwrap_or(r.max.y),
            ),
        };

        let mut members: Vec<Rect> = Vec::with_capacity(raw.len());
        for rect in raw.iter().map(snap) {
            if rect.max.x <= rect.min.x || rect.max.y <= rect.min.y {
                log::debug!("Dropping rectangle collapsed by snapping: {:?}", rect);
                continue;
            }
            if !members.contains(&rect) {
                members.push(rect);
            }
        }
        if !members.is_empty() {
            blocks.push(Block { rects: members });
        }
    }

    fn in_bound(&self, rect: &Rect) -> bool {
        match self.bound {
            Some(bound) => self.tol.ge(rect.min.y, bound.min.y) && self.tol.le(rect.max.y, bound.max.y),
            None => true,
        }
    }

    fn is_degenerate(&self, rect: &Rect) -> bool {
        rect.width() <= self.tol.epsilon() || rect.height() <= self.tol.epsilon()
    }

    fn same_rect(&self, a: &Rect, b: &Rect) -> bool {
        self.tol.same(a.min.x, b.min.x)
            && self.tol.same(a.min.y, b.min.y)
            && self.tol.same(a.max.x, b.max.x)
            && self.tol.same(a.max.y, b.max.y)
    }
}

fn sort_key(a: &Rect, b: &Rect) -> Ordering {
    a.min
        .y
        .total_cmp(&b.min.y)
        .then(a.max.y.total_cmp(&b.max.y))
        .then(a.min.x.total_cmp(&b.min.x))
        .then(a.max.x.total_cmp(&b.max.x))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter() -> PageSegmenter {
        PageSegmenter::new(Tolerance::new(3.0), 3.0)
    }

    #[test]
    fn test_touching_rows_form_one_block() {
        let rects = vec![
            Rect::new(0.0, 0.0, 50.0, 20.0),
            Rect::new(50.0, 0.0, 100.0, 20.0),
            Rect::new(0.0, 20.0, 100.0, 40.0),
        ];
        let blocks = segmenter().segment(&rects);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].rects, rects);
    }

    #[test]
    fn test_gap_splits_blocks() {
        let rects = vec![
            Rect::new(0.0, 100.0, 50.0, 120.0),
            Rect::new(0.0, 0.0, 50.0, 20.0),
        ];
        let blocks = segmenter().segment(&rects);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].rects, vec![rects[1]]);
        assert_eq!(blocks[1].rects, vec![rects[0]]);
    }

    #[test]
    fn test_gap_just_below_threshold_merges() {
        let segmenter = PageSegmenter::new(Tolerance::new(1.0), 5.0);
        let rects = vec![
            Rect::new(0.0, 0.0, 50.0, 20.0),
            Rect::new(0.0, 24.0, 50.0, 40.0),
        ];
        assert_eq!(segmenter.segment(&rects).len(), 1);
        let rects = vec![
            Rect::new(0.0, 0.0, 50.0, 20.0),
            Rect::new(0.0, 25.0, 50.0, 40.0),
        ];
        assert_eq!(segmenter.segment(&rects).len(), 2);
    }

    #[test]
    fn test_gap_below_tolerance_still_splits() {
        let segmenter = PageSegmenter::new(Tolerance::new(3.0), 2.0);
        let rects = vec![
            Rect::new(0.0, 0.0, 50.0, 20.0),
            Rect::new(0.0, 22.5, 50.0, 42.5),
        ];
        assert_eq!(segmenter.segment(&rects).len(), 2);
        let rects = vec![
            Rect::new(0.0, 0.0, 50.0, 20.0),
            Rect::new(0.0, 21.5, 50.0, 42.5),
        ];
        assert_eq!(segmenter.segment(&rects).len(), 1);
    }

    #[test]
    fn test_blocks_snap_independently() {
        let upper = vec![
            Rect::new(0.0, 0.0, 100.0, 20.0),
            Rect::new(100.0, 0.0, 200.0, 20.0),
        ];
        let lower = vec![
            Rect::new(0.0, 100.0, 102.0, 120.0),
            Rect::new(104.5, 100.0, 200.0, 120.0),
        ];
        let expected = vec![
            Rect::new(0.0, 100.0, 102.0, 120.0),
            Rect::new(102.0, 100.0, 200.0, 120.0),
        ];

        let alone = segmenter().segment(&lower);
        assert_eq!(alone[0].rects, expected);

        let mut page = upper.clone();
        page.extend(lower);
        let blocks = segmenter().segment(&page);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].rects, upper);
        assert_eq!(blocks[1].rects, expected);
    }

    #[test]
    fn test_block_keeps_draw_order() {
        let frame = Rect::new(0.0, 0.0, 100.0, 40.0);
        let cells = [
            Rect::new(0.0, 0.0, 50.0, 20.0),
            Rect::new(50.0, 0.0, 100.0, 20.0),
        ];
        let blocks = segmenter().segment(&[frame, cells[0], cells[1]]);
        assert_eq!(blocks[0].rects, vec![frame, cells[0], cells[1]]);
    }

    #[test]
    fn test_ruling_lines_dropped() {
        let rects = vec![
            Rect::new(0.0, 0.0, 100.0, 0.5),
            Rect::new(0.0, 0.0, 1.0, 100.0),
            Rect::new(0.0, 0.0, 100.0, 100.0),
        ];
        let blocks = segmenter().segment(&rects);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].rects, vec![rects[2]]);
    }

    #[test]
    fn test_coordinates_are_canonicalized() {
        let rects = vec![
            Rect::new(0.0, 0.0, 50.0, 20.0),
            Rect::new(51.0, 1.0, 100.0, 21.0),
        ];
        let blocks = segmenter().segment(&rects);
        assert_eq!(blocks[0].rects[1], Rect::new(50.0, 0.0, 100.0, 20.0));
    }

    #[test]
    fn test_snapped_duplicates_removed() {
        let rects = vec![
            Rect::new(0.0, 0.0, 50.0, 20.0),
            Rect::new(1.0, 1.0, 51.0, 21.0),
        ];
        let blocks = segmenter().segment(&rects);
        assert_eq!(blocks[0].len(), 1);
    }

    #[test]
    fn test_media_bound_clips_vertically() {
        let segmenter = segmenter().with_bound(Rect::new(0.0, 50.0, 600.0, 800.0));
        let rects = vec![
            Rect::new(0.0, 10.0, 50.0, 30.0),
            Rect::new(0.0, 100.0, 50.0, 130.0),
            Rect::new(0.0, 790.0, 50.0, 820.0),
        ];
        let blocks = segmenter.segment(&rects);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].rects, vec![rects[1]]);
    }

    #[test]
    fn test_block_bounds() {
        let block = Block {
            rects: vec![Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(10.0, 10.0, 30.0, 20.0)],
        };
        assert_eq!(block.bounds(), Some(Rect::new(0.0, 0.0, 30.0, 20.0)));
        assert_eq!(Block { rects: vec![] }.bounds(), None);
    }
}
