//! Coordinate normalization and duplicate-border removal.
//!
//! Content sources place y = 0 at the bottom of the page. Everything after
//! this module works top-down, so rectangles, text baselines and the media
//! box are all flipped against the page's content height here.

use crate::content::TextRun;
use crate::geometry::{Rect, Tolerance};

/// Flip a source rectangle into top-down page coordinates.
///
/// `(x0, y0)-(x1, y1)` becomes `(x0, H - y1)-(x1, H - y0)`.
pub fn normalize_rect(raw: &Rect, content_height: f32) -> Rect {
    raw.flip_y(content_height)
}

/// Flip a text run's baseline into top-down page coordinates.
pub fn normalize_text(run: &TextRun, content_height: f32) -> TextRun {
    TextRun {
        x: run.x,
        y: content_height - run.y,
        text: run.text.clone(),
    }
}

/// Remove rectangles that a later rectangle ε-contains.
///
/// Filled cell backgrounds are usually followed by their border strokes, so
/// the earlier of two nested rectangles is the duplicate. The scan only looks
/// forward: an enclosing rectangle drawn before the rectangles it encloses
/// survives together with them. Relative order of the survivors is kept.
///
/// # Examples
///
/// ```
/// use table_oxide::geometry::{Rect, Tolerance};
/// use table_oxide::layout::minimal_rects;
///
/// let fill = Rect::new(0.0, 0.0, 10.0, 5.0);
/// let stroke = Rect::new(-0.5, -0.5, 10.5, 5.5);
/// let kept = minimal_rects(&[fill, stroke], Tolerance::new(3.0));
/// assert_eq!(kept, vec![stroke]);
/// ```
pub fn minimal_rects(rects: &[Rect], tol: Tolerance) -> Vec<Rect> {
    rects
        .iter()
        .enumerate()
        .filter(|(i, rect)| {
            !rects[i + 1..]
                .iter()
                .any(|later| later.contains_rect(rect, tol))
        })
        .map(|(_, rect)| *rect)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_rect_flips_y_only() {
        let raw = Rect::new(72.0, 700.0, 300.0, 720.0);
        let rect = normalize_rect(&raw, 842.0);
        assert_eq!(rect, Rect::new(72.0, 122.0, 300.0, 142.0));
    }

    #[test]
    fn test_normalize_text() {
        let run = normalize_text(&TextRun::new(10.0, 800.0, "head"), 842.0);
        assert_eq!(run, TextRun::new(10.0, 42.0, "head"));
    }

    #[test]
    fn test_enclosing_first_keeps_both() {
        let frame = Rect::new(0.0, 0.0, 100.0, 100.0);
        let cell = Rect::new(0.0, 0.0, 50.0, 50.0);
        let tol = Tolerance::new(3.0);
        assert_eq!(minimal_rects(&[frame, cell], tol), vec![frame, cell]);
        assert_eq!(minimal_rects(&[cell, frame], tol), vec![frame]);
    }

    #[test]
    fn test_exact_duplicates_collapse_to_last() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 30.0, 10.0);
        let kept = minimal_rects(&[a, b, a, a], Tolerance::new(1.0));
        assert_eq!(kept, vec![b, a]);
    }

    #[test]
    fn test_disjoint_rects_untouched() {
        let rects = vec![
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(10.0, 0.0, 20.0, 10.0),
            Rect::new(0.0, 10.0, 20.0, 20.0),
        ];
        assert_eq!(minimal_rects(&rects, Tolerance::new(3.0)), rects);
    }
}
