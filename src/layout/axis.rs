//! Grid boundary collection.
//!
//! An [`AxisCoordinateSet`] holds the distinct boundary values of one axis,
//! strictly ascending. Insertion is ε-tolerant: a value within ε of an
//! existing entry is discarded, so any two entries are more than ε apart and
//! every coordinate near the set resolves to at most one nearest entry.

use crate::error::{Axis, Error, Result};
use crate::geometry::{Rect, Tolerance};

/// Strictly ascending, ε-merged boundary values of one axis.
#[derive(Debug, Clone)]
pub struct AxisCoordinateSet {
    values: Vec<f32>,
    tol: Tolerance,
}

impl AxisCoordinateSet {
    /// Create an empty set.
    pub fn new(tol: Tolerance) -> Self {
        Self {
            values: Vec::new(),
            tol,
        }
    }

    /// Insert `value` unless an entry within ε already exists.
    ///
    /// Returns `true` when the value became a new entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::geometry::Tolerance;
    /// use table_oxide::layout::AxisCoordinateSet;
    ///
    /// let mut xs = AxisCoordinateSet::new(Tolerance::new(3.0));
    /// assert!(xs.insert(10.0));
    /// assert!(xs.insert(50.0));
    /// assert!(!xs.insert(12.0));
    /// assert!(xs.insert(30.0));
    /// assert_eq!(xs.values(), &[10.0, 30.0, 50.0]);
    /// ```
    pub fn insert(&mut self, value: f32) -> bool {
        if self.index_of(value).is_some() {
            return false;
        }
        let at = self.values.partition_point(|&v| v < value);
        self.values.insert(at, value);
        true
    }

    /// Index of the entry within ε of `value`, preferring the nearest.
    pub fn index_of(&self, value: f32) -> Option<usize> {
        let at = self.values.partition_point(|&v| v < value);
        let below = at.checked_sub(1).filter(|&i| self.tol.same(self.values[i], value));
        let above = Some(at).filter(|&i| i < self.values.len() && self.tol.same(self.values[i], value));
        match (below, above) {
            (Some(b), Some(a)) => {
                if value - self.values[b] <= self.values[a] - value {
                    Some(b)
                } else {
                    Some(a)
                }
            },
            (b, a) => b.or(a),
        }
    }

    /// The canonical entry for `value`, if one is within ε.
    pub fn snap(&self, value: f32) -> Option<f32> {
        self.index_of(value).map(|i| self.values[i])
    }

    /// Index of the interval `[values[i] - shift, values[i + 1] - shift)`
    /// containing `value`.
    ///
    /// Intervals tile the axis without overlap, so every value inside the
    /// outer boundaries lands in exactly one of them.
    pub fn interval_of(&self, value: f32, shift: f32) -> Option<usize> {
        let count = self.values.partition_point(|&v| v - shift <= value);
        if count == 0 || count >= self.values.len() {
            None
        } else {
            Some(count - 1)
        }
    }

    /// The boundary values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of boundaries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set has no boundaries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of intervals between boundaries.
    pub fn spans(&self) -> usize {
        self.values.len().saturating_sub(1)
    }
}

/// The x and y boundaries of one block.
#[derive(Debug, Clone)]
pub struct AxisIndex {
    /// Column boundaries
    pub xs: AxisCoordinateSet,
    /// Row boundaries
    pub ys: AxisCoordinateSet,
}

impl AxisIndex {
    /// Collect every `min.x`/`max.x` and `min.y`/`max.y` of `rects`.
    pub fn from_rects(rects: &[Rect], tol: Tolerance) -> Self {
        let mut xs = AxisCoordinateSet::new(tol);
        let mut ys = AxisCoordinateSet::new(tol);
        for rect in rects {
            xs.insert(rect.min.x);
            xs.insert(rect.max.x);
            ys.insert(rect.min.y);
            ys.insert(rect.max.y);
        }
        Self { xs, ys }
    }

    /// Grid rows (intervals between y boundaries).
    pub fn rows(&self) -> usize {
        self.ys.spans()
    }

    /// Grid columns (intervals between x boundaries).
    pub fn cols(&self) -> usize {
        self.xs.spans()
    }

    /// Resolve a rectangle to its `(row_start, row_end, col_start, col_end)`
    /// grid range, end-exclusive.
    pub fn resolve(&self, rect: &Rect) -> Result<(usize, usize, usize, usize)> {
        let col = |v: f32| {
            self.xs
                .index_of(v)
                .ok_or(Error::GeometryInconsistency { axis: Axis::X, value: v })
        };
        let row = |v: f32| {
            self.ys
                .index_of(v)
                .ok_or(Error::GeometryInconsistency { axis: Axis::Y, value: v })
        };
        let (c0, c1) = (col(rect.min.x)?, col(rect.max.x)?);
        let (r0, r1) = (row(rect.min.y)?, row(rect.max.y)?);
        if c1 <= c0 {
            return Err(Error::GeometryInconsistency {
                axis: Axis::X,
                value: rect.max.x,
            });
        }
        if r1 <= r0 {
            return Err(Error::GeometryInconsistency {
                axis: Axis::Y,
                value: rect.max.y,
            });
        }
        Ok((r0, r1, c0, c1))
    }
}
