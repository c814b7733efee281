//! Geometric primitives for table reconstruction.
//!
//! This module provides the point and rectangle types shared by every stage
//! of the pipeline, plus [`Tolerance`], the single ε that defines "same
//! coordinate" for all comparisons.

use serde::{Deserialize, Serialize};

/// Default tolerance in page units.
pub const DEFAULT_TOLERANCE: f32 = 3.0;

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle given by its minimum and maximum corners.
///
/// After normalization `min.x <= max.x` and `min.y <= max.y`, with y growing
/// downwards (top-down page coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum corner
    pub min: Point,
    /// Maximum corner
    pub max: Point,
}

impl Rect {
    /// Create a rectangle from two corner coordinates.
    ///
    /// The corners may be given in any order; they are sorted per axis.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::geometry::Rect;
    ///
    /// let rect = Rect::new(110.0, 20.0, 10.0, 70.0);
    /// assert_eq!(rect.min.x, 10.0);
    /// assert_eq!(rect.max.x, 110.0);
    /// assert_eq!(rect.width(), 100.0);
    /// assert_eq!(rect.height(), 50.0);
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            min: Point::new(x0.min(x1), y0.min(y1)),
            max: Point::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Corner coordinates as `[min.x, min.y, max.x, max.y]`.
    pub fn to_array(&self) -> [f32; 4] {
        [self.min.x, self.min.y, self.max.x, self.max.y]
    }

    /// Reflect the rectangle across the horizontal line `y = height / 2`.
    ///
    /// Converts between the bottom-up convention of the content source and
    /// the top-down convention used by the pipeline. x is untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::geometry::Rect;
    ///
    /// let flipped = Rect::new(0.0, 10.0, 50.0, 30.0).flip_y(100.0);
    /// assert_eq!(flipped, Rect::new(0.0, 70.0, 50.0, 90.0));
    /// ```
    pub fn flip_y(&self, height: f32) -> Rect {
        Rect {
            min: Point::new(self.min.x, height - self.max.y),
            max: Point::new(self.max.x, height - self.min.y),
        }
    }

    /// Check if this rectangle contains `other`, within tolerance.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::geometry::{Rect, Tolerance};
    ///
    /// let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    /// let inner = Rect::new(-1.0, 10.0, 50.0, 101.0);
    /// assert!(outer.contains_rect(&inner, Tolerance::new(3.0)));
    /// assert!(!outer.contains_rect(&inner, Tolerance::new(0.5)));
    /// ```
    pub fn contains_rect(&self, other: &Rect, tol: Tolerance) -> bool {
        tol.le(self.min.x, other.min.x)
            && tol.le(self.min.y, other.min.y)
            && tol.ge(self.max.x, other.max.x)
            && tol.ge(self.max.y, other.max.y)
    }

    /// Compute the union of this rectangle with another.
    ///
    /// Returns the smallest rectangle that contains both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

/// ε-tolerant coordinate comparisons.
///
/// Two coordinates are the same when they differ by no more than ε.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance(f32);

impl Tolerance {
    /// Create a tolerance of `epsilon` page units.
    pub fn new(epsilon: f32) -> Self {
        Self(epsilon)
    }

    /// The ε value.
    pub fn epsilon(&self) -> f32 {
        self.0
    }

    /// `a` and `b` are within ε of each other.
    ///
    /// # Examples
    ///
    /// ```
    /// use table_oxide::geometry::Tolerance;
    ///
    /// let tol = Tolerance::new(3.0);
    /// assert!(tol.same(10.0, 13.0));
    /// assert!(!tol.same(10.0, 13.5));
    /// ```
    #[inline]
    pub fn same(&self, a: f32, b: f32) -> bool {
        (a - b).abs() <= self.0
    }

    /// `a <= b`, allowing `a` to exceed `b` by up to ε.
    #[inline]
    pub fn le(&self, a: f32, b: f32) -> bool {
        a <= b + self.0
    }

    /// `a >= b`, allowing `a` to fall short of `b` by up to ε.
    #[inline]
    pub fn ge(&self, a: f32, b: f32) -> bool {
        a + self.0 >= b
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_TOLERANCE)
    }
}
