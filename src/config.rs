//! Configuration for table reconstruction.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{Tolerance, DEFAULT_TOLERANCE};

/// Presentational attributes of every emitted `<table>` element.
pub const DEFAULT_TABLE_ATTRIBUTES: &str =
    r#"border="2" bordercolor="black" width="90%" cellspacing="0" cellpadding="5""#;

/// Vertical window of the page body, in normalized (top-down) coordinates.
///
/// Text above `top` or below `bottom` belongs to headers and footers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyWindow {
    /// Smallest baseline y that is part of the body
    pub top: f32,
    /// Largest baseline y that is part of the body
    pub bottom: f32,
}

impl BodyWindow {
    /// Create a window spanning `top..=bottom`.
    pub fn new(top: f32, bottom: f32) -> Self {
        Self { top, bottom }
    }

    /// Whether a baseline lies inside the window.
    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y <= self.bottom
    }
}

/// Table reconstruction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionConfig {
    /// Distance below which two coordinates are the same (ε).
    pub tolerance: f32,

    /// Vertical gap that separates two blocks.
    pub gap_threshold: f32,

    /// Shift applied to the half-open text membership test.
    pub boundary_epsilon: f32,

    /// Minimum number of distinct x boundaries for a block to form a table.
    pub min_x_boundaries: usize,

    /// Drop rectangles outside the media box.
    pub clip_to_media_box: bool,

    /// Vertical window for reading-order text.
    pub body_window: Option<BodyWindow>,

    /// Drop a final bare-numeric row as a page number.
    pub drop_folio: bool,

    /// Trim whitespace around each run bound into a cell.
    pub trim_cell_text: bool,

    /// Fail a block when two rectangles stamp the same grid cell.
    pub strict_overlap: bool,

    /// Attach block snapshots to page output.
    pub collect_snapshots: bool,

    /// Attributes written on every `<table>` element.
    pub table_attributes: String,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconstructionConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            gap_threshold: DEFAULT_TOLERANCE,
            boundary_epsilon: 0.01,
            min_x_boundaries: 3,
            clip_to_media_box: true,
            body_window: None,
            drop_folio: true,
            trim_cell_text: true,
            strict_overlap: false,
            collect_snapshots: false,
            table_attributes: DEFAULT_TABLE_ATTRIBUTES.to_string(),
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The tolerance as a comparison helper.
    pub fn tol(&self) -> Tolerance {
        Tolerance::new(self.tolerance)
    }

    /// Set the coordinate tolerance.
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the block gap threshold.
    pub fn with_gap_threshold(mut self, gap: f32) -> Self {
        self.gap_threshold = gap;
        self
    }

    /// Set the membership test shift.
    pub fn with_boundary_epsilon(mut self, epsilon: f32) -> Self {
        self.boundary_epsilon = epsilon;
        self
    }

    /// Set the minimum number of x boundaries per table.
    pub fn with_min_x_boundaries(mut self, count: usize) -> Self {
        self.min_x_boundaries = count;
        self
    }

    /// Enable or disable media box clipping.
    pub fn with_media_box_clipping(mut self, enable: bool) -> Self {
        self.clip_to_media_box = enable;
        self
    }

    /// Restrict reading-order text to a vertical window.
    pub fn with_body_window(mut self, window: BodyWindow) -> Self {
        self.body_window = Some(window);
        self
    }

    /// Enable or disable the page-number heuristic.
    pub fn with_drop_folio(mut self, enable: bool) -> Self {
        self.drop_folio = enable;
        self
    }

    /// Enable or disable trimming of cell text.
    pub fn with_trim_cell_text(mut self, enable: bool) -> Self {
        self.trim_cell_text = enable;
        self
    }

    /// Enable or disable strict overlap validation.
    pub fn with_strict_overlap(mut self, enable: bool) -> Self {
        self.strict_overlap = enable;
        self
    }

    /// Enable or disable block snapshots.
    pub fn with_snapshots(mut self, enable: bool) -> Self {
        self.collect_snapshots = enable;
        self
    }

    /// Replace the `<table>` attributes.
    pub fn with_table_attributes(mut self, attributes: impl Into<String>) -> Self {
        self.table_attributes = attributes.into();
        self
    }

    /// Check the configuration for values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !self.gap_threshold.is_finite() || self.gap_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "gap threshold must be non-negative, got {}",
                self.gap_threshold
            )));
        }
        if !self.boundary_epsilon.is_finite()
            || self.boundary_epsilon < 0.0
            || self.boundary_epsilon >= self.tolerance
        {
            return Err(Error::InvalidConfig(format!(
                "boundary epsilon must be in [0, tolerance), got {}",
                self.boundary_epsilon
            )));
        }
        if self.min_x_boundaries < 2 {
            return Err(Error::InvalidConfig(format!(
                "a table needs at least 2 x boundaries, got {}",
                self.min_x_boundaries
            )));
        }
        if let Some(window) = self.body_window {
            if window.top > window.bottom {
                return Err(Error::InvalidConfig(format!(
                    "body window top {} is below bottom {}",
                    window.top, window.bottom
                )));
            }
        }
        Ok(())
    }
}
