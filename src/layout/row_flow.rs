//! Reading-order text for content outside ruled tables.
//!
//! Runs are bucketed into rows by baseline (ε-tolerant), rows are read top to
//! bottom and each row left to right. A row made of a single one-character
//! whitespace run terminates the current section.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::BodyWindow;
use crate::content::TextRun;
use crate::geometry::Tolerance;
use crate::layout::axis::AxisCoordinateSet;

lazy_static! {
    /// A bare page number
    static ref RE_FOLIO: Regex = Regex::new(r"^\d+$").unwrap();
}

/// Runs sharing one baseline, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRow {
    /// Canonical baseline of the row
    pub baseline: f32,
    /// Member runs sorted by x
    pub runs: Vec<TextRun>,
}

impl TextRow {
    /// Concatenated text of the row.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// A single run that is exactly one whitespace character.
    pub fn is_section_break(&self) -> bool {
        match self.runs.as_slice() {
            [only] => {
                let mut chars = only.text.chars();
                matches!((chars.next(), chars.next()), (Some(c), None) if c.is_whitespace())
            },
            _ => false,
        }
    }

    /// A single run holding nothing but digits.
    pub fn is_folio(&self) -> bool {
        match self.runs.as_slice() {
            [only] => RE_FOLIO.is_match(only.text.trim()),
            _ => false,
        }
    }
}

/// Group runs into rows, top to bottom.
///
/// Baselines are canonicalized against an ε-merged [`AxisCoordinateSet`]
/// built in document order, then sorted exactly.
pub fn group_rows(runs: &[TextRun], tol: Tolerance) -> Vec<TextRow> {
    let mut baselines = AxisCoordinateSet::new(tol);
    for run in runs {
        baselines.insert(run.y);
    }

    let mut keyed: Vec<(f32, &TextRun)> = runs
        .iter()
        .map(|run| (baselines.snap(run.y).unwrap_or(run.y), run))
        .collect();
    keyed.sort_by(|(ya, a), (yb, b)| ya.total_cmp(yb).then(a.x.total_cmp(&b.x)));

    let mut rows: Vec<TextRow> = Vec::new();
    for (baseline, run) in keyed {
        match rows.last_mut() {
            Some(row) if row.baseline == baseline => row.runs.push(run.clone()),
            _ => rows.push(TextRow {
                baseline,
                runs: vec![run.clone()],
            }),
        }
    }
    rows
}

/// Builds reading-order sections across consecutive pages.
#[derive(Debug, Clone)]
pub struct RowFlowExtractor {
    tol: Tolerance,
    window: Option<BodyWindow>,
    drop_folio: bool,
    buffer: String,
}

impl RowFlowExtractor {
    /// Create an extractor over the whole page height.
    pub fn new(tol: Tolerance) -> Self {
        Self {
            tol,
            window: None,
            drop_folio: true,
            buffer: String::new(),
        }
    }

    /// Only consider runs whose baseline is inside `window`.
    pub fn with_window(mut self, window: Option<BodyWindow>) -> Self {
        self.window = window;
        self
    }

    /// Enable or disable the page-number heuristic.
    pub fn with_drop_folio(mut self, enable: bool) -> Self {
        self.drop_folio = enable;
        self
    }

    /// Feed one page of normalized runs, returning the sections it completed.
    ///
    /// Text after the last terminator stays buffered and continues on the
    /// next page.
    pub fn push_page(&mut self, runs: &[TextRun]) -> Vec<String> {
        let body: Vec<TextRun> = runs
            .iter()
            .filter(|run| self.window.map_or(true, |w| w.contains(run.y)))
            .cloned()
            .collect();
        let mut rows = group_rows(&body, self.tol);

        // Heuristic: a lone number closing the page is usually its folio.
        if self.drop_folio && rows.last().is_some_and(TextRow::is_folio) {
            rows.pop();
        }

        let mut sections = Vec::new();
        for row in &rows {
            if row.is_section_break() {
                if let Some(section) = self.take_section() {
                    sections.push(section);
                }
            } else {
                self.buffer.push_str(&row.text());
            }
        }
        sections
    }

    /// Return the trailing section that never reached a terminator.
    pub fn finish(&mut self) -> Option<String> {
        self.take_section()
    }

    fn take_section(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }
}
