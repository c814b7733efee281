//! HTML table rendering.
//!
//! Serializes a resolved grid and its bound text as a `<table>` element with
//! one `<tr>` per grid row. Gap spans render as self-closing `<td ... />`,
//! rectangle spans as `<td ...>text</td>` with `<br/>` between lines.
//! `colspan`/`rowspan` are omitted when equal to 1.

use std::fmt::Write;

use crate::config::DEFAULT_TABLE_ATTRIBUTES;
use crate::layout::{BoundText, CellSpan, ResolvedGrid, SpanKind};

/// Renders reconstructed tables as HTML markup.
///
/// # Examples
///
/// ```
/// use table_oxide::converters::TableRenderer;
///
/// let renderer = TableRenderer::new().with_attributes(r#"border="1""#);
/// assert_eq!(renderer.attributes(), r#"border="1""#);
/// ```
#[derive(Debug, Clone)]
pub struct TableRenderer {
    attributes: String,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a renderer with the default presentational attributes.
    pub fn new() -> Self {
        Self {
            attributes: DEFAULT_TABLE_ATTRIBUTES.to_string(),
        }
    }

    /// Replace the attributes written on the `<table>` element.
    pub fn with_attributes(mut self, attributes: impl Into<String>) -> Self {
        self.attributes = attributes.into();
        self
    }

    /// Attributes written on the `<table>` element.
    pub fn attributes(&self) -> &str {
        &self.attributes
    }

    /// Render `resolved` with the text in `bound`.
    pub fn render(&self, resolved: &ResolvedGrid, bound: &BoundText) -> String {
        let mut out = String::new();
        if self.attributes.is_empty() {
            out.push_str("<table>");
        } else {
            let _ = write!(out, "<table {}>", self.attributes);
        }

        let mut index = 0;
        for row in &resolved.rows {
            out.push_str("<tr>");
            for span in row {
                match span.kind {
                    SpanKind::Gap => {
                        out.push_str("<td");
                        push_span_attrs(&mut out, span);
                        out.push_str(" />");
                    },
                    SpanKind::Cell(_) => {
                        out.push_str("<td");
                        push_span_attrs(&mut out, span);
                        out.push('>');
                        if let Some(text) = bound.cell(index) {
                            let lines: Vec<String> =
                                text.lines.iter().map(|l| escape_html(l)).collect();
                            out.push_str(&lines.join("<br/>"));
                        }
                        out.push_str("</td>");
                    },
                }
                index += 1;
            }
            out.push_str("</tr>");
        }

        out.push_str("</table>");
        out
    }
}

fn push_span_attrs(out: &mut String, span: &CellSpan) {
    if span.colspan > 1 {
        let _ = write!(out, r#" colspan="{}""#, span.colspan);
    }
    if span.rowspan > 1 {
        let _ = write!(out, r#" rowspan="{}""#, span.rowspan);
    }
}

/// Escape HTML special characters.
///
/// Replaces &, <, >, ", and ' with their HTML entity equivalents.
///
/// # Examples
///
/// ```
/// # use table_oxide::converters::html::escape_html;
/// let text = "AT&T <Company>";
/// let escaped = escape_html(text);
/// assert_eq!(escaped, "AT&amp;T &lt;Company&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
