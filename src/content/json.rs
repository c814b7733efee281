//! JSON-backed content source.
//!
//! Decodes a document-shaped payload:
//!
//! ```text
//! {"pages": [{"content_height": 842,
//!             "rects": [[x0, y0, x1, y1], ...],
//!             "texts": [{"x": 72, "y": 700, "text": "Total"}, ...],
//!             "media_box": [0, 0, 595, 842]}]}
//! ```
//!
//! Pages are decoded lazily; a page that does not have this shape is
//! reported as [`Error::ContentModelMismatch`] without affecting the others.

use serde::Deserialize;
use serde_json::Value;

use super::{ContentSource, PageContent, TextRun};
use crate::error::{Error, Result};
use crate::geometry::Rect;

#[derive(Debug, Deserialize)]
struct RawPage {
    content_height: f32,
    #[serde(default)]
    rects: Vec<[f32; 4]>,
    #[serde(default)]
    texts: Vec<TextRun>,
    #[serde(default)]
    media_box: Option<[f32; 4]>,
}

impl From<RawPage> for PageContent {
    fn from(raw: RawPage) -> Self {
        let to_rect = |r: [f32; 4]| Rect::new(r[0], r[1], r[2], r[3]);
        PageContent {
            rects: raw.rects.into_iter().map(to_rect).collect(),
            texts: raw.texts,
            content_height: raw.content_height,
            media_box: raw.media_box.map(to_rect),
        }
    }
}

/// A content source over a JSON document payload.
#[derive(Debug, Clone)]
pub struct JsonContentSource {
    pages: Vec<Value>,
}

impl JsonContentSource {
    /// Parse a payload. The root must be an object with a `pages` array.
    pub fn from_str(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json)?;
        Self::from_value(root)
    }

    /// Wrap an already-parsed payload.
    pub fn from_value(root: Value) -> Result<Self> {
        match root {
            Value::Object(mut map) => match map.remove("pages") {
                Some(Value::Array(pages)) => Ok(Self { pages }),
                Some(other) => Err(mismatch("pages array", &other)),
                None => Err(Error::ContentModelMismatch {
                    expected: "pages array".to_string(),
                    found: "no pages key".to_string(),
                }),
            },
            other => Err(mismatch("document object", &other)),
        }
    }
}

impl ContentSource for JsonContentSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_content(&self, page: usize) -> Result<PageContent> {
        let value = self.pages.get(page).ok_or(Error::PageOutOfRange {
            page,
            count: self.pages.len(),
        })?;
        if !value.is_object() {
            return Err(mismatch("page object", value));
        }
        let raw = RawPage::deserialize(value).map_err(|e| Error::ContentModelMismatch {
            expected: "page object with content_height, rects and texts".to_string(),
            found: e.to_string(),
        })?;
        Ok(raw.into())
    }
}

fn mismatch(expected: &str, found: &Value) -> Error {
    Error::ContentModelMismatch {
        expected: expected.to_string(),
        found: kind_of(found).to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
