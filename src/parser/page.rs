//! Page content extracted from a vector document.

use crate::error::{PatternError, Result};
use crate::model::Primitive;
use serde::{Deserialize, Serialize};

/// Everything the loader needs from one document page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageContent {
    /// Zero-based page index.
    pub index: usize,
    /// Page width in points.
    pub width_pt: f64,
    /// Page height in points.
    pub height_pt: f64,
    /// Plain text found on the page, one text run per line.
    pub text: String,
    /// Path segments in points, top-left page frame (y grows downwards).
    pub primitives: Vec<Primitive>,
}

impl PageContent {
    /// Create an empty page with the given extents.
    pub fn new(index: usize, width_pt: f64, height_pt: f64) -> Self {
        Self {
            index,
            width_pt,
            height_pt,
            ..Default::default()
        }
    }

    /// Set the page text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the page primitives.
    pub fn with_primitives(mut self, primitives: Vec<Primitive>) -> Self {
        self.primitives = primitives;
        self
    }
}

/// A multi-page vector document, one garment piece per page.
pub trait VectorDocument {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Read one page.
    fn page(&self, index: usize) -> Result<PageContent>;
}

impl VectorDocument for [PageContent] {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page(&self, index: usize) -> Result<PageContent> {
        self.get(index).cloned().ok_or(PatternError::Page {
            page: index,
            message: "page index out of range".to_string(),
        })
    }
}
