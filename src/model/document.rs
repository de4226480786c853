//! Document-level types.

use super::{Geometry, Page, PageRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A laid-out, paginated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, generation time)
    pub metadata: Metadata,

    /// Page geometry shared by every page
    pub geometry: Geometry,

    /// Pages in output order
    pub pages: Vec<Page>,

    /// Resolved table of contents
    pub toc: Vec<TocEntry>,
}

impl Document {
    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// Iterate over pages with the given role.
    pub fn pages_with_role(&self, role: PageRole) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(move |p| p.role == role)
    }

    /// Number of the first page on which `line` is drawn as a body line.
    pub fn find_body_line(&self, line: &str) -> Option<u32> {
        self.pages_with_role(PageRole::Body)
            .find(|p| p.contains_line(line))
            .map(|p| p.number)
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Title shown on the title page
    pub title: String,

    /// Generation timestamp shown on the title page
    pub generated_at: DateTime<Utc>,

    /// Producer application
    pub producer: String,
}

impl Metadata {
    /// Create metadata for a title, generated now.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            generated_at: Utc::now(),
            producer: concat!("puremark ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Date line printed under the title.
    pub fn date_line(&self) -> String {
        format!("Generated on {}", self.generated_at.format("%Y-%m-%d"))
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new("Markdown Document")
    }
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading depth (1 = top level)
    pub level: u8,

    /// Heading text
    pub text: String,

    /// Page number the heading starts on (1-indexed)
    pub page: u32,
}

impl TocEntry {
    /// Create a new TOC entry.
    pub fn new(level: u8, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}
