//! Verbatim markdown exporter.

use crate::error::Result;

use super::{ExportOptions, ExportResult, Exporter, MARKDOWN_FILE_NAME};

/// Markdown exporter.
///
/// Writes the source unchanged; no tokenizing or layout happens.
#[derive(Debug, Clone, Default)]
pub struct MarkdownExporter {
    _private: (),
}

impl MarkdownExporter {
    /// Create a new markdown exporter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Exporter for MarkdownExporter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn mime_type(&self) -> &'static str {
        "text/markdown"
    }

    fn export(&self, markdown: &str, _options: &ExportOptions) -> Result<ExportResult> {
        Ok(ExportResult::new(
            markdown.as_bytes().to_vec(),
            MARKDOWN_FILE_NAME,
            self.mime_type(),
        ))
    }
}
