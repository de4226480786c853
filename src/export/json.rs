//! JSON layout exporter.

use crate::error::Result;
use crate::render::to_json;

use super::{ExportOptions, ExportResult, Exporter, JSON_FILE_NAME};

/// JSON exporter.
///
/// Serializes the laid-out document, including the resolved TOC and every
/// draw operation, for inspection by other tools.
#[derive(Debug, Clone, Default)]
pub struct JsonExporter {
    _private: (),
}

impl JsonExporter {
    /// Create a new JSON exporter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Exporter for JsonExporter {
    fn name(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn export(&self, markdown: &str, options: &ExportOptions) -> Result<ExportResult> {
        let doc = crate::build(markdown, options)?;
        let content = to_json(&doc, options.json_format)?;
        Ok(
            ExportResult::new(content.into_bytes(), JSON_FILE_NAME, self.mime_type())
                .with_page_count(doc.page_count()),
        )
    }
}
