//! Export layer: turns markdown into output files.
//!
//! Each output format is an [`Exporter`]. The [`ExporterRegistry`] maps
//! format names and file extensions to exporters, and [`ExportResult::save`]
//! persists the bytes under the format's fixed file name.
//!
//! # Example
//!
//! ```no_run
//! use puremark::export::{ExportOptions, ExporterRegistry};
//!
//! fn main() -> puremark::Result<()> {
//!     let registry = ExporterRegistry::with_defaults();
//!     let result = registry.export("pdf", "# Hello\n\nWorld", &ExportOptions::default())?;
//!     result.save(".")?;
//!     Ok(())
//! }
//! ```

mod json;
mod markdown;
mod pdf;

pub use json::JsonExporter;
pub use markdown::MarkdownExporter;
pub use pdf::PdfExporter;

use crate::error::{Error, Result};
use crate::layout::LayoutOptions;
use crate::model::Metadata;
use crate::parser::TokenizeOptions;
use crate::render::JsonFormat;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name of the paginated PDF export.
pub const PDF_FILE_NAME: &str = "markdown-document.pdf";

/// File name of the verbatim markdown export.
pub const MARKDOWN_FILE_NAME: &str = "document.md";

/// File name of the JSON layout export.
pub const JSON_FILE_NAME: &str = "markdown-document.json";

/// Options for one export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Tokenizer options
    pub tokenize: TokenizeOptions,

    /// Layout options
    pub layout: LayoutOptions,

    /// Title printed on the title page
    pub title: String,

    /// Fixed generation time; `None` means now
    pub generated_at: Option<DateTime<Utc>>,

    /// Deflate PDF content streams
    pub compress: bool,

    /// JSON output format
    pub json_format: JsonFormat,
}

impl ExportOptions {
    /// Create new export options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set tokenizer options.
    pub fn with_tokenize_options(mut self, options: TokenizeOptions) -> Self {
        self.tokenize = options;
        self
    }

    /// Set layout options.
    pub fn with_layout_options(mut self, options: LayoutOptions) -> Self {
        self.layout = options;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Pin the generation time, making output byte-for-byte reproducible.
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Enable or disable PDF stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the JSON output format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Metadata for a document built with these options.
    pub fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::new(self.title.clone());
        if let Some(at) = self.generated_at {
            metadata.generated_at = at;
        }
        metadata
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            tokenize: TokenizeOptions::default(),
            layout: LayoutOptions::default(),
            title: Metadata::default().title,
            generated_at: None,
            compress: true,
            json_format: JsonFormat::Pretty,
        }
    }
}

/// Result of an export.
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Output bytes
    pub bytes: Vec<u8>,

    /// File name the output is saved under
    pub file_name: &'static str,

    /// MIME type of the output
    pub mime_type: &'static str,

    /// Number of pages, for paginated formats
    pub page_count: Option<u32>,
}

impl ExportResult {
    /// Create a new export result.
    pub fn new(bytes: Vec<u8>, file_name: &'static str, mime_type: &'static str) -> Self {
        Self {
            bytes,
            file_name,
            mime_type,
            page_count: None,
        }
    }

    /// Set the page count.
    pub fn with_page_count(mut self, count: u32) -> Self {
        self.page_count = Some(count);
        self
    }

    /// Get output length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the output is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Save into `dir` under [`Self::file_name`].
    ///
    /// The bytes are written to a temporary file in the same directory and
    /// renamed into place, so a failure never leaves a partial file behind.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        let target = dir.join(self.file_name);

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&self.bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target)?;

        log::info!("Saved {} bytes to {}", self.bytes.len(), target.display());
        Ok(target)
    }
}

/// Trait for export formats.
///
/// Implement this trait to add a new output format.
pub trait Exporter: Send + Sync {
    /// Name of the format (e.g., `"pdf"`).
    fn name(&self) -> &str;

    /// File extensions this format answers to, lowercase without the dot.
    fn extensions(&self) -> &[&str];

    /// MIME type of the output.
    fn mime_type(&self) -> &'static str;

    /// Export markdown source.
    fn export(&self, markdown: &str, options: &ExportOptions) -> Result<ExportResult>;

    /// Check if this exporter handles the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry of exporters keyed by name and extension.
pub struct ExporterRegistry {
    by_extension: HashMap<String, Arc<dyn Exporter>>,
    by_name: HashMap<String, Arc<dyn Exporter>>,
}

impl ExporterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            by_extension: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the PDF, Markdown and JSON exporters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfExporter::new()));
        registry.register(Arc::new(MarkdownExporter::new()));
        registry.register(Arc::new(JsonExporter::new()));
        registry
    }

    /// Register an exporter under its name and every extension.
    pub fn register(&mut self, exporter: Arc<dyn Exporter>) {
        for ext in exporter.extensions() {
            self.by_extension
                .insert(ext.to_lowercase(), exporter.clone());
        }
        self.by_name.insert(exporter.name().to_lowercase(), exporter);
    }

    /// Look up an exporter by name, falling back to extension.
    pub fn get(&self, format: &str) -> Option<Arc<dyn Exporter>> {
        let key = format.trim_start_matches('.').to_lowercase();
        self.by_name
            .get(&key)
            .or_else(|| self.by_extension.get(&key))
            .cloned()
    }

    /// Check if a format name or extension is supported.
    pub fn supports(&self, format: &str) -> bool {
        self.get(format).is_some()
    }

    /// Names of all registered formats, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_name.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Export with the exporter registered for `format`.
    pub fn export(
        &self,
        format: &str,
        markdown: &str,
        options: &ExportOptions,
    ) -> Result<ExportResult> {
        let exporter = self
            .get(format)
            .ok_or_else(|| Error::UnknownFormat(format.to_string()))?;
        exporter.export(markdown, options)
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_options_builder() {
        let at = DateTime::from_timestamp(0, 0).unwrap();
        let options = ExportOptions::new()
            .with_title("Report")
            .with_generated_at(at)
            .with_compression(false)
            .with_json_format(JsonFormat::Compact);

        assert_eq!(options.title, "Report");
        assert!(!options.compress);
        assert_eq!(options.json_format, JsonFormat::Compact);
        assert_eq!(options.metadata().generated_at, at);
        assert_eq!(options.metadata().title, "Report");
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = ExporterRegistry::with_defaults();
        assert!(registry.supports("pdf"));
        assert!(registry.supports("PDF"));
        assert!(registry.supports("md"));
        assert!(registry.supports(".markdown"));
        assert!(registry.supports("json"));
        assert!(!registry.supports("docx"));
        assert_eq!(registry.names(), vec!["json", "markdown", "pdf"]);
    }

    #[test]
    fn test_registry_unknown_format() {
        let registry = ExporterRegistry::with_defaults();
        let result = registry.export("docx", "# Hi", &ExportOptions::default());
        assert!(matches!(result, Err(Error::UnknownFormat(_))));
    }

    #[test]
    fn test_export_result_len() {
        let result = ExportResult::new(vec![1, 2, 3], PDF_FILE_NAME, "application/pdf");
        assert_eq!(result.len(), 3);
        assert!(!result.is_empty());
        assert!(result.page_count.is_none());
    }
}
