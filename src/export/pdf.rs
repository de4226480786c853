//! Paginated PDF exporter.

use crate::error::Result;
use crate::render::{to_pdf, PdfOptions};

use super::{ExportOptions, ExportResult, Exporter, PDF_FILE_NAME};

/// PDF exporter.
///
/// Lays the markdown out into title, TOC and body pages and serializes the
/// result as a PDF file.
#[derive(Debug, Clone, Default)]
pub struct PdfExporter {
    _private: (),
}

impl PdfExporter {
    /// Create a new PDF exporter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Exporter for PdfExporter {
    fn name(&self) -> &str {
        "pdf"
    }

    fn extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn mime_type(&self) -> &'static str {
        "application/pdf"
    }

    fn export(&self, markdown: &str, options: &ExportOptions) -> Result<ExportResult> {
        let doc = crate::build(markdown, options)?;
        let bytes = to_pdf(&doc, &PdfOptions::new().with_compression(options.compress))?;
        Ok(ExportResult::new(bytes, PDF_FILE_NAME, self.mime_type())
            .with_page_count(doc.page_count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_pdf_exporter() {
        let exporter = PdfExporter::new();
        assert_eq!(exporter.name(), "pdf");
        assert!(exporter.supports_extension("PDF"));
        assert!(!exporter.supports_extension("md"));

        let result = exporter
            .export("# Title\n\nHello", &ExportOptions::default())
            .unwrap();
        assert_eq!(result.file_name, "markdown-document.pdf");
        assert_eq!(result.mime_type, "application/pdf");
        assert_eq!(result.page_count, Some(3));
        assert!(result.bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_pdf_exporter_empty_input() {
        let result = PdfExporter::new().export("  \n\n", &ExportOptions::default());
        assert!(matches!(result, Err(Error::EmptyDocument)));
    }
}
