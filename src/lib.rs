//! # puremark
//!
//! Markdown to paginated PDF export with an automatic table of contents.
//!
//! A markdown source is tokenized into block tokens, laid out onto a title
//! page, a table of contents and body pages, and serialized as PDF. Page
//! numbers in the table of contents are filled in after the body has been
//! laid out, so they always point at the page a heading actually landed on.
//!
//! ## Quick Start
//!
//! ```no_run
//! use puremark::PureMark;
//!
//! fn main() -> puremark::Result<()> {
//!     let markdown = std::fs::read_to_string("README.md")?;
//!
//!     let result = PureMark::new().with_title("Readme").build(&markdown)?;
//!     for entry in &result.document.toc {
//!         println!("{} ... {}", entry.text, entry.page);
//!     }
//!     result.save_pdf(".")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Paginated layout**: word wrapping, page breaks and `Page n` footers
//! - **Table of contents**: resolved page numbers, indented by heading level
//! - **Code blocks**: monospace lines on a shaded background
//! - **Base-14 fonts**: nothing is embedded, output stays small
//! - **Multiple outputs**: PDF, verbatim markdown and a JSON layout dump

pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use export::{
    ExportOptions, ExportResult, Exporter, ExporterRegistry, JSON_FILE_NAME, MARKDOWN_FILE_NAME,
    PDF_FILE_NAME,
};
pub use layout::{EmptyPolicy, LayoutOptions, TocPages};
pub use model::{BlockToken, Document, Geometry, Metadata, Page, PageRole, TocEntry, Unit};
pub use parser::{tokenize, TokenizeOptions, Tokenizer, UnsupportedBlocks};
pub use render::{JsonFormat, PdfOptions};

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Tokenize markdown and lay it out into a paginated document.
///
/// # Errors
///
/// Returns [`Error::EmptyDocument`] when the source has no blocks and the
/// empty policy is [`EmptyPolicy::Error`], and [`Error::InvalidGeometry`]
/// when the page leaves no room for content.
///
/// # Example
///
/// ```
/// use puremark::{build, ExportOptions};
///
/// let doc = build("# Intro\n\nHello", &ExportOptions::default()).unwrap();
/// assert_eq!(doc.toc[0].page, 3);
/// ```
pub fn build(markdown: &str, options: &ExportOptions) -> Result<Document> {
    let tokens = Tokenizer::new(options.tokenize.clone()).tokenize(markdown);
    layout::build(&tokens, options.metadata(), &options.layout)
}

/// Export markdown as PDF bytes with default options.
///
/// # Example
///
/// ```no_run
/// let pdf = puremark::export_pdf("# Notes\n\nSome text").unwrap();
/// std::fs::write("notes.pdf", pdf).unwrap();
/// ```
pub fn export_pdf(markdown: &str) -> Result<Vec<u8>> {
    export_pdf_with_options(markdown, &ExportOptions::default())
}

/// Export markdown as PDF bytes with custom options.
pub fn export_pdf_with_options(markdown: &str, options: &ExportOptions) -> Result<Vec<u8>> {
    let doc = build(markdown, options)?;
    render::to_pdf(&doc, &PdfOptions::new().with_compression(options.compress))
}

/// Builder for exporting markdown documents.
///
/// # Example
///
/// ```no_run
/// use puremark::{PureMark, TocPages};
///
/// let path = PureMark::new()
///     .with_title("Handbook")
///     .letter()
///     .with_toc_pages(TocPages::Fit)
///     .build("# One\n\n## Two")?
///     .save_pdf("./out")?;
/// # Ok::<(), puremark::Error>(())
/// ```
pub struct PureMark {
    options: ExportOptions,
}

impl PureMark {
    /// Create a new PureMark builder.
    pub fn new() -> Self {
        Self {
            options: ExportOptions::default(),
        }
    }

    /// Set the title printed on the title page.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.title = title.into();
        self
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.options.layout = self.options.layout.with_geometry(geometry);
        self
    }

    /// Use US Letter pages.
    pub fn letter(self) -> Self {
        self.with_geometry(Geometry::letter())
    }

    /// Set how many pages the table of contents may use.
    pub fn with_toc_pages(mut self, policy: TocPages) -> Self {
        self.options.layout = self.options.layout.with_toc_pages(policy);
        self
    }

    /// Set what happens when the source has no blocks.
    pub fn with_empty_policy(mut self, policy: EmptyPolicy) -> Self {
        self.options.layout = self.options.layout.with_empty_policy(policy);
        self
    }

    /// Drop tables, block quotes and HTML instead of degrading them to text.
    pub fn skip_unsupported(mut self) -> Self {
        self.options.tokenize = self.options.tokenize.skip_unsupported();
        self
    }

    /// Stamp a page number on the last body page too.
    pub fn number_last_page(mut self) -> Self {
        self.options.layout = self.options.layout.with_last_page_number(true);
        self
    }

    /// Pin the generation date.
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.options = self.options.with_generated_at(at);
        self
    }

    /// Disable PDF stream compression.
    pub fn uncompressed(mut self) -> Self {
        self.options = self.options.with_compression(false);
        self
    }

    /// Lay out a markdown source and return a result wrapper.
    pub fn build(self, markdown: &str) -> Result<PureMarkResult> {
        let document = build(markdown, &self.options)?;
        Ok(PureMarkResult {
            document,
            options: self.options,
        })
    }
}

impl Default for PureMark {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of laying out a markdown document.
pub struct PureMarkResult {
    /// The paginated document
    pub document: Document,
    /// Options the document was built with
    options: ExportOptions,
}

impl PureMarkResult {
    /// Serialize to PDF bytes.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        render::to_pdf(
            &self.document,
            &PdfOptions::new().with_compression(self.options.compress),
        )
    }

    /// Serialize to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Save the PDF into `dir` as `markdown-document.pdf`.
    pub fn save_pdf(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let bytes = self.to_pdf()?;
        ExportResult::new(bytes, PDF_FILE_NAME, "application/pdf")
            .with_page_count(self.document.page_count())
            .save(dir)
    }
}
