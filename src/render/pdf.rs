//! PDF serialization for paginated documents.
//!
//! Each page becomes one content stream using the three base-14 fonts, so
//! nothing has to be embedded. Coordinates are flipped from the top-left
//! layout origin into PDF user space.

use std::io::Write;

use chrono::{DateTime, Datelike, Timelike, Utc};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use pdf_writer::{Content, Date, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use super::encoding::encode_win_ansi;
use crate::error::Result;
use crate::model::{Document, DrawOp, Font, Geometry, Page};

/// Options for PDF output.
#[derive(Debug, Clone)]
pub struct PdfOptions {
    /// Deflate page content streams
    pub compress: bool,
}

impl PdfOptions {
    /// Create new PDF options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self { compress: true }
    }
}

const CATALOG_ID: i32 = 1;
const PAGE_TREE_ID: i32 = 2;
const INFO_ID: i32 = 3;
const FIRST_FONT_ID: i32 = 4;

fn font_ref(font: Font) -> Ref {
    let index = Font::ALL.iter().position(|f| *f == font).unwrap_or(0);
    Ref::new(FIRST_FONT_ID + index as i32)
}

/// Serialize a document into PDF bytes.
pub fn to_pdf(doc: &Document, options: &PdfOptions) -> Result<Vec<u8>> {
    let mut pdf = Pdf::new();
    let geometry = &doc.geometry;
    let tree_id = Ref::new(PAGE_TREE_ID);

    let first_page_id = FIRST_FONT_ID + Font::ALL.len() as i32;
    let page_ids: Vec<Ref> = (0..doc.pages.len())
        .map(|i| Ref::new(first_page_id + 2 * i as i32))
        .collect();

    pdf.catalog(Ref::new(CATALOG_ID)).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    pdf.document_info(Ref::new(INFO_ID))
        .title(TextStr(&doc.metadata.title))
        .producer(TextStr(&doc.metadata.producer))
        .creation_date(pdf_date(&doc.metadata.generated_at));

    for font in Font::ALL {
        pdf.type1_font(font_ref(font))
            .base_font(Name(font.base_name().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let media_box = Rect::new(
        0.0,
        0.0,
        geometry.to_points(geometry.width),
        geometry.to_points(geometry.height),
    );

    let mut replaced = 0;
    for (page, page_id) in doc.pages.iter().zip(&page_ids) {
        let content_id = Ref::new(page_id.get() + 1);
        {
            let mut writer = pdf.page(*page_id);
            writer
                .media_box(media_box)
                .parent(tree_id)
                .contents(content_id);
            let mut resources = writer.resources();
            let mut fonts = resources.fonts();
            for font in Font::ALL {
                fonts.pair(Name(font.resource_name().as_bytes()), font_ref(font));
            }
        }

        let raw = content_stream(page, geometry, &mut replaced);
        if options.compress {
            let compressed = deflate(&raw)?;
            pdf.stream(content_id, &compressed)
                .filter(Filter::FlateDecode);
        } else {
            pdf.stream(content_id, &raw);
        }
    }

    if replaced > 0 {
        log::warn!(
            "{} character(s) have no WinAnsi encoding and were replaced with '?'",
            replaced
        );
    }

    let bytes = pdf.finish();
    log::debug!(
        "Serialized {} pages into {} bytes of PDF",
        doc.pages.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Build the content stream for one page.
fn content_stream(page: &Page, geometry: &Geometry, replaced: &mut usize) -> Vec<u8> {
    let pt = |v: f32| geometry.to_points(v);
    let flip = |y: f32| geometry.to_points(page.height - y);

    let mut content = Content::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                text,
                font,
                size,
            } => {
                let (bytes, missing) = encode_win_ansi(text);
                *replaced += missing;
                content.begin_text();
                content.set_font(Name(font.resource_name().as_bytes()), *size);
                content.next_line(pt(*x), flip(*y));
                content.show(Str(&bytes));
                content.end_text();
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                gray,
            } => {
                content.save_state();
                content.set_fill_gray(*gray);
                content.rect(pt(*x), flip(*y + *height), pt(*width), pt(*height));
                content.fill_nonzero();
                content.restore_state();
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
            } => {
                content.save_state();
                content.set_line_width(*width);
                content.move_to(pt(*x1), flip(*y1));
                content.line_to(pt(*x2), flip(*y2));
                content.stroke();
                content.restore_state();
            }
        }
    }
    content.finish()
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn pdf_date(at: &DateTime<Utc>) -> Date {
    Date::new(u16::try_from(at.year()).unwrap_or(1970))
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{build, EmptyPolicy, LayoutOptions};
    use crate::model::{BlockToken, Metadata};

    fn sample() -> Document {
        let mut metadata = Metadata::new("Sample");
        metadata.generated_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        build(
            &[
                BlockToken::heading(1, "Intro"),
                BlockToken::paragraph("Body text"),
                BlockToken::code("let x = 1;"),
            ],
            metadata,
            &LayoutOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_pdf_header_and_trailer() {
        let bytes = to_pdf(&sample(), &PdfOptions::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let tail = String::from_utf8_lossy(&bytes[bytes.len() - 32..]).to_string();
        assert!(tail.contains("%%EOF"));
    }

    #[test]
    fn test_uncompressed_streams_are_readable() {
        let bytes = to_pdf(&sample(), &PdfOptions::new().with_compression(false)).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(Table of Contents) Tj"));
        assert!(text.contains("(Intro) Tj"));
        assert!(text.contains("/Helvetica-Bold"));
        assert!(text.contains("/Courier"));
        assert!(text.contains("/WinAnsiEncoding"));
        assert!(text.contains("/Count 3"));
    }

    #[test]
    fn test_compressed_streams_hide_text() {
        let bytes = to_pdf(&sample(), &PdfOptions::default()).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/FlateDecode"));
        assert!(!text.contains("(Intro) Tj"));
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let a = to_pdf(&sample(), &PdfOptions::default()).unwrap();
        let b = to_pdf(&sample(), &PdfOptions::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shell_document_serializes() {
        let options = LayoutOptions::default().with_empty_policy(EmptyPolicy::Shell);
        let doc = build(&[], Metadata::default(), &options).unwrap();
        let bytes = to_pdf(&doc, &PdfOptions::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
