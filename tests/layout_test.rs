//! Integration tests for pagination and the table of contents.

use chrono::DateTime;
use puremark::layout::{self, LayoutOptions, TOC_TITLE};
use puremark::model::{DrawOp, Font};
use puremark::{
    build, BlockToken, Document, EmptyPolicy, Error, ExportOptions, Metadata, PageRole, TocPages,
};

fn fixed_options() -> ExportOptions {
    ExportOptions::default().with_generated_at(DateTime::from_timestamp(1_700_000_000, 0).unwrap())
}

fn sections(count: usize) -> String {
    (1..=count)
        .map(|i| format!("# Section {:02}\n\nBody of section {}.\n\n", i, i))
        .collect()
}

fn paragraphs(count: usize) -> Vec<BlockToken> {
    (0..count)
        .map(|i| BlockToken::paragraph(format!("Line {}", i)))
        .collect()
}

fn footers(doc: &Document) -> Vec<(u32, String)> {
    doc.pages
        .iter()
        .flat_map(|p| {
            p.texts()
                .filter(|t| t.starts_with("Page "))
                .map(move |t| (p.number, t.to_string()))
        })
        .collect()
}

// ==================== TOC Tests ====================

#[test]
fn test_toc_completeness_and_order() {
    let markdown = "# One\n\ntext\n\n## Two\n\n### Three\n\nmore\n\n# Four\n";
    let doc = build(markdown, &fixed_options()).unwrap();

    let entries: Vec<(u8, &str)> = doc.toc.iter().map(|e| (e.level, e.text.as_str())).collect();
    assert_eq!(
        entries,
        vec![(1, "One"), (2, "Two"), (3, "Three"), (1, "Four")]
    );

    let toc_page = doc.get_page(2).unwrap();
    assert_eq!(toc_page.role, PageRole::Toc);
    assert!(toc_page.contains_line(TOC_TITLE));
    for entry in &doc.toc {
        assert!(toc_page.contains_line(&entry.text));
    }
}

#[test]
fn test_toc_page_numbers_match_body() {
    let doc = build(&sections(40), &fixed_options()).unwrap();
    assert_eq!(doc.toc.len(), 40);
    assert!(doc.page_count() > 4);

    for entry in &doc.toc {
        assert_eq!(
            doc.find_body_line(&entry.text),
            Some(entry.page),
            "wrong page for {}",
            entry.text
        );
    }
}

#[test]
fn test_toc_indent_by_level() {
    let doc = build("# Top\n\n## Nested\n", &fixed_options()).unwrap();
    let toc_page = doc.get_page(2).unwrap();

    let x_of = |needle: &str| {
        toc_page.ops.iter().find_map(|op| match op {
            DrawOp::Text { x, text, .. } if text == needle => Some(*x),
            _ => None,
        })
    };
    assert_eq!(x_of("Top"), Some(20.0));
    assert_eq!(x_of("Nested"), Some(30.0));
}

#[test]
fn test_toc_fit_reserves_pages() {
    let markdown = sections(40);
    let options = fixed_options().with_layout_options(
        LayoutOptions::default().with_toc_pages(TocPages::Fit),
    );
    let doc = build(&markdown, &options).unwrap();

    // 17 entries fit below the heading, 18 on each continuation page
    assert_eq!(doc.pages_with_role(PageRole::Toc).count(), 3);
    assert_eq!(doc.toc[0].page, 5);

    for entry in &doc.toc {
        assert_eq!(doc.find_body_line(&entry.text), Some(entry.page));
        let on_toc = doc
            .pages_with_role(PageRole::Toc)
            .any(|p| p.contains_line(&entry.text));
        assert!(on_toc, "{} missing from TOC", entry.text);
    }

    let third = doc.get_page(4).unwrap();
    assert!(third.contains_line("Section 36"));
}

#[test]
fn test_toc_single_keeps_one_page() {
    let doc = build(&sections(40), &fixed_options()).unwrap();
    assert_eq!(doc.pages_with_role(PageRole::Toc).count(), 1);
    assert_eq!(doc.toc[0].page, 3);
}

// ==================== Pagination Tests ====================

#[test]
fn test_pagination_breaks_at_overflowing_line() {
    let doc = layout::build(
        &paragraphs(28),
        Metadata::default(),
        &LayoutOptions::default(),
    )
    .unwrap();

    assert_eq!(doc.page_count(), 4);
    assert_eq!(doc.find_body_line("Line 26"), Some(3));
    assert_eq!(doc.find_body_line("Line 27"), Some(4));

    let first_on_4 = doc.get_page(4).unwrap().ops.iter().find_map(|op| match op {
        DrawOp::Text { y, text, .. } => Some((*y, text.clone())),
        _ => None,
    });
    assert_eq!(first_on_4, Some((20.0, "Line 27".to_string())));
}

#[test]
fn test_footers_only_on_broken_pages() {
    let doc = layout::build(
        &paragraphs(60),
        Metadata::default(),
        &LayoutOptions::default(),
    )
    .unwrap();

    let last = doc.page_count();
    let stamped = footers(&doc);
    let expected: Vec<(u32, String)> = (3..last).map(|n| (n, format!("Page {}", n))).collect();
    assert_eq!(stamped, expected);
}

#[test]
fn test_footer_on_last_page_when_enabled() {
    let options = LayoutOptions::default().with_last_page_number(true);
    let doc = layout::build(&paragraphs(60), Metadata::default(), &options).unwrap();

    let last = doc.page_count();
    assert!(doc
        .get_page(last)
        .unwrap()
        .contains_line(&format!("Page {}", last)));
}

#[test]
fn test_lines_stay_within_content_band() {
    let doc = build(&sections(25), &fixed_options()).unwrap();
    let bottom = doc.geometry.content_bottom() + 10.0;
    for page in doc.pages_with_role(PageRole::Body) {
        for op in &page.ops {
            if let DrawOp::Text { y, text, .. } = op {
                if !text.starts_with("Page ") {
                    assert!(*y <= bottom, "{} drawn at {}", text, y);
                }
            }
        }
    }
}

#[test]
fn test_long_paragraph_wraps() {
    let text = "lorem ipsum dolor sit amet ".repeat(40);
    let doc = build(&text, &fixed_options()).unwrap();
    let body = doc.get_page(3).unwrap();
    assert!(body.texts().count() > 5);
    for line in body.texts() {
        assert!(line.len() < text.len());
    }
}

// ==================== Determinism Tests ====================

#[test]
fn test_layout_is_idempotent() {
    let markdown = format!("{}\n```\ncode\n```\n\n* a\n* b\n", sections(12));
    let a = build(&markdown, &fixed_options()).unwrap();
    let b = build(&markdown, &fixed_options()).unwrap();
    assert_eq!(a, b);

    let pdf_a = puremark::export_pdf_with_options(&markdown, &fixed_options()).unwrap();
    let pdf_b = puremark::export_pdf_with_options(&markdown, &fixed_options()).unwrap();
    assert_eq!(pdf_a, pdf_b);
}

// ==================== Code Block Tests ====================

#[test]
fn test_code_block_integrity() {
    let markdown = "```rust\nfn main() {\n    println!(\"hi\");\n}\n```\n";
    let doc = build(markdown, &fixed_options()).unwrap();
    let body = doc.get_page(3).unwrap();

    let rects: Vec<f32> = body
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::FillRect { height, .. } => Some(*height),
            _ => None,
        })
        .collect();
    assert_eq!(rects, vec![42.0]);

    let mono: Vec<&str> = body
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text {
                text,
                font: Font::Mono,
                ..
            } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(mono, vec!["fn main() {", "    println!(\"hi\");", "}"]);
}

#[test]
fn test_long_code_block_spans_pages() {
    let source: String = (0..30).map(|i| format!("line_{}\n", i)).collect();
    let doc = layout::build(
        &[BlockToken::code(&source)],
        Metadata::default(),
        &LayoutOptions::default(),
    )
    .unwrap();

    let mono: Vec<(u32, String)> = doc
        .pages_with_role(PageRole::Body)
        .flat_map(|p| {
            p.ops.iter().filter_map(move |op| match op {
                DrawOp::Text {
                    text,
                    font: Font::Mono,
                    ..
                } => Some((p.number, text.clone())),
                _ => None,
            })
        })
        .collect();

    assert_eq!(mono.len(), 30);
    for (i, (_, text)) in mono.iter().enumerate() {
        assert_eq!(text, &format!("line_{}", i));
    }
    assert_eq!(mono[18].0, 3);
    assert_eq!(mono[19].0, 4);
}

// ==================== List Tests ====================

#[test]
fn test_numbered_list_markers_follow_source() {
    let doc = build("3. third\n4. fourth\n", &fixed_options()).unwrap();
    let texts: Vec<&str> = doc.get_page(3).unwrap().texts().collect();
    assert_eq!(texts, vec!["3.", "third", "4.", "fourth"]);
}

#[test]
fn test_table_in_list_keeps_source_order() {
    let markdown = "- item one\n\n  | a | b |\n  |---|---|\n  | 1 | 2 |\n\n- item two\n\nAfter\n";
    let doc = build(markdown, &fixed_options()).unwrap();
    let texts: Vec<&str> = doc.get_page(3).unwrap().texts().collect();
    assert_eq!(
        texts,
        vec!["\u{2022}", "item one a | b 1 | 2", "\u{2022}", "item two", "After"]
    );
}

// ==================== Empty Input Tests ====================

#[test]
fn test_empty_input_errors_by_default() {
    for source in ["", "   \n\n", "---\n"] {
        let result = build(source, &fixed_options());
        assert!(matches!(result, Err(Error::EmptyDocument)), "{:?}", source);
    }
}

#[test]
fn test_empty_input_shell() {
    let options = fixed_options()
        .with_layout_options(LayoutOptions::default().with_empty_policy(EmptyPolicy::Shell));
    let doc = build("", &options).unwrap();

    assert_eq!(doc.page_count(), 3);
    assert!(doc.toc.is_empty());
    assert!(doc.get_page(1).unwrap().contains_line("Markdown Document"));
    assert!(doc.get_page(2).unwrap().contains_line(TOC_TITLE));
    assert!(footers(&doc).is_empty());
}

#[test]
fn test_heading_only_document() {
    let doc = build("# Lonely", &fixed_options()).unwrap();
    assert_eq!(doc.toc.len(), 1);
    assert_eq!(doc.toc[0].page, 3);
    assert_eq!(doc.find_body_line("Lonely"), Some(3));
}
