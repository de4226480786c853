//! Forward layout pass (layout phase 1).

use super::metrics::TextMeasure;
use super::toc::{pages_needed, TocAnchor};
use super::{LayoutOptions, LayoutState};
use crate::model::{BlockToken, DrawOp, Font, Metadata, Page, PageRole, TocEntry};

/// Heading drawn at the top of the first TOC page.
pub const TOC_TITLE: &str = "Table of Contents";

/// Output of the forward pass: pages, recorded headings and the TOC anchor.
#[derive(Debug, Clone)]
pub struct LayoutResult {
    /// All pages in order; TOC pages hold only their heading so far
    pub pages: Vec<Page>,

    /// One entry per heading, in encounter order
    pub entries: Vec<TocEntry>,

    /// Reserved TOC pages and first entry position
    pub anchor: TocAnchor,
}

/// Lay out title page, reserved TOC page(s) and body content.
pub fn layout(tokens: &[BlockToken], metadata: &Metadata, options: &LayoutOptions) -> LayoutResult {
    let mut engine = Engine::new(options);

    engine.title_page(metadata);
    let anchor = engine.reserve_toc(tokens.iter().filter(|t| t.is_heading()).count());
    engine.open_page(PageRole::Body);

    for token in tokens {
        match token {
            BlockToken::Heading { depth, text } => engine.heading(*depth, text),
            BlockToken::Paragraph { text } => {
                engine.text_block(text, Font::Regular, options.body_size, 0.0)
            }
            BlockToken::Code { lines, .. } => engine.code_block(lines),
            BlockToken::List { start, items } => engine.list(*start, items),
        }
    }

    let (pages, entries) = engine.finish();
    log::debug!(
        "Laid out {} blocks on {} pages with {} headings",
        tokens.len(),
        pages.len(),
        entries.len()
    );

    LayoutResult {
        pages,
        entries,
        anchor,
    }
}

/// Layout run: cursor, the page being written and the pages already closed.
struct Engine<'a> {
    options: &'a LayoutOptions,
    state: LayoutState,
    page: Page,
    closed: Vec<Page>,
    entries: Vec<TocEntry>,
}

impl<'a> Engine<'a> {
    fn new(options: &'a LayoutOptions) -> Self {
        let state = LayoutState::new(options.geometry);
        let page = Page::new(state.current_page, PageRole::Title, &options.geometry);
        Self {
            options,
            state,
            page,
            closed: Vec::new(),
            entries: Vec::new(),
        }
    }

    fn measure(&self, font: Font, size: f32) -> TextMeasure {
        TextMeasure::new(font, size, &self.options.geometry)
    }

    /// Close the current page and start a fresh one, without a footer.
    fn open_page(&mut self, role: PageRole) {
        self.state.next_page();
        let page = Page::new(self.state.current_page, role, &self.options.geometry);
        let previous = std::mem::replace(&mut self.page, page);
        self.closed.push(previous);
    }

    /// Overflow break: stamp the closing page's number, then continue.
    fn break_page(&mut self) {
        self.stamp_footer();
        let role = self.page.role;
        self.open_page(role);
    }

    fn ensure_room(&mut self) {
        if self.state.overflows() {
            self.break_page();
        }
    }

    fn stamp_footer(&mut self) {
        let geometry = &self.options.geometry;
        let size = self.options.footer_size;
        let label = format!("Page {}", self.page.number);
        let x = geometry.content_right() - self.measure(Font::Regular, size).width(&label);
        self.page.push(DrawOp::Text {
            x,
            y: geometry.height - geometry.margin / 2.0,
            text: label,
            font: Font::Regular,
            size,
        });
    }

    fn draw_text(&mut self, x: f32, text: impl Into<String>, font: Font, size: f32) {
        self.page.push(DrawOp::Text {
            x,
            y: self.state.current_y,
            text: text.into(),
            font,
            size,
        });
    }

    fn title_page(&mut self, metadata: &Metadata) {
        let options = self.options;
        let geometry = options.geometry;
        let center = geometry.width / 2.0;

        self.state.current_y = geometry.height / 3.0;
        let title = self.measure(Font::Bold, options.title_size);
        for line in title.wrap(&metadata.title, geometry.content_width()) {
            let x = center - title.width(&line) / 2.0;
            self.draw_text(x, line, Font::Bold, options.title_size);
            self.state.advance(options.line_advance(options.title_size));
        }

        let rule_y = self.state.current_y - options.line_advance(options.title_size) / 2.0;
        let half = (geometry.content_width() / 4.0).min(40.0);
        self.page.push(DrawOp::Line {
            x1: center - half,
            y1: rule_y + options.block_gap(options.title_size),
            x2: center + half,
            y2: rule_y + options.block_gap(options.title_size),
            width: 0.75,
        });
        self.state.advance(options.block_gap(options.title_size) * 2.0);

        let date = metadata.date_line();
        let x = center - self.measure(Font::Regular, options.date_size).width(&date) / 2.0;
        self.draw_text(x, date, Font::Regular, options.date_size);
    }

    /// Open the TOC page(s) and write the TOC heading.
    fn reserve_toc(&mut self, heading_count: usize) -> TocAnchor {
        self.open_page(PageRole::Toc);
        let first = self.page.number;
        self.text_block(TOC_TITLE, Font::Bold, self.options.toc_heading_size, 0.0);
        let start_y = self.state.current_y;

        let count = pages_needed(heading_count, start_y, self.options);
        let mut pages = vec![first];
        for _ in 1..count {
            self.open_page(PageRole::Toc);
            pages.push(self.page.number);
        }
        log::debug!("Reserved {} TOC page(s) for {} headings", count, heading_count);

        TocAnchor { pages, start_y }
    }

    fn heading(&mut self, depth: u8, text: &str) {
        let size = self.options.heading_size(depth);
        let lines = self.wrap(text, Font::Bold, size, 0.0);
        // Break first so the entry records the page the heading lands on.
        self.ensure_room();
        self.entries
            .push(TocEntry::new(depth, text, self.state.current_page));
        self.place_lines(lines, Font::Bold, size, 0.0);
    }

    fn text_block(&mut self, text: &str, font: Font, size: f32, indent: f32) {
        let lines = self.wrap(text, font, size, indent);
        self.place_lines(lines, font, size, indent);
    }

    fn wrap(&self, text: &str, font: Font, size: f32, indent: f32) -> Vec<String> {
        let width = self.options.geometry.content_width() - indent;
        let lines = self.measure(font, size).wrap(text, width);
        if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        }
    }

    /// Shared placement: break before any line that would start past the
    /// bottom margin, then advance by the font-relative line height.
    fn place_lines(&mut self, lines: Vec<String>, font: Font, size: f32, indent: f32) {
        let x = self.options.geometry.margin + indent;
        for line in lines {
            self.ensure_room();
            self.draw_text(x, line, font, size);
            self.state.advance(self.options.line_advance(size));
        }
        self.state.advance(self.options.block_gap(size));
    }

    fn code_block(&mut self, lines: &[String]) {
        let options = self.options;
        let geometry = options.geometry;
        let line_height = options.code_line_height;

        self.ensure_room();
        if !lines.is_empty() {
            self.page.push(DrawOp::FillRect {
                x: geometry.margin,
                y: self.state.current_y - line_height * 0.75,
                width: geometry.content_width(),
                height: lines.len() as f32 * line_height,
                gray: options.code_background,
            });
        }

        let x = geometry.margin + options.code_padding;
        for line in lines {
            self.ensure_room();
            self.draw_text(x, line.as_str(), Font::Mono, options.code_size);
            self.state.advance(line_height);
        }
    }

    fn list(&mut self, start: Option<u64>, items: &[String]) {
        let options = self.options;
        let size = options.body_size;
        for (i, item) in items.iter().enumerate() {
            let marker = match start {
                Some(first) => format!("{}.", first + i as u64),
                None => options.bullet.to_string(),
            };
            let lines = self.wrap(item, Font::Regular, size, options.list_indent);
            self.ensure_room();
            self.draw_text(options.geometry.margin, marker, Font::Regular, size);
            self.place_lines(lines, Font::Regular, size, options.list_indent);
        }
    }

    fn finish(mut self) -> (Vec<Page>, Vec<TocEntry>) {
        if self.options.number_last_page && self.page.role == PageRole::Body {
            self.stamp_footer();
        }
        self.closed.push(self.page);
        (self.closed, self.entries)
    }
}
