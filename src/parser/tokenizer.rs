//! Markdown tokenizer built on pulldown-cmark.
//!
//! The CommonMark event stream is folded into a flat sequence of
//! [`BlockToken`]s. Inline markup (emphasis, links, inline code) is flattened
//! to plain text, and blocks nested inside list items contribute their text
//! to the item rather than becoming tokens of their own.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};
use regex::Regex;

use super::{TokenizeOptions, UnsupportedBlocks};
use crate::model::BlockToken;

/// Open element on the tokenizer stack.
#[derive(Debug)]
enum Frame {
    Paragraph(String),
    Heading { depth: u8, text: String },
    Code { language: Option<String>, text: String },
    List { start: Option<u64>, items: Vec<String> },
    Item { text: String, flushed: bool },
    Table { rows: Vec<String> },
    Row(Vec<String>),
    Cell(String),
    Html(String),
    /// Blockquote or footnote definition whose children flow through
    Container,
    /// Emphasis, links and other inline wrappers
    Inline,
}

impl Frame {
    /// Text buffer if this frame collects inline text.
    fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Frame::Paragraph(text)
            | Frame::Heading { text, .. }
            | Frame::Code { text, .. }
            | Frame::Item { text, .. }
            | Frame::Cell(text)
            | Frame::Html(text) => Some(text),
            _ => None,
        }
    }
}

/// Converts markdown source into block tokens.
pub struct Tokenizer {
    options: TokenizeOptions,
    space_regex: Regex,
}

impl Tokenizer {
    /// Create a tokenizer with the given options.
    pub fn new(options: TokenizeOptions) -> Self {
        Self {
            options,
            space_regex: Regex::new(r"[ \t\u{a0}]+").unwrap(),
        }
    }

    /// Tokenize a markdown string, preserving source order.
    pub fn tokenize(&self, markdown: &str) -> Vec<BlockToken> {
        let mut run = Run {
            tokenizer: self,
            stack: Vec::new(),
            tokens: Vec::new(),
            skip_depth: 0,
        };

        for event in Parser::new_ext(markdown, self.parser_options()) {
            run.handle(event);
        }

        log::debug!(
            "Tokenized {} bytes of markdown into {} blocks",
            markdown.len(),
            run.tokens.len()
        );
        run.tokens
    }

    fn parser_options(&self) -> Options {
        if self.options.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES
        } else {
            Options::empty()
        }
    }

    /// Collapse runs of spaces, trim each line and drop blank lines.
    fn normalize(&self, text: &str) -> String {
        text.split('\n')
            .map(|line| self.space_regex.replace_all(line, " ").trim().to_string())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Normalize to a single line.
    fn normalize_inline(&self, text: &str) -> String {
        self.normalize(text).replace('\n', " ")
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizeOptions::default())
    }
}

/// Mutable state for a single tokenize call.
struct Run<'t> {
    tokenizer: &'t Tokenizer,
    stack: Vec<Frame>,
    tokens: Vec<BlockToken>,
    skip_depth: usize,
}

impl Run<'_> {
    fn handle(&mut self, event: Event<'_>) {
        if self.skip_depth > 0 {
            match event {
                Event::Start(_) => self.skip_depth += 1,
                Event::End(_) => self.skip_depth -= 1,
                _ => {}
            }
            return;
        }

        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) | Event::Code(text) => self.push_text(&text),
            Event::Html(html) => {
                if let Some(Frame::Html(buf)) = self.stack.last_mut() {
                    buf.push_str(&html);
                }
            }
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.push_text("\n"),
            Event::TaskListMarker(checked) => {
                self.push_text(if checked { "[x] " } else { "[ ] " })
            }
            Event::FootnoteReference(label) => self.push_text(&format!("[{}]", label)),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let degrade = self.tokenizer.options.unsupported == UnsupportedBlocks::Degrade;

        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph(String::new()),
            Tag::Heading { level, .. } => Frame::Heading {
                depth: heading_depth(level),
                text: String::new(),
            },
            Tag::CodeBlock(kind) => Frame::Code {
                language: match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                },
                text: String::new(),
            },
            Tag::List(start) => {
                self.flush_item();
                Frame::List {
                    start,
                    items: Vec::new(),
                }
            }
            Tag::Item => Frame::Item {
                text: String::new(),
                flushed: false,
            },
            Tag::BlockQuote(_) | Tag::FootnoteDefinition(_) if degrade => Frame::Container,
            Tag::Table(_) if degrade => Frame::Table { rows: Vec::new() },
            Tag::TableHead | Tag::TableRow if degrade => Frame::Row(Vec::new()),
            Tag::TableCell if degrade => Frame::Cell(String::new()),
            Tag::HtmlBlock if degrade => Frame::Html(String::new()),
            Tag::BlockQuote(_)
            | Tag::FootnoteDefinition(_)
            | Tag::Table(_)
            | Tag::HtmlBlock => {
                self.skip_depth = 1;
                return;
            }
            _ => Frame::Inline,
        };
        self.stack.push(frame);
    }

    fn end(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };

        match frame {
            Frame::Paragraph(text) => {
                let text = self.tokenizer.normalize(&text);
                if !text.is_empty() && !self.append_to_enclosing(&text) {
                    self.tokens.push(BlockToken::Paragraph { text });
                }
            }
            Frame::Heading { depth, text } => {
                let text = self.tokenizer.normalize_inline(&text);
                if !self.append_to_enclosing(&text) {
                    self.tokens.push(BlockToken::Heading { depth, text });
                }
            }
            Frame::Code { language, text } => {
                let lines: Vec<String> = text.lines().map(str::to_string).collect();
                let joined = self.tokenizer.normalize_inline(&lines.join(" "));
                if !self.append_to_enclosing(&joined) {
                    self.tokens.push(BlockToken::Code { language, lines });
                }
            }
            Frame::Item { text, flushed } => {
                let text = self.tokenizer.normalize_inline(&text);
                if let Some(Frame::List { items, .. }) = self.stack.last_mut() {
                    if !text.is_empty() || !flushed {
                        items.push(text);
                    }
                }
            }
            Frame::List { start, items } => {
                // Nested lists hand their items to the enclosing list.
                let parent = self.stack.iter_mut().rev().find_map(|f| match f {
                    Frame::List { items, .. } => Some(items),
                    _ => None,
                });
                match parent {
                    Some(parent_items) => parent_items.extend(items),
                    None if !items.is_empty() => {
                        self.tokens.push(BlockToken::List { start, items })
                    }
                    None => {}
                }
            }
            Frame::Cell(text) => {
                if let Some(Frame::Row(cells)) = self.stack.last_mut() {
                    cells.push(self.tokenizer.normalize_inline(&text));
                }
            }
            Frame::Row(cells) => {
                if let Some(Frame::Table { rows }) = self.stack.last_mut() {
                    if cells.iter().any(|c| !c.is_empty()) {
                        rows.push(cells.join(" | "));
                    }
                }
            }
            Frame::Table { rows } => {
                for row in rows {
                    if !self.append_to_enclosing(&row) {
                        self.tokens.push(BlockToken::Paragraph { text: row });
                    }
                }
            }
            Frame::Html(html) => {
                let text = self.tokenizer.normalize(&html);
                if !text.is_empty() && !self.append_to_enclosing(&text) {
                    self.tokens.push(BlockToken::Paragraph { text });
                }
            }
            Frame::Container | Frame::Inline => {}
        }
    }

    /// Append raw text to the innermost frame that collects text.
    fn push_text(&mut self, text: &str) {
        if let Some(buf) = self.stack.iter_mut().rev().find_map(Frame::text_mut) {
            buf.push_str(text);
        }
    }

    /// Merge a finished block into an enclosing list item, if there is one.
    fn append_to_enclosing(&mut self, text: &str) -> bool {
        let item = self.stack.iter_mut().rev().find_map(|f| match f {
            Frame::Item { text, .. } => Some(text),
            _ => None,
        });
        match item {
            Some(buf) => {
                if !buf.is_empty() && !text.is_empty() {
                    buf.push(' ');
                }
                buf.push_str(text);
                true
            }
            None => false,
        }
    }

    /// Emit the current item's text before a nested list starts.
    fn flush_item(&mut self) {
        let len = self.stack.len();
        if len < 2 {
            return;
        }
        let (lists, items) = self.stack.split_at_mut(len - 1);
        if let (Some(Frame::List { items: list_items, .. }), Frame::Item { text, flushed }) =
            (lists.last_mut(), &mut items[0])
        {
            let pending = self.tokenizer.normalize_inline(text);
            if !pending.is_empty() {
                list_items.push(pending);
            }
            text.clear();
            *flushed = true;
        }
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Tokenize markdown with default options.
pub fn tokenize(markdown: &str) -> Vec<BlockToken> {
    Tokenizer::default().tokenize(markdown)
}
