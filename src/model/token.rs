//! Block-level markdown tokens.

use serde::{Deserialize, Serialize};

/// One semantic unit of parsed markdown.
///
/// The tokenizer produces these once per export, in source order. Inline
/// markup has already been flattened to plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockToken {
    /// A heading with depth 1-6.
    Heading {
        /// Heading depth (1 = top level)
        depth: u8,
        /// Plain heading text
        text: String,
    },

    /// A paragraph of plain text.
    Paragraph {
        /// Paragraph text; `\n` marks a hard line break
        text: String,
    },

    /// A fenced or indented code block.
    Code {
        /// Info-string language, if any
        language: Option<String>,
        /// Raw source lines, without line terminators
        lines: Vec<String>,
    },

    /// A bullet or numbered list.
    List {
        /// Number of the first item for numbered lists, `None` for bullets
        start: Option<u64>,
        /// Item texts in order
        items: Vec<String>,
    },
}

impl BlockToken {
    /// Create a heading token, clamping depth into 1-6.
    pub fn heading(depth: u8, text: impl Into<String>) -> Self {
        BlockToken::Heading {
            depth: depth.clamp(1, 6),
            text: text.into(),
        }
    }

    /// Create a paragraph token.
    pub fn paragraph(text: impl Into<String>) -> Self {
        BlockToken::Paragraph { text: text.into() }
    }

    /// Create a code token from a block of source text.
    pub fn code(source: &str) -> Self {
        BlockToken::Code {
            language: None,
            lines: source.lines().map(str::to_string).collect(),
        }
    }

    /// Create a bullet list token.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BlockToken::List {
            start: None,
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a numbered list token whose first item is numbered `start`.
    pub fn numbered<I, S>(start: u64, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BlockToken::List {
            start: Some(start),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if this token is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, BlockToken::Heading { .. })
    }

    /// Short kind name, used in logs and statistics.
    pub fn kind(&self) -> &'static str {
        match self {
            BlockToken::Heading { .. } => "heading",
            BlockToken::Paragraph { .. } => "paragraph",
            BlockToken::Code { .. } => "code",
            BlockToken::List { .. } => "list",
        }
    }
}
