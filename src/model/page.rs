//! Page-level types.

use super::Geometry;
use serde::{Deserialize, Serialize};

/// Base-14 font used for a text operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Font {
    /// Helvetica
    Regular,
    /// Helvetica-Bold
    Bold,
    /// Courier
    Mono,
}

impl Font {
    /// All fonts, in resource order.
    pub const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Mono];

    /// PDF base font name.
    pub fn base_name(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Mono => "Courier",
        }
    }

    /// Resource name used inside page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Mono => "F3",
        }
    }
}

/// What a page is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageRole {
    /// Title page
    Title,
    /// Reserved table of contents page
    Toc,
    /// Body content page
    Body,
}

/// A positioned drawing operation.
///
/// Coordinates are in geometry units from the top-left corner; text `y` is
/// the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Place a single line of text.
    Text {
        x: f32,
        y: f32,
        text: String,
        font: Font,
        /// Font size in points
        size: f32,
    },

    /// Fill a rectangle whose top-left corner is at `(x, y)`.
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        /// Gray level, 0 = black, 1 = white
        gray: f32,
    },

    /// Stroke a straight line.
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        /// Stroke width in points
        width: f32,
    },
}

impl DrawOp {
    /// Text content, if this is a text operation.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// A single fixed-size page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page role
    pub role: PageRole,

    /// Page width in geometry units
    pub width: f32,

    /// Page height in geometry units
    pub height: f32,

    /// Draw operations in paint order
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Create an empty page sized by the geometry.
    pub fn new(number: u32, role: PageRole, geometry: &Geometry) -> Self {
        Self {
            number,
            role,
            width: geometry.width,
            height: geometry.height,
            ops: Vec::new(),
        }
    }

    /// Append a draw operation.
    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Iterate over the text lines on the page in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(DrawOp::text)
    }

    /// Check whether any single text line on the page equals `needle`.
    pub fn contains_line(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    /// Get plain text content of the page, one line per text operation.
    pub fn plain_text(&self) -> String {
        self.texts().collect::<Vec<_>>().join("\n")
    }

    /// Check if the page has no draw operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
