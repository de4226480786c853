//! Base-14 font metrics and word wrapping.
//!
//! Widths come from the Adobe AFM files for Helvetica and Helvetica-Bold, in
//! thousandths of an em. They cover every glyph of WinAnsiEncoding, the
//! encoding the PDF sink writes. Characters outside it are drawn as `?`.

use crate::model::{Font, Geometry};

/// Widths of ASCII 32..=126 in Helvetica.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 48-63
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 80-95
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 96-111
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 112-126
];

/// Widths of ASCII 32..=126 in Helvetica-Bold.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 48-63
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 80-95
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 96-111
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 112-126
];

/// Widths of U+00A0..=U+00FF in Helvetica.
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // A0-AF
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // B0-BF
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // C0-CF
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // D0-DF
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // E0-EF
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // F0-FF
];

/// Widths of U+00A0..=U+00FF in Helvetica-Bold.
const HELVETICA_BOLD_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // A0-AF
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // B0-BF
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // C0-CF
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // D0-DF
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // E0-EF
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // F0-FF
];

const COURIER_WIDTH: u16 = 600;
const FALLBACK_WIDTH: u16 = 556;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Width of a single character in thousandths of an em.
pub fn char_width(c: char, font: Font) -> u16 {
    if font == Font::Mono {
        return COURIER_WIDTH;
    }
    let bold = font == Font::Bold;
    let (ascii, latin1) = if bold {
        (&HELVETICA_BOLD, &HELVETICA_BOLD_LATIN1)
    } else {
        (&HELVETICA, &HELVETICA_LATIN1)
    };
    match c {
        ' '..='~' => ascii[c as usize - 32],
        // Encoded as a space
        '\t' => ascii[0],
        '\u{a0}'..='\u{ff}' => latin1[c as usize - 0xA0],
        _ => {
            let (regular, heavy) = win_ansi_special(c);
            if bold {
                heavy
            } else {
                regular
            }
        }
    }
}

/// Regular and bold widths of the WinAnsi glyphs in 0x80..=0x9F.
fn win_ansi_special(c: char) -> (u16, u16) {
    match c {
        '\u{20ac}' => (556, 556), // €
        '\u{201a}' => (222, 278), // ‚
        '\u{0192}' => (556, 556), // ƒ
        '\u{201e}' => (333, 500), // „
        '\u{2026}' => (1000, 1000), // …
        '\u{2020}' | '\u{2021}' => (556, 556), // † ‡
        '\u{02c6}' | '\u{02dc}' => (333, 333), // ˆ ˜
        '\u{2030}' => (1000, 1000), // ‰
        '\u{0160}' => (667, 667), // Š
        '\u{2039}' | '\u{203a}' => (333, 333), // ‹ ›
        '\u{0152}' => (1000, 1000), // Œ
        '\u{017d}' => (611, 611), // Ž
        '\u{2018}' | '\u{2019}' => (222, 278), // ‘ ’
        '\u{201c}' | '\u{201d}' => (333, 500), // “ ”
        '\u{2022}' => (350, 350), // •
        '\u{2013}' => (556, 556), // –
        '\u{2014}' => (1000, 1000), // —
        '\u{2122}' => (1000, 1000), // ™
        '\u{0161}' => (500, 556), // š
        '\u{0153}' => (944, 944), // œ
        '\u{017e}' => (500, 500), // ž
        '\u{0178}' => (667, 667), // Ÿ
        _ => (FALLBACK_WIDTH, FALLBACK_WIDTH),
    }
}

/// Measures text in page units for one font and size.
#[derive(Debug, Clone, Copy)]
pub struct TextMeasure {
    font: Font,
    /// Page units per thousandth of an em
    scale: f32,
}

impl TextMeasure {
    /// Create a measure for `font` at `size` points.
    pub fn new(font: Font, size: f32, geometry: &Geometry) -> Self {
        Self {
            font,
            scale: geometry.points_to_units(size) / 1000.0,
        }
    }

    /// Width of `text` in page units.
    pub fn width(&self, text: &str) -> f32 {
        let units: u32 = text.chars().map(|c| char_width(c, self.font) as u32).sum();
        units as f32 * self.scale
    }

    /// Greedy word wrap to `max_width`.
    ///
    /// `\n` forces a break. Words wider than the column are split between
    /// characters. Blank input yields no lines.
    pub fn wrap(&self, text: &str, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        for source_line in text.split('\n') {
            let mut current = String::new();
            for word in source_line.split_whitespace() {
                if self.width(word) > max_width {
                    if !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                    }
                    let mut pieces = self.split_word(word, max_width);
                    current = pieces.pop().unwrap_or_default();
                    lines.extend(pieces);
                    continue;
                }
                if current.is_empty() {
                    current.push_str(word);
                    continue;
                }
                let candidate_width = self.width(&current) + self.width(" ") + self.width(word);
                if candidate_width <= max_width {
                    current.push(' ');
                    current.push_str(word);
                } else {
                    lines.push(std::mem::replace(&mut current, word.to_string()));
                }
            }
            if !current.is_empty() {
                lines.push(current);
            }
        }
        lines
    }

    /// Break an over-long word into chunks no wider than `max_width`.
    fn split_word(&self, word: &str, max_width: f32) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut current = String::new();
        let mut width = 0.0;
        for c in word.chars() {
            let w = char_width(c, self.font) as f32 * self.scale;
            if !current.is_empty() && width + w > max_width {
                pieces.push(std::mem::take(&mut current));
                width = 0.0;
            }
            current.push(c);
            width += w;
        }
        if !current.is_empty() {
            pieces.push(current);
        }
        pieces
    }

    /// Shorten `text` with a trailing ellipsis so it fits `max_width`.
    pub fn truncate(&self, text: &str, max_width: f32) -> String {
        if self.width(text) <= max_width {
            return text.to_string();
        }
        let budget = max_width - self.width(ELLIPSIS);
        let mut out = String::new();
        let mut width = 0.0;
        for c in text.chars() {
            let w = char_width(c, self.font) as f32 * self.scale;
            if width + w > budget {
                break;
            }
            out.push(c);
            width += w;
        }
        let mut out = out.trim_end().to_string();
        out.push_str(ELLIPSIS);
        out
    }
}
