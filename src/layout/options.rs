//! Layout options and configuration.

use crate::model::Geometry;

/// Options controlling pagination and typography.
///
/// Font sizes are in points; every other length is in geometry units.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Page size and margin
    pub geometry: Geometry,

    /// Paragraph and list item font size
    pub body_size: f32,

    /// Title page title font size
    pub title_size: f32,

    /// Title page date line font size
    pub date_size: f32,

    /// "Table of Contents" heading font size
    pub toc_heading_size: f32,

    /// Page number footer font size
    pub footer_size: f32,

    /// Code block font size
    pub code_size: f32,

    /// Vertical advance per code line
    pub code_line_height: f32,

    /// Horizontal inset of code text inside its background
    pub code_padding: f32,

    /// Gray level of the code background (0 = black, 1 = white)
    pub code_background: f32,

    /// Line advance as a fraction of the font size
    pub line_factor: f32,

    /// Gap after a block as a fraction of the font size
    pub gap_factor: f32,

    /// Indent of list item text after the bullet
    pub list_indent: f32,

    /// Bullet glyph for unordered lists
    pub bullet: char,

    /// TOC indent per heading level below 1
    pub toc_indent: f32,

    /// Vertical advance per TOC entry
    pub toc_line_height: f32,

    /// How many pages are reserved for the TOC
    pub toc_pages: TocPages,

    /// Also stamp a page number on the final body page
    pub number_last_page: bool,

    /// What to do when there is nothing to lay out
    pub empty: EmptyPolicy,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page geometry.
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the TOC page policy.
    pub fn with_toc_pages(mut self, policy: TocPages) -> Self {
        self.toc_pages = policy;
        self
    }

    /// Also number the final body page.
    pub fn with_last_page_number(mut self, number: bool) -> Self {
        self.number_last_page = number;
        self
    }

    /// Set the empty document policy.
    pub fn with_empty_policy(mut self, policy: EmptyPolicy) -> Self {
        self.empty = policy;
        self
    }

    /// Heading font size for a depth of 1-6 (18 down to 8).
    pub fn heading_size(&self, depth: u8) -> f32 {
        20.0 - 2.0 * depth.clamp(1, 6) as f32
    }

    /// Vertical advance after one line at `size`.
    pub fn line_advance(&self, size: f32) -> f32 {
        size * self.line_factor
    }

    /// Gap after a block set at `size`.
    pub fn block_gap(&self, size: f32) -> f32 {
        size * self.gap_factor
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            geometry: Geometry::a4(),
            body_size: 12.0,
            title_size: 24.0,
            date_size: 12.0,
            toc_heading_size: 18.0,
            footer_size: 10.0,
            code_size: 10.0,
            code_line_height: 14.0,
            code_padding: 3.0,
            code_background: 0.94,
            line_factor: 0.5,
            gap_factor: 0.3,
            list_indent: 6.0,
            bullet: '\u{2022}',
            toc_indent: 10.0,
            toc_line_height: 15.0,
            toc_pages: TocPages::Single,
            number_last_page: false,
            empty: EmptyPolicy::Error,
        }
    }
}

/// How pages are reserved for the table of contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TocPages {
    /// Exactly one page; entries past the bottom margin are still drawn
    #[default]
    Single,
    /// As many pages as the heading count needs, reserved before body layout
    Fit,
}

/// Behavior when the markdown yields no blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyPolicy {
    /// Fail with `Error::EmptyDocument`
    #[default]
    Error,
    /// Emit the title page, an empty TOC page and one blank body page
    Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_sizes() {
        let options = LayoutOptions::default();
        assert_eq!(options.heading_size(1), 18.0);
        assert_eq!(options.heading_size(6), 8.0);
        assert_eq!(options.heading_size(0), 18.0);
    }

    #[test]
    fn test_advances() {
        let options = LayoutOptions::default();
        assert_eq!(options.line_advance(12.0), 6.0);
        assert!((options.block_gap(10.0) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_layout_options_builder() {
        let options = LayoutOptions::new()
            .with_geometry(Geometry::letter())
            .with_toc_pages(TocPages::Fit)
            .with_last_page_number(true)
            .with_empty_policy(EmptyPolicy::Shell);

        assert_eq!(options.geometry, Geometry::letter());
        assert_eq!(options.toc_pages, TocPages::Fit);
        assert!(options.number_last_page);
        assert_eq!(options.empty, EmptyPolicy::Shell);
    }
}
