//! Layout cursor.

use crate::model::Geometry;

/// Mutable write position for one layout run.
///
/// Each export creates its own state; nothing is shared between runs.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    /// Current page number (1-indexed)
    pub current_page: u32,

    /// Baseline of the next line, measured from the top edge
    pub current_y: f32,

    /// Page geometry
    pub geometry: Geometry,
}

impl LayoutState {
    /// Start at the top margin of page 1.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            current_page: 1,
            current_y: geometry.margin,
            geometry,
        }
    }

    /// True once the cursor has passed the bottom margin.
    pub fn overflows(&self) -> bool {
        self.current_y > self.geometry.content_bottom()
    }

    /// Move the cursor down.
    pub fn advance(&mut self, dy: f32) {
        self.current_y += dy;
    }

    /// Move to the top margin of the next page.
    pub fn next_page(&mut self) {
        self.current_page += 1;
        self.current_y = self.geometry.margin;
    }
}
