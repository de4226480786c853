//! Pagination and table of contents layout.
//!
//! Layout runs in two phases. [`layout`] walks the tokens once, placing
//! content across pages and recording where each heading landed. Page
//! numbers are only final once that pass completes, so [`patch_toc`] then
//! writes the resolved entries onto the pages reserved for the TOC.

mod builder;
pub mod metrics;
mod options;
mod state;
mod toc;

pub use builder::{layout, LayoutResult, TOC_TITLE};
pub use options::{EmptyPolicy, LayoutOptions, TocPages};
pub use state::LayoutState;
pub use toc::{pages_needed, patch_toc, TocAnchor};

use crate::error::{Error, Result};
use crate::model::{BlockToken, Document, Metadata};

/// Run both layout phases and assemble the document.
pub fn build(tokens: &[BlockToken], metadata: Metadata, options: &LayoutOptions) -> Result<Document> {
    options.geometry.validate()?;

    if tokens.is_empty() && options.empty == EmptyPolicy::Error {
        return Err(Error::EmptyDocument);
    }

    let LayoutResult {
        pages,
        entries,
        anchor,
    } = layout(tokens, &metadata, options);
    let pages = patch_toc(pages, &entries, &anchor, options);

    Ok(Document {
        metadata,
        geometry: options.geometry,
        pages,
        toc: entries,
    })
}
