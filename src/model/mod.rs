//! Document model types.
//!
//! This module defines the token stream fed into layout and the paginated
//! representation that layout produces. Rendering backends consume the
//! paginated model without knowing anything about markdown.

mod document;
mod geometry;
mod page;
mod token;

pub use document::{Document, Metadata, TocEntry};
pub use geometry::{Geometry, Unit};
pub use page::{DrawOp, Font, Page, PageRole};
pub use token::BlockToken;
