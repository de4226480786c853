//! Rendering module for serializing paginated documents.

pub mod encoding;
mod json;
mod pdf;

pub use json::{to_json, JsonFormat};
pub use pdf::{to_pdf, PdfOptions};
