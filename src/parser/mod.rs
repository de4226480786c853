//! Markdown tokenizing module.

mod options;
mod tokenizer;

pub use options::{TokenizeOptions, UnsupportedBlocks};
pub use tokenizer::{tokenize, Tokenizer};
