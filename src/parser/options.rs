//! Tokenizer options and configuration.

/// Options for turning markdown into block tokens.
#[derive(Debug, Clone)]
pub struct TokenizeOptions {
    /// What to do with constructs that have no block token of their own
    pub unsupported: UnsupportedBlocks,

    /// Enable GitHub-flavored extensions (tables, strikethrough, task lists, footnotes)
    pub gfm: bool,
}

impl TokenizeOptions {
    /// Create new tokenize options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set unsupported block handling.
    pub fn with_unsupported(mut self, mode: UnsupportedBlocks) -> Self {
        self.unsupported = mode;
        self
    }

    /// Drop blockquotes, tables, footnotes and HTML blocks.
    pub fn skip_unsupported(mut self) -> Self {
        self.unsupported = UnsupportedBlocks::Skip;
        self
    }

    /// Enable or disable GitHub-flavored extensions.
    pub fn with_gfm(mut self, gfm: bool) -> Self {
        self.gfm = gfm;
        self
    }
}

impl Default for TokenizeOptions {
    fn default() -> Self {
        Self {
            unsupported: UnsupportedBlocks::Degrade,
            gfm: true,
        }
    }
}

/// Handling of blockquotes, tables, footnote definitions and HTML blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedBlocks {
    /// Emit their text content as plain paragraphs
    #[default]
    Degrade,
    /// Drop them entirely
    Skip,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_options_builder() {
        let options = TokenizeOptions::new().skip_unsupported().with_gfm(false);
        assert_eq!(options.unsupported, UnsupportedBlocks::Skip);
        assert!(!options.gfm);
    }

    #[test]
    fn test_default_options() {
        let options = TokenizeOptions::default();
        assert_eq!(options.unsupported, UnsupportedBlocks::Degrade);
        assert!(options.gfm);
    }
}
