//! JSON rendering for laid-out documents.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document, including every draw operation, to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Serialize(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{build, LayoutOptions};
    use crate::model::{BlockToken, Metadata};

    fn sample() -> Document {
        build(
            &[BlockToken::heading(1, "Hello")],
            Metadata::new("Test"),
            &LayoutOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("\"toc\""));
        assert!(json.contains("\"op\": \"text\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact_round_trips() {
        let doc = sample();
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back.toc, doc.toc);
        assert_eq!(back.page_count(), doc.page_count());
    }
}
