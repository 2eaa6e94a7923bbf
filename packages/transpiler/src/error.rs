//! Error types for the transpiler.
//!
//! Conversion errors are fatal for the current document only: a caller
//! processing a batch catches at the per-document boundary and continues
//! with the next document.

use thiserror::Error;

/// Main error type for the transpiler library.
#[derive(Debug, Error)]
pub enum TranspileError {
    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Block-level element with no known rendering rule.
    ///
    /// Raised instead of silently skipping, because a silent skip would
    /// drop legal text without trace.
    #[error("No renderer for element <{tag_name}>{}", .context.as_ref().map(|c| format!(" in {c}")).unwrap_or_default())]
    UnknownElement {
        tag_name: String,
        context: Option<String>,
    },

    /// Inline element with no known rendering rule.
    #[error("Unrecognized inline element <{tag_name}> with text '{text}'")]
    UnknownInlineElement { tag_name: String, text: String },

    /// List style code missing from the lookup table.
    #[error("Unrecognized list style code '{0}'")]
    UnknownStyleCode(String),

    /// Computed heading depth left the Markdown heading range.
    #[error("Heading level {0} is outside the Markdown range 1..=6")]
    InvalidHeadingLevel(usize),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for transpiler operations.
pub type Result<T> = std::result::Result<T, TranspileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_element_with_context() {
        let err = TranspileError::UnknownElement {
            tag_name: "FooKooste".to_string(),
            context: Some("<PerusteluOsa>".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "No renderer for element <FooKooste> in <PerusteluOsa>"
        );
    }

    #[test]
    fn test_unknown_element_without_context() {
        let err = TranspileError::UnknownElement {
            tag_name: "FooKooste".to_string(),
            context: None,
        };
        assert_eq!(err.to_string(), "No renderer for element <FooKooste>");
    }

    #[test]
    fn test_unknown_inline_element_display() {
        let err = TranspileError::UnknownInlineElement {
            tag_name: "OutoTeksti".to_string(),
            text: "sisältö".to_string(),
        };
        assert!(err.to_string().contains("OutoTeksti"));
        assert!(err.to_string().contains("sisältö"));
    }

    #[test]
    fn test_unknown_style_code_display() {
        let err = TranspileError::UnknownStyleCode("Ruutu".to_string());
        assert_eq!(err.to_string(), "Unrecognized list style code 'Ruutu'");
    }

    #[test]
    fn test_invalid_heading_level_display() {
        let err = TranspileError::InvalidHeadingLevel(7);
        assert!(err.to_string().contains('7'));
    }
}
