//! Text normalization and wrapping utilities for Markdown output.

use regex::Regex;
use std::sync::LazyLock;
use textwrap::{fill, Options};
use unicode_normalization::UnicodeNormalization;

use crate::config::TEXT_WRAP_WIDTH;

/// Regex pattern for footnote-definition lines `[^N]: text`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FOOTNOTE_DEF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\^\d+\]: ").expect("valid regex"));

/// Collapse whitespace runs (including newlines) to single spaces and trim.
///
/// Source text is also normalized to NFC: the corpus mixes precomposed and
/// combining forms of ä/ö, which would otherwise produce visually identical
/// but byte-different output.
pub fn collapse_ws(text: &str) -> String {
    let normalized: String = text.nfc().collect();
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Uppercase the first character, leaving the rest untouched.
///
/// Heading text in the corpus is frequently all-lowercase
/// ("esityksen pääasiallinen sisältö"); acronyms and statute references in
/// the remainder must not be touched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Check whether a paragraph must not be re-wrapped.
///
/// Pipe-table lines, footnote definitions and hard line breaks all encode
/// meaning in their line structure.
fn contains_protected_line(paragraph: &str) -> bool {
    paragraph.contains("  \n")
        || paragraph
            .lines()
            .any(|line| line.starts_with('|') || FOOTNOTE_DEF_PATTERN.is_match(line))
}

/// Wrap Markdown text at the specified width, preserving paragraph breaks.
///
/// Paragraphs containing tables, footnote definitions or hard line breaks
/// are passed through unchanged.
pub fn wrap_text(text: &str, width: usize) -> String {
    let options = Options::new(width);
    text.split("\n\n")
        .map(|paragraph| {
            if contains_protected_line(paragraph) {
                paragraph.to_string()
            } else {
                fill(paragraph, &options)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Wrap text with the default width.
pub fn wrap_text_default(text: &str) -> String {
    wrap_text(text, TEXT_WRAP_WIDTH)
}
