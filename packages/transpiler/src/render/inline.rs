//! Inline run rendering: a paragraph-like node's mixed text and markup
//! content becomes one Markdown string.
//!
//! Free text and inline children are walked in document order and
//! concatenated without separators; whitespace runs in the source collapse
//! to single spaces, and a space appears in the output only where the
//! source had one. Footnotes encountered during the walk are replaced by
//! `[^N]` anchors and their texts are collected; the definitions are
//! emitted as a block after the run body.

use roxmltree::Node;

use crate::classify::{inline_role, InlineRole};
use crate::error::{Result, TranspileError};
use crate::text::collapse_ws;
use crate::xml::{find_child, flatten_text, get_attribute, get_tag_name};

/// Hard line break inside a paragraph: two trailing spaces plus newline.
const HARD_BREAK: &str = "  \n";

/// Superscript digits with a dedicated Unicode form.
const SUPERSCRIPTS: &[(&str, &str)] = &[("2", "²"), ("3", "³")];

/// Subscript digits with a dedicated Unicode form.
const SUBSCRIPTS: &[(&str, &str)] = &[("1", "₁"), ("2", "₂"), ("3", "₃"), ("10", "₁₀")];

/// One collected footnote: anchor key and definition text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub key: String,
    pub text: String,
}

impl Citation {
    /// Format as a Markdown reference-definition line.
    #[must_use]
    pub fn definition(&self) -> String {
        format!("[^{}]: {}", self.key, self.text)
    }
}

/// Allocates footnote anchor keys for one conversion call.
///
/// Keys are unique within a single conversion and carry no meaning beyond
/// it. The counter lives in the per-call render context, never in module
/// state, so concurrent conversions stay independent.
#[derive(Debug, Default)]
pub struct FootnoteKeys {
    counter: usize,
}

impl FootnoteKeys {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next anchor key.
    pub fn next_key(&mut self) -> String {
        self.counter += 1;
        self.counter.to_string()
    }

    /// Number of keys allocated so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.counter
    }
}

/// Render a paragraph-like node into a Markdown block terminated by a
/// blank line, with footnote definitions appended after the body.
///
/// A node with no renderable content yields an empty string.
///
/// # Errors
/// Returns `UnknownInlineElement` for any inline tag missing from the
/// classification table.
pub fn render_run(node: Node<'_, '_>, keys: &mut FootnoteKeys) -> Result<String> {
    let mut citations = Vec::new();
    let body = render_run_body(node, keys, &mut citations)?;
    if body.is_empty() {
        return Ok(String::new());
    }
    Ok(finish_run(&body, &citations))
}

/// Terminate a run body: blank-line separator, followed by the collected
/// footnote definitions when there are any.
#[must_use]
pub fn finish_run(body: &str, citations: &[Citation]) -> String {
    format!("{body}\n\n{}", definition_block(citations))
}

/// Format collected citations as a blank-line-terminated definition block,
/// or an empty string when there are none.
#[must_use]
pub fn definition_block(citations: &[Citation]) -> String {
    if citations.is_empty() {
        return String::new();
    }
    let defs: Vec<String> = citations.iter().map(Citation::definition).collect();
    format!("{}\n\n", defs.join("\n"))
}

/// Render the body of an inline run without the blank-line terminator.
///
/// Footnotes are pushed onto `citations`; the caller decides where the
/// definitions are emitted.
pub fn render_run_body(
    node: Node<'_, '_>,
    keys: &mut FootnoteKeys,
    citations: &mut Vec<Citation>,
) -> Result<String> {
    let mut buf = String::new();
    let mut pending_space = false;

    for child in node.children() {
        if child.is_text() {
            if let Some(text) = child.text() {
                push_text(&mut buf, &mut pending_space, text);
            }
        } else if child.is_element() {
            if let Some(piece) = render_piece(child, keys, citations)? {
                push_piece(&mut buf, &mut pending_space, &piece);
            }
        }
    }

    Ok(buf.trim().to_string())
}

/// Emit a deferred space, unless the output is at the start of the run or
/// of a fresh line.
fn flush_space(buf: &mut String, pending_space: &mut bool) {
    if *pending_space {
        if !buf.is_empty() && !buf.ends_with('\n') && !buf.ends_with(' ') {
            buf.push(' ');
        }
        *pending_space = false;
    }
}

/// Append a source text fragment, collapsing whitespace runs to single
/// spaces while keeping the fragment's real token boundaries: a space
/// lands in the output only where the source had whitespace.
fn push_text(buf: &mut String, pending_space: &mut bool, text: &str) {
    let collapsed = collapse_ws(text);
    if collapsed.is_empty() {
        // A whitespace-only fragment still separates its neighbours.
        if !text.is_empty() {
            *pending_space = true;
        }
        return;
    }
    if text.starts_with(char::is_whitespace) {
        *pending_space = true;
    }
    flush_space(buf, pending_space);
    buf.push_str(&collapsed);
    *pending_space = text.ends_with(char::is_whitespace);
}

/// Append one rendered piece directly after the preceding content.
///
/// A hard break swallows any spaces before it; a gap placeholder becomes a
/// deferred space so that runs of them collapse.
fn push_piece(buf: &mut String, pending_space: &mut bool, piece: &str) {
    if piece.is_empty() {
        return;
    }
    if piece == HARD_BREAK {
        while buf.ends_with(' ') {
            buf.pop();
        }
        *pending_space = false;
        buf.push_str(HARD_BREAK);
        return;
    }
    if piece == " " {
        *pending_space = true;
        return;
    }
    flush_space(buf, pending_space);
    buf.push_str(piece);
}

/// Render one inline child element to its Markdown piece.
///
/// `None` means the element contributes nothing (empty span).
fn render_piece(
    node: Node<'_, '_>,
    keys: &mut FootnoteKeys,
    citations: &mut Vec<Citation>,
) -> Result<Option<String>> {
    let tag = get_tag_name(node);
    let Some(role) = inline_role(tag) else {
        return Err(TranspileError::UnknownInlineElement {
            tag_name: tag.to_string(),
            text: flatten_text(node),
        });
    };

    let piece = match role {
        InlineRole::Bold => wrap_span(node, keys, citations, "**")?,
        InlineRole::Italic => wrap_span(node, keys, citations, "*")?,
        InlineRole::BoldItalic => wrap_span(node, keys, citations, "***")?,
        InlineRole::Superscript => script_span(node, SUPERSCRIPTS, "sup"),
        InlineRole::Subscript => script_span(node, SUBSCRIPTS, "sub"),
        InlineRole::Footnote => footnote_piece(node, keys, citations),
        InlineRole::Reference => reference_piece(node),
        InlineRole::Parenthetical => {
            let inner = render_run_body(node, keys, citations)?;
            if inner.is_empty() {
                None
            } else {
                Some(format!("({inner})"))
            }
        }
        InlineRole::LineBreak => Some(HARD_BREAK.to_string()),
        InlineRole::Gap => Some(" ".to_string()),
        InlineRole::CitationId => {
            let text = flatten_text(node);
            if text.is_empty() {
                None
            } else {
                Some(text)
            }
        }
    };

    Ok(piece)
}

/// Wrap a span's recursively rendered content in the given marker.
///
/// A span without text content emits nothing, not even empty markers.
fn wrap_span(
    node: Node<'_, '_>,
    keys: &mut FootnoteKeys,
    citations: &mut Vec<Citation>,
    marker: &str,
) -> Result<Option<String>> {
    let inner = render_run_body(node, keys, citations)?;
    if inner.is_empty() {
        Ok(None)
    } else {
        Ok(Some(format!("{marker}{inner}{marker}")))
    }
}

/// Render a super- or subscript span.
///
/// The handful of digits with dedicated Unicode forms map directly; anything
/// else keeps the HTML tag, which Markdown renderers pass through.
fn script_span(node: Node<'_, '_>, table: &[(&str, &str)], html_tag: &str) -> Option<String> {
    let text = flatten_text(node);
    if text.is_empty() {
        return None;
    }
    match table.iter().find(|(key, _)| *key == text) {
        Some((_, unicode)) => Some((*unicode).to_string()),
        None => Some(format!("<{html_tag}>{text}</{html_tag}>")),
    }
}

/// Replace a footnote element with an anchor and collect its definition.
fn footnote_piece(
    node: Node<'_, '_>,
    keys: &mut FootnoteKeys,
    citations: &mut Vec<Citation>,
) -> Option<String> {
    let text = flatten_text(node);
    if text.is_empty() {
        tracing::debug!("footnote without text, skipping");
        return None;
    }
    let key = keys.next_key();
    let anchor = format!("[^{key}]");
    citations.push(Citation { key, text });
    Some(anchor)
}

/// Render a general reference as a Markdown link.
fn reference_piece(node: Node<'_, '_>) -> Option<String> {
    let text = match find_child(node, "ViiteTeksti") {
        Some(child) => flatten_text(child),
        None => collapse_ws(node.text().unwrap_or_default()),
    };
    if text.is_empty() {
        return None;
    }
    match get_attribute(node, "viiteURL") {
        Some(url) if !url.is_empty() => Some(format!("[{text}]({url})")),
        _ => {
            tracing::debug!("reference without URL, emitting plain text");
            Some(text)
        }
    }
}
