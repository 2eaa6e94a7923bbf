//! List rendering for the two Vaski list variants.
//!
//! The schema expresses the same concept two ways: `ListaKooste` groups all
//! items under one container, while `KohtaKooste` wraps each item
//! individually as a sibling of the surrounding paragraphs. Both carry a
//! `listatyyppiKoodi` style attribute resolved through a fixed table.

use roxmltree::Node;

use crate::error::{Result, TranspileError};
use crate::render::inline::{finish_run, render_run_body, Citation, FootnoteKeys};
use crate::xml::{find_children, get_attribute};

/// Markdown shape of a list, resolved from the style code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// Dash bullets.
    Dash,
    /// Numbered items.
    Ordered,
    /// Renders as nothing (table-of-contents placeholder).
    Suppressed,
}

/// Style code lookup table. An unrecognized code is a hard error.
const STYLE_CODES: &[(&str, ListStyle)] = &[
    ("Numeroimaton", ListStyle::Dash),
    ("Viiva", ListStyle::Dash),
    ("LyhytViiva", ListStyle::Dash),
    ("NumeroSulku", ListStyle::Ordered),
    ("NumeroPiste", ListStyle::Ordered),
    ("JatkuvaNumerointi", ListStyle::Ordered),
    ("KirjainSulku", ListStyle::Ordered),
    ("Sisallysluettelo", ListStyle::Suppressed),
];

/// Resolve the style attribute of a list node.
///
/// A missing attribute falls back to plain bullets; that gap is common in
/// the corpus and not worth failing a document over.
fn resolve_style(node: Node<'_, '_>) -> Result<ListStyle> {
    match get_attribute(node, "listatyyppiKoodi") {
        None => Ok(ListStyle::Dash),
        Some(code) => STYLE_CODES
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, style)| *style)
            .ok_or_else(|| TranspileError::UnknownStyleCode(code.to_string())),
    }
}

/// Format one list line by style and 1-based position.
fn item_line(style: ListStyle, index: usize, text: &str) -> String {
    match style {
        ListStyle::Dash => format!("- {text}"),
        ListStyle::Ordered => format!("{index}. {text}"),
        ListStyle::Suppressed => String::new(),
    }
}

/// Render a grouped list (`ListaKooste`) into a Markdown list block.
///
/// # Errors
/// Returns `UnknownStyleCode` for a style outside the lookup table, and
/// propagates inline rendering errors from item content.
pub fn render_list(node: Node<'_, '_>, keys: &mut FootnoteKeys) -> Result<String> {
    let style = resolve_style(node)?;
    if style == ListStyle::Suppressed {
        tracing::debug!("table-of-contents list suppressed");
        return Ok(String::new());
    }

    let mut citations: Vec<Citation> = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    for item in find_children(node, "ListaKohta") {
        let text = render_run_body(item, keys, &mut citations)?;
        if text.is_empty() {
            continue;
        }
        lines.push(item_line(style, lines.len() + 1, &text));
    }

    if lines.is_empty() {
        return Ok(String::new());
    }
    Ok(finish_run(&lines.join("\n"), &citations))
}

/// Render one individually wrapped list item (`KohtaKooste`) as a single
/// line terminated by a newline.
///
/// The caller appends the closing blank line and the collected footnote
/// definitions once the run of consecutive items ends; emitting either
/// here would tear the contiguous list apart.
pub fn render_compact_item(
    node: Node<'_, '_>,
    index: usize,
    keys: &mut FootnoteKeys,
    citations: &mut Vec<Citation>,
) -> Result<String> {
    let style = resolve_style(node)?;
    if style == ListStyle::Suppressed {
        return Ok(String::new());
    }

    let text = render_run_body(node, keys, citations)?;
    if text.is_empty() {
        return Ok(String::new());
    }

    let mut out = item_line(style, index, &text);
    out.push('\n');
    Ok(out)
}
