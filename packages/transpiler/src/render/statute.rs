//! Statute subtree rendering: Säädös blocks describing the laws a proposal
//! or report amends.
//!
//! The statute schema is rendered structurally, not through the generic
//! walker: a title line, the Johtolause preamble, then per-Pykälä section
//! headers, Momentti paragraphs and bulleted sub-point groups. Tables are
//! attached to the text they follow; the sub-point groups re-attach every
//! table after the lead-in and after each bullet, matching the upstream
//! feed's observable output.

use roxmltree::Node;

use crate::render::table::render_table;
use crate::xml::{find_children, find_descendants, flatten_text, get_tag_name};

/// Render all statutes under a statute part, separated by horizontal rules.
///
/// Accepts either the `SaadosOsa` container or a bare `Saados` subtree.
#[must_use]
pub fn render_statutes(node: Node<'_, '_>) -> String {
    if get_tag_name(node) == "Saados" {
        return render_statute(node);
    }
    let blocks: Vec<String> = find_children(node, "Saados")
        .map(render_statute)
        .filter(|block| !block.is_empty())
        .collect();
    blocks.join("\n\n---\n\n")
}

/// Render one `Saados` subtree into Markdown.
#[must_use]
pub fn render_statute(saados: Node<'_, '_>) -> String {
    let mut out: Vec<String> = Vec::new();

    let title = statute_title(saados);
    if !title.is_empty() {
        out.push(format!("# {title}"));
    }

    let tables: Vec<String> = find_descendants(saados, "table")
        .map(render_table)
        .filter(|table| !table.is_empty())
        .collect();

    // Johtolause (preamble); the trailing table rides along with each
    // lead-in paragraph.
    for johtolause in find_descendants(saados, "Johtolause") {
        for kappale in find_descendants(johtolause, "SaadosKappaleKooste") {
            let mut text = flatten_text(kappale);
            if let Some(table) = tables.last() {
                text.push_str(table);
            }
            if !text.is_empty() {
                out.push(text);
            }
        }
    }

    // Pykälät (sections)
    for pykala in find_descendants(saados, "Pykala") {
        let number = flatten_first(pykala, "PykalaTunnusKooste");
        let section_title = flatten_first(pykala, "SaadosOtsikkoKooste");
        let head = format!("**{number} {section_title}**");
        if head != "** **" {
            out.push(head);
        }

        for momentti in find_descendants(pykala, "MomenttiKooste") {
            let text = flatten_text(momentti);
            if !text.is_empty() {
                out.push(text);
            }
        }

        for kohdat in find_descendants(pykala, "KohdatMomentti") {
            let lead = flatten_first(kohdat, "MomenttiJohdantoKooste");
            if !lead.is_empty() {
                out.push(lead);
                out.extend(tables.iter().cloned());
            }
            for kohta in find_descendants(kohdat, "MomenttiKohtaKooste") {
                let text = flatten_text(kohta);
                if !text.is_empty() {
                    out.push(format!("- {text}"));
                    out.extend(tables.iter().cloned());
                }
            }
        }
    }

    out.join("\n\n")
}

/// Build the statute title from its optional number, type and name parts.
fn statute_title(saados: Node<'_, '_>) -> String {
    let number = flatten_first(saados, "LakiehdotusNumeroKooste");
    let kind = flatten_first(saados, "SaadostyyppiKooste");
    let name = flatten_first(saados, "SaadosNimekeKooste");

    [number, kind, name]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Flattened text of the first descendant with the given tag, or empty.
fn flatten_first(node: Node<'_, '_>, tag: &str) -> String {
    find_descendants(node, tag)
        .next()
        .map(flatten_text)
        .unwrap_or_default()
}
