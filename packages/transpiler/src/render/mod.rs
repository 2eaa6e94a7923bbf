//! Recursive document rendering: tree in, Markdown out.
//!
//! The walker classifies each element (see [`crate::classify`]), dispatches
//! to the matching renderer and concatenates the resulting blocks. Heading
//! depth is threaded through the recursion and grows only inside
//! sub-chapter containers. An element missing from the classification
//! table aborts the conversion of the current document.

pub mod inline;
pub mod list;
pub mod statute;
pub mod table;

use roxmltree::Node;

use crate::classify::{block_role, BlockRole};
use crate::config::namespace_prefix;
use crate::error::{Result, TranspileError};
use crate::text::{capitalize_first, collapse_ws};
use crate::xml::{element_children, get_attribute, get_tag_name};

use inline::FootnoteKeys;

/// State threaded through one conversion call.
///
/// Nothing outlives the call: footnote keys restart for every document, so
/// batch callers may convert documents on as many threads as they like.
#[derive(Debug, Default)]
pub struct RenderContext {
    footnotes: FootnoteKeys,
}

/// Parse an XML string and convert the whole document to Markdown.
///
/// # Errors
/// Fails on malformed XML and on any element the schema tables do not
/// recognize. No partial output is returned for a failed document.
pub fn transpile(xml: &str) -> Result<String> {
    let doc = roxmltree::Document::parse(xml)?;
    render_document(doc.root_element())
}

/// Convert a parsed document tree to Markdown, starting at heading depth 1.
pub fn render_document(root: Node<'_, '_>) -> Result<String> {
    let mut context = RenderContext::default();
    render_node(root, 1, &mut context)
}

/// Convert only the first subtree with the given local tag name.
///
/// Returns an empty string when the document has no such subtree. This is
/// how callers extract a single named part (PerusteluOsa, PonsiOsa, ...)
/// of a larger document.
pub fn render_part(root: Node<'_, '_>, tag: &str) -> Result<String> {
    let target = root
        .descendants()
        .find(|n| n.is_element() && get_tag_name(*n) == tag);
    match target {
        Some(node) => {
            let mut context = RenderContext::default();
            render_node(node, 1, &mut context)
        }
        None => Ok(String::new()),
    }
}

/// Render one element at the given heading depth.
pub fn render_node(
    node: Node<'_, '_>,
    depth: usize,
    context: &mut RenderContext,
) -> Result<String> {
    let tag = get_tag_name(node);
    let Some(role) = block_role(tag) else {
        return Err(unknown_element(node));
    };

    match role {
        BlockRole::Heading => heading(node, depth),
        BlockRole::Paragraph => inline::render_run(node, &mut context.footnotes),
        BlockRole::QuotedParagraph => {
            let run = inline::render_run(node, &mut context.footnotes)?;
            if run.is_empty() {
                Ok(run)
            } else {
                Ok(format!("> {run}"))
            }
        }
        BlockRole::Image => Ok(image(node)),
        BlockRole::List => list::render_list(node, &mut context.footnotes),
        BlockRole::CompactList => {
            // A compact item reached outside a sibling run forms a list of one.
            let mut citations = Vec::new();
            let item =
                list::render_compact_item(node, 1, &mut context.footnotes, &mut citations)?;
            if item.is_empty() {
                Ok(item)
            } else {
                Ok(format!("{item}\n{}", inline::definition_block(&citations)))
            }
        }
        BlockRole::Table => {
            let rendered = table::render_table(node);
            if rendered.is_empty() {
                Ok(rendered)
            } else {
                Ok(format!("{rendered}\n\n"))
            }
        }
        BlockRole::StatutePart => {
            let statutes = statute::render_statutes(node);
            if statutes.is_empty() {
                Ok(statutes)
            } else {
                Ok(format!("{statutes}\n\n"))
            }
        }
        BlockRole::Container => render_children(node, depth, context),
        BlockRole::Subchapter => render_children(node, depth + 1, context),
        BlockRole::Ignore => Ok(String::new()),
    }
}

/// Render the element children of a container.
///
/// Children are walked with one-element lookahead: consecutive compact list
/// items must form a single visually contiguous list, so the closing blank
/// line and any footnote definitions collected inside the items are
/// emitted only when the next sibling is not another compact item.
fn render_children(
    node: Node<'_, '_>,
    depth: usize,
    context: &mut RenderContext,
) -> Result<String> {
    let children: Vec<Node<'_, '_>> = element_children(node).collect();
    let mut out = String::new();
    let mut compact_index = 0usize;
    let mut compact_emitted = false;
    let mut compact_citations: Vec<inline::Citation> = Vec::new();

    for (i, child) in children.iter().enumerate() {
        let is_compact = block_role(get_tag_name(*child)) == Some(BlockRole::CompactList);
        if is_compact {
            let rendered = list::render_compact_item(
                *child,
                compact_index + 1,
                &mut context.footnotes,
                &mut compact_citations,
            )?;
            if !rendered.is_empty() {
                compact_index += 1;
                compact_emitted = true;
                out.push_str(&rendered);
            }

            let next_is_compact = children
                .get(i + 1)
                .map(|next| block_role(get_tag_name(*next)) == Some(BlockRole::CompactList))
                .unwrap_or(false);
            if !next_is_compact {
                if compact_emitted {
                    out.push('\n');
                    out.push_str(&inline::definition_block(&compact_citations));
                }
                compact_index = 0;
                compact_emitted = false;
                compact_citations.clear();
            }
        } else {
            out.push_str(&render_node(*child, depth, context)?);
        }
    }

    Ok(out)
}

/// Render a heading element at the given depth.
fn heading(node: Node<'_, '_>, depth: usize) -> Result<String> {
    if !(1..=6).contains(&depth) {
        return Err(TranspileError::InvalidHeadingLevel(depth));
    }

    let text = collapse_ws(node.text().unwrap_or_default());
    if text.is_empty() {
        tracing::debug!(tag = get_tag_name(node), "heading without text, skipping");
        return Ok(String::new());
    }

    Ok(format!(
        "{} {}\n\n",
        "#".repeat(depth),
        capitalize_first(&text)
    ))
}

/// Render an image container.
///
/// The URL lives on the first child; a childless image node is a known
/// data-quality gap and renders as nothing.
fn image(node: Node<'_, '_>) -> String {
    let Some(first) = element_children(node).next() else {
        tracing::debug!("image node without children, skipping");
        return String::new();
    };
    let url = get_attribute(first, "kuvaURL").unwrap_or_default();
    format!("![]({url})\n\n")
}

/// Build the error for an element missing from the classification table.
///
/// The tag is spelled with its conventional namespace prefix when the
/// namespace is known, so the report matches the schema documentation.
fn unknown_element(node: Node<'_, '_>) -> TranspileError {
    let tag = get_tag_name(node);
    let tag_name = match node.tag_name().namespace().and_then(namespace_prefix) {
        Some(prefix) => format!("{prefix}:{tag}"),
        None => tag.to_string(),
    };
    let context = node
        .parent_element()
        .map(|parent| format!("<{}>", get_tag_name(parent)));
    TranspileError::UnknownElement { tag_name, context }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_top_level_heading() {
        let result = transpile("<OtsikkoTeksti>example</OtsikkoTeksti>").unwrap();
        assert_eq!(result, "# Example\n\n");
    }

    #[test]
    fn test_heading_without_text_skipped() {
        assert_eq!(transpile("<OtsikkoTeksti/>").unwrap(), "");
        assert_eq!(transpile("<OtsikkoTeksti>  </OtsikkoTeksti>").unwrap(), "");
    }

    #[test]
    fn test_subchapter_deepens_heading() {
        let xml = r#"<PerusteluOsa>
            <OtsikkoTeksti>perustelut</OtsikkoTeksti>
            <PerusteluLuku>
                <OtsikkoTeksti>yleisperustelut</OtsikkoTeksti>
            </PerusteluLuku>
        </PerusteluOsa>"#;
        let result = transpile(xml).unwrap();
        assert_eq!(result, "# Perustelut\n\n## Yleisperustelut\n\n");
    }

    #[test]
    fn test_heading_beyond_valid_range_fails() {
        // Six nested sub-chapters push the heading to depth 7.
        let mut xml = String::new();
        for _ in 0..6 {
            xml.push_str("<PerusteluLuku>");
        }
        xml.push_str("<OtsikkoTeksti>liian syvä</OtsikkoTeksti>");
        for _ in 0..6 {
            xml.push_str("</PerusteluLuku>");
        }

        let err = transpile(&xml).unwrap_err();
        match err {
            TranspileError::InvalidHeadingLevel(level) => assert_eq!(level, 7),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_quoted_paragraph() {
        let result =
            transpile("<SisennettyKappaleKooste>lainaus</SisennettyKappaleKooste>").unwrap();
        assert_eq!(result, "> lainaus\n\n");
    }

    #[test]
    fn test_image_with_url() {
        let result = transpile(r#"<KuvaKooste><Kuva kuvaURL="kuvat/kaavio1.png"/></KuvaKooste>"#)
            .unwrap();
        assert_eq!(result, "![](kuvat/kaavio1.png)\n\n");
    }

    #[test]
    fn test_image_without_children_skipped() {
        assert_eq!(transpile("<KuvaKooste/>").unwrap(), "");
    }

    #[test]
    fn test_ignorable_renders_nothing() {
        let result =
            transpile("<IdentifiointiOsa><Tuntematon>ei lueta</Tuntematon></IdentifiointiOsa>")
                .unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn test_unknown_tag_fails_whole_conversion() {
        let xml = "<SisaltoKuvaus><KappaleKooste>ok</KappaleKooste><Tuntematon/></SisaltoKuvaus>";
        let err = transpile(xml).unwrap_err();
        match err {
            TranspileError::UnknownElement { tag_name, context } => {
                assert_eq!(tag_name, "Tuntematon");
                assert_eq!(context.as_deref(), Some("<SisaltoKuvaus>"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_tag_reported_with_namespace_prefix() {
        let xml = r#"<SisaltoKuvaus xmlns:sis1="http://www.vn.fi/skeemat/sisaltoelementit/2010/04/27"><sis1:UusiTeksti/></SisaltoKuvaus>"#;
        let err = transpile(xml).unwrap_err();
        match err {
            TranspileError::UnknownElement { tag_name, .. } => {
                assert_eq!(tag_name, "sis1:UusiTeksti");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_consecutive_compact_items_form_one_block() {
        let xml = r#"<SisaltoKuvaus>
            <KappaleKooste>alku</KappaleKooste>
            <KohtaKooste listatyyppiKoodi="Viiva">eka</KohtaKooste>
            <KohtaKooste listatyyppiKoodi="Viiva">toka</KohtaKooste>
            <KappaleKooste>loppu</KappaleKooste>
        </SisaltoKuvaus>"#;
        let result = transpile(xml).unwrap();
        assert_eq!(result, "alku\n\n- eka\n- toka\n\nloppu\n\n");
    }

    #[test]
    fn test_compact_items_ordered_numbering_restarts() {
        let xml = r#"<SisaltoKuvaus>
            <KohtaKooste listatyyppiKoodi="NumeroPiste">eka</KohtaKooste>
            <KohtaKooste listatyyppiKoodi="NumeroPiste">toka</KohtaKooste>
            <KappaleKooste>väliin</KappaleKooste>
            <KohtaKooste listatyyppiKoodi="NumeroPiste">uusi lista</KohtaKooste>
        </SisaltoKuvaus>"#;
        let result = transpile(xml).unwrap();
        assert_eq!(
            result,
            "1. eka\n2. toka\n\nväliin\n\n1. uusi lista\n\n"
        );
    }

    #[test]
    fn test_grouped_list_dispatch() {
        let xml = r#"<SisaltoKuvaus><ListaKooste listatyyppiKoodi="Viiva"><ListaKohta>kohta</ListaKohta></ListaKooste></SisaltoKuvaus>"#;
        assert_eq!(transpile(xml).unwrap(), "- kohta\n\n");
    }

    #[test]
    fn test_statute_part_dispatch() {
        let xml = r#"<RakenneAsiakirja><SaadosOsa>
            <Saados><SaadostyyppiKooste>Laki</SaadostyyppiKooste></Saados>
        </SaadosOsa></RakenneAsiakirja>"#;
        assert_eq!(transpile(xml).unwrap(), "# Laki\n\n");
    }

    #[test]
    fn test_render_part_extracts_subtree() {
        let xml = r#"<RakenneAsiakirja>
            <SisaltoKuvaus><KappaleKooste>kuvaus</KappaleKooste></SisaltoKuvaus>
            <PonsiOsa><KappaleKooste>ponsi</KappaleKooste></PonsiOsa>
        </RakenneAsiakirja>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();

        let part = render_part(doc.root_element(), "PonsiOsa").unwrap();
        assert_eq!(part, "ponsi\n\n");

        let missing = render_part(doc.root_element(), "PaatosOsa").unwrap();
        assert_eq!(missing, "");
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let xml = r#"<SisaltoKuvaus>
            <OtsikkoTeksti>otsikko</OtsikkoTeksti>
            <KappaleKooste>teksti<AlaviiteTeksti>viite</AlaviiteTeksti></KappaleKooste>
        </SisaltoKuvaus>"#;
        let first = transpile(xml).unwrap();
        let second = transpile(xml).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_footnote_keys_unique_across_paragraphs() {
        let xml = r#"<SisaltoKuvaus>
            <KappaleKooste>a<AlaviiteTeksti>eka viite</AlaviiteTeksti></KappaleKooste>
            <KappaleKooste>b<AlaviiteTeksti>toka viite</AlaviiteTeksti></KappaleKooste>
        </SisaltoKuvaus>"#;
        let result = transpile(xml).unwrap();
        assert_eq!(
            result,
            "a[^1]\n\n[^1]: eka viite\n\nb[^2]\n\n[^2]: toka viite\n\n"
        );
    }

    #[test]
    fn test_compact_run_footnotes_emitted_after_list() {
        let xml = r#"<SisaltoKuvaus>
            <KohtaKooste listatyyppiKoodi="Viiva">eka<AlaviiteTeksti>viite</AlaviiteTeksti></KohtaKooste>
            <KohtaKooste listatyyppiKoodi="Viiva">toka</KohtaKooste>
            <KappaleKooste>loppu</KappaleKooste>
        </SisaltoKuvaus>"#;
        let result = transpile(xml).unwrap();
        assert_eq!(
            result,
            "- eka[^1]\n- toka\n\n[^1]: viite\n\nloppu\n\n"
        );
    }

    #[test]
    fn test_single_compact_item_footnotes_follow_item() {
        let xml = r#"<SisaltoKuvaus>
            <KohtaKooste listatyyppiKoodi="Viiva">kohta<AlaviiteTeksti>viite</AlaviiteTeksti></KohtaKooste>
        </SisaltoKuvaus>"#;
        let result = transpile(xml).unwrap();
        assert_eq!(result, "- kohta[^1]\n\n[^1]: viite\n\n");
    }
}
