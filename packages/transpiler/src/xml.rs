//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::Node;

use crate::text::collapse_ws;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use vaski_transpiler::xml::get_tag_name;
///
/// let xml = r#"<sis:KappaleKooste xmlns:sis="http://www.vn.fi/skeemat/sisaltokooste/2010/04/27"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "KappaleKooste");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given local tag name.
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all child elements with the given local tag name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all descendant elements with the given local tag name, in document
/// order, excluding the node itself.
pub fn find_descendants<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants()
        .filter(move |d| *d != node && d.is_element() && get_tag_name(*d) == tag)
}

/// Get the direct text content of a node, trimmed.
pub fn get_text(node: Node<'_, '_>) -> String {
    node.text()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Get an attribute value by local name, ignoring any namespace qualifier.
///
/// Vaski attributes are usually namespace-qualified (`sis1:viiteURL`), but
/// the qualifier carries no information once the element itself is resolved.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attributes()
        .find(|a| a.name() == name)
        .map(|a| a.value())
}

/// Get all element children of a node.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Collapse every piece of text in a subtree into one whitespace-normalized
/// string.
///
/// This is the plain-text view of an element: markup is dropped, text
/// fragments are concatenated in document order and whitespace runs collapse
/// to single spaces.
pub fn flatten_text(node: Node<'_, '_>) -> String {
    let mut parts = String::new();
    for descendant in node.descendants() {
        if descendant.is_text() {
            if let Some(text) = descendant.text() {
                parts.push_str(text);
            }
        }
    }
    collapse_ws(&parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_get_tag_name_plain() {
        let doc = Document::parse("<root><child/></root>").unwrap();
        assert_eq!(get_tag_name(doc.root_element()), "root");
    }

    #[test]
    fn test_find_child() {
        let doc = Document::parse("<root><a/><b/></root>").unwrap();
        let root = doc.root_element();

        assert!(find_child(root, "a").is_some());
        assert!(find_child(root, "c").is_none());
    }

    #[test]
    fn test_find_children() {
        let doc = Document::parse("<root><item>1</item><other/><item>2</item></root>").unwrap();
        let items: Vec<_> = find_children(doc.root_element(), "item").collect();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_find_descendants_excludes_self() {
        let doc = Document::parse("<item><a><item>deep</item></a></item>").unwrap();
        let found: Vec<_> = find_descendants(doc.root_element(), "item").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(get_text(found[0]), "deep");
    }

    #[test]
    fn test_find_descendants_document_order() {
        let doc =
            Document::parse("<root><a><x>1</x></a><x>2</x><b><x>3</x></b></root>").unwrap();
        let texts: Vec<String> = find_descendants(doc.root_element(), "x")
            .map(get_text)
            .collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_get_attribute_namespaced() {
        let xml = r#"<e xmlns:sis1="http://www.vn.fi/skeemat/sisaltoelementit/2010/04/27" sis1:viiteURL="https://example.fi"/>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(
            get_attribute(doc.root_element(), "viiteURL"),
            Some("https://example.fi")
        );
    }

    #[test]
    fn test_get_attribute_plain() {
        let doc = Document::parse(r#"<e colname="c1"/>"#).unwrap();
        assert_eq!(get_attribute(doc.root_element(), "colname"), Some("c1"));
        assert_eq!(get_attribute(doc.root_element(), "missing"), None);
    }

    #[test]
    fn test_element_children_skips_text() {
        let doc = Document::parse("<root>text<a/>more<b/></root>").unwrap();
        assert_eq!(element_children(doc.root_element()).count(), 2);
    }

    #[test]
    fn test_flatten_text() {
        let xml = "<p>Lakia\n  sovelletaan <b>1 päivästä</b> tammikuuta.</p>";
        let doc = Document::parse(xml).unwrap();
        assert_eq!(
            flatten_text(doc.root_element()),
            "Lakia sovelletaan 1 päivästä tammikuuta."
        );
    }

    #[test]
    fn test_flatten_text_empty() {
        let doc = Document::parse("<p/>").unwrap();
        assert_eq!(flatten_text(doc.root_element()), "");
    }
}
