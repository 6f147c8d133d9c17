//! XML utility functions for navigating DOM trees and detaching elements.

use roxmltree::{Document, Node};

use crate::types::{ElementKind, ParsedElement};

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use osmclean_shaper::xml::get_tag_name;
///
/// let xml = r#"<osm><node id="1"/></osm>"#;
/// let doc = Document::parse(xml).unwrap();
/// let node = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(node), "node");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with a specific tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}

/// Get all element children of a node (text and comments are skipped).
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Find all child elements with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use osmclean_shaper::xml::find_children;
///
/// let xml = r#"<way><nd ref="1"/><tag k="highway" v="primary"/><nd ref="2"/></way>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let refs: Vec<_> = find_children(doc.root_element(), "nd").collect();
/// assert_eq!(refs.len(), 2);
/// ```
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| has_tag(*child, tag))
}

/// Whether the element is one the shaper turns into a record.
pub fn is_shapeable(node: Node<'_, '_>) -> bool {
    node.is_element() && ElementKind::from_tag_name(get_tag_name(node)).is_some()
}

/// All `node` and `way` elements of a document, in document order.
pub fn shapeable_elements<'a, 'input>(
    doc: &'a Document<'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    doc.descendants().filter(|n| is_shapeable(*n))
}

/// Detach an element and its element descendants from the DOM.
///
/// Attribute order follows the document; namespace prefixes are stripped
/// from tag and attribute names.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use osmclean_shaper::xml::parsed_element;
///
/// let xml = r#"<way id="9"><nd ref="1"/></way>"#;
/// let doc = Document::parse(xml).unwrap();
/// let way = parsed_element(doc.root_element());
///
/// assert_eq!(way.tag_name, "way");
/// assert_eq!(way.attribute("id"), Some("9"));
/// assert_eq!(way.children[0].attribute("ref"), Some("1"));
/// ```
pub fn parsed_element(node: Node<'_, '_>) -> ParsedElement {
    ParsedElement {
        tag_name: get_tag_name(node).to_string(),
        attributes: node
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect(),
        children: element_children(node).map(parsed_element).collect(),
    }
}
