//! Glue between `roxmltree` and the node model.
//!
//! `roxmltree` resolves namespaces eagerly: `xmlns` declarations are not reported as attributes
//! and prefixed attributes only carry their namespace URI. The helpers here turn an element back
//! into the flat `name -> value` list the source document spelled out.

use roxmltree::{Document, Node, ParsingOptions};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

pub(crate) fn parse_document(text: &str) -> Result<Document<'_>, roxmltree::Error> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(text, options)
}

/// First element in document order whose local name is `name`.
pub(crate) fn find_element<'a, 'input>(
    doc: &'a Document<'input>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    doc.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// DOM-style node name for diagnostics on non-element input.
pub(crate) fn node_name<'input>(node: Node<'_, 'input>) -> &'input str {
    match node.node_type() {
        roxmltree::NodeType::Element => node.tag_name().name(),
        roxmltree::NodeType::Root => "#document",
        roxmltree::NodeType::Text => "#text",
        roxmltree::NodeType::Comment => "#comment",
        roxmltree::NodeType::PI => "#processing-instruction",
    }
}

/// Attributes of `element` in source order, preceded by the namespace declarations it makes.
///
/// With `standalone` set, every namespace in scope is declared (used for the subtree root, whose
/// ancestors are not serialized). Otherwise only bindings that differ from the parent element's
/// are emitted.
pub(crate) fn element_attributes(element: Node<'_, '_>, standalone: bool) -> Vec<(String, String)> {
    let mut out = Vec::new();

    let inherited: Vec<(Option<&str>, &str)> = match element.parent_element() {
        Some(parent) if !standalone => parent.namespaces().map(|ns| (ns.name(), ns.uri())).collect(),
        _ => Vec::new(),
    };
    for ns in element.namespaces() {
        if ns.name() == Some("xml") || inherited.contains(&(ns.name(), ns.uri())) {
            continue;
        }
        let key = match ns.name() {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        out.push((key, ns.uri().to_string()));
    }

    for attr in element.attributes() {
        let prefix = attr.namespace().and_then(|uri| prefix_for(element, uri));
        let name = match prefix {
            Some(prefix) => format!("{prefix}:{}", attr.name()),
            None => attr.name().to_string(),
        };
        out.push((name, attr.value().to_string()));
    }

    out
}

fn prefix_for<'input>(element: Node<'_, 'input>, uri: &str) -> Option<&'input str> {
    if uri == XML_NAMESPACE {
        return Some("xml");
    }
    // The default namespace cannot qualify an attribute, so only named bindings count.
    element
        .namespaces()
        .filter(|ns| ns.uri() == uri)
        .find_map(|ns| ns.name())
}
