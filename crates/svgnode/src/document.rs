//! Whole-document handle.

use crate::error::{Error, Result};
use crate::node::Node;
use crate::render::RenderOptions;
use crate::xml;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOptions {
    /// Local name of the element the tree is rooted at.
    pub root_tag: String,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            root_tag: "svg".to_string(),
        }
    }
}

impl OpenOptions {
    pub fn with_root_tag(root_tag: impl Into<String>) -> Self {
        Self {
            root_tag: root_tag.into(),
        }
    }
}

/// An SVG document reduced to the `svg`/`g`/`path`/`text`/`tspan` tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Node,
    source: String,
}

impl Document {
    /// Reads and parses the file at `path`, rooting the tree at the first `<root_tag>` element.
    pub fn open(path: impl AsRef<Path>, root_tag: &str) -> Result<Self> {
        Self::open_with(path, &OpenOptions::with_root_tag(root_tag))
    }

    pub fn open_with(path: impl AsRef<Path>, options: &OpenOptions) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, options, path.display().to_string())
    }

    pub fn from_reader(mut reader: impl Read, root_tag: &str) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(
            &text,
            &OpenOptions::with_root_tag(root_tag),
            "<reader>".to_string(),
        )
    }

    pub fn parse_str(text: &str, root_tag: &str) -> Result<Self> {
        Self::parse_str_with(text, &OpenOptions::with_root_tag(root_tag))
    }

    pub fn parse_str_with(text: &str, options: &OpenOptions) -> Result<Self> {
        Self::parse(text, options, "<string>".to_string())
    }

    fn parse(text: &str, options: &OpenOptions, source: String) -> Result<Self> {
        let doc = xml::parse_document(text)?;
        let element =
            xml::find_element(&doc, &options.root_tag).ok_or_else(|| Error::RootNotFound {
                tag: options.root_tag.clone(),
            })?;
        let root = Node::build(element)?;
        tracing::debug!(
            source = %source,
            root_tag = %options.root_tag,
            nodes = root.node_count(),
            "opened SVG document"
        );
        Ok(Self { root, source })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Where the document was read from: a file path, `<string>` or `<reader>`.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Rescales the root element's `width`/`height`. See [`Node::rescale`].
    pub fn rescale(&mut self, factor: f64) -> Result<()> {
        self.root.rescale(factor)
    }

    /// Serializes the tree with the default [`RenderOptions`].
    ///
    /// Attributes keep their source order, except that namespace declarations (`xmlns`,
    /// `xmlns:*`) are written ahead of an element's other attributes.
    pub fn serialize(&self) -> String {
        self.root.render()
    }

    pub fn serialize_with(&self, options: &RenderOptions) -> String {
        self.root.render_with(options)
    }

    pub fn outline(&self) -> String {
        self.root.outline()
    }

    /// Sets `fill` in the style of the `path` found by [`Node::find_path_by_id`].
    ///
    /// The colour is lower-cased. The path must already carry a `style` attribute.
    pub fn set_fill_color(&mut self, id: &str, html_color: &str) -> Result<()> {
        let path = self
            .root
            .find_path_by_id_mut(id)
            .ok_or_else(|| Error::PathNotFound { id: id.to_string() })?;
        let style = path
            .style_mut()
            .ok_or_else(|| Error::MissingStyleKey { id: id.to_string() })?;
        let color = html_color.to_lowercase();
        tracing::debug!(id, fill = %color, "setting path fill");
        style.insert("fill".to_string(), color);
        Ok(())
    }
}

impl std::str::FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str_with(s, &OpenOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="200.00000mm" height="100.00000mm">
  <g id="regions">
    <path id="p1" style="fill:#aaaaaa;stroke:#000000" d="M 0 0 H 10"/>
    <path id="p2" style="stroke:#000000" d="M 0 0 V 10"/>
    <path id="bare" d="M 1 1"/>
  </g>
</svg>
"##;

    #[test]
    fn opens_from_string() {
        let doc = Document::parse_str(MAP, "svg").unwrap();
        assert_eq!(doc.source(), "<string>");
        assert_eq!(doc.root().children().len(), 1);
        assert_eq!(doc.root().children()[0].children().len(), 3);
    }

    #[test]
    fn from_str_trait_defaults_to_svg_root() {
        let doc: Document = MAP.parse().unwrap();
        assert_eq!(doc.root().name(), "svg");
    }

    #[test]
    fn opens_from_reader() {
        let doc = Document::from_reader(MAP.as_bytes(), "svg").unwrap();
        assert_eq!(doc.source(), "<reader>");
    }

    #[test]
    fn root_may_be_nested() {
        let doc = Document::parse_str(MAP, "g").unwrap();
        assert_eq!(doc.root().id(), Some("regions"));
        assert_eq!(doc.root().level(), 1);
    }

    #[test]
    fn missing_root_is_reported() {
        let err = Document::parse_str(MAP, "text").unwrap_err();
        assert!(matches!(err, Error::RootNotFound { ref tag } if tag == "text"));
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        let err = Document::parse_str("<svg><g></svg>", "svg").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Document::open("definitely/not/here.svg", "svg").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn recolor_lowercases_and_replaces_fill() {
        let mut doc = Document::parse_str(MAP, "svg").unwrap();
        doc.set_fill_color("p1", "#FF00FF").unwrap();
        let style = doc.root().find_path_by_id("p1").unwrap().style().unwrap();
        let pairs: Vec<(&str, &str)> = style.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(pairs, [("fill", "#ff00ff"), ("stroke", "#000000")]);
    }

    #[test]
    fn recolor_appends_fill_when_absent() {
        let mut doc = Document::parse_str(MAP, "svg").unwrap();
        doc.set_fill_color("p2", "Red").unwrap();
        let out = doc.serialize();
        assert!(out.contains("style=\"stroke:#000000;fill:red;\""), "{out}");
    }

    #[test]
    fn recolor_unknown_id_fails() {
        let mut doc = Document::parse_str(MAP, "svg").unwrap();
        let err = doc.set_fill_color("nope", "#000").unwrap_err();
        assert!(matches!(err, Error::PathNotFound { ref id } if id == "nope"));
    }

    #[test]
    fn recolor_requires_existing_style() {
        let mut doc = Document::parse_str(MAP, "svg").unwrap();
        let err = doc.set_fill_color("bare", "#000").unwrap_err();
        assert!(matches!(err, Error::MissingStyleKey { ref id } if id == "bare"));
        assert!(doc.root().find_path_by_id("bare").unwrap().style().is_none());
    }

    #[test]
    fn root_mut_edits_are_serialized() {
        let mut doc = Document::parse_str(MAP, "svg").unwrap();
        doc.root_mut()
            .find_path_by_id_mut("p2")
            .unwrap()
            .style_mut()
            .unwrap()
            .insert("stroke-width".to_string(), "2".to_string());
        let out = doc.serialize();
        assert!(out.contains("style=\"stroke:#000000;stroke-width:2;\""), "{out}");
    }

    #[test]
    fn rescale_delegates_to_root() {
        let mut doc = Document::parse_str(MAP, "svg").unwrap();
        doc.rescale(0.5).unwrap();
        assert_eq!(doc.root().attribute("width"), Some("100.00000mm"));
        assert_eq!(doc.root().attribute("height"), Some("50.00000mm"));
    }
}
