//! The SVG node tree.
//!
//! A [`Node`] is either an element from the fixed [`Tag`] hierarchy or a text run. Nodes own their
//! children by value; the tree has no parent links. The shape of the tree is fixed once built:
//! later operations only rewrite attribute values.

use crate::error::{Error, Result};
use crate::style::{StyleMap, parse_style};
use crate::tag::{TEXT_RUN_NAME, Tag};
use crate::xml;
use indexmap::IndexMap;
use regex::Regex;
use std::fmt::Write as _;
use std::sync::OnceLock;

/// Reserved attribute holding the parsed style map.
pub const STYLE_ATTR: &str = "style";
/// Attribute under which text runs keep their character data.
pub const TEXT_ATTR: &str = "text";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Plain(String),
    Style(StyleMap),
}

impl AttrValue {
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            AttrValue::Plain(v) => Some(v.as_str()),
            AttrValue::Style(_) => None,
        }
    }

    pub fn as_style(&self) -> Option<&StyleMap> {
        match self {
            AttrValue::Style(s) => Some(s),
            AttrValue::Plain(_) => None,
        }
    }

    pub fn as_style_mut(&mut self) -> Option<&mut StyleMap> {
        match self {
            AttrValue::Style(s) => Some(s),
            AttrValue::Plain(_) => None,
        }
    }
}

pub type Attributes = IndexMap<String, AttrValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Element(Tag),
    TextRun,
}

impl NodeKind {
    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::Element(tag) => tag.name(),
            NodeKind::TextRun => TEXT_RUN_NAME,
        }
    }

    pub const fn level(self) -> usize {
        match self {
            NodeKind::Element(tag) => tag.level(),
            NodeKind::TextRun => Tag::TEXT_RUN_LEVEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) level: usize,
    pub(crate) attributes: Attributes,
    pub(crate) children: Vec<Node>,
}

impl Node {
    /// Builds the subtree rooted at `xml`, which must be an element or a text node.
    ///
    /// Elements outside the hierarchy fail with [`Error::UnknownTag`]; a `style` attribute that
    /// is not `property:value` delimited fails with [`Error::MalformedStyle`]. Text nodes are
    /// kept only directly under `tspan`.
    pub fn build(xml: roxmltree::Node<'_, '_>) -> Result<Self> {
        Self::build_inner(xml, true)
    }

    fn build_inner(xml: roxmltree::Node<'_, '_>, standalone: bool) -> Result<Self> {
        if xml.is_text() {
            return Ok(Self::text_run(xml.text().unwrap_or_default()));
        }
        if !xml.is_element() {
            return Err(Error::UnknownTag {
                tag: xml::node_name(xml).to_string(),
            });
        }

        let tag = Tag::classify(xml.tag_name().name())?;
        let mut attributes = Attributes::new();
        for (name, value) in xml::element_attributes(xml, standalone) {
            let value = if name == STYLE_ATTR {
                AttrValue::Style(parse_style(&value)?)
            } else {
                AttrValue::Plain(value)
            };
            attributes.insert(name, value);
        }

        let mut children = Vec::new();
        for child in xml.children() {
            if child.is_element() {
                children.push(Self::build_inner(child, false)?);
            } else if child.is_text() {
                if tag == Tag::TSpan {
                    children.push(Self::build_inner(child, false)?);
                } else {
                    tracing::trace!(parent = %tag, "discarding text outside <tspan>");
                }
            }
        }

        let kind = NodeKind::Element(tag);
        Ok(Self {
            kind,
            level: kind.level(),
            attributes,
            children,
        })
    }

    fn text_run(text: &str) -> Self {
        let mut attributes = Attributes::new();
        attributes.insert(TEXT_ATTR.to_string(), AttrValue::Plain(text.to_string()));
        Self {
            kind: NodeKind::TextRun,
            level: NodeKind::TextRun.level(),
            attributes,
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Element tag, or `None` for text runs.
    pub fn tag(&self) -> Option<Tag> {
        match self.kind {
            NodeKind::Element(tag) => Some(tag),
            NodeKind::TextRun => None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Plain attribute value; `None` when absent or when `name` is the style map.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(AttrValue::as_plain)
    }

    pub fn id(&self) -> Option<&str> {
        match self.kind {
            NodeKind::Element(_) => self.attribute("id"),
            NodeKind::TextRun => None,
        }
    }

    /// Character data of a text run.
    pub fn text(&self) -> Option<&str> {
        match self.kind {
            NodeKind::TextRun => self.attribute(TEXT_ATTR),
            NodeKind::Element(_) => None,
        }
    }

    pub fn style(&self) -> Option<&StyleMap> {
        self.attributes.get(STYLE_ATTR).and_then(AttrValue::as_style)
    }

    pub fn style_mut(&mut self) -> Option<&mut StyleMap> {
        self.attributes
            .get_mut(STYLE_ATTR)
            .and_then(AttrValue::as_style_mut)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Scales `width` and `height` by `factor`, rewriting both as `<value>mm` with five decimals.
    ///
    /// Only this node changes; children are not visited. A factor outside `[0, 1]` is logged and
    /// applied anyway. Both attributes are validated before either is written.
    pub fn rescale(&mut self, factor: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&factor) {
            tracing::warn!(factor, "rescale factor is outside [0, 1]; applying it anyway");
        }
        let width = self.scaled_dimension("width", factor)?;
        let height = self.scaled_dimension("height", factor)?;
        self.attributes
            .insert("width".to_string(), AttrValue::Plain(width));
        self.attributes
            .insert("height".to_string(), AttrValue::Plain(height));
        Ok(())
    }

    fn scaled_dimension(&self, name: &'static str, factor: f64) -> Result<String> {
        let raw = self
            .attribute(name)
            .ok_or(Error::MissingDimension { name })?;
        let value = leading_number(raw).ok_or_else(|| Error::InvalidDimension {
            name,
            value: raw.to_string(),
        })?;
        Ok(format!("{:.5}mm", value * factor))
    }

    /// Looks for a `path` child with the given `id`.
    ///
    /// Only direct children are compared. When none matches, the search continues in the first
    /// child alone, so matches below later siblings are never reached.
    pub fn find_path_by_id(&self, id: &str) -> Option<&Node> {
        match self.children.iter().find(|c| c.is_path_with_id(id)) {
            Some(found) => Some(found),
            None => self.children.first()?.find_path_by_id(id),
        }
    }

    /// Mutable counterpart of [`Node::find_path_by_id`], with the same traversal.
    pub fn find_path_by_id_mut(&mut self, id: &str) -> Option<&mut Node> {
        match self.children.iter().position(|c| c.is_path_with_id(id)) {
            Some(i) => self.children.get_mut(i),
            None => self.children.first_mut()?.find_path_by_id_mut(id),
        }
    }

    fn is_path_with_id(&self, id: &str) -> bool {
        self.tag() == Some(Tag::Path) && self.id() == Some(id)
    }

    /// One line per node, depth first: `"{name} -> {id or text} \n"`.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.outline_into(&mut out);
        out
    }

    fn outline_into(&self, out: &mut String) {
        let label = self.id().or_else(|| self.text()).unwrap_or_default();
        let _ = writeln!(out, "{} -> {} ", self.name(), label);
        for child in &self.children {
            child.outline_into(out);
        }
    }
}

/// First decimal number in `raw` (`"210.5mm"` -> `210.5`).
fn leading_number(raw: &str) -> Option<f64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").expect("dimension regex must compile"));
    re.find(raw)?.as_str().parse().ok()
}
