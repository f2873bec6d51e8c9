//! The fixed element hierarchy.
//!
//! Only five SVG elements are modelled. Their order doubles as the indentation depth used by the
//! serializer, so `svg` renders at column 0, `g` one level in, and so on down to `tspan`. Text
//! runs sit one level below `tspan`.

use crate::error::{Error, Result};

/// Name used for text runs, matching the DOM `nodeName` of a text node.
pub const TEXT_RUN_NAME: &str = "#text";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Svg,
    Group,
    Path,
    Text,
    TSpan,
}

impl Tag {
    /// Hierarchy order, outermost first.
    pub const HIERARCHY: [Tag; 5] = [Tag::Svg, Tag::Group, Tag::Path, Tag::Text, Tag::TSpan];

    /// Depth of a text run (one below `tspan`).
    pub const TEXT_RUN_LEVEL: usize = Tag::TSpan.level() + 1;

    pub const fn level(self) -> usize {
        match self {
            Tag::Svg => 0,
            Tag::Group => 1,
            Tag::Path => 2,
            Tag::Text => 3,
            Tag::TSpan => 4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Tag::Svg => "svg",
            Tag::Group => "g",
            Tag::Path => "path",
            Tag::Text => "text",
            Tag::TSpan => "tspan",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::HIERARCHY.into_iter().find(|t| t.name() == name)
    }

    /// Like [`Tag::from_name`], but an unknown element is an error.
    pub fn classify(name: &str) -> Result<Self> {
        Self::from_name(name).ok_or_else(|| Error::UnknownTag {
            tag: name.to_string(),
        })
    }

    /// `text` and `tspan` close without indentation so that their content stays inline.
    pub const fn is_inline(self) -> bool {
        matches!(self, Tag::Text | Tag::TSpan)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Tag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::classify(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_follow_hierarchy_order() {
        for (i, tag) in Tag::HIERARCHY.into_iter().enumerate() {
            assert_eq!(tag.level(), i, "{tag}");
        }
        assert_eq!(Tag::TEXT_RUN_LEVEL, 5);
    }

    #[test]
    fn names_round_trip() {
        for tag in Tag::HIERARCHY {
            assert_eq!(Tag::from_name(tag.name()), Some(tag));
        }
        assert_eq!("g".parse::<Tag>().unwrap(), Tag::Group);
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(Tag::from_name("rect"), None);
        assert_eq!(Tag::from_name("SVG"), None);
        let err = Tag::classify("circle").unwrap_err();
        assert!(matches!(err, Error::UnknownTag { ref tag } if tag == "circle"));
    }
}
