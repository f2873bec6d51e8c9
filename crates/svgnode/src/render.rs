//! SVG text output.
//!
//! Every element opens on its own line, indented by its hierarchy level, with one attribute per
//! line beneath it. `text` and `tspan` close without indentation and `tspan` emits no newlines at
//! all, so text content stays exactly where the source put it.
//!
//! Indentation is written as tabs and expanded per element, the way a column-aware
//! `expandtabs` would treat each element's markup on its own.

use crate::node::{AttrValue, Node, NodeKind};
use crate::style::style_to_string;
use crate::tag::Tag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Columns per indentation level.
    pub indent_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

impl Node {
    /// Serializes this subtree with the default four-column indentation.
    pub fn render(&self) -> String {
        self.render_with(&RenderOptions::default())
    }

    pub fn render_with(&self, options: &RenderOptions) -> String {
        match self.kind {
            NodeKind::TextRun => escape_text(self.text().unwrap_or_default()),
            NodeKind::Element(tag) => self.render_element(tag, options),
        }
    }

    fn render_element(&self, tag: Tag, options: &RenderOptions) -> String {
        let mut out = String::new();
        push_tabs(&mut out, self.level);
        out.push('<');
        out.push_str(tag.name());
        out.push('\n');
        for (name, value) in &self.attributes {
            push_tabs(&mut out, self.level + 1);
            out.push_str(name);
            out.push_str("=\"");
            match value {
                AttrValue::Plain(v) => escape_attr_into(&mut out, v),
                AttrValue::Style(style) => escape_attr_into(&mut out, &style_to_string(style)),
            }
            out.push_str("\"\n");
        }
        out.truncate(out.trim_end().len());
        out.push('>');
        if tag != Tag::TSpan {
            out.push('\n');
        }

        for child in &self.children {
            out.push_str(&child.render_with(options));
        }

        if !tag.is_inline() {
            push_tabs(&mut out, self.level);
        }
        out.push_str("</");
        out.push_str(tag.name());
        out.push('>');
        if tag != Tag::TSpan {
            out.push('\n');
        }
        expand_tabs(&out, options.indent_width)
    }
}

fn push_tabs(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n('\t', count));
}

/// Replaces tabs with spaces up to the next multiple of `tab_width`, restarting the column count
/// at each line break. A width of zero drops tabs.
pub(crate) fn expand_tabs(text: &str, tab_width: usize) -> String {
    if !text.contains('\t') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + text.len() / 2);
    let mut column = 0usize;
    for ch in text.chars() {
        match ch {
            '\t' => {
                if tab_width > 0 {
                    let pad = tab_width - column % tab_width;
                    out.extend(std::iter::repeat_n(' ', pad));
                    column += pad;
                }
            }
            '\n' | '\r' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}

/// Escapes markup plus `\n`, `\r` and `\t`; a re-parse would otherwise normalize those to spaces.
fn escape_attr_into(out: &mut String, text: &str) {
    escape_into(out, text, |b| match b {
        b'&' => Some("&amp;"),
        b'<' => Some("&lt;"),
        b'"' => Some("&quot;"),
        b'\n' => Some("&#10;"),
        b'\r' => Some("&#13;"),
        b'\t' => Some("&#9;"),
        _ => None,
    });
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(&mut out, text, |b| match b {
        b'&' => Some("&amp;"),
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        b'\r' => Some("&#13;"),
        _ => None,
    });
    out
}

fn escape_into(out: &mut String, text: &str, entity: impl Fn(u8) -> Option<&'static str>) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let Some(esc) = entity(b) else {
            continue;
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}
