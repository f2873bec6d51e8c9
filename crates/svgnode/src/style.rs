//! Inline `style` attribute handling.

use crate::error::{Error, Result};
use indexmap::IndexMap;

/// Parsed `style` attribute: CSS property to value, in declaration order.
pub type StyleMap = IndexMap<String, String>;

/// Splits a raw `style` value on `;`, then each declaration on its first `:`.
///
/// Blank declarations (e.g. the one after a trailing `;`) are skipped. Property names and values
/// are kept verbatim, surrounding whitespace included, so that serialization reproduces them.
pub fn parse_style(raw: &str) -> Result<StyleMap> {
    let mut map = StyleMap::new();
    for segment in raw.split(';') {
        if segment.trim().is_empty() {
            continue;
        }
        let Some((property, value)) = segment.split_once(':') else {
            return Err(Error::MalformedStyle {
                segment: segment.to_string(),
            });
        };
        map.insert(property.to_string(), value.to_string());
    }
    Ok(map)
}

/// Appends `property:value;` for every entry.
pub fn write_style_into(out: &mut String, style: &StyleMap) {
    for (property, value) in style {
        out.push_str(property);
        out.push(':');
        out.push_str(value);
        out.push(';');
    }
}

pub fn style_to_string(style: &StyleMap) -> String {
    let mut out = String::new();
    write_style_into(&mut out, style);
    out
}
