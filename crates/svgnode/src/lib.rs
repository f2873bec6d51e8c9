#![forbid(unsafe_code)]

//! `svgnode` keeps a small subset of SVG (`svg`, `g`, `path`, `text`, `tspan`) as an editable
//! tree: open a drawing, shrink its physical size, recolor paths by id and write it back out.
//!
//! XML parsing is delegated to `roxmltree`; this crate only models the element hierarchy, the
//! attribute/style maps and the indented serializer.
//!
//! ```
//! use svgnode::Document;
//!
//! let svg = r#"<svg width="100.00000mm" height="50.00000mm">
//!   <g><path id="north" style="fill:#cccccc;stroke:#000000" d="M 0 0 H 10"/></g>
//! </svg>"#;
//!
//! let mut doc = Document::parse_str(svg, "svg")?;
//! doc.rescale(0.5)?;
//! doc.set_fill_color("north", "#FF0000")?;
//!
//! let out = doc.serialize();
//! assert!(out.contains(r#"width="50.00000mm""#));
//! assert!(out.contains("fill:#ff0000;stroke:#000000;"));
//! # Ok::<(), svgnode::Error>(())
//! ```

pub mod document;
pub mod error;
pub mod node;
pub mod render;
pub mod style;
pub mod tag;

mod xml;

pub use document::{Document, OpenOptions};
pub use error::{Error, Result};
pub use node::{AttrValue, Attributes, Node, NodeKind};
pub use render::RenderOptions;
pub use style::StyleMap;
pub use tag::Tag;
