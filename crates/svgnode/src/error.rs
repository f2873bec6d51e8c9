pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read SVG source: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error("no <{tag}> element found in document")]
    RootNotFound { tag: String },

    #[error("unsupported SVG element <{tag}> (expected one of svg, g, path, text, tspan)")]
    UnknownTag { tag: String },

    #[error("malformed style declaration {segment:?}: expected `property:value`")]
    MalformedStyle { segment: String },

    #[error("cannot rescale: `{name}` attribute is missing")]
    MissingDimension { name: &'static str },

    #[error("cannot rescale: `{name}` attribute {value:?} holds no number")]
    InvalidDimension { name: &'static str, value: String },

    #[error("no <path> with id {id:?}")]
    PathNotFound { id: String },

    #[error("<path id={id:?}> has no style attribute")]
    MissingStyleKey { id: String },
}
