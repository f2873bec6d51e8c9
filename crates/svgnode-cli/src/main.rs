use serde::Serialize;
use std::io::Read;
use svgnode::{Document, Node, OpenOptions, RenderOptions};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Svg(svgnode::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Svg(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<svgnode::Error> for CliError {
    fn from(value: svgnode::Error) -> Self {
        Self::Svg(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Command {
    #[default]
    Render,
    Rescale,
    Recolor,
    Outline,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    root_tag: Option<String>,
    factor: Option<f64>,
    fills: Vec<(String, String)>,
    indent: Option<usize>,
    json: bool,
    out: Option<String>,
}

#[derive(Serialize)]
struct OutlineNode<'a> {
    tag: &'static str,
    level: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<OutlineNode<'a>>,
}

impl<'a> OutlineNode<'a> {
    fn from_node(node: &'a Node) -> Self {
        Self {
            tag: node.name(),
            level: node.level(),
            id: node.id(),
            text: node.text(),
            children: node.children().iter().map(OutlineNode::from_node).collect(),
        }
    }
}

fn usage() -> &'static str {
    "svgnode-cli\n\
\n\
USAGE:\n\
  svgnode-cli [render] [--root <tag>] [--indent <n>] [--out <path>] [<path>|-]\n\
  svgnode-cli rescale --factor <f> [--root <tag>] [--indent <n>] [--out <path>] [<path>|-]\n\
  svgnode-cli recolor --fill <id>=<color> [--fill <id>=<color> ...] [--root <tag>] [--indent <n>] [--out <path>] [<path>|-]\n\
  svgnode-cli outline [--json] [--root <tag>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - --root selects the element the tree is rooted at (default: svg).\n\
  - rescale multiplies the root width/height (in mm) by <f>; factors outside [0, 1] only warn.\n\
  - recolor looks paths up among the root's children, then the first child's, and so on.\n\
  - Set RUST_LOG (e.g. RUST_LOG=svgnode=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "rescale" => args.command = Command::Rescale,
            "recolor" => args.command = Command::Recolor,
            "outline" => args.command = Command::Outline,
            "--json" => args.json = true,
            "--root" => {
                let Some(tag) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.root_tag = Some(tag.clone());
            }
            "--factor" => {
                let Some(factor) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.factor = Some(factor.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--fill" => {
                let Some(pair) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let Some((id, color)) = pair.split_once('=') else {
                    return Err(CliError::Usage(usage()));
                };
                if id.is_empty() || color.is_empty() {
                    return Err(CliError::Usage(usage()));
                }
                args.fills.push((id.to_string(), color.to_string()));
            }
            "--indent" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.indent = Some(n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    match args.command {
        Command::Rescale if args.factor.is_none() => return Err(CliError::Usage(usage())),
        Command::Recolor if args.fills.is_empty() => return Err(CliError::Usage(usage())),
        _ => {}
    }
    if args.json && args.command != Command::Outline {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn read_document(input: Option<&str>, options: &OpenOptions) -> Result<Document, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(Document::parse_str_with(&buf, options)?)
        }
        Some(path) => Ok(Document::open_with(path, options)?),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let open = args
        .root_tag
        .clone()
        .map(OpenOptions::with_root_tag)
        .unwrap_or_default();
    let mut doc = read_document(args.input.as_deref(), &open)?;
    tracing::debug!(command = ?args.command, source = doc.source(), "document loaded");

    if args.command == Command::Outline {
        let text = if args.json {
            let mut json = serde_json::to_string_pretty(&OutlineNode::from_node(doc.root()))?;
            json.push('\n');
            json
        } else {
            doc.outline()
        };
        return write_text(&text, args.out.as_deref());
    }

    if let Some(factor) = args.factor {
        doc.rescale(factor)?;
    }
    for (id, color) in &args.fills {
        doc.set_fill_color(id, color)?;
    }

    let mut render = RenderOptions::default();
    if let Some(indent) = args.indent {
        render.indent_width = indent;
    }
    write_text(&doc.serialize_with(&render), args.out.as_deref())
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::Svg(svgnode::Error::PathNotFound { .. })) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
