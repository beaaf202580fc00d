// ABOUTME: CLI for inspecting and editing BEM structure in HTML documents with bemkit.
// ABOUTME: Reads HTML from a file or stdin and prints JSON summaries or rewritten HTML.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use bemkit::{BemElement, BemNodes, NodesBuilder, Target, Traversal};
use clap::{Args, Parser, Subcommand};
use dom_query::{Document, NodeRef};
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Inspect and edit BEM (block__element--modifier) classes in HTML.
#[derive(Parser, Debug)]
#[command(name = "bemkit")]
#[command(about = "Inspect and edit BEM structure in HTML documents", long_about = None)]
struct Cli {
    /// Output compact JSON instead of pretty.
    #[arg(long, global = true, default_value_t = false)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collect the elements of a block and print counts per element name.
    Inspect(InspectArgs),
    /// Print the BEM identity of every element matching a selector.
    Identify(IdentifyArgs),
    /// Find elements by BEM element name and modifier.
    Find(FindArgs),
    /// Add, remove or toggle a modifier and print the rewritten document.
    Modify(ModifyArgs),
}

#[derive(Args, Debug)]
struct Input {
    /// HTML file path. Use "-" to read from stdin.
    input: String,

    /// Block name overriding the resolved one.
    #[arg(long)]
    block: Option<String>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    input: Input,

    /// CSS selector for the starting element(s).
    #[arg(short, long)]
    selector: Option<String>,

    /// Start from the outermost ancestor carrying the same block.
    #[arg(long, default_value_t = false, conflicts_with = "global")]
    root: bool,

    /// Classify the whole document body against one block.
    #[arg(long, default_value_t = false)]
    global: bool,

    /// Element keys that must be present, comma separated.
    #[arg(long, value_delimiter = ',')]
    require: Vec<String>,
}

#[derive(Args, Debug)]
struct IdentifyArgs {
    #[command(flatten)]
    input: Input,

    /// CSS selector for the elements to identify.
    #[arg(short, long)]
    selector: String,
}

#[derive(Args, Debug)]
struct FindArgs {
    #[command(flatten)]
    input: Input,

    /// CSS selector for the element to search from (first match is used).
    #[arg(short, long)]
    selector: String,

    /// BEM element name to find.
    #[arg(short, long)]
    element: String,

    /// Only elements carrying this modifier.
    #[arg(short, long)]
    modifier: Option<String>,

    /// Search from the block root instead of the selected element.
    #[arg(long, default_value_t = false)]
    root: bool,
}

#[derive(Args, Debug)]
struct ModifyArgs {
    #[command(flatten)]
    input: Input,

    /// CSS selector for the elements to modify.
    #[arg(short, long)]
    selector: String,

    #[arg(long, group = "action")]
    add: Option<String>,

    #[arg(long, group = "action")]
    remove: Option<String>,

    #[arg(long, group = "action")]
    toggle: Option<String>,
}

#[derive(Serialize)]
struct Identified {
    tag: Option<String>,
    identity: Option<bemkit::BemIdentity>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Inspect(args) => inspect(args, cli.compact),
        Command::Identify(args) => identify(args, cli.compact),
        Command::Find(args) => find(args, cli.compact),
        Command::Modify(args) => modify(args),
    }
}

fn inspect(args: InspectArgs, compact: bool) -> Result<()> {
    let doc = load_document(&args.input.input)?;
    let traversal = if args.global {
        Traversal::Global
    } else if args.root {
        Traversal::BlockRoot
    } else {
        Traversal::Element
    };

    let mut builder = NodesBuilder::new()
        .traversal(traversal)
        .must_include(args.require.iter().map(String::as_str));
    if let Some(block) = &args.input.block {
        builder = builder.block_name(block.as_str());
    }

    let target = match &args.selector {
        Some(css) => Target::from(css.as_str()),
        None if traversal == Traversal::Global => Target::None,
        None => bail!("--selector is required unless --global is used"),
    };
    debug!(%traversal, "building node collection");

    let nodes: BemNodes = builder.build(&doc, target)?;
    print_json(&json!({ "traversal": traversal.to_string(), "nodes": nodes.summary() }), compact)
}

fn identify(args: IdentifyArgs, compact: bool) -> Result<()> {
    let doc = load_document(&args.input.input)?;
    let block = args.input.block.as_deref();

    let identified: Vec<Identified> = select(&doc, &args.selector)?
        .into_iter()
        .map(|node| Identified {
            tag: node.node_name().map(|n| n.to_string()),
            identity: BemElement::new(node).identity(block),
        })
        .collect();

    print_json(&identified, compact)
}

fn find(args: FindArgs, compact: bool) -> Result<()> {
    let doc = load_document(&args.input.input)?;
    let start = select(&doc, &args.selector)?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("no element matches selector {}", args.selector))?;

    let found = BemElement::new(start).find(
        &args.element,
        args.modifier.as_deref(),
        args.root,
        args.input.block.as_deref(),
    );

    if let Some(list) = &found {
        debug!(block = ?list.block_name(), count = list.len(), "found elements");
    }
    let html: Option<Vec<String>> =
        found.map(|list| list.nodes().iter().map(|n| n.html().to_string()).collect());
    print_json(&html, compact)
}

fn modify(args: ModifyArgs) -> Result<()> {
    let doc = load_document(&args.input.input)?;
    let block = args.input.block.as_deref();

    let (modifier, force) = match (&args.add, &args.remove, &args.toggle) {
        (Some(m), _, _) => (m, Some(true)),
        (_, Some(m), _) => (m, Some(false)),
        (_, _, Some(m)) => (m, None),
        _ => bail!("one of --add, --remove or --toggle is required"),
    };

    let targets = select(&doc, &args.selector)?;
    debug!(count = targets.len(), modifier = %modifier, "modifying elements");
    for node in targets {
        BemElement::new(node).toggle_modifier(modifier, force, block);
    }

    println!("{}", doc.html());
    Ok(())
}

fn select<'a>(doc: &'a Document, css: &str) -> Result<Vec<NodeRef<'a>>> {
    let matcher = bemkit::selector::get_or_compile(css)
        .ok_or_else(|| anyhow!("invalid selector: {}", css))?;
    Ok(doc.select_matcher(&matcher).nodes().to_vec())
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    if compact {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

fn load_document(input: &str) -> Result<Document> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(Document::from(buf.as_str()));
    }

    let path = PathBuf::from(input);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", input));
    }
    let html = fs::read_to_string(&path).with_context(|| format!("reading {}", input))?;
    Ok(Document::from(html.as_str()))
}
