use clap::Parser;
use engi::prelude::*;
use engi::error::GraphConversionError;
use serde::Deserialize;
use std::fs;
use std::time::Instant;

// --- JSON Deserialization Structs (Input Format Specific) ---
// These structs match the editor's graph document format and are only used
// here for conversion into the canonical model.

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    name: Option<String>,
    nodes: Vec<RawNode>,
    #[serde(default)]
    connections: Vec<RawConnection>,
}

#[derive(Deserialize)]
struct RawNode {
    id: String,
    #[serde(alias = "type")]
    node_type: String,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
    #[serde(default)]
    value: Option<serde_json::Value>,
    #[serde(default, alias = "dropdownValue")]
    dropdown_value: Option<String>,
    #[serde(default, alias = "exposeProperty")]
    expose_property: bool,
    #[serde(default, alias = "groupName")]
    group_name: Option<String>,
    #[serde(default, alias = "selectedProperty")]
    selected_property: Option<String>,
    #[serde(default)]
    nodes: Option<Vec<RawNode>>,
    #[serde(default, alias = "childConnections")]
    child_connections: Option<Vec<RawConnection>>,
}

#[derive(Deserialize)]
struct RawConnection {
    from: String,
    #[serde(alias = "fromPort")]
    from_port: usize,
    to: String,
    #[serde(alias = "toPort")]
    to_port: usize,
}

// --- Converter Implementation ---

fn convert_node(raw: RawNode) -> NodeInstance {
    let mut node = NodeInstance::new(raw.id, raw.node_type);
    node.x = raw.x;
    node.y = raw.y;
    node.width = raw.width;
    node.height = raw.height;
    node.value = raw.value.as_ref().and_then(Literal::from_json);
    node.dropdown_value = raw.dropdown_value;
    node.expose_property = raw.expose_property;
    node.group_name = raw.group_name;
    node.selected_property = raw.selected_property;
    if let Some(children) = raw.nodes {
        node.children = Some(Graph {
            nodes: children.into_iter().map(convert_node).collect(),
            connections: raw
                .child_connections
                .unwrap_or_default()
                .into_iter()
                .map(convert_connection)
                .collect(),
        });
    }
    node
}

fn convert_connection(raw: RawConnection) -> Connection {
    Connection::new(raw.from, raw.from_port, raw.to, raw.to_port)
}

impl IntoGraph for RawDocument {
    fn into_graph(self) -> std::result::Result<Graph, GraphConversionError> {
        if self.nodes.is_empty() {
            return Err(GraphConversionError::ValidationError(
                "graph document contains no nodes".to_string(),
            ));
        }
        Ok(Graph {
            nodes: self.nodes.into_iter().map(convert_node).collect(),
            connections: self.connections.into_iter().map(convert_connection).collect(),
        })
    }
}

// --- CLI ---

/// Compile a behavior-graph JSON document into module source.
#[derive(Parser)]
#[command(name = "engi-cli", version, about)]
struct Args {
    /// Path to the graph JSON document
    graph: String,

    /// Module name (defaults to the document's name field)
    #[arg(long)]
    name: Option<String>,

    /// Write the compiled module here instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Maximum recursion depth guard
    #[arg(long, default_value_t = 256)]
    max_depth: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let raw_json = fs::read_to_string(&args.graph)?;
    let document: RawDocument = serde_json::from_str(&raw_json)?;
    let module_name = args
        .name
        .clone()
        .or_else(|| document.name.clone())
        .unwrap_or_else(|| "Behavior".to_string());

    let graph = document.into_graph()?;
    let library = NodeLibrary::standard();

    let start = Instant::now();
    let module = Compiler::builder(graph, &library)
        .module_name(&module_name)
        .max_depth(args.max_depth)
        .build()
        .compile()?;
    let elapsed = start.elapsed();

    eprintln!(
        "Compiled module '{}' in {:.2?} ({} exposed propert{})",
        module.name,
        elapsed,
        module.properties.len(),
        if module.properties.len() == 1 { "y" } else { "ies" }
    );
    for prop in &module.properties {
        eprintln!("  - {} (group: {})", prop.name, prop.group);
    }

    match args.output {
        Some(path) => fs::write(path, module.source)?,
        None => print!("{}", module.source),
    }

    Ok(())
}
