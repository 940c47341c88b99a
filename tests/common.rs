//! Common test utilities for building behavior graphs.
use engi::error::CompileError;
use engi::prelude::*;

#[allow(dead_code)]
pub fn node(id: &str, node_type: &str) -> NodeInstance {
    NodeInstance::new(id, node_type)
}

#[allow(dead_code)]
pub fn number(id: &str, value: f64) -> NodeInstance {
    NodeInstance::new(id, "number").with_value(Literal::Number(value))
}

#[allow(dead_code)]
pub fn text(id: &str, value: &str) -> NodeInstance {
    NodeInstance::new(id, "text").with_value(Literal::Text(value.to_string()))
}

#[allow(dead_code)]
pub fn c(from: &str, from_port: usize, to: &str, to_port: usize) -> Connection {
    Connection::new(from, from_port, to, to_port)
}

/// Compiles a graph against the standard catalogue with default settings.
#[allow(dead_code)]
pub fn compile(graph: Graph) -> Result<CompiledModule, CompileError> {
    let library = NodeLibrary::standard();
    Compiler::builder(graph, &library).build().compile()
}

/// A minimal update-driven graph: `onUpdate -> setProperty(score = 5 + 3)`,
/// with the property exposed under the `stats` group.
#[allow(dead_code)]
pub fn score_graph() -> Graph {
    Graph {
        nodes: vec![
            node("tick", "onUpdate"),
            number("five", 5.0),
            number("three", 3.0),
            node("sum", "add"),
            node("store", "setProperty")
                .with_value(Literal::Text("score".to_string()))
                .exposed(Some("stats")),
        ],
        connections: vec![
            c("five", 0, "sum", 0),
            c("three", 0, "sum", 1),
            c("sum", 0, "store", 2),
            c("tick", 0, "store", 0),
        ],
    }
}
