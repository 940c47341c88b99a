use thiserror::Error;

/// Errors that can occur while compiling a behavior graph into module source.
///
/// Any of these aborts the whole compilation; the compiler never hands out a
/// partially emitted module.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Node '{node_id}' has an unregistered node type: '{type_name}'")]
    UnknownNodeType { node_id: String, type_name: String },

    #[error(
        "Node '{missing_node_id}' not found, but is referenced by a connection from node '{source_node_id}'"
    )]
    NodeNotFound {
        missing_node_id: String,
        source_node_id: String,
    },

    #[error("Duplicate node id '{node_id}' in graph")]
    DuplicateNodeId { node_id: String },

    #[error("Input port '{port}' of node '{node_id}' has no connection and no literal fallback")]
    MissingRequiredInput { node_id: String, port: String },

    #[error(
        "A connection references port index {port_index} which does not exist on node '{node_id}' (type '{type_name}')"
    )]
    InvalidPortReference {
        node_id: String,
        type_name: String,
        port_index: usize,
    },

    #[error("Definition for node '{node_id}' does not declare a port named '{port}'")]
    UnknownPort { node_id: String, port: String },

    #[error("Cyclic data dependency detected while resolving node '{node_id}'")]
    CyclicDataDependency { node_id: String },

    #[error("Flow cycle detected: node '{node_id}' was reached twice along one flow chain")]
    FlowCycle { node_id: String },

    #[error("Maximum recursion depth ({limit}) exceeded while compiling node '{node_id}'")]
    MaxDepthExceeded { node_id: String, limit: usize },

    #[error("Group node '{node_id}' declares no nested graph")]
    MissingGroupBody { node_id: String },
}

/// Errors that can occur when converting a custom editor format into an engi
/// [`Graph`](crate::graph::Graph).
#[derive(Error, Debug, Clone)]
pub enum GraphConversionError {
    #[error("Invalid graph document: {0}")]
    ValidationError(String),
}
