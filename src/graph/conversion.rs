use super::definition::{Graph, Literal};
use crate::error::GraphConversionError;

/// A trait for custom editor data models that can be converted into an engi [`Graph`].
///
/// This is the primary extension point for keeping engi format-agnostic. The
/// visual editor persists graphs however it likes; implementing this trait on
/// its document structs provides the translation layer the compiler consumes.
///
/// # Example
///
/// ```rust,no_run
/// use engi::prelude::*;
/// use engi::error::GraphConversionError;
///
/// struct EditorNode { id: String, kind: String }
/// struct EditorDocument { nodes: Vec<EditorNode> }
///
/// impl IntoGraph for EditorDocument {
///     fn into_graph(self) -> Result<Graph, GraphConversionError> {
///         let nodes = self
///             .nodes
///             .into_iter()
///             .map(|n| NodeInstance::new(n.id, n.kind))
///             .collect();
///         Ok(Graph {
///             nodes,
///             connections: vec![], // convert your edges here as well
///         })
///     }
/// }
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into a compilable behavior graph.
    fn into_graph(self) -> Result<Graph, GraphConversionError>;
}

impl Literal {
    /// Maps a loosely typed editor value onto the literal kind a definition
    /// declares. Numbers arriving as strings (the editor stores every text
    /// field as a string) are parsed; anything unparsable is kept as text.
    pub fn from_json(value: &serde_json::Value) -> Option<Literal> {
        match value {
            serde_json::Value::Number(n) => n.as_f64().map(Literal::Number),
            serde_json::Value::Bool(b) => Some(Literal::Bool(*b)),
            serde_json::Value::String(s) => {
                if let Ok(n) = s.parse::<f64>() {
                    Some(Literal::Number(n))
                } else {
                    Some(Literal::Text(s.clone()))
                }
            }
            _ => None,
        }
    }
}
