use crate::error::CompileError;
use crate::graph::{Graph, NodeInstance};
use crate::library::NodeLibrary;
use ahash::{AHashMap, AHashSet};

/// One declared, externally editable module field, collected from exposed
/// `setProperty`-class nodes in flow visit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDecl {
    pub name: String,
    pub group: String,
}

/// Pre-indexed view of one graph scope (the top level, or a group body).
///
/// Built once per scope from the immutable graph snapshot; classifies every
/// connection as flow or data by consulting the endpoint definitions, and
/// validates node ids and port indexes up front so the walk itself cannot
/// encounter a dangling reference.
pub(crate) struct ScopeIndex<'g> {
    graph: &'g Graph,
    nodes: AHashMap<&'g str, &'g NodeInstance>,
    /// `(target id, input port index)` -> `(source id, output port index)`.
    /// Data fan-in is 1; a later edge on the same port replaces the earlier.
    data_in: AHashMap<(&'g str, usize), (&'g str, usize)>,
    /// `(source id, output port index)` -> target id. One successor per named
    /// flow output.
    flow_out: AHashMap<(&'g str, usize), &'g str>,
    /// Nodes with an incoming flow edge (everything that is not a chain head).
    flow_in: AHashSet<&'g str>,
}

impl<'g> ScopeIndex<'g> {
    pub(crate) fn build(graph: &'g Graph, library: &NodeLibrary) -> Result<Self, CompileError> {
        let mut nodes: AHashMap<&'g str, &'g NodeInstance> = AHashMap::new();
        for node in &graph.nodes {
            if nodes.insert(node.id.as_str(), node).is_some() {
                return Err(CompileError::DuplicateNodeId {
                    node_id: node.id.clone(),
                });
            }
        }

        let mut data_in = AHashMap::new();
        let mut flow_out = AHashMap::new();
        let mut flow_in = AHashSet::new();

        for conn in &graph.connections {
            let from = nodes
                .get(conn.from.as_str())
                .ok_or_else(|| CompileError::NodeNotFound {
                    missing_node_id: conn.from.clone(),
                    source_node_id: conn.to.clone(),
                })?;
            let to = nodes
                .get(conn.to.as_str())
                .ok_or_else(|| CompileError::NodeNotFound {
                    missing_node_id: conn.to.clone(),
                    source_node_id: conn.from.clone(),
                })?;

            let from_def = library.definition(from)?;
            let to_def = library.definition(to)?;

            if conn.from_port >= from_def.outputs.len() {
                return Err(CompileError::InvalidPortReference {
                    node_id: from.id.clone(),
                    type_name: from_def.type_name.clone(),
                    port_index: conn.from_port,
                });
            }
            if conn.to_port >= to_def.inputs.len() {
                return Err(CompileError::InvalidPortReference {
                    node_id: to.id.clone(),
                    type_name: to_def.type_name.clone(),
                    port_index: conn.to_port,
                });
            }

            let is_flow =
                from_def.is_flow_output(conn.from_port) && to_def.is_flow_input(conn.to_port);
            if is_flow {
                flow_out.insert((from.id.as_str(), conn.from_port), to.id.as_str());
                flow_in.insert(to.id.as_str());
            } else {
                data_in.insert(
                    (to.id.as_str(), conn.to_port),
                    (from.id.as_str(), conn.from_port),
                );
            }
        }

        Ok(Self {
            graph,
            nodes,
            data_in,
            flow_out,
            flow_in,
        })
    }

    pub(crate) fn node(&self, id: &str) -> Option<&'g NodeInstance> {
        self.nodes.get(id).copied()
    }

    /// Nodes in authored order, the iteration order for every deterministic pass.
    pub(crate) fn nodes_in_order(&self) -> impl Iterator<Item = &'g NodeInstance> {
        self.graph.nodes.iter()
    }

    pub(crate) fn data_source(&self, id: &str, input_port: usize) -> Option<(&'g str, usize)> {
        self.data_in.get(&(id, input_port)).copied()
    }

    pub(crate) fn flow_next(&self, id: &str, output_port: usize) -> Option<&'g str> {
        self.flow_out.get(&(id, output_port)).copied()
    }

    pub(crate) fn has_incoming_flow(&self, id: &str) -> bool {
        self.flow_in.contains(id)
    }
}

/// Mutable scratch state for one compilation run. Lives exactly as long as the
/// run; the compiler retains nothing between runs.
pub(crate) struct PassState {
    /// Resolved expression text per `(node id, output port)`, valid within one
    /// top-level flow statement. Cleared between statements so upstream values
    /// re-evaluate per statement, never within one.
    pub(crate) memo: AHashMap<(String, usize), String>,
    /// Data-resolution in-progress set (cycle guard).
    pub(crate) resolving: AHashSet<String>,
    pub(crate) depth: usize,
    pub(crate) max_depth: usize,
    pub(crate) indent_depth: usize,
    pub(crate) indent_unit: String,
    pub(crate) properties: Vec<PropertyDecl>,
    declared: AHashSet<String>,
}

impl PassState {
    pub(crate) fn new(max_depth: usize, indent_unit: String) -> Self {
        Self {
            memo: AHashMap::new(),
            resolving: AHashSet::new(),
            depth: 0,
            max_depth,
            indent_depth: 0,
            indent_unit,
            properties: Vec::new(),
            declared: AHashSet::new(),
        }
    }
}

/// The compilation context handed to every emit rule.
///
/// Wraps the current scope's index, the node library and the run's scratch
/// state; exposes input resolution, indentation and property declaration to
/// node emitters, and the flow/group walks to the compiler itself.
pub struct EmitCtx<'c> {
    pub(crate) scope: &'c ScopeIndex<'c>,
    pub(crate) library: &'c NodeLibrary,
    pub(crate) state: &'c mut PassState,
}

impl<'c> EmitCtx<'c> {
    /// The indent string for the current nesting depth. Multi-line emit bodies
    /// use this to stay aligned with the surrounding block.
    pub fn indent(&self) -> String {
        self.state.indent_unit.repeat(self.state.indent_depth)
    }

    /// Records an exposed module property. Deduplicated by name, first
    /// declaration wins; order follows the flow walk.
    pub fn declare_property(&mut self, name: &str, group: Option<&str>) {
        if self.state.declared.insert(name.to_string()) {
            self.state.properties.push(PropertyDecl {
                name: name.to_string(),
                group: group.unwrap_or("general").to_string(),
            });
        }
    }

    /// Renders the node's own literal, quoted for its declared kind.
    pub fn literal_of(&self, node: &NodeInstance) -> Result<String, CompileError> {
        match &node.value {
            Some(lit) => Ok(lit.render()),
            None => match &node.dropdown_value {
                Some(choice) => Ok(choice.clone()),
                None => Err(CompileError::MissingRequiredInput {
                    node_id: node.id.clone(),
                    port: "value".to_string(),
                }),
            },
        }
    }

    /// Explicit recursion-depth guard, so pathological graphs fail with a
    /// structured error instead of exhausting the native stack.
    pub(crate) fn enter(&mut self, node_id: &str) -> Result<(), CompileError> {
        self.state.depth += 1;
        if self.state.depth > self.state.max_depth {
            return Err(CompileError::MaxDepthExceeded {
                node_id: node_id.to_string(),
                limit: self.state.max_depth,
            });
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.state.depth -= 1;
    }
}
