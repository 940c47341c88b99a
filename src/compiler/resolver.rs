//! Port resolution: turning a node's data input into emittable expression text.
//!
//! Resolution is pull-based and recursive: a value node is not materialized
//! until a downstream statement reads it. Within one top-level flow statement
//! repeated reads of the same output are served from the memo; the sequencer
//! clears the memo between statements.

use super::context::EmitCtx;
use crate::error::CompileError;
use crate::graph::NodeInstance;
use crate::library::NodeDefinition;

impl<'c> EmitCtx<'c> {
    /// Resolves a data input port to expression text.
    ///
    /// Follows the incoming data edge if one exists, otherwise falls back to
    /// the node's own literal (quoted per its kind). An input with neither is
    /// a [`CompileError::MissingRequiredInput`].
    pub fn input(&mut self, node: &NodeInstance, port: &str) -> Result<String, CompileError> {
        self.resolve(node, port, true)
    }

    /// Like [`EmitCtx::input`], but an unconnected port yields the raw,
    /// unquoted literal. Used for ports that conceptually bind a name (e.g. a
    /// property identifier) rather than a value.
    pub fn raw_input(&mut self, node: &NodeInstance, port: &str) -> Result<String, CompileError> {
        self.resolve(node, port, false)
    }

    fn resolve(
        &mut self,
        node: &NodeInstance,
        port: &str,
        literal_text: bool,
    ) -> Result<String, CompileError> {
        let def = self.library.definition(node)?;
        let port_idx = def
            .input_index(port)
            .ok_or_else(|| CompileError::UnknownPort {
                node_id: node.id.clone(),
                port: port.to_string(),
            })?;

        match self.scope.data_source(&node.id, port_idx) {
            Some((src_id, src_port)) => self.resolve_source(src_id, src_port),
            None => match (&node.value, &node.dropdown_value) {
                (Some(lit), _) => Ok(if literal_text { lit.render() } else { lit.raw() }),
                (None, Some(choice)) => Ok(choice.clone()),
                (None, None) => Err(CompileError::MissingRequiredInput {
                    node_id: node.id.clone(),
                    port: port.to_string(),
                }),
            },
        }
    }

    fn resolve_source(&mut self, src_id: &str, src_port: usize) -> Result<String, CompileError> {
        if let Some(cached) = self.state.memo.get(&(src_id.to_string(), src_port)) {
            return Ok(cached.clone());
        }

        // Endpoints were validated when the scope index was built.
        let src = self
            .scope
            .node(src_id)
            .ok_or_else(|| CompileError::NodeNotFound {
                missing_node_id: src_id.to_string(),
                source_node_id: src_id.to_string(),
            })?;
        let src_def = self.library.definition(src)?;

        // Re-entering a node already being resolved means the data subgraph
        // has a cycle.
        if !self.state.resolving.insert(src_id.to_string()) {
            return Err(CompileError::CyclicDataDependency {
                node_id: src_id.to_string(),
            });
        }
        self.enter(src_id)?;
        let result = self.emit_source(src, src_def, src_port);
        self.leave();
        self.state.resolving.remove(src_id);

        let expr = result?;
        self.state
            .memo
            .insert((src_id.to_string(), src_port), expr.clone());
        Ok(expr)
    }

    fn emit_source(
        &mut self,
        src: &NodeInstance,
        src_def: &NodeDefinition,
        src_port: usize,
    ) -> Result<String, CompileError> {
        let out_name = src_def.outputs.get(src_port).cloned().ok_or_else(|| {
            CompileError::InvalidPortReference {
                node_id: src.id.clone(),
                type_name: src_def.type_name.clone(),
                port_index: src_port,
            }
        })?;

        if src_def.direct_output {
            // Already a complete expression, inlined verbatim.
            return src_def.emit(src, self);
        }

        if let Some(access) = src_def.multi_output_access
            && src_def.outputs.len() > 1
        {
            let composite = src_def.emit(src, self)?;
            return Ok(access(&composite, &out_name));
        }

        src_def.emit(src, self)
    }
}
