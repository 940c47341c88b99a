//! Flow sequencing: walking control-flow edges from an entry and emitting one
//! statement per flow node, in edge order.
//!
//! Branch nodes supply only their header text; the sequencer owns the braces,
//! indentation and the recursively compiled branch bodies. Group nodes recurse
//! into their nested graph at one deeper indent level.

use super::context::{EmitCtx, ScopeIndex};
use crate::error::CompileError;
use crate::graph::NodeInstance;
use crate::library::{FLOW_PORT, NodeDefinition};
use ahash::AHashSet;

impl<'c> EmitCtx<'c> {
    /// Compiles the chain reachable from an entry node's `flow` output. The
    /// entry itself produces no statement; it names the lifecycle hook.
    pub(crate) fn compile_entry_body(
        &mut self,
        entry: &NodeInstance,
    ) -> Result<Vec<String>, CompileError> {
        let def = self.library.definition(entry)?;
        let Some(flow_idx) = def.output_index(FLOW_PORT) else {
            return Ok(Vec::new());
        };
        match self.scope.flow_next(&entry.id, flow_idx) {
            Some(next) => {
                let mut path = AHashSet::new();
                path.insert(entry.id.clone());
                self.compile_chain(next, &mut path)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Compiles every chain of the current scope whose head has no incoming
    /// flow edge. Used for group bodies, which own their own entry points.
    pub(crate) fn compile_scope_lines(&mut self) -> Result<Vec<String>, CompileError> {
        let heads: Vec<&NodeInstance> = self.scope.nodes_in_order().collect();
        let mut lines = Vec::new();
        for head in heads {
            let def = self.library.definition(head)?;
            if def.has_flow_input() && !self.scope.has_incoming_flow(&head.id) {
                let mut path = AHashSet::new();
                lines.extend(self.compile_chain(&head.id, &mut path)?);
            }
        }
        Ok(lines)
    }

    /// Emits `start` and every node after it along `flow` edges, one fully
    /// indented statement (or block) per node. `path` carries the node ids
    /// already on this flow path; revisiting one is a cycle.
    fn compile_chain(
        &mut self,
        start: &str,
        path: &mut AHashSet<String>,
    ) -> Result<Vec<String>, CompileError> {
        let mut lines = Vec::new();
        let mut current = Some(start.to_string());

        while let Some(id) = current {
            if !path.insert(id.clone()) {
                return Err(CompileError::FlowCycle { node_id: id });
            }
            let node = self
                .scope
                .node(&id)
                .ok_or_else(|| CompileError::NodeNotFound {
                    missing_node_id: id.clone(),
                    source_node_id: id.clone(),
                })?;
            let def = self.library.definition(node)?;

            // Memoization boundary: upstream values resolve fresh per statement.
            self.state.memo.clear();
            lines.push(self.emit_statement(node, def, path)?);

            current = def
                .output_index(FLOW_PORT)
                .and_then(|idx| self.scope.flow_next(&id, idx))
                .map(str::to_string);
        }
        Ok(lines)
    }

    fn emit_statement(
        &mut self,
        node: &NodeInstance,
        def: &NodeDefinition,
        path: &mut AHashSet<String>,
    ) -> Result<String, CompileError> {
        self.enter(&node.id)?;
        let result = if def.is_group {
            self.emit_group_region(node)
        } else if def.branches.is_empty() || !def.wrap_flow_node {
            // Plain statement, or a wrapFlowNode=false control emitted inline.
            def.emit(node, self).map(|text| format!("{}{}", self.indent(), text))
        } else {
            self.emit_branch_block(node, def, path)
        };
        self.leave();
        result
    }

    /// `header {` … `} keyword {` … `}` for a branch node; bodies come from
    /// the chains reachable from each declared branch output. An unconnected
    /// first branch is an empty body; unconnected follow-up branches (an `if`
    /// without `else`) are omitted.
    fn emit_branch_block(
        &mut self,
        node: &NodeInstance,
        def: &NodeDefinition,
        path: &mut AHashSet<String>,
    ) -> Result<String, CompileError> {
        let header = def.emit(node, self)?;
        let indent = self.indent();
        let mut text = String::new();

        for (i, branch) in def.branches.iter().enumerate() {
            let out_idx =
                def.output_index(&branch.port)
                    .ok_or_else(|| CompileError::UnknownPort {
                        node_id: node.id.clone(),
                        port: branch.port.clone(),
                    })?;
            let next = self.scope.flow_next(&node.id, out_idx).map(str::to_string);

            if i == 0 {
                text.push_str(&format!("{}{} {{", indent, header));
            } else {
                if next.is_none() {
                    continue;
                }
                let keyword = branch.keyword.as_deref().unwrap_or(&branch.port);
                text.push_str(&format!("\n{}}} {} {{", indent, keyword));
            }

            if let Some(next) = next {
                self.state.indent_depth += 1;
                let body = self.compile_chain(&next, path);
                self.state.indent_depth -= 1;
                for line in body? {
                    text.push('\n');
                    text.push_str(&line);
                }
            }
        }
        text.push_str(&format!("\n{}}}", indent));
        Ok(text)
    }

    /// An organizational group inlined in a flow chain becomes a labeled block
    /// at one deeper indent level, with no independent runtime meaning.
    fn emit_group_region(&mut self, node: &NodeInstance) -> Result<String, CompileError> {
        let label = node
            .value
            .as_ref()
            .map(|v| v.raw())
            .or_else(|| node.group_name.clone())
            .unwrap_or_else(|| "group".to_string());
        let indent = self.indent();
        let body = self.compile_group_body(node)?;
        if body.is_empty() {
            Ok(format!("{}{{ // {}\n{}}}", indent, label, indent))
        } else {
            Ok(format!("{}{{ // {}\n{}\n{}}}", indent, label, body, indent))
        }
    }

    /// Compiles a group node's nested graph as an independent scope at indent
    /// depth +1 and returns the joined statement text.
    pub fn compile_group_body(&mut self, group: &NodeInstance) -> Result<String, CompileError> {
        let graph = group
            .children
            .as_ref()
            .ok_or_else(|| CompileError::MissingGroupBody {
                node_id: group.id.clone(),
            })?;
        let child = ScopeIndex::build(graph, self.library)?;

        self.state.indent_depth += 1;
        self.state.memo.clear();
        let mut ctx = EmitCtx {
            scope: &child,
            library: self.library,
            state: &mut *self.state,
        };
        let result = ctx.compile_scope_lines();
        self.state.indent_depth -= 1;
        self.state.memo.clear();

        Ok(result?.join("\n"))
    }
}
