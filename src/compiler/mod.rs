//! The graph-to-code compiler: a pure, synchronous walk over an immutable
//! graph snapshot that produces one behavior-module text artifact.

mod assembler;
mod context;
mod resolver;
mod sequencer;

pub use context::{EmitCtx, PropertyDecl};

use assembler::{Hook, assemble_module, sanitize_identifier};
use context::{PassState, ScopeIndex};

use crate::error::CompileError;
use crate::graph::Graph;
use crate::library::{EntryKind, NodeLibrary};

const DEFAULT_MAX_DEPTH: usize = 256;

/// The only output of a compilation run: the module text plus the fields it
/// declares, so hosts can inspect them without re-parsing the source.
#[derive(Debug, Clone)]
pub struct CompiledModule {
    pub name: String,
    pub properties: Vec<PropertyDecl>,
    pub source: String,
}

/// Compiles one behavior graph against a node library.
///
/// Stateless between runs: each [`Compiler::compile`] call owns its own
/// scratch state, so independent compilers (and repeated compiles of the same
/// graph) need no coordination and produce byte-identical output.
pub struct Compiler<'l> {
    graph: Graph,
    library: &'l NodeLibrary,
    module_name: String,
    max_depth: usize,
    indent_unit: String,
}

pub struct CompilerBuilder<'l> {
    graph: Graph,
    library: &'l NodeLibrary,
    module_name: String,
    max_depth: usize,
    indent_unit: String,
}

impl<'l> CompilerBuilder<'l> {
    pub fn new(graph: Graph, library: &'l NodeLibrary) -> Self {
        Self {
            graph,
            library,
            module_name: "Behavior".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            indent_unit: "  ".to_string(),
        }
    }

    pub fn module_name(mut self, name: &str) -> Self {
        self.module_name = name.to_string();
        self
    }

    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    pub fn indent_unit(mut self, unit: &str) -> Self {
        self.indent_unit = unit.to_string();
        self
    }

    pub fn build(self) -> Compiler<'l> {
        Compiler {
            graph: self.graph,
            library: self.library,
            module_name: self.module_name,
            max_depth: self.max_depth,
            indent_unit: self.indent_unit,
        }
    }
}

/// Rejects structural errors up front, connected or not: unknown node types,
/// and duplicate ids, dangling endpoints or stale port indexes inside nested
/// group graphs that no flow chain reaches.
fn validate_graph(graph: &Graph, library: &NodeLibrary) -> Result<(), CompileError> {
    for node in &graph.nodes {
        library.definition(node)?;
        if let Some(children) = &node.children {
            ScopeIndex::build(children, library)?;
            validate_graph(children, library)?;
        }
    }
    Ok(())
}

impl<'l> Compiler<'l> {
    pub fn builder(graph: Graph, library: &'l NodeLibrary) -> CompilerBuilder<'l> {
        CompilerBuilder::new(graph, library)
    }

    /// Compiles the graph into one behavior module, or aborts with the first
    /// structured error. No partial output is ever produced.
    pub fn compile(&self) -> Result<CompiledModule, CompileError> {
        validate_graph(&self.graph, self.library)?;

        let scope = ScopeIndex::build(&self.graph, self.library)?;
        let mut state = PassState::new(self.max_depth, self.indent_unit.clone());
        let mut hooks: Vec<Hook> = Vec::new();

        {
            let mut ctx = EmitCtx {
                scope: &scope,
                library: self.library,
                state: &mut state,
            };

            for kind in EntryKind::LIFECYCLE {
                let mut present = false;
                let mut body_lines = Vec::new();
                for node in &self.graph.nodes {
                    let def = ctx.library.definition(node)?;
                    if def.entry == Some(kind) {
                        present = true;
                        // Hook bodies sit two levels deep: module object, then hook.
                        ctx.state.indent_depth = 2;
                        body_lines.extend(ctx.compile_entry_body(node)?);
                    }
                }
                if present {
                    hooks.push(Hook {
                        signature: kind.signature().to_string(),
                        body: body_lines.join("\n"),
                    });
                }
            }

            for node in &self.graph.nodes {
                let def = ctx.library.definition(node)?;
                if def.entry == Some(EntryKind::Method) {
                    let method_name = node
                        .value
                        .as_ref()
                        .map(|v| sanitize_identifier(&v.raw()))
                        .unwrap_or_else(|| "method".to_string());
                    ctx.state.indent_depth = 1;
                    let body = ctx.compile_group_body(node)?;
                    hooks.push(Hook {
                        signature: format!("{}()", method_name),
                        body,
                    });
                }
            }
        }

        let source = assemble_module(
            &self.module_name,
            &state.properties,
            &hooks,
            &self.indent_unit,
        );

        Ok(CompiledModule {
            name: self.module_name.clone(),
            properties: state.properties,
            source,
        })
    }
}
