use crate::compiler::EmitCtx;
use crate::error::CompileError;
use crate::graph::NodeInstance;

/// Conventional name of the ports that participate in flow chaining. Flow
/// ports are always declared first in a definition's port lists.
pub const FLOW_PORT: &str = "flow";

/// Lifecycle hook a definition marks as a graph entry point, in the canonical
/// order the assembler emits hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Create,
    Start,
    Update,
    Draw,
    Destroy,
    /// A named method block; its hook name comes from the node's literal.
    Method,
}

impl EntryKind {
    /// Lifecycle hooks in emission order. Method blocks follow these.
    pub const LIFECYCLE: [EntryKind; 5] = [
        EntryKind::Create,
        EntryKind::Start,
        EntryKind::Update,
        EntryKind::Draw,
        EntryKind::Destroy,
    ];

    /// The hook signature the assembler writes for this lifecycle entry.
    pub fn signature(&self) -> &'static str {
        match self {
            EntryKind::Create => "create()",
            EntryKind::Start => "start()",
            EntryKind::Update => "update(dt)",
            EntryKind::Draw => "draw()",
            EntryKind::Destroy => "destroy()",
            EntryKind::Method => "",
        }
    }
}

/// Which literal variant a node type's editable value holds. Decided once per
/// type; the editor uses it to pick a widget, the conversion layer to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiteralKind {
    #[default]
    Number,
    Text,
    Bool,
    Enum,
}

/// Editor-only affordances. Carried on the definition so a palette can render
/// the node; compilation ignores every field.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorFlags {
    pub has_input: bool,
    pub has_toggle: bool,
    pub has_dropdown: bool,
    pub has_color_picker: bool,
    pub has_expose_checkbox: bool,
}

/// One named flow output beyond the plain `flow` continuation, owned by a
/// branch node. The sequencer wraps the chain reachable from it in braces,
/// prefixing `keyword` (e.g. `else`) for every branch after the first.
#[derive(Debug, Clone)]
pub struct BranchPort {
    pub port: String,
    pub keyword: Option<String>,
}

impl BranchPort {
    pub fn new(port: &str) -> Self {
        Self {
            port: port.to_string(),
            keyword: None,
        }
    }

    pub fn with_keyword(port: &str, keyword: &str) -> Self {
        Self {
            port: port.to_string(),
            keyword: Some(keyword.to_string()),
        }
    }
}

/// Maps a composite expression and a requested output-port name to a
/// field-access expression, for multi-output nodes whose single emitted
/// expression yields a composite value.
pub type AccessFn = fn(&str, &str) -> String;

/// The contract for producing emitted text for one node type.
///
/// `emit` receives the node instance and the compilation context; it resolves
/// its data inputs through [`EmitCtx::input`] and returns either a complete
/// statement (flow nodes), a value expression (data nodes), or a block header
/// (branch nodes, the sequencer owns the braces).
pub trait NodeEmitter: Send + Sync {
    fn emit(&self, node: &NodeInstance, ctx: &mut EmitCtx<'_>) -> Result<String, CompileError>;
}

impl<F> NodeEmitter for F
where
    F: Fn(&NodeInstance, &mut EmitCtx<'_>) -> Result<String, CompileError> + Send + Sync,
{
    fn emit(&self, node: &NodeInstance, ctx: &mut EmitCtx<'_>) -> Result<String, CompileError> {
        self(node, ctx)
    }
}

/// The full shape of one node type: ports, compilation flags, editor flags and
/// the emit rule. Owned by a [`NodeLibrary`](super::NodeLibrary), read-only to
/// the compiler.
pub struct NodeDefinition {
    pub type_name: String,
    pub category: String,
    /// Ordered input port names; a leading `flow` marks the node flow-receiving.
    pub inputs: Vec<String>,
    /// Ordered output port names; `flow` (or a declared branch) marks it flow-producing.
    pub outputs: Vec<String>,
    /// Named branch flow outputs (e.g. `true`/`false`), in wrapping order.
    pub branches: Vec<BranchPort>,
    /// When false, the node is emitted as a single inline statement with no
    /// surrounding block even if it notionally represents control.
    pub wrap_flow_node: bool,
    /// The emitted expression is complete and side-effect-free; consumers may
    /// inline it without a temporary binding.
    pub direct_output: bool,
    /// The node owns a nested graph compiled as an independent scope.
    pub is_group: bool,
    pub entry: Option<EntryKind>,
    pub literal_kind: LiteralKind,
    pub flags: EditorFlags,
    pub multi_output_access: Option<AccessFn>,
    emitter: Box<dyn NodeEmitter>,
}

impl NodeDefinition {
    pub fn new(
        type_name: &str,
        category: &str,
        inputs: &[&str],
        outputs: &[&str],
        emitter: impl NodeEmitter + 'static,
    ) -> Self {
        Self {
            type_name: type_name.to_string(),
            category: category.to_string(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
            branches: Vec::new(),
            wrap_flow_node: true,
            direct_output: false,
            is_group: false,
            entry: None,
            literal_kind: LiteralKind::default(),
            flags: EditorFlags::default(),
            multi_output_access: None,
            emitter: Box::new(emitter),
        }
    }

    pub fn direct(mut self) -> Self {
        self.direct_output = true;
        self
    }

    pub fn inline(mut self) -> Self {
        self.wrap_flow_node = false;
        self
    }

    pub fn group(mut self) -> Self {
        self.is_group = true;
        self
    }

    pub fn entry(mut self, kind: EntryKind) -> Self {
        self.entry = Some(kind);
        self
    }

    pub fn literal(mut self, kind: LiteralKind) -> Self {
        self.literal_kind = kind;
        self
    }

    pub fn branching(mut self, branches: Vec<BranchPort>) -> Self {
        self.branches = branches;
        self
    }

    pub fn accessor(mut self, access: AccessFn) -> Self {
        self.multi_output_access = Some(access);
        self
    }

    pub fn editor_flags(mut self, flags: EditorFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn emit(&self, node: &NodeInstance, ctx: &mut EmitCtx<'_>) -> Result<String, CompileError> {
        self.emitter.emit(node, ctx)
    }

    /// Index of a named input port.
    pub fn input_index(&self, port: &str) -> Option<usize> {
        self.inputs.iter().position(|p| p == port)
    }

    /// Index of a named output port.
    pub fn output_index(&self, port: &str) -> Option<usize> {
        self.outputs.iter().position(|p| p == port)
    }

    pub fn has_flow_input(&self) -> bool {
        self.inputs.first().is_some_and(|p| p == FLOW_PORT)
    }

    pub fn has_flow_output(&self) -> bool {
        self.outputs.iter().any(|p| p == FLOW_PORT) || !self.branches.is_empty()
    }

    /// Whether the output port at `index` chains flow rather than carrying data.
    pub fn is_flow_output(&self, index: usize) -> bool {
        match self.outputs.get(index) {
            Some(name) => name == FLOW_PORT || self.branches.iter().any(|b| &b.port == name),
            None => false,
        }
    }

    /// Whether the input port at `index` receives flow.
    pub fn is_flow_input(&self, index: usize) -> bool {
        self.inputs.get(index).is_some_and(|name| name == FLOW_PORT)
    }
}

impl std::fmt::Debug for NodeDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeDefinition")
            .field("type_name", &self.type_name)
            .field("category", &self.category)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("wrap_flow_node", &self.wrap_flow_node)
            .field("direct_output", &self.direct_output)
            .field("is_group", &self.is_group)
            .field("entry", &self.entry)
            .finish_non_exhaustive()
    }
}
