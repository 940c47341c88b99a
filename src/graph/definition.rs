/// The complete, canonical description of a behavior graph, ready for compilation.
/// This is the target structure for any custom editor-format conversion.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<NodeInstance>,
    pub connections: Vec<Connection>,
}

/// A single placed node in the graph.
///
/// `x`/`y`/`width`/`height` are presentation state owned by the editor; the
/// compiler never reads them and they must not affect the emitted text.
#[derive(Debug, Clone)]
pub struct NodeInstance {
    pub id: String,
    pub node_type: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Literal entered in the node body, used as fallback for unconnected inputs.
    pub value: Option<Literal>,
    /// Selection made in the node's dropdown, if the type declares one.
    pub dropdown_value: Option<String>,
    /// Marks a `setProperty`-class node as declaring an externally editable field.
    pub expose_property: bool,
    /// Grouping label for exposed properties (and label for organizational groups).
    pub group_name: Option<String>,
    /// Property chosen from the host's property list, for get/set-style nodes.
    pub selected_property: Option<String>,
    /// Nested sub-graph, present only on nodes whose definition is a group.
    pub children: Option<Graph>,
}

impl NodeInstance {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            value: None,
            dropdown_value: None,
            expose_property: false,
            group_name: None,
            selected_property: None,
            children: None,
        }
    }

    pub fn with_value(mut self, value: Literal) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_dropdown(mut self, value: impl Into<String>) -> Self {
        self.dropdown_value = Some(value.into());
        self
    }

    pub fn exposed(mut self, group: Option<&str>) -> Self {
        self.expose_property = true;
        self.group_name = group.map(str::to_string);
        self
    }

    pub fn with_children(mut self, children: Graph) -> Self {
        self.children = Some(children);
        self
    }
}

/// A connection between two node ports, identified by port index.
///
/// Whether it is a flow edge or a data edge is decided by the port names the
/// endpoint definitions declare at those indexes, never by a stored tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub from: String,
    pub from_port: usize,
    pub to: String,
    pub to_port: usize,
}

impl Connection {
    pub fn new(from: impl Into<String>, from_port: usize, to: impl Into<String>, to_port: usize) -> Self {
        Self {
            from: from.into(),
            from_port,
            to: to.into(),
            to_port,
        }
    }
}

/// A node's stored literal. The variant is fixed per node type by its
/// definition's declared literal kind, not inferred at read time.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Text(String),
    Bool(bool),
    /// Dropdown selection spliced into emitted code verbatim.
    Enum(String),
}

impl Literal {
    /// Renders the literal as emittable expression text. Text literals are
    /// quoted and escaped; numbers, booleans and enum selections are spliced raw.
    pub fn render(&self) -> String {
        match self {
            Literal::Number(n) => {
                // The integer-trimming cast only holds inside i64 range.
                if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Literal::Text(s) => serde_json::Value::String(s.clone()).to_string(),
            Literal::Bool(b) => format!("{}", b),
            Literal::Enum(s) => s.clone(),
        }
    }

    /// The raw, unquoted text of the literal, for callers reading a bound name
    /// (e.g. a property identifier) rather than a value expression.
    pub fn raw(&self) -> String {
        match self {
            Literal::Text(s) | Literal::Enum(s) => s.clone(),
            other => other.render(),
        }
    }
}
