pub mod catalog;
pub mod definition;

pub use definition::*;

use crate::error::CompileError;
use crate::graph::NodeInstance;
use ahash::AHashMap;

/// A catalogue of node definitions, keyed by type name.
///
/// The compiler works against any conforming library; the default catalogue
/// from [`NodeLibrary::standard`] is data, not compiler logic. There is no
/// process-wide registry: a library is passed explicitly to every compiler
/// entry point.
pub struct NodeLibrary {
    defs: AHashMap<String, NodeDefinition>,
    order: Vec<String>,
}

impl NodeLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self {
            defs: AHashMap::new(),
            order: Vec::new(),
        }
    }

    /// Creates a library pre-populated with the standard catalogue.
    pub fn standard() -> Self {
        let mut lib = Self::new();
        catalog::register_standard_nodes(&mut lib);
        lib
    }

    /// Registers a definition, replacing any previous one with the same type name.
    pub fn register(&mut self, def: NodeDefinition) {
        if !self.defs.contains_key(&def.type_name) {
            self.order.push(def.type_name.clone());
        }
        self.defs.insert(def.type_name.clone(), def);
    }

    pub fn get(&self, type_name: &str) -> Option<&NodeDefinition> {
        self.defs.get(type_name)
    }

    /// Looks up the definition for a node instance, or reports the node as
    /// referencing an unknown type.
    pub fn definition(&self, node: &NodeInstance) -> Result<&NodeDefinition, CompileError> {
        self.defs
            .get(&node.node_type)
            .ok_or_else(|| CompileError::UnknownNodeType {
                node_id: node.id.clone(),
                type_name: node.node_type.clone(),
            })
    }

    /// Palette view: `(category, type names)` pairs in registration order.
    /// Compilation never consults this.
    pub fn categories(&self) -> Vec<(String, Vec<String>)> {
        let mut out: Vec<(String, Vec<String>)> = Vec::new();
        for type_name in &self.order {
            let def = &self.defs[type_name];
            match out.iter_mut().find(|(cat, _)| cat == &def.category) {
                Some((_, names)) => names.push(type_name.clone()),
                None => out.push((def.category.clone(), vec![type_name.clone()])),
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Default for NodeLibrary {
    fn default() -> Self {
        Self::new()
    }
}
