//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the engi crate so callers can
//! reach the core functionality through a single `use`.

// Core compilation
pub use crate::compiler::{CompiledModule, Compiler, CompilerBuilder, EmitCtx, PropertyDecl};

// Graph model
pub use crate::graph::{Connection, Graph, IntoGraph, Literal, NodeInstance};

// Node definition library
pub use crate::library::{
    BranchPort, EditorFlags, EntryKind, LiteralKind, NodeDefinition, NodeEmitter, NodeLibrary,
};

// Error types
pub use crate::error::{CompileError, GraphConversionError};

// Result type alias for convenience
pub type Result<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;
