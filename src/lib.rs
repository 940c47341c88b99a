//! # Engi - Behavior Graph Compilation Engine
//!
//! **Engi** compiles visual node graphs, as authored in a game editor, into
//! the linear source text of a behavior module consumed by the game runtime.
//! The graph is the real program; engi reconciles its two edge semantics
//! (control-flow edges that impose a total order, and pull-evaluated data
//! edges) into correctly ordered, correctly indented, correctly scoped
//! procedural code.
//!
//! ## Core Workflow
//!
//! The engine is format-agnostic. It operates on a canonical [`Graph`] model:
//!
//! 1. **Load your data**: parse the editor's document format into your own structs.
//! 2. **Convert**: implement [`IntoGraph`](graph::IntoGraph) to translate them
//!    into engi's `Graph`.
//! 3. **Pick a library**: use [`NodeLibrary::standard`](library::NodeLibrary::standard)
//!    or register your own node definitions. The library is passed explicitly;
//!    there is no global registry.
//! 4. **Compile**: build a [`Compiler`](compiler::Compiler) and produce a
//!    [`CompiledModule`](compiler::CompiledModule), one deterministic text
//!    artifact with its declared properties.
//!
//! ## Quick Start
//!
//! ```rust
//! use engi::prelude::*;
//!
//! // score = 5 + 3, assigned every tick and exposed as a module property.
//! let graph = Graph {
//!     nodes: vec![
//!         NodeInstance::new("tick", "onUpdate"),
//!         NodeInstance::new("five", "number").with_value(Literal::Number(5.0)),
//!         NodeInstance::new("three", "number").with_value(Literal::Number(3.0)),
//!         NodeInstance::new("sum", "add"),
//!         NodeInstance::new("store", "setProperty")
//!             .with_value(Literal::Text("score".to_string()))
//!             .exposed(Some("stats")),
//!     ],
//!     connections: vec![
//!         Connection::new("five", 0, "sum", 0),
//!         Connection::new("three", 0, "sum", 1),
//!         Connection::new("sum", 0, "store", 2),
//!         Connection::new("tick", 0, "store", 0),
//!     ],
//! };
//!
//! let library = NodeLibrary::standard();
//! let module = Compiler::builder(graph, &library)
//!     .module_name("Scorekeeper")
//!     .build()
//!     .compile()?;
//!
//! assert!(module.source.contains("this.score = (5 + 3);"));
//! assert_eq!(module.properties[0].name, "score");
//! # Ok::<(), engi::error::CompileError>(())
//! ```

pub mod compiler;
pub mod error;
pub mod graph;
pub mod library;
pub mod prelude;
