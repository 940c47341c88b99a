//! Tests for flow sequencing, branching, scopes and module assembly.
mod common;
use common::*;
use engi::error::CompileError;
use engi::prelude::*;

#[test]
fn test_linear_flow_ordering() {
    let graph = Graph {
        nodes: vec![
            node("start", "onCreate"),
            node("a", "log").with_value(Literal::Text("first".to_string())),
            node("b", "log").with_value(Literal::Text("second".to_string())),
            node("c", "log").with_value(Literal::Text("third".to_string())),
        ],
        connections: vec![
            c("start", 0, "a", 0),
            c("a", 0, "b", 0),
            c("b", 0, "c", 0),
        ],
    };

    let module = compile(graph).expect("compile");
    let first = module.source.find("console.log(\"first\");").expect("first");
    let second = module.source.find("console.log(\"second\");").expect("second");
    let third = module.source.find("console.log(\"third\");").expect("third");
    assert!(first < second && second < third);
}

#[test]
fn test_branch_true_and_false_bodies() {
    let graph = Graph {
        nodes: vec![
            node("tick", "onUpdate"),
            node("cond", "boolean").with_value(Literal::Bool(true)),
            node("fork", "if"),
            node("yes", "log").with_value(Literal::Text("yes".to_string())),
            node("no", "log").with_value(Literal::Text("no".to_string())),
        ],
        connections: vec![
            c("tick", 0, "fork", 0),
            c("cond", 0, "fork", 1),
            // Output 0 is `true`, output 1 is `false`.
            c("fork", 0, "yes", 0),
            c("fork", 1, "no", 0),
        ],
    };

    let module = compile(graph).expect("compile");
    assert!(module.source.contains("if (true) {"));
    assert!(module.source.contains("} else {"));
    let yes = module.source.find("console.log(\"yes\");").expect("yes");
    let no = module.source.find("console.log(\"no\");").expect("no");
    assert!(yes < no);
}

#[test]
fn test_branch_isolation_with_unconnected_false() {
    let graph = Graph {
        nodes: vec![
            node("tick", "onUpdate"),
            node("fork", "if").with_value(Literal::Bool(false)),
            node("yes", "log").with_value(Literal::Text("taken".to_string())),
            node("orphan", "log").with_value(Literal::Text("orphan".to_string())),
        ],
        connections: vec![c("tick", 0, "fork", 0), c("fork", 0, "yes", 0)],
    };

    let module = compile(graph).expect("compile");
    assert!(module.source.contains("if (false) {"));
    assert!(module.source.contains("console.log(\"taken\");"));
    // No else block is emitted and the unreachable node stays unemitted.
    assert!(!module.source.contains("else"));
    assert!(!module.source.contains("orphan"));
}

#[test]
fn test_inline_guard_has_no_block() {
    let graph = Graph {
        nodes: vec![
            node("tick", "onUpdate"),
            node("bail", "guard").with_value(Literal::Bool(true)),
            node("after", "log").with_value(Literal::Text("ran".to_string())),
        ],
        connections: vec![c("tick", 0, "bail", 0), c("bail", 0, "after", 0)],
    };

    let module = compile(graph).expect("compile");
    assert!(module.source.contains("if (true) return;"));
    assert!(!module.source.contains("if (true) return; {"));
    // The chain continues past the inline guard.
    assert!(module.source.contains("console.log(\"ran\");"));
}

#[test]
fn test_exposed_properties_accumulate_in_visit_order() {
    let graph = Graph {
        nodes: vec![
            node("tick", "onUpdate"),
            node("hp", "setProperty")
                .with_value(Literal::Text("health".to_string()))
                .exposed(Some("vitals")),
            node("sp", "setProperty")
                .with_value(Literal::Text("speed".to_string()))
                .exposed(None),
            node("tmp", "setProperty").with_value(Literal::Text("scratch".to_string())),
        ],
        connections: vec![c("tick", 0, "hp", 0), c("hp", 0, "sp", 0), c("sp", 0, "tmp", 0)],
    };

    let module = compile(graph).expect("compile");
    assert_eq!(module.properties.len(), 2);
    assert_eq!(module.properties[0].name, "health");
    assert_eq!(module.properties[0].group, "vitals");
    assert_eq!(module.properties[1].name, "speed");
    assert_eq!(module.properties[1].group, "general");
    assert!(module.source.contains("{ name: \"health\", group: \"vitals\" },"));
    assert!(!module.source.contains("{ name: \"scratch\""));
    // The unexposed property still assigns.
    assert!(module.source.contains("this.scratch ="));
}

#[test]
fn test_hooks_emitted_in_canonical_order() {
    let graph = Graph {
        nodes: vec![
            // Authored out of order on purpose.
            node("bye", "onDestroy"),
            node("paint", "onDraw"),
            node("tick", "onUpdate"),
            node("boot", "onCreate"),
        ],
        connections: vec![],
    };

    let module = compile(graph).expect("compile");
    let create = module.source.find("create()").expect("create");
    let update = module.source.find("update(dt)").expect("update");
    let draw = module.source.find("draw()").expect("draw");
    let destroy = module.source.find("destroy()").expect("destroy");
    assert!(create < update && update < draw && draw < destroy);
    // No start entry, no start hook.
    assert!(!module.source.contains("start()"));
}

#[test]
fn test_group_region_is_labeled_and_indented() {
    let inner = Graph {
        nodes: vec![node("say", "log").with_value(Literal::Text("inside".to_string()))],
        connections: vec![],
    };
    let graph = Graph {
        nodes: vec![
            node("tick", "onUpdate"),
            node("region", "group")
                .with_value(Literal::Text("setup".to_string()))
                .with_children(inner),
        ],
        connections: vec![c("tick", 0, "region", 0)],
    };

    let module = compile(graph).expect("compile");
    assert!(module.source.contains("{ // setup"));
    assert!(module.source.contains("      console.log(\"inside\");"));
}

#[test]
fn test_method_group_becomes_named_hook() {
    let body = Graph {
        nodes: vec![node("say", "log").with_value(Literal::Text("pow".to_string()))],
        connections: vec![],
    };
    let graph = Graph {
        nodes: vec![
            node("m", "method")
                .with_value(Literal::Text("explode".to_string()))
                .with_children(body),
        ],
        connections: vec![],
    };

    let module = compile(graph).expect("compile");
    assert!(module.source.contains("explode() {"));
    assert!(module.source.contains("console.log(\"pow\");"));
}

#[test]
fn test_flow_cycle_is_rejected() {
    let graph = Graph {
        nodes: vec![
            node("start", "onCreate"),
            node("a", "log").with_value(Literal::Text("a".to_string())),
            node("b", "log").with_value(Literal::Text("b".to_string())),
        ],
        connections: vec![
            c("start", 0, "a", 0),
            c("a", 0, "b", 0),
            c("b", 0, "a", 0),
        ],
    };

    match compile(graph) {
        Err(CompileError::FlowCycle { node_id }) => assert_eq!(node_id, "a"),
        other => panic!("Expected FlowCycle, got {:?}", other),
    }
}

#[test]
fn test_unknown_node_type_is_rejected() {
    let graph = Graph {
        nodes: vec![node("x", "teleport")],
        connections: vec![],
    };
    match compile(graph) {
        Err(CompileError::UnknownNodeType { node_id, type_name }) => {
            assert_eq!(node_id, "x");
            assert_eq!(type_name, "teleport");
        }
        other => panic!("Expected UnknownNodeType, got {:?}", other),
    }
}

#[test]
fn test_invalid_port_reference_is_rejected() {
    let graph = Graph {
        nodes: vec![node("start", "onCreate"), number("n", 1.0)],
        connections: vec![c("n", 7, "start", 0)],
    };
    match compile(graph) {
        Err(CompileError::InvalidPortReference {
            node_id,
            port_index,
            ..
        }) => {
            assert_eq!(node_id, "n");
            assert_eq!(port_index, 7);
        }
        other => panic!("Expected InvalidPortReference, got {:?}", other),
    }
}

#[test]
fn test_unreached_group_children_are_validated() {
    // The group is not wired into any flow chain, so no walk ever enters it;
    // its children must still be checked before anything is emitted.
    let inner = Graph {
        nodes: vec![node("x", "bogusType")],
        connections: vec![],
    };
    let graph = Graph {
        nodes: vec![
            node("tick", "onUpdate"),
            node("region", "group").with_children(inner),
        ],
        connections: vec![],
    };

    match compile(graph) {
        Err(CompileError::UnknownNodeType { node_id, type_name }) => {
            assert_eq!(node_id, "x");
            assert_eq!(type_name, "bogusType");
        }
        other => panic!("Expected UnknownNodeType, got {:?}", other),
    }
}

#[test]
fn test_unreached_group_connections_are_validated() {
    // A dangling edge inside an unreached group aborts the compile as well.
    let inner = Graph {
        nodes: vec![node("say", "log").with_value(Literal::Text("hi".to_string()))],
        connections: vec![c("ghost", 0, "say", 0)],
    };
    let graph = Graph {
        nodes: vec![
            node("tick", "onUpdate"),
            node("region", "group").with_children(inner),
        ],
        connections: vec![],
    };

    match compile(graph) {
        Err(CompileError::NodeNotFound {
            missing_node_id, ..
        }) => assert_eq!(missing_node_id, "ghost"),
        other => panic!("Expected NodeNotFound, got {:?}", other),
    }
}

#[test]
fn test_duplicate_node_id_is_rejected() {
    let graph = Graph {
        nodes: vec![node("dup", "onCreate"), node("dup", "onUpdate")],
        connections: vec![],
    };
    match compile(graph) {
        Err(CompileError::DuplicateNodeId { node_id }) => assert_eq!(node_id, "dup"),
        other => panic!("Expected DuplicateNodeId, got {:?}", other),
    }
}

#[test]
fn test_compilation_is_deterministic_and_position_independent() {
    let first = compile(score_graph()).expect("compile");
    let second = compile(score_graph()).expect("compile");
    assert_eq!(first.source, second.source);

    // Moving and resizing nodes must not change the output.
    let mut moved = score_graph();
    for (i, n) in moved.nodes.iter_mut().enumerate() {
        n.x = 100.0 * i as f64;
        n.y = 50.0 + i as f64;
        n.width = 200.0;
        n.height = 80.0;
    }
    let third = compile(moved).expect("compile");
    assert_eq!(first.source, third.source);
}

#[test]
fn test_entry_with_no_chain_compiles_to_empty_hook() {
    let graph = Graph {
        nodes: vec![node("tick", "onUpdate")],
        connections: vec![],
    };
    let module = compile(graph).expect("compile");
    assert!(module.source.contains("update(dt) {\n  },"));
}
