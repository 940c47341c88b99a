//! Unit tests for the graph model, literals and error display.
mod common;
use engi::error::CompileError;
use engi::prelude::*;

#[test]
fn test_literal_render() {
    assert_eq!(Literal::Number(42.0).render(), "42");
    assert_eq!(Literal::Number(2.5).render(), "2.5");
    assert_eq!(Literal::Bool(true).render(), "true");
    assert_eq!(Literal::Text("hi".to_string()).render(), "\"hi\"");
    assert_eq!(
        Literal::Text("say \"hi\"".to_string()).render(),
        "\"say \\\"hi\\\"\""
    );
    assert_eq!(Literal::Enum("linear".to_string()).render(), "linear");
    // Whole numbers beyond i64 range stay in float formatting, not a
    // saturated cast.
    assert_eq!(
        Literal::Number(1e19).render(),
        "10000000000000000000"
    );
    assert_eq!(Literal::Number(-1e19).render(), "-10000000000000000000");
}

#[test]
fn test_literal_raw_is_unquoted() {
    assert_eq!(Literal::Text("score".to_string()).raw(), "score");
    assert_eq!(Literal::Number(7.0).raw(), "7");
    assert_eq!(Literal::Bool(false).raw(), "false");
}

#[test]
fn test_error_display() {
    let err = CompileError::NodeNotFound {
        missing_node_id: "node_B".to_string(),
        source_node_id: "node_A".to_string(),
    };
    assert!(err.to_string().contains("node_B"));
    assert!(err.to_string().contains("node_A"));

    let err = CompileError::UnknownNodeType {
        node_id: "n1".to_string(),
        type_name: "teleport".to_string(),
    };
    assert!(err.to_string().contains("teleport"));

    let err = CompileError::MaxDepthExceeded {
        node_id: "deep".to_string(),
        limit: 256,
    };
    assert!(err.to_string().contains("256"));
}

#[test]
fn test_standard_library_has_categories() {
    let library = NodeLibrary::standard();
    assert!(!library.is_empty());

    let categories = library.categories();
    let names: Vec<&str> = categories.iter().map(|(c, _)| c.as_str()).collect();
    assert!(names.contains(&"values"));
    assert!(names.contains(&"control"));
    assert!(names.contains(&"events"));

    let (_, value_types) = categories
        .iter()
        .find(|(c, _)| c == "values")
        .expect("values category");
    assert!(value_types.iter().any(|t| t == "number"));
}

#[test]
fn test_definition_port_classification() {
    let library = NodeLibrary::standard();

    let set = library.get("setProperty").expect("setProperty");
    assert!(set.has_flow_input());
    assert!(set.has_flow_output());
    assert!(set.is_flow_input(0));
    assert!(!set.is_flow_input(1));

    let branch = library.get("if").expect("if");
    // Branch outputs chain flow even though they are not named `flow`.
    assert!(branch.is_flow_output(0));
    assert!(branch.is_flow_output(1));
    assert!(branch.has_flow_output());

    let add = library.get("add").expect("add");
    assert!(!add.has_flow_input());
    assert!(!add.is_flow_output(0));
}

#[test]
fn test_entry_kind_signatures() {
    assert_eq!(EntryKind::Update.signature(), "update(dt)");
    assert_eq!(EntryKind::Create.signature(), "create()");
    assert_eq!(EntryKind::LIFECYCLE.len(), 5);
}

#[test]
fn test_register_replaces_existing_definition() {
    let mut library = NodeLibrary::standard();
    let before = library.len();
    library.register(NodeDefinition::new(
        "number",
        "values",
        &[],
        &["value"],
        |_: &NodeInstance, _: &mut EmitCtx<'_>| -> Result<String, CompileError> {
            Ok("0".to_string())
        },
    ));
    assert_eq!(library.len(), before);
}
