//! The standard node catalogue.
//!
//! Everything here is data handed to the compiler, not compiler logic: each
//! entry declares its port shape, flags and an emit rule producing text for
//! the JavaScript-flavored behavior module the host runtime loads. A host may
//! replace or extend this catalogue freely via [`NodeLibrary::register`].

use super::{BranchPort, EditorFlags, EntryKind, LiteralKind, NodeDefinition, NodeLibrary};
use crate::compiler::EmitCtx;
use crate::error::CompileError;
use crate::graph::NodeInstance;

/// Defines the infix operator families: each expands to a direct-output value
/// node with `a`/`b` inputs emitting a parenthesized infix expression.
macro_rules! infix_nodes {
    ( $lib:ident, $cat:expr, $lit:expr, $( ($type_name:expr, $op:expr) ),* $(,)? ) => {
        $(
            $lib.register(
                NodeDefinition::new(
                    $type_name,
                    $cat,
                    &["a", "b"],
                    &["value"],
                    |node: &NodeInstance, ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                        let a = ctx.input(node, "a")?;
                        let b = ctx.input(node, "b")?;
                        Ok(format!("({} {} {})", a, $op, b))
                    },
                )
                .direct()
                .literal($lit)
                .editor_flags(EditorFlags { has_input: true, ..Default::default() }),
            );
        )*
    };
}

/// Defines unary host-function value nodes (`Math.abs(v)` and friends).
macro_rules! unary_call_nodes {
    ( $lib:ident, $cat:expr, $( ($type_name:expr, $call:expr) ),* $(,)? ) => {
        $(
            $lib.register(
                NodeDefinition::new(
                    $type_name,
                    $cat,
                    &["value"],
                    &["value"],
                    |node: &NodeInstance, ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                        let v = ctx.input(node, "value")?;
                        Ok(format!("{}({})", $call, v))
                    },
                )
                .direct()
                .editor_flags(EditorFlags { has_input: true, ..Default::default() }),
            );
        )*
    };
}

/// Defines flow statement nodes that call a host function with their resolved
/// data inputs, in declared order.
macro_rules! host_call_nodes {
    ( $lib:ident, $cat:expr, $( ($type_name:expr, $call:expr, [ $( $arg:expr ),* ], $lit:expr) ),* $(,)? ) => {
        $(
            $lib.register(
                NodeDefinition::new(
                    $type_name,
                    $cat,
                    &["flow" $(, $arg)*],
                    &["flow"],
                    |node: &NodeInstance, ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                        let args: Vec<String> = vec![ $( ctx.input(node, $arg)? ),* ];
                        Ok(format!("{}({});", $call, args.join(", ")))
                    },
                )
                .literal($lit)
                .editor_flags(EditorFlags { has_input: true, ..Default::default() }),
            );
        )*
    };
}

/// Lifecycle entry definitions. Entries are never emitted as statements; the
/// emit rule only matters for entries exposing a data output (`onUpdate`'s
/// `deltaTime` resolves to the hook's `dt` argument).
macro_rules! entry_nodes {
    ( $lib:ident, $( ($type_name:expr, $kind:expr, [ $( $extra:expr ),* ], $expr:expr) ),* $(,)? ) => {
        $(
            $lib.register(
                NodeDefinition::new(
                    $type_name,
                    "events",
                    &[],
                    &["flow" $(, $extra)*],
                    |_node: &NodeInstance, _ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                        Ok($expr.to_string())
                    },
                )
                .direct()
                .entry($kind),
            );
        )*
    };
}

/// Reads the bound property name of a get/set-property node: the property
/// picked in the editor dropdown wins, otherwise the `name` input is read as
/// raw (unquoted) text.
fn property_name(node: &NodeInstance, ctx: &mut EmitCtx<'_>) -> Result<String, CompileError> {
    match &node.selected_property {
        Some(name) => Ok(name.clone()),
        None => ctx.raw_input(node, "name"),
    }
}

/// Registers the full standard catalogue into `lib`.
pub fn register_standard_nodes(lib: &mut NodeLibrary) {
    // --- Value sources -----------------------------------------------------

    lib.register(
        NodeDefinition::new(
            "number",
            "values",
            &[],
            &["value"],
            |node: &NodeInstance, ctx: &mut EmitCtx<'_>| ctx.literal_of(node),
        )
        .direct()
        .literal(LiteralKind::Number)
        .editor_flags(EditorFlags {
            has_input: true,
            ..Default::default()
        }),
    );

    lib.register(
        NodeDefinition::new(
            "text",
            "values",
            &[],
            &["value"],
            |node: &NodeInstance, ctx: &mut EmitCtx<'_>| ctx.literal_of(node),
        )
        .direct()
        .literal(LiteralKind::Text)
        .editor_flags(EditorFlags {
            has_input: true,
            ..Default::default()
        }),
    );

    lib.register(
        NodeDefinition::new(
            "boolean",
            "values",
            &[],
            &["value"],
            |node: &NodeInstance, ctx: &mut EmitCtx<'_>| ctx.literal_of(node),
        )
        .direct()
        .literal(LiteralKind::Bool)
        .editor_flags(EditorFlags {
            has_toggle: true,
            ..Default::default()
        }),
    );

    lib.register(
        NodeDefinition::new(
            "color",
            "values",
            &[],
            &["value"],
            |node: &NodeInstance, ctx: &mut EmitCtx<'_>| ctx.literal_of(node),
        )
        .direct()
        .literal(LiteralKind::Text)
        .editor_flags(EditorFlags {
            has_color_picker: true,
            ..Default::default()
        }),
    );

    // Non-idempotent source: every statement that reads it re-rolls.
    lib.register(
        NodeDefinition::new(
            "random",
            "values",
            &[],
            &["value"],
            |_node: &NodeInstance, _ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                Ok("Math.random()".to_string())
            },
        )
        .direct(),
    );

    lib.register(
        NodeDefinition::new(
            "vector2",
            "values",
            &["x", "y"],
            &["x", "y"],
            |node: &NodeInstance, ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                let x = ctx.input(node, "x")?;
                let y = ctx.input(node, "y")?;
                Ok(format!("({{ x: {}, y: {} }})", x, y))
            },
        )
        .literal(LiteralKind::Number)
        .accessor(|expr, port| format!("{}.{}", expr, port)),
    );

    // --- Arithmetic, comparison, logic ------------------------------------

    infix_nodes!(
        lib,
        "math",
        LiteralKind::Number,
        ("add", "+"),
        ("subtract", "-"),
        ("multiply", "*"),
        ("divide", "/"),
        ("modulo", "%"),
    );

    infix_nodes!(
        lib,
        "logic",
        LiteralKind::Number,
        ("equals", "==="),
        ("notEquals", "!=="),
        ("greater", ">"),
        ("greaterOrEqual", ">="),
        ("less", "<"),
        ("lessOrEqual", "<="),
    );

    infix_nodes!(
        lib,
        "logic",
        LiteralKind::Bool,
        ("and", "&&"),
        ("or", "||"),
    );

    lib.register(
        NodeDefinition::new(
            "not",
            "logic",
            &["value"],
            &["value"],
            |node: &NodeInstance, ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                let v = ctx.input(node, "value")?;
                Ok(format!("(!{})", v))
            },
        )
        .direct()
        .literal(LiteralKind::Bool),
    );

    unary_call_nodes!(
        lib,
        "math",
        ("abs", "Math.abs"),
        ("floor", "Math.floor"),
        ("round", "Math.round"),
        ("sqrt", "Math.sqrt"),
    );

    // --- Strings -----------------------------------------------------------

    lib.register(
        NodeDefinition::new(
            "concat",
            "strings",
            &["a", "b"],
            &["value"],
            |node: &NodeInstance, ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                let a = ctx.input(node, "a")?;
                let b = ctx.input(node, "b")?;
                Ok(format!("(String({}) + String({}))", a, b))
            },
        )
        .direct()
        .literal(LiteralKind::Text)
        .editor_flags(EditorFlags {
            has_input: true,
            ..Default::default()
        }),
    );

    lib.register(
        NodeDefinition::new(
            "stringLength",
            "strings",
            &["value"],
            &["value"],
            |node: &NodeInstance, ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                let v = ctx.input(node, "value")?;
                Ok(format!("String({}).length", v))
            },
        )
        .direct()
        .literal(LiteralKind::Text),
    );

    // --- Properties --------------------------------------------------------

    lib.register(
        NodeDefinition::new(
            "getProperty",
            "properties",
            &["name"],
            &["value"],
            |node: &NodeInstance, ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                let name = property_name(node, ctx)?;
                Ok(format!("this.{}", name))
            },
        )
        .direct()
        .literal(LiteralKind::Text)
        .editor_flags(EditorFlags {
            has_dropdown: true,
            ..Default::default()
        }),
    );

    lib.register(
        NodeDefinition::new(
            "setProperty",
            "properties",
            &["flow", "name", "value"],
            &["flow"],
            |node: &NodeInstance, ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                let name = property_name(node, ctx)?;
                let value = ctx.input(node, "value")?;
                if node.expose_property {
                    ctx.declare_property(&name, node.group_name.as_deref());
                }
                Ok(format!("this.{} = {};", name, value))
            },
        )
        .literal(LiteralKind::Text)
        .editor_flags(EditorFlags {
            has_input: true,
            has_expose_checkbox: true,
            ..Default::default()
        }),
    );

    // --- Input polling -----------------------------------------------------

    lib.register(
        NodeDefinition::new(
            "keyDown",
            "input",
            &["key"],
            &["down"],
            |node: &NodeInstance, ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                let key = ctx.input(node, "key")?;
                Ok(format!("game.input.keyDown({})", key))
            },
        )
        .direct()
        .literal(LiteralKind::Text),
    );

    lib.register(
        NodeDefinition::new(
            "mousePosition",
            "input",
            &[],
            &["x", "y"],
            |_node: &NodeInstance, _ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                Ok("game.input.mousePosition()".to_string())
            },
        )
        .accessor(|expr, port| format!("{}.{}", expr, port)),
    );

    // --- Side-effect statements --------------------------------------------

    host_call_nodes!(
        lib,
        "drawing",
        ("drawSprite", "game.draw.sprite", ["sprite", "x", "y"], LiteralKind::Text),
        ("drawText", "game.draw.text", ["text", "x", "y"], LiteralKind::Text),
        ("clearScreen", "game.draw.clear", ["color"], LiteralKind::Text),
    );

    host_call_nodes!(
        lib,
        "sound",
        // Resource selectors have no literal fallback: an unconnected input is
        // a MissingRequiredInput compile error.
        ("playSound", "game.audio.play", ["sound"], LiteralKind::Enum),
        ("stopSound", "game.audio.stop", ["sound"], LiteralKind::Enum),
    );

    host_call_nodes!(
        lib,
        "modules",
        ("log", "console.log", ["message"], LiteralKind::Text),
        ("spawnEntity", "game.spawn", ["entity", "x", "y"], LiteralKind::Text),
    );

    // --- Control flow ------------------------------------------------------

    lib.register(
        NodeDefinition::new(
            "if",
            "control",
            &["flow", "condition"],
            &["true", "false"],
            |node: &NodeInstance, ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                let condition = ctx.input(node, "condition")?;
                Ok(format!("if ({})", condition))
            },
        )
        .literal(LiteralKind::Bool)
        .branching(vec![
            BranchPort::new("true"),
            BranchPort::with_keyword("false", "else"),
        ]),
    );

    // One-line early-out guard; owns no nested body.
    lib.register(
        NodeDefinition::new(
            "guard",
            "control",
            &["flow", "condition"],
            &["flow"],
            |node: &NodeInstance, ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                let condition = ctx.input(node, "condition")?;
                Ok(format!("if ({}) return;", condition))
            },
        )
        .inline()
        .literal(LiteralKind::Bool),
    );

    lib.register(
        NodeDefinition::new(
            "group",
            "control",
            &["flow"],
            &["flow"],
            |_node: &NodeInstance, _ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                Ok(String::new())
            },
        )
        .group()
        .literal(LiteralKind::Text),
    );

    lib.register(
        NodeDefinition::new(
            "method",
            "control",
            &[],
            &[],
            |_node: &NodeInstance, _ctx: &mut EmitCtx<'_>| -> Result<String, CompileError> {
                Ok(String::new())
            },
        )
        .group()
        .entry(EntryKind::Method)
        .literal(LiteralKind::Text)
        .editor_flags(EditorFlags {
            has_input: true,
            ..Default::default()
        }),
    );

    // --- Lifecycle entries -------------------------------------------------

    entry_nodes!(
        lib,
        ("onCreate", EntryKind::Create, [], ""),
        ("onStart", EntryKind::Start, [], ""),
        ("onUpdate", EntryKind::Update, ["deltaTime"], "dt"),
        ("onDraw", EntryKind::Draw, [], ""),
        ("onDestroy", EntryKind::Destroy, [], ""),
    );
}
