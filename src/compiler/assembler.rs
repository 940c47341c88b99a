//! Final text assembly: stitches the exposed-property prologue and the
//! compiled lifecycle hooks into one self-contained behavior module.

use super::context::PropertyDecl;
use itertools::Itertools;

/// One compiled hook: a signature like `update(dt)` plus its fully indented
/// body text (possibly empty).
pub(crate) struct Hook {
    pub(crate) signature: String,
    pub(crate) body: String,
}

/// Strips a module name down to a host-language identifier.
pub(crate) fn sanitize_identifier(name: &str) -> String {
    let ident: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if ident.is_empty() || ident.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("Behavior{}", ident)
    } else {
        ident
    }
}

/// Produces the module source text. Property declarations come first, then
/// hooks in the order the compiler collected them (the canonical lifecycle
/// order followed by named methods).
pub(crate) fn assemble_module(
    name: &str,
    properties: &[PropertyDecl],
    hooks: &[Hook],
    indent_unit: &str,
) -> String {
    let i = indent_unit;
    let mut out = String::new();

    out.push_str(&format!("const {} = {{\n", sanitize_identifier(name)));
    out.push_str(&format!(
        "{}name: {},\n",
        i,
        serde_json::Value::String(name.to_string())
    ));

    if properties.is_empty() {
        out.push_str(&format!("{}properties: [],\n", i));
    } else {
        out.push_str(&format!("{}properties: [\n", i));
        let entries = properties
            .iter()
            .map(|p| format!("{}{}{{ name: {:?}, group: {:?} }},", i, i, p.name, p.group))
            .join("\n");
        out.push_str(&entries);
        out.push_str(&format!("\n{}],\n", i));
    }

    for hook in hooks {
        out.push('\n');
        out.push_str(&format!("{}{} {{\n", i, hook.signature));
        if !hook.body.is_empty() {
            out.push_str(&hook.body);
            out.push('\n');
        }
        out.push_str(&format!("{}}},\n", i));
    }

    out.push_str("};\n");
    out
}
