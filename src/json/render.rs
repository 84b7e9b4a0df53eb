//! Purpose: Render a parsed value tree as an indented outline for inspection.
//! Exports: `render`.
//! Role: Diagnostic formatter; distinct from the JSON re-emission path used
//! for export and not expected to round-trip through the parser.
//! Invariants: Deterministic pre-order walk; rendering the same tree twice
//! yields byte-identical text.
use std::fmt::Write;

use crate::json::value::{JsonNode, JsonValue};

const INDENT_STEP: usize = 2;

/// Renders `root` as a human-readable outline. Leaves emit `- key: value`
/// lines (the key prefix is suppressed for array elements and key-less
/// nodes); containers emit a key header with children indented one step
/// deeper, or `{}`/`[]` when empty.
pub fn render(root: &JsonNode) -> String {
    let mut out = String::new();
    write_node(root, 0, false, true, &mut out);
    out
}

fn write_node(node: &JsonNode, indent: usize, in_array: bool, is_root: bool, out: &mut String) {
    match &node.value {
        JsonValue::Null => write_leaf(node, indent, in_array, "(null)", out),
        JsonValue::Boolean(value) => {
            let text = if *value { "true" } else { "false" };
            write_leaf(node, indent, in_array, text, out);
        }
        JsonValue::Integer(value) => write_leaf(node, indent, in_array, &value.to_string(), out),
        JsonValue::Double(value) => write_leaf(node, indent, in_array, &format!("{value:?}"), out),
        JsonValue::Str(value) => write_leaf(node, indent, in_array, value, out),
        JsonValue::Array(items) => {
            write_container(node, items, indent, is_root, true, out);
        }
        JsonValue::Object(items) => {
            write_container(node, items, indent, is_root, false, out);
        }
    }
}

fn write_leaf(node: &JsonNode, indent: usize, in_array: bool, text: &str, out: &mut String) {
    push_indent(indent, out);
    out.push_str("- ");
    if !in_array {
        if let Some(key) = &node.key {
            let _ = write!(out, "{key}: ");
        }
    }
    out.push_str(text);
    out.push('\n');
}

fn write_container(
    node: &JsonNode,
    items: &[JsonNode],
    indent: usize,
    is_root: bool,
    is_array: bool,
    out: &mut String,
) {
    let empty_marker = if is_array { "[]" } else { "{}" };

    if let Some(key) = &node.key {
        push_indent(indent, out);
        let _ = write!(out, "- {key}:");
        if items.is_empty() {
            out.push(' ');
            out.push_str(empty_marker);
        }
        out.push('\n');
    } else if items.is_empty() {
        push_indent(indent, out);
        out.push_str("- ");
        out.push_str(empty_marker);
        out.push('\n');
    }

    // Keyed containers indent their children one step. A key-less array that
    // is itself an array element also steps in, so sibling scalars and the
    // nested elements do not collide visually.
    let step = if node.key.is_some() {
        INDENT_STEP
    } else if is_array && !is_root {
        INDENT_STEP
    } else {
        0
    };

    for child in items {
        write_node(child, indent + step, is_array, false, out);
    }
}

fn push_indent(count: usize, out: &mut String) {
    for _ in 0..count {
        out.push(' ');
    }
}
