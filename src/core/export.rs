//! Purpose: Emit roster contents as JSON text in the fixed export shape.
//! Exports: `export_json`.
//! Role: Counterpart of `import`; the output re-imports cleanly.
//! Invariants: Key order is fixed: metadata (autoIncrementId, count), then
//! people (id, age, name). Two-space indentation, trailing newline.
//! Invariants: Names are written verbatim between quotes; the import dialect
//! has no string escapes, so names containing `"` will not round-trip.
use std::fmt::Write;

use crate::core::roster::{Person, RosterMeta};

const INDENT: &str = "  ";

/// Renders the export document. Built by direct string emission rather than
/// the tree serializer, which is a diagnostic outline and not JSON.
pub fn export_json(meta: &RosterMeta, people: &[Person]) -> String {
    let mut out = String::new();
    out.push_str("{\n");
    let _ = write!(
        out,
        "{INDENT}\"metadata\": {{\n{INDENT}{INDENT}\"autoIncrementId\": {},\n{INDENT}{INDENT}\"count\": {}\n{INDENT}}},\n",
        meta.next_id, meta.count
    );

    if people.is_empty() {
        let _ = write!(out, "{INDENT}\"people\": []\n");
    } else {
        let _ = write!(out, "{INDENT}\"people\": [\n");
        for (idx, person) in people.iter().enumerate() {
            let _ = write!(
                out,
                "{INDENT}{INDENT}{{\n{INDENT}{INDENT}{INDENT}\"id\": {},\n{INDENT}{INDENT}{INDENT}\"age\": {},\n{INDENT}{INDENT}{INDENT}\"name\": \"{}\"\n{INDENT}{INDENT}}}",
                person.id, person.age, person.name
            );
            if idx + 1 < people.len() {
                out.push(',');
            }
            out.push('\n');
        }
        let _ = write!(out, "{INDENT}]\n");
    }
    out.push_str("}\n");
    out
}
