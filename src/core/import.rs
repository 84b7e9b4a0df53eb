//! Purpose: Rebuild roster records from a parsed JSON export tree.
//! Exports: `import_bytes`, `import_tree`.
//! Role: Bridge from the JSON core to the record store.
//! Invariants: The top-level shape is fixed: `metadata` (ordered members)
//! then `people` (members matched by key). Shape violations are usage
//! errors naming the offending member.
//! Invariants: Metadata is taken as-is; a count that disagrees with the
//! record list is logged, not rejected.
use tracing::{info, warn};

use crate::core::error::{Error, ErrorKind};
use crate::core::roster::{Person, RosterMeta};
use crate::json::{parse_bytes, JsonNode, JsonValue};

/// Parses `input` with the JSON core and walks the tree into roster
/// contents. Lexical and structural diagnostics surface as usage errors.
pub fn import_bytes(input: &[u8]) -> Result<(RosterMeta, Vec<Person>), Error> {
    let root = parse_bytes(input).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("import file is not parseable: {err}"))
            .with_source(err)
    })?;
    import_tree(&root)
}

/// Walks an already-parsed tree. The expected shape is:
///
/// ```text
/// { "metadata": { "autoIncrementId": <int>, "count": <int> },
///   "people": [ { "id": <int>, "age": <int>, "name": <string> }, ... ] }
/// ```
///
/// `metadata` members are order-sensitive; person members are matched by key.
pub fn import_tree(root: &JsonNode) -> Result<(RosterMeta, Vec<Person>), Error> {
    let members = object_children(root, "top-level value")?;
    if members.len() != 2 {
        return Err(shape_error("expected exactly two top-level members"));
    }

    let metadata = &members[0];
    if metadata.key.as_deref() != Some("metadata") {
        return Err(shape_error("first top-level member must be \"metadata\""));
    }
    let meta = import_meta(metadata)?;

    let people_node = &members[1];
    if people_node.key.as_deref() != Some("people") {
        return Err(shape_error("second top-level member must be \"people\""));
    }
    let people = import_people(people_node)?;

    if meta.count != people.len() as u64 {
        warn!(
            declared = meta.count,
            actual = people.len(),
            "metadata count disagrees with people list"
        );
    }
    info!(count = people.len(), "imported roster contents");
    Ok((meta, people))
}

fn import_meta(node: &JsonNode) -> Result<RosterMeta, Error> {
    let members = object_children(node, "\"metadata\"")?;
    if members.len() != 2 {
        return Err(shape_error("\"metadata\" must have exactly two members"));
    }
    let next_id = ordered_integer(&members[0], 0, "autoIncrementId")?;
    let count = ordered_integer(&members[1], 1, "count")?;
    Ok(RosterMeta {
        next_id: non_negative(next_id, "autoIncrementId")?,
        count: non_negative(count, "count")?,
    })
}

fn import_people(node: &JsonNode) -> Result<Vec<Person>, Error> {
    if !matches!(node.value, JsonValue::Array(_)) {
        return Err(shape_error("\"people\" must be an array"));
    }

    let mut people = Vec::with_capacity(node.children().len());
    for element in node.children() {
        people.push(import_person(element)?);
    }
    Ok(people)
}

fn import_person(node: &JsonNode) -> Result<Person, Error> {
    object_children(node, "people element")?;

    let id = keyed_integer(node, "id")?;
    let age = keyed_integer(node, "age")?;
    let name = node
        .member("name")
        .and_then(JsonNode::as_str)
        .ok_or_else(|| shape_error("people element needs a string \"name\""))?;

    let age = i32::try_from(age)
        .map_err(|_| shape_error("\"age\" is out of range"))?;
    Ok(Person {
        id: non_negative(id, "id")?,
        age,
        name: name.to_string(),
    })
}

fn object_children<'a>(node: &'a JsonNode, what: &str) -> Result<&'a [JsonNode], Error> {
    match &node.value {
        JsonValue::Object(_) => Ok(node.children()),
        _ => Err(shape_error(format!("{what} must be an object"))),
    }
}

fn ordered_integer(node: &JsonNode, position: usize, key: &str) -> Result<i64, Error> {
    if node.key.as_deref() != Some(key) {
        return Err(shape_error(format!(
            "\"metadata\" member {position} must be \"{key}\""
        )));
    }
    node.as_integer()
        .ok_or_else(|| shape_error(format!("\"{key}\" must be an integer")))
}

fn keyed_integer(node: &JsonNode, key: &str) -> Result<i64, Error> {
    node.member(key)
        .and_then(JsonNode::as_integer)
        .ok_or_else(|| shape_error(format!("people element needs an integer \"{key}\"")))
}

fn non_negative(value: i64, key: &str) -> Result<u64, Error> {
    u64::try_from(value).map_err(|_| shape_error(format!("\"{key}\" must not be negative")))
}

fn shape_error(message: impl Into<String>) -> Error {
    Error::new(ErrorKind::Usage).with_message(message)
}
