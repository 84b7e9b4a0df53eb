// Tagged-variant value tree produced by the parser.
use crate::json::seq::Seq;

#[derive(Clone, Debug, PartialEq)]
pub enum JsonValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    Str(String),
    Array(Seq<JsonNode>),
    Object(Seq<JsonNode>),
}

/// One node of a parsed tree. `key` is present when the node is a direct
/// child of an object; array elements and the root carry no key. Children are
/// owned by their parent's sequence; the root is simply the node returned by
/// `parse`, owned by the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonNode {
    pub key: Option<String>,
    pub value: JsonValue,
}

impl JsonNode {
    pub fn new(value: JsonValue) -> Self {
        Self { key: None, value }
    }

    pub fn object() -> Self {
        Self::new(JsonValue::Object(Seq::new()))
    }

    pub fn array() -> Self {
        Self::new(JsonValue::Array(Seq::new()))
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self.value, JsonValue::Array(_) | JsonValue::Object(_))
    }

    /// Children of a container node; empty slice for leaves.
    pub fn children(&self) -> &[JsonNode] {
        match &self.value {
            JsonValue::Array(items) | JsonValue::Object(items) => items,
            _ => &[],
        }
    }

    /// Attaches `child` to a container node by move. No-op for leaves.
    pub fn attach(&mut self, child: JsonNode) {
        if let JsonValue::Array(items) | JsonValue::Object(items) = &mut self.value {
            items.push(child);
        }
    }

    /// First object member with the given key. Duplicate keys all survive
    /// parsing; lookup returns the earliest.
    pub fn member(&self, key: &str) -> Option<&JsonNode> {
        match &self.value {
            JsonValue::Object(items) => items
                .iter()
                .find(|child| child.key.as_deref() == Some(key)),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self.value {
            JsonValue::Integer(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            JsonValue::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Number of leaf values in the subtree rooted here.
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            return 1;
        }
        self.children().iter().map(JsonNode::leaf_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonNode, JsonValue};

    #[test]
    fn attach_preserves_insertion_order_and_duplicates() {
        let mut object = JsonNode::object();
        for (key, value) in [("a", 1), ("b", 2), ("a", 3)] {
            let mut child = JsonNode::new(JsonValue::Integer(value));
            child.key = Some(key.to_string());
            object.attach(child);
        }
        let keys: Vec<_> = object
            .children()
            .iter()
            .map(|child| child.key.as_deref().unwrap())
            .collect();
        assert_eq!(keys, vec!["a", "b", "a"]);
        assert_eq!(object.member("a").unwrap().as_integer(), Some(1));
    }

    #[test]
    fn leaf_count_walks_nested_containers() {
        let mut array = JsonNode::array();
        array.attach(JsonNode::new(JsonValue::Integer(1)));
        let mut inner = JsonNode::object();
        inner.attach(JsonNode::new(JsonValue::Null));
        inner.attach(JsonNode::new(JsonValue::Boolean(true)));
        array.attach(inner);
        assert_eq!(array.leaf_count(), 3);
    }

    #[test]
    fn member_lookup_misses_on_leaves() {
        let leaf = JsonNode::new(JsonValue::Str("x".to_string()));
        assert!(leaf.member("x").is_none());
        assert!(leaf.children().is_empty());
    }
}
