//! Purpose: Differential coverage of the JSON core against a serde_json baseline.
//! Exports: Integration tests only (no runtime exports).
//! Role: Catch semantic drift between the hand-rolled tokenizer/parser and a
//! mature reference parser on the dialect both accept.
//! Invariants: Parity is asserted only for the shared dialect (no string
//! escapes, no exponents); known divergences are pinned as such.

use rosterlite::json::{parse_bytes, JsonNode, JsonValue};
use serde_json::Value;

fn to_baseline(node: &JsonNode) -> Value {
    match &node.value {
        JsonValue::Null => Value::Null,
        JsonValue::Boolean(flag) => Value::Bool(*flag),
        JsonValue::Integer(n) => Value::from(*n),
        JsonValue::Double(n) => Value::from(*n),
        JsonValue::Str(text) => Value::from(text.clone()),
        JsonValue::Array(_) => Value::Array(node.children().iter().map(to_baseline).collect()),
        JsonValue::Object(_) => {
            let mut map = serde_json::Map::new();
            for child in node.children() {
                let key = child.key.clone().unwrap_or_default();
                map.insert(key, to_baseline(child));
            }
            Value::Object(map)
        }
    }
}

fn assert_parity(input: &[u8]) {
    let ours = parse_bytes(input).map(|root| to_baseline(&root));
    let baseline = serde_json::from_slice::<Value>(input);
    match (ours, baseline) {
        (Ok(a), Ok(b)) => assert_eq!(a, b, "value mismatch for {:?}", String::from_utf8_lossy(input)),
        (Err(_), Err(_)) => {}
        (ours, baseline) => panic!(
            "outcome mismatch for {:?}: ours={ours:?}, baseline={baseline:?}",
            String::from_utf8_lossy(input)
        ),
    }
}

#[test]
fn shared_dialect_payloads_match_baseline() {
    let corpus = [
        br#"{"a":1,"b":"ok"}"#.as_slice(),
        br#"[1,2,3,{"x":true}]"#.as_slice(),
        br#"{"nested":{"arr":[{"k":"v"}]}}"#.as_slice(),
        br#"{"a":1,"b":[true,null,"s"]}"#.as_slice(),
        br#"[1.5,2.25,-3]"#.as_slice(),
        b"  { \"spaced\" : [ ] }  ".as_slice(),
        b"{\r\n  \"crlf\": null\r\n}".as_slice(),
    ];

    for case in corpus {
        assert_parity(case);
    }
}

#[test]
fn malformed_payloads_rejected_by_both() {
    let corpus = [
        b"".as_slice(),
        b"{".as_slice(),
        br#"{"a"}"#.as_slice(),
        br#"{"a":}"#.as_slice(),
        br#"[1,]"#.as_slice(),
        br#"{"a":1 "b":2}"#.as_slice(),
        br#"[truth]"#.as_slice(),
        br#""unterminated"#.as_slice(),
    ];

    for case in corpus {
        assert_parity(case);
    }
}

#[test]
fn number_at_end_of_input_is_a_known_divergence() {
    // A number token needs a terminator byte; the baseline accepts `123` at
    // end of input, this dialect does not.
    let input = b"123";
    assert!(parse_bytes(input).is_err());
    assert!(serde_json::from_slice::<Value>(input).is_ok());
    // A trailing space terminates the token and restores parity.
    assert_parity(b"123 ");
}

#[test]
fn multi_dot_numbers_are_rejected_like_the_baseline() {
    assert_parity(b"[1.2.3]");
}
