use alloc::string::String;

use crate::{Kind, Node};


/// Structural comparison against the reference parser's value, including
/// member order.
pub(crate) fn matches_json(node: &Node, value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match (node.kind(), value) {
        (Some(Kind::Null), Value::Null) => node.is_null(),
        (Some(Kind::True | Kind::False), Value::Bool(b)) => node.as_bool() == Some(*b),
        (Some(Kind::Number), Value::Number(n)) => node.number() == n.as_f64(),
        (Some(Kind::String), Value::String(s)) => node.as_str() == Some(s.as_str()),
        (Some(Kind::Array), Value::Array(items)) => {
            node.children().len() == items.len()
                && node
                    .children()
                    .iter()
                    .zip(items)
                    .all(|(child, item)| child.key().is_none() && matches_json(child, item))
        }
        (Some(Kind::Object), Value::Object(map)) => {
            node.children().len() == map.len()
                && node.children().iter().zip(map).all(|(child, (k, v))| {
                    child.key().is_some_and(|key| key == k.as_str()) && matches_json(child, v)
                })
        }
        _ => false,
    }
}

/// Decodes `input` and checks it against `serde_json`.
#[track_caller]
pub(crate) fn assert_matches_reference(input: &str) {
    let node = crate::decode(input.as_bytes())
        .unwrap_or_else(|err| panic!("failed to decode {input:?}: {err}"));
    let value: serde_json::Value = serde_json::from_str(input).unwrap();
    assert!(
        matches_json(&node, &value),
        "mismatch for {input:?}: {node:?} vs {value}"
    );
}

/// Renders a byte string for assertion messages.
pub(crate) fn show(input: &[u8]) -> String {
    String::from_utf8_lossy(input).into_owned()
}
