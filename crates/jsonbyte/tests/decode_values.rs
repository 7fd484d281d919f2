#![expect(missing_docs)]

mod common;

use common::{ORIGINAL, STREAM, feed_all, feed_session};
use jsonbyte::{Decoder, DecoderOptions, Kind, Node, Status, decode};
use rstest::rstest;

fn members(node: &Node) -> Vec<(String, Option<Kind>)> {
    node.children()
        .iter()
        .map(|c| (c.key().unwrap().to_string(), c.kind()))
        .collect()
}

#[test_log::test]
fn pretty_document_matches_compact_stream() {
    let pretty = decode(ORIGINAL.as_bytes()).unwrap();
    let compact = decode(STREAM.join("").as_bytes()).unwrap();
    assert_eq!(pretty, compact);
    assert_eq!(pretty.to_string(), STREAM.join(""));

    let names: Vec<_> = members(&pretty).into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        names,
        [
            "moderation",
            "request",
            "snippets",
            "entities",
            "matrix",
            "mixed",
            "trailing",
            "object_in_array_last",
            "nested_objects"
        ]
    );
}

#[test_log::test]
fn free_function_session() {
    let (root, complete) = feed_session(br#"{"a":1,"b":true}"#);
    assert!(complete);
    let root = root.unwrap();
    assert_eq!(
        members(&root),
        [
            ("a".to_string(), Some(Kind::Number)),
            ("b".to_string(), Some(Kind::True))
        ]
    );
    assert_eq!(root.children()[0].number(), Some(1.0));

    let (root, complete) = feed_session(b"tru1");
    assert!(root.is_none());
    assert!(!complete);
}

#[rstest]
#[case::null("null", "null")]
#[case::string(r#""x y""#, r#""x y""#)]
#[case::padded_array(" [ 1 , 2 ] ", "[1,2]")]
#[case::number_with_newline("-7.25\n", "-7.25")]
#[case::number_at_end_of_input("1e3", "1000")]
#[case::empty_object("{}", "{}")]
#[case::empty_array("[]", "[]")]
#[case::slash_escape(r#""a\/b""#, r#""a/b""#)]
fn decodes_top_level_values(#[case] input: &str, #[case] rendered: &str) {
    assert_eq!(decode(input.as_bytes()).unwrap().to_string(), rendered);
}

#[test_log::test]
fn status_tracks_completion() {
    let mut decoder = Decoder::default();
    assert_eq!(feed_all(&mut decoder, br#"{"k":"v""#).unwrap(), Status::Pending);
    assert!(!decoder.is_complete());
    assert_eq!(decoder.feed(b'}').unwrap(), Status::Complete);
    assert!(decoder.is_complete());
    assert_eq!(decoder.feed(b'\n').unwrap(), Status::Complete);
    assert_eq!(decoder.position().offset, 10);
    assert_eq!(decoder.position().line, 2);
}

#[test_log::test]
fn partial_tree_is_observable() {
    let mut decoder = Decoder::default();
    feed_all(&mut decoder, br#"[true,"two",[3"#).unwrap();

    let root = decoder.root().unwrap();
    assert_eq!(root.kind(), Some(Kind::Array));
    assert!(!root.is_complete());
    assert_eq!(root.children().len(), 2);
    assert_eq!(root.children()[1].as_str(), Some("two"));

    let taken = decoder.take().unwrap();
    assert_eq!(taken.children().len(), 2);
    assert!(decoder.root().is_none());
}

#[test_log::test]
fn lenient_whitespace_skips_control_bytes() {
    let input = b"{\x00\"a\"\x1f:\x01[\x0b1\x0c]}";

    assert!(decode(input).is_err());

    let mut decoder = Decoder::new(DecoderOptions {
        lenient_whitespace: true,
        ..Default::default()
    });
    assert_eq!(feed_all(&mut decoder, input).unwrap(), Status::Complete);
    assert_eq!(decoder.finish().unwrap().to_string(), r#"{"a":[1]}"#);
}

#[test_log::test]
fn control_bytes_inside_strings_are_kept() {
    let node = decode(b"[\"\x01\t\x7f\"]").unwrap();
    assert_eq!(node.children()[0].text().unwrap(), &b"\x01\t\x7f"[..]);
}

#[test_log::test]
fn deeply_nested_values() {
    let depth = jsonbyte::DEFAULT_MAX_DEPTH;
    let input = format!("{}{}", r#"{"a":"#.repeat(depth - 1) + "[]", "}".repeat(depth - 1));
    let mut node = &decode(input.as_bytes()).unwrap();
    let mut levels = 1;
    while let Some(child) = node.children().first() {
        node = child;
        levels += 1;
    }
    assert_eq!(levels, depth);
    assert_eq!(node.kind(), Some(Kind::Array));
}
