#![allow(missing_docs, dead_code)]
#![expect(clippy::needless_raw_string_hashes)]

use jsonbyte::{DecodeError, Decoder, Node, Status};

pub const ORIGINAL: &str = r#"
{
    "moderation": {
        "decision": "allow",
        "reason": null
    },
    "request": {
        "filename": "example.rs",
        "language": "rust",
        "options": {
            "opt_level": 2,
            "features": [
                "serde",
                "tokio"
            ]
        }
    },
    "snippets": [
        "fn main() {}",
        "println!(\"hi\")"
    ],
    "entities": [
        {
            "type": "function",
            "name": "main"
        },
        {
            "type": "macro",
            "name": "println"
        }
    ],
    "matrix": [
        [
            "a"
        ]
    ],
    "mixed": [
        "s",
        {
            "k": "v"
        },
        "t",
        [
            "u"
        ],
        "end"
    ],
    "trailing": {
        "status": "ok"
    },
    "object_in_array_last": [
        {
            "a": 1
        }
    ],
    "nested_objects": {
        "outer": {
            "inner": -150.5
        }
    }
}"#;

// The compact form of `ORIGINAL`, cut where bytes arrive in separate reads.
// Cuts land on transition seams: inside strings, between a value and its
// terminator, and inside number literals.
#[rustfmt::skip]
pub const STREAM: [&str; 22] = [
    r#"{"moderation":{"decision":"al"#,                                       // inside a string
    r#"lo"#,
    r#"w","reason":null},""#,                                                 // object end, then a key starts
    r#"request":{"filename":"example.rs""#,
    r#","language":"rust","#,
    r#""options":{"opt_level":2"#,                                            // number waiting for its terminator
    r#","features":["serde""#,
    r#","tokio"]}"#,
    r#"}"#,
    r#","snippets":["#,
    r#""fn main() {}","#,
    r#""println!(\"hi\")"]"#,
    r#","entities":[{"type":"function","name":"main"},{"type":"macro","name":"println"}]"#,
    r#","matrix":[["a"]]"#,
    r#","mixed":["s",{"k":"v"}"#,
    r#","t""#,
    r#",["u"]"#,
    r#","end"]"#,
    r#","trailing":{"status":"ok"}"#,
    r#","object_in_array_last":[{"a":1}]"#,                                   // number ended by `}`
    r#","nested_objects":{"outer":{"inner":-150"#,                            // cut inside a number
    r#".5}}}"#,
];

/// Feeds every byte of `input`, returning the last status.
pub fn feed_all(decoder: &mut Decoder, input: &[u8]) -> Result<Status, DecodeError> {
    let mut status = Status::Pending;
    for &byte in input {
        status = decoder.feed(byte)?;
    }
    Ok(status)
}

/// Decodes `input` with the free-function API.
pub fn feed_session(input: &[u8]) -> (Option<Node>, bool) {
    let mut root = None;
    let mut complete = false;
    for &byte in input {
        (root, complete) = jsonbyte::feed(root, byte);
    }
    (root, complete)
}

#[test]
fn stream_is_compact_original() {
    let streamed = STREAM.join("");

    let value: serde_json::Value = serde_json::from_str(ORIGINAL).unwrap();
    let original = serde_json::to_string(&value).unwrap();

    assert_eq!(streamed, original);
}
