//! The value tree.
//!
//! A [`Node`] is created the moment a byte arrives that starts a new value
//! and is mutated by the decoder until it completes. Completed children are
//! kept in document order; the single child that is still being decoded is
//! held apart from them and appended once it completes, so the order of
//! [`Node::children`] is always the order of the input.
//!
//! # Examples
//!
//! ```
//! use jsonbyte::{Kind, decode};
//!
//! let node = decode(br#"{"a":1,"b":[true,null]}"#).unwrap();
//! assert_eq!(node.kind(), Some(Kind::Object));
//! let members = node.children();
//! assert_eq!(members[0].key().unwrap(), "a");
//! assert_eq!(members[0].number(), Some(1.0));
//! assert_eq!(members[1].children().len(), 2);
//! assert_eq!(node.to_string(), r#"{"a":1,"b":[true,null]}"#);
//! ```
#[cfg(any(test, feature = "serde"))]
use alloc::borrow::Cow;
use alloc::{boxed::Box, vec::Vec};
use core::fmt::{self, Write};

use bstr::{BStr, BString, ByteSlice};

use crate::{ErrorKind, decoder::ParseState, token::TokenBuffer};

/// The type of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `null`
    Null,
    /// `false`
    False,
    /// `true`
    True,
    /// A number, held as `f64`.
    Number,
    /// A string, held as bytes.
    String,
    /// An ordered sequence of values.
    Array,
    /// An ordered sequence of keyed values.
    Object,
}

impl Kind {
    /// Returns `true` for [`Kind::Array`] and [`Kind::Object`].
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, Kind::Array | Kind::Object)
    }
}

/// A node of the decoded value tree.
///
/// The public accessors describe the node once it is complete. While a
/// session is still running, a node may lack its payload: a string's text,
/// for example, only appears when its closing quote has been decoded.
pub struct Node {
    pub(crate) kind: Option<Kind>,
    pub(crate) number: f64,
    pub(crate) text: Option<BString>,
    pub(crate) key: Option<BString>,
    pub(crate) children: Vec<Node>,

    pub(crate) state: ParseState,
    pub(crate) scratch: TokenBuffer,
    /// The child currently being decoded; not yet part of `children`.
    pub(crate) active: Option<Box<Node>>,
}

impl Node {
    pub(crate) fn new() -> Self {
        Self {
            kind: None,
            number: 0.0,
            text: None,
            key: None,
            children: Vec::new(),
            state: ParseState::Start,
            scratch: TokenBuffer::new(),
            active: None,
        }
    }

    /// The type of the value, once its first byte has been seen.
    #[must_use]
    pub fn kind(&self) -> Option<Kind> {
        self.kind
    }

    /// Returns `true` once the value has been fully decoded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == ParseState::Done
    }

    /// The numeric value of a complete number.
    #[must_use]
    pub fn number(&self) -> Option<f64> {
        (self.kind == Some(Kind::Number) && self.is_complete()).then_some(self.number)
    }

    /// The decoded bytes of a complete string.
    ///
    /// String content is not validated as UTF-8.
    #[must_use]
    pub fn text(&self) -> Option<&BStr> {
        match self.kind {
            Some(Kind::String) => self.text.as_ref().map(BStr::new),
            _ => None,
        }
    }

    /// The content of a complete string, if it is valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.text().and_then(|t| t.to_str().ok())
    }

    /// The boolean value of a complete `true` or `false`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            Some(Kind::True) if self.is_complete() => Some(true),
            Some(Kind::False) if self.is_complete() => Some(false),
            _ => None,
        }
    }

    /// Returns `true` for a complete `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.kind == Some(Kind::Null) && self.is_complete()
    }

    /// The member name, for a child of an object. `None` for array elements
    /// and for the root.
    #[must_use]
    pub fn key(&self) -> Option<&BStr> {
        self.key.as_ref().map(BStr::new)
    }

    /// The completed children of an array or object, in document order.
    ///
    /// Empty for every other kind, and for empty containers.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    // ─── tree building ──────────────────────────────────────────────────────

    /// Starts a new active child.
    pub(crate) fn open_child(&mut self) -> &mut Node {
        self.active.insert(Box::new(Node::new()))
    }

    /// Turns a completed key string into the holder of the member's value:
    /// the decoded text becomes the key and the node starts over.
    pub(crate) fn promote_to_member(&mut self) {
        self.key = self.text.take();
        self.kind = None;
        self.state = ParseState::Start;
    }

    /// Appends the completed active child after the existing ones and returns
    /// its kind.
    pub(crate) fn close_child(&mut self) -> Result<Option<Kind>, ErrorKind> {
        let Some(child) = self.active.take() else {
            return Ok(None);
        };
        debug_assert!(child.is_complete());
        self.children
            .try_reserve(1)
            .map_err(|_| ErrorKind::AllocationFailure)?;
        let kind = child.kind;
        self.children.push(*child);
        Ok(kind)
    }

    /// Marks the node as complete and releases the parser bookkeeping.
    pub(crate) fn complete(&mut self) {
        self.state = ParseState::Done;
        self.scratch.discard();
        self.active = None;
    }

    #[cfg(any(test, feature = "serde"))]
    fn text_lossy(&self) -> Cow<'_, str> {
        self.text.as_ref().map_or(Cow::Borrowed(""), |t| t.to_str_lossy())
    }
}

impl PartialEq for Node {
    /// Compares the decoded values, including keys, ignoring any parser
    /// bookkeeping.
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.key == other.key
            && match self.kind {
                Some(Kind::Number) => self.number == other.number,
                Some(Kind::String) => self.text == other.text,
                _ => true,
            }
            && self.children == other.children
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Node");
        s.field("kind", &self.kind);
        if let Some(key) = &self.key {
            s.field("key", key);
        }
        match self.kind {
            Some(Kind::Number) => {
                s.field("number", &self.number);
            }
            Some(Kind::String) => {
                s.field("text", &self.text);
            }
            Some(Kind::Array | Kind::Object) => {
                s.field("children", &self.children);
            }
            _ => {}
        }
        if !self.is_complete() {
            s.field("state", &self.state);
        }
        s.finish()
    }
}

fn bytes_of(s: Option<&BString>) -> &[u8] {
    s.map_or(&[][..], |s| s.as_slice())
}

/// Writes `src` as the body of a JSON string literal. Bytes that are not
/// UTF-8 come out as U+FFFD. Control bytes without a short escape are
/// written raw, as the decoder has no `\u` escape to read them back.
fn write_escaped<W: Write>(src: &[u8], f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\x08' => f.write_str("\\b")?,
            '\x0c' => f.write_str("\\f")?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Renders the tree as compact JSON.
///
/// Meant for complete trees. Values that are still being decoded render as
/// `null`, and containers render only their completed children.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Some(Kind::False) if self.is_complete() => f.write_str("false"),
            Some(Kind::True) if self.is_complete() => f.write_str("true"),
            Some(Kind::Number) if self.is_complete() => write!(f, "{}", self.number),
            Some(Kind::String) if self.text.is_some() => {
                f.write_char('"')?;
                write_escaped(bytes_of(self.text.as_ref()), f)?;
                f.write_char('"')
            }
            Some(Kind::Array) => {
                f.write_char('[')?;
                for (i, child) in self.children.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_char(']')
            }
            Some(Kind::Object) => {
                f.write_char('{')?;
                for (i, child) in self.children.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    f.write_char('"')?;
                    write_escaped(bytes_of(child.key.as_ref()), f)?;
                    write!(f, "\":{child}")?;
                }
                f.write_char('}')
            }
            _ => f.write_str("null"),
        }
    }
}

#[cfg(any(test, feature = "serde"))]
impl serde::Serialize for Node {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self.kind {
            Some(Kind::True) => serializer.serialize_bool(true),
            Some(Kind::False) => serializer.serialize_bool(false),
            Some(Kind::Number) => serializer.serialize_f64(self.number),
            Some(Kind::String) => serializer.serialize_str(&self.text_lossy()),
            Some(Kind::Array) => {
                let mut seq = serializer.serialize_seq(Some(self.children.len()))?;
                for child in &self.children {
                    seq.serialize_element(child)?;
                }
                seq.end()
            }
            Some(Kind::Object) => {
                let mut map = serializer.serialize_map(Some(self.children.len()))?;
                for child in &self.children {
                    let key = child.key.as_ref().map_or(Cow::Borrowed(""), |k| k.to_str_lossy());
                    map.serialize_entry(&*key, child)?;
                }
                map.end()
            }
            Some(Kind::Null) | None => serializer.serialize_unit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::decode;

    #[test]
    fn accessors_by_kind() {
        let node = decode(br#"[null,true,false,-2.5,"hi"]"#).unwrap();
        let c = node.children();
        assert!(c[0].is_null());
        assert_eq!(c[1].as_bool(), Some(true));
        assert_eq!(c[2].as_bool(), Some(false));
        assert_eq!(c[3].number(), Some(-2.5));
        assert_eq!(c[4].as_str(), Some("hi"));
        assert_eq!(c[4].number(), None);
        assert_eq!(c[3].text(), None);
        assert!(c.iter().all(|n| n.key().is_none() && n.children().is_empty()));
    }

    #[test]
    fn non_utf8_text_is_kept_as_bytes() {
        let node = decode(b"\"a\xffb\"").unwrap();
        assert_eq!(node.text().unwrap(), &b"a\xffb"[..]);
        assert_eq!(node.as_str(), None);
        assert_eq!(node.to_string(), "\"a\u{FFFD}b\"");
    }

    #[test]
    fn display_escapes() {
        let node = decode(br#"{"k\"":"a\nb\u0001"}"#);
        // `\u` is not a supported escape.
        assert!(node.is_err());

        let node = decode(b"\"tab\\there \\\\ \x01\\b\"").unwrap();
        assert_eq!(node.to_string(), "\"tab\\there \\\\ \x01\\b\"");
    }

    #[test]
    fn display_output_decodes_again() {
        let node = decode(b"[\"a\x01b\",{\"\x1f\":\"\x7f\\f\"}]").unwrap();
        let rendered = node.to_string();
        assert_eq!(rendered, "[\"a\x01b\",{\"\x1f\":\"\x7f\\f\"}]");
        assert_eq!(decode(rendered.as_bytes()).unwrap(), node);
    }

    #[test]
    fn equality_ignores_bookkeeping() {
        let a = decode(b"[1, {\"x\" : \"y\"}]").unwrap();
        let b = decode(br#"[1,{"x":"y"}]"#).unwrap();
        assert_eq!(a, b);
        let c = decode(br#"[1,{"x":"z"}]"#).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn serializes_in_document_order() {
        let node = decode(br#"{"z":1,"a":[true,"s"],"m":null}"#).unwrap();
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"z":1.0,"a":[true,"s"],"m":null}"#);
    }
}
