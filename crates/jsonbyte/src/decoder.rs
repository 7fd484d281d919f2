//! The per-node state machine.
//!
//! Each [`Node`] carries its own [`ParseState`]. A container forwards every
//! byte that belongs to a nested value to its active child, which may forward
//! it further down, so the recursion depth of [`Node::advance`] equals the
//! nesting depth of the value being decoded. That depth is bounded by
//! [`DecoderOptions::max_depth`].
//!
//! | state               | byte                     | next                       |
//! |---------------------|--------------------------|----------------------------|
//! | `Start`             | `{` / `[`                | `ObjectKey` / `ArrayValue` |
//! | `Start`             | `"`                      | `String`                   |
//! | `Start`             | `t` `f` `n`              | `Keyword`                  |
//! | `Start`             | `-` digit                | `Number`                   |
//! | `ObjectKey`         | `"` (delegated to child) | `ObjectKeyParsed`          |
//! | `ObjectKeyParsed`   | `:`                      | `ObjectValue`              |
//! | `*Value`            | (delegated to child)     | `*ValueParsed`             |
//! | `*ValueParsed`      | `,`                      | `ObjectKey` / `ArrayValue` |
//! | `*ValueParsed`      | `}` / `]`                | `Done`                     |
//! | `String`            | `\`                      | `Escape`                   |
//! | `String`            | `"`                      | `Done`                     |
//! | `Number`            | whitespace `,` `}` `]`   | `Done` (byte replayed)     |

use log::trace;

use crate::{
    DecoderOptions, ErrorKind,
    escape::decode_escape,
    literal::{self, Literal},
    node::{Kind, Node},
    number::{finalize_number, is_number_byte, is_number_terminator},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseState {
    /// No significant byte seen yet.
    Start,
    /// Expecting a member name, or `}` of an empty object.
    ObjectKey,
    ObjectKeyParsed,
    ObjectValue,
    ObjectValueParsed,
    /// Expecting an element, or `]` of an empty array.
    ArrayValue,
    ArrayValueParsed,
    String,
    Escape,
    Number,
    Keyword(Literal),
    Done,
}

/// Outcome of feeding one byte to a node. Failure is the `Err` side of
/// [`Node::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Continue,
    Done,
}

impl Node {
    /// Feeds one byte to this node, where `depth` is the number of
    /// containers enclosing it.
    pub(crate) fn advance(
        &mut self,
        byte: u8,
        options: &DecoderOptions,
        depth: usize,
    ) -> Result<Step, ErrorKind> {
        match self.state {
            ParseState::Start => self.start(byte, options, depth),
            ParseState::ObjectKey => self.object_key(byte, options, depth),
            ParseState::ObjectKeyParsed => self.object_key_parsed(byte, options),
            ParseState::ObjectValue | ParseState::ArrayValue => self.value(byte, options, depth),
            ParseState::ObjectValueParsed | ParseState::ArrayValueParsed => {
                self.value_parsed(byte, options)
            }
            ParseState::String => self.string(byte, options),
            ParseState::Escape => self.escape(byte, options),
            ParseState::Number => self.number_literal(byte, options),
            ParseState::Keyword(literal) => self.keyword(literal, byte),
            ParseState::Done => {
                if options.is_whitespace(byte) {
                    Ok(Step::Done)
                } else {
                    Err(ErrorKind::UnexpectedByte(byte))
                }
            }
        }
    }

    /// Resolves the node when no more bytes are coming.
    ///
    /// Only a number can be completed this way: every other value has its own
    /// closing byte.
    pub(crate) fn end_of_input(&mut self) -> Result<(), ErrorKind> {
        match self.state {
            ParseState::Done => Ok(()),
            ParseState::Number => {
                self.number = finalize_number(self.scratch.as_bytes())?;
                self.complete();
                Ok(())
            }
            _ => Err(ErrorKind::UnexpectedEndOfInput),
        }
    }

    fn begin(&mut self, kind: Kind, state: ParseState) {
        self.kind = Some(kind);
        self.state = state;
    }

    fn start(&mut self, byte: u8, options: &DecoderOptions, depth: usize) -> Result<Step, ErrorKind> {
        if options.is_whitespace(byte) {
            return Ok(Step::Continue);
        }
        match byte {
            b'{' | b'[' => {
                if depth >= options.max_depth {
                    return Err(ErrorKind::DepthLimitExceeded(options.max_depth));
                }
                if byte == b'{' {
                    self.begin(Kind::Object, ParseState::ObjectKey);
                } else {
                    self.begin(Kind::Array, ParseState::ArrayValue);
                }
                trace!("open {:?} at depth {depth}", self.kind);
            }
            b'"' => self.begin(Kind::String, ParseState::String),
            b'-' | b'0'..=b'9' => {
                self.begin(Kind::Number, ParseState::Number);
                self.scratch.push(byte, options.max_token_len)?;
            }
            _ => {
                let Some(literal) = Literal::from_first_byte(byte) else {
                    return Err(ErrorKind::UnexpectedByte(byte));
                };
                self.begin(literal.kind(), ParseState::Keyword(literal));
                self.scratch.push(byte, None)?;
            }
        }
        Ok(Step::Continue)
    }

    fn object_key(&mut self, byte: u8, options: &DecoderOptions, depth: usize) -> Result<Step, ErrorKind> {
        if let Some(child) = self.active.as_deref_mut() {
            if child.advance(byte, options, depth + 1)? == Step::Done {
                child.promote_to_member();
                trace!("member {:?}", child.key);
                self.state = ParseState::ObjectKeyParsed;
            }
            return Ok(Step::Continue);
        }
        if options.is_whitespace(byte) {
            return Ok(Step::Continue);
        }
        match byte {
            b'"' => {
                self.open_child().advance(byte, options, depth + 1)?;
                Ok(Step::Continue)
            }
            // Only directly after `{`: a `}` following a comma is a trailing comma.
            b'}' if self.children.is_empty() => Ok(self.finish_container()),
            b']' => Err(ErrorKind::MismatchedTerminator {
                expected: b'}',
                found: byte,
            }),
            _ => Err(ErrorKind::UnexpectedByte(byte)),
        }
    }

    fn object_key_parsed(&mut self, byte: u8, options: &DecoderOptions) -> Result<Step, ErrorKind> {
        if options.is_whitespace(byte) {
            return Ok(Step::Continue);
        }
        if byte == b':' {
            self.state = ParseState::ObjectValue;
            Ok(Step::Continue)
        } else {
            Err(ErrorKind::UnexpectedByte(byte))
        }
    }

    fn value(&mut self, byte: u8, options: &DecoderOptions, depth: usize) -> Result<Step, ErrorKind> {
        let in_array = self.state == ParseState::ArrayValue;
        if self.active.is_none() {
            if options.is_whitespace(byte) {
                return Ok(Step::Continue);
            }
            if in_array {
                match byte {
                    b']' if self.children.is_empty() => return Ok(self.finish_container()),
                    b'}' => {
                        return Err(ErrorKind::MismatchedTerminator {
                            expected: b']',
                            found: byte,
                        });
                    }
                    _ => {}
                }
            }
        }

        let child = self.active.get_or_insert_with(|| alloc::boxed::Box::new(Node::new()));
        if child.advance(byte, options, depth + 1)? == Step::Continue {
            return Ok(Step::Continue);
        }

        let kind = self.close_child()?;
        self.state = if in_array {
            ParseState::ArrayValueParsed
        } else {
            ParseState::ObjectValueParsed
        };
        if kind == Some(Kind::Number) {
            // The byte that ended the number was not part of it.
            return self.advance(byte, options, depth);
        }
        Ok(Step::Continue)
    }

    fn value_parsed(&mut self, byte: u8, options: &DecoderOptions) -> Result<Step, ErrorKind> {
        if options.is_whitespace(byte) {
            return Ok(Step::Continue);
        }
        let (close, other, next) = if self.state == ParseState::ArrayValueParsed {
            (b']', b'}', ParseState::ArrayValue)
        } else {
            (b'}', b']', ParseState::ObjectKey)
        };
        match byte {
            b',' => {
                self.state = next;
                Ok(Step::Continue)
            }
            b if b == close => Ok(self.finish_container()),
            b if b == other => Err(ErrorKind::MismatchedTerminator {
                expected: close,
                found: byte,
            }),
            _ => Err(ErrorKind::UnexpectedByte(byte)),
        }
    }

    fn finish_container(&mut self) -> Step {
        trace!("close {:?} with {} children", self.kind, self.children.len());
        self.complete();
        Step::Done
    }

    fn string(&mut self, byte: u8, options: &DecoderOptions) -> Result<Step, ErrorKind> {
        match byte {
            b'"' => {
                trace!("string of {} bytes", self.scratch.len());
                self.text = Some(self.scratch.finish());
                self.complete();
                Ok(Step::Done)
            }
            b'\\' => {
                self.state = ParseState::Escape;
                Ok(Step::Continue)
            }
            _ => {
                self.scratch.push(byte, options.max_token_len)?;
                Ok(Step::Continue)
            }
        }
    }

    fn escape(&mut self, byte: u8, options: &DecoderOptions) -> Result<Step, ErrorKind> {
        let decoded = decode_escape(byte)?;
        self.scratch.push(decoded, options.max_token_len)?;
        self.state = ParseState::String;
        Ok(Step::Continue)
    }

    fn number_literal(&mut self, byte: u8, options: &DecoderOptions) -> Result<Step, ErrorKind> {
        if is_number_byte(byte) {
            self.scratch.push(byte, options.max_token_len)?;
            Ok(Step::Continue)
        } else if is_number_terminator(byte, options.is_whitespace(byte)) {
            self.number = finalize_number(self.scratch.as_bytes())?;
            self.complete();
            Ok(Step::Done)
        } else {
            Err(ErrorKind::UnexpectedByte(byte))
        }
    }

    fn keyword(&mut self, literal: Literal, byte: u8) -> Result<Step, ErrorKind> {
        self.scratch.push(byte, None)?;
        match literal.check(self.scratch.as_bytes())? {
            literal::Step::NeedMore => Ok(Step::Continue),
            literal::Step::Done => {
                self.complete();
                Ok(Step::Done)
            }
        }
    }
}
