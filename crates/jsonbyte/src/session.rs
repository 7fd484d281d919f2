//! The session driver: the entry points that feed bytes into a tree.
//!
//! A session decodes exactly one top-level value. All of its state lives in
//! the tree it is building (and, for [`Decoder`], in a byte position used for
//! diagnostics), so a session can be suspended between any two bytes for as
//! long as the caller likes, moved to another thread, or abandoned by simply
//! dropping it.

use log::debug;

use crate::{
    DecodeError, DecoderOptions, ErrorKind, Position,
    decoder::Step,
    node::{Kind, Node},
};

/// Progress of a session after a byte has been accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// More bytes are needed.
    Pending,
    /// The top-level value is complete.
    Complete,
}

impl From<Step> for Status {
    fn from(step: Step) -> Self {
        match step {
            Step::Continue => Status::Pending,
            Step::Done => Status::Complete,
        }
    }
}

/// Feeds one byte to the root of a session.
fn advance_root(root: &mut Node, byte: u8, options: &DecoderOptions) -> Result<Step, ErrorKind> {
    let was_complete = root.is_complete();
    let step = root.advance(byte, options, 0)?;
    if step == Step::Done && !was_complete && root.kind() == Some(Kind::Number) {
        // A top-level number has no container to hand its terminator to;
        // the completed root sees it instead and accepts only whitespace.
        return root.advance(byte, options, 0);
    }
    Ok(step)
}

/// Feeds one byte into a session, using default [`DecoderOptions`].
///
/// Pass `None` to start a new session, then pass back the returned node with
/// every following byte. The returned flag is `true` once the top-level value
/// is complete; the caller then owns the finished tree and must start a new
/// session for the next value.
///
/// On any decoding failure the whole tree is dropped and `(None, false)` is
/// returned. Use [`Decoder`] to learn why a session failed.
///
/// A top-level number has no closing byte of its own and completes only
/// when a whitespace byte follows it; [`Decoder::finish`] resolves it at end
/// of input instead.
///
/// # Examples
///
/// ```
/// let mut root = None;
/// let mut complete = false;
/// for &byte in br#"{"a":[1,2]}"# {
///     (root, complete) = jsonbyte::feed(root, byte);
/// }
/// assert!(complete);
/// assert_eq!(root.unwrap().to_string(), r#"{"a":[1,2]}"#);
///
/// let (root, complete) = jsonbyte::feed(None, b'}');
/// assert!(root.is_none() && !complete);
/// ```
#[must_use]
pub fn feed(root: Option<Node>, byte: u8) -> (Option<Node>, bool) {
    let mut root = root.unwrap_or_else(Node::new);
    match advance_root(&mut root, byte, &DecoderOptions::default()) {
        Ok(step) => (Some(root), step == Step::Done),
        Err(err) => {
            debug!("session failed at byte {byte:#04x}: {err}");
            (None, false)
        }
    }
}

/// A decoding session with options and error reporting.
///
/// # Examples
///
/// ```
/// use jsonbyte::{Decoder, Status};
///
/// let mut decoder = Decoder::default();
/// for &byte in b"[true, \"x\"" {
///     assert_eq!(decoder.feed(byte).unwrap(), Status::Pending);
/// }
/// assert_eq!(decoder.feed(b']').unwrap(), Status::Complete);
/// let tree = decoder.finish().unwrap();
/// assert_eq!(tree.children().len(), 2);
/// ```
#[derive(Debug)]
pub struct Decoder {
    options: DecoderOptions,
    root: Option<Node>,
    position: Position,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DecoderOptions::default())
    }
}

impl Decoder {
    /// Creates a session with the given options.
    #[must_use]
    pub fn new(options: DecoderOptions) -> Self {
        Self {
            options,
            root: None,
            position: Position::START,
        }
    }

    /// Feeds one byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the byte is not valid at this point of the value.
    /// The partially built tree is dropped, and the next byte fed starts a
    /// new session.
    pub fn feed(&mut self, byte: u8) -> Result<Status, DecodeError> {
        let root = self.root.get_or_insert_with(Node::new);
        let was_complete = root.is_complete();
        match advance_root(root, byte, &self.options) {
            Ok(step) => {
                if step == Step::Done && !was_complete {
                    debug!("value complete after {} bytes", self.position.offset + 1);
                }
                self.position.advance(byte);
                Ok(step.into())
            }
            Err(kind) => Err(self.fail(kind)),
        }
    }

    /// Signals that no more bytes are coming and returns the tree.
    ///
    /// A top-level number still waiting for a delimiter is completed here.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnexpectedEndOfInput`] if no value was started or
    /// the value is incomplete, and [`ErrorKind::NumberConversionFailure`] if
    /// a pending number is malformed.
    pub fn finish(mut self) -> Result<Node, DecodeError> {
        let Some(mut root) = self.root.take() else {
            return Err(self.fail(ErrorKind::UnexpectedEndOfInput));
        };
        match root.end_of_input() {
            Ok(()) => Ok(root),
            Err(kind) => Err(self.fail(kind)),
        }
    }

    /// Returns `true` once the top-level value is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.root.as_ref().is_some_and(Node::is_complete)
    }

    /// The tree built so far, if any byte has been fed.
    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Hands the tree, complete or not, to the caller and starts over.
    pub fn take(&mut self) -> Option<Node> {
        self.position = Position::START;
        self.root.take()
    }

    /// Drops the tree built so far and starts over.
    pub fn reset(&mut self) {
        self.position = Position::START;
        self.root = None;
    }

    /// Position of the next byte to be fed.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The options this session was created with.
    #[must_use]
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    fn fail(&mut self, kind: ErrorKind) -> DecodeError {
        let err = DecodeError::new(kind, self.position);
        debug!("session failed: {err}");
        self.reset();
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.options.panic_on_error, "{err}");
        err
    }
}

/// Decodes a complete document held in memory, one byte at a time.
///
/// # Errors
///
/// Returns the first decoding error, including trailing bytes other than
/// whitespace after the value.
///
/// # Examples
///
/// ```
/// let node = jsonbyte::decode(b"[1, 2, 3]").unwrap();
/// let numbers: Vec<f64> = node.children().iter().filter_map(|n| n.number()).collect();
/// assert_eq!(numbers, [1.0, 2.0, 3.0]);
///
/// assert!(jsonbyte::decode(b"[1, 2,]").is_err());
/// ```
pub fn decode(bytes: &[u8]) -> Result<Node, DecodeError> {
    let mut decoder = Decoder::default();
    for &byte in bytes {
        decoder.feed(byte)?;
    }
    decoder.finish()
}
