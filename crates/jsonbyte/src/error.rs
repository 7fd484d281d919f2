use bstr::BString;
use core::ascii::{self, EscapeDefault};
use thiserror::Error;

/// Where in the input stream an error was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Zero-based count of bytes fed before the failing byte.
    pub offset: usize,
    /// One-based line of the failing byte.
    pub line: usize,
    /// One-based column (in bytes) of the failing byte.
    pub column: usize,
}

impl Position {
    pub(crate) const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };

    pub(crate) fn advance(&mut self, byte: u8) {
        self.offset += 1;
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

/// A decoding failure, together with the position of the byte that caused it.
///
/// Every failure is fatal for the session it occurred in: the partially built
/// tree has already been dropped by the time the caller sees this value.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at {}:{}", .position.line, .position.column)]
pub struct DecodeError {
    pub(crate) kind: ErrorKind,
    pub(crate) position: Position,
}

impl DecodeError {
    pub(crate) fn new(kind: ErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// The category of the failure.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Position of the rejected byte (or of end of input).
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }
}

/// The failure categories of the decoder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The byte is not accepted by the current state.
    #[error("unexpected byte '{}'", show(.0))]
    UnexpectedByte(u8),
    /// The byte after a backslash is not a supported escape.
    #[error("invalid escape sequence '\\{}'", show(.0))]
    InvalidEscape(u8),
    /// A `true`, `false` or `null` keyword was misspelled.
    #[error("invalid literal, expected `{expected}`")]
    LiteralMismatch {
        /// The keyword that was being matched.
        expected: &'static str,
    },
    /// A `]` closed an object or a `}` closed an array.
    #[error("mismatched terminator '{}', expected '{}'", show(.found), show(.expected))]
    MismatchedTerminator {
        /// The terminator of the open container.
        expected: u8,
        /// The terminator that arrived.
        found: u8,
    },
    /// The accumulated number literal is not a valid number.
    #[error("invalid number literal {0:?}")]
    NumberConversionFailure(BString),
    /// A token buffer or a container's child list could not grow.
    ///
    /// Nodes themselves are boxed with the infallible global allocator, so
    /// running out of memory while opening a value aborts instead.
    #[error("allocation failure")]
    AllocationFailure,
    /// A token grew beyond the configured limit.
    #[error("token longer than {0} bytes")]
    TokenTooLong(usize),
    /// A container was opened beyond the configured depth.
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
    /// Input ended before the value was complete.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

fn show(byte: &u8) -> EscapeDefault {
    ascii::escape_default(*byte)
}
