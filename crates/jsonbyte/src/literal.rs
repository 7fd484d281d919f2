use crate::{ErrorKind, node::Kind};

/// One of the three keyword values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    Null,
    True,
    False,
}

/// What happened after feeding one more byte into the keyword matcher?
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// The accumulated bytes are a prefix of the keyword.
    NeedMore,
    /// The accumulated bytes spell the whole keyword.
    Done,
}

impl Literal {
    /// The keyword started by `first`, if any.
    pub fn from_first_byte(first: u8) -> Option<Self> {
        match first {
            b'n' => Some(Literal::Null),
            b't' => Some(Literal::True),
            b'f' => Some(Literal::False),
            _ => None,
        }
    }

    pub fn spelling(self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::True => "true",
            Literal::False => "false",
        }
    }

    pub fn kind(self) -> Kind {
        match self {
            Literal::Null => Kind::Null,
            Literal::True => Kind::True,
            Literal::False => Kind::False,
        }
    }

    /// Checks the accumulated bytes against the keyword.
    ///
    /// A mismatch is reported at the first byte that diverges rather than
    /// after the full keyword length has been read.
    pub fn check(self, accumulated: &[u8]) -> Result<Step, ErrorKind> {
        let expected = self.spelling().as_bytes();
        if !expected.starts_with(accumulated) {
            return Err(ErrorKind::LiteralMismatch {
                expected: self.spelling(),
            });
        }
        if accumulated.len() == expected.len() {
            Ok(Step::Done)
        } else {
            Ok(Step::NeedMore)
        }
    }
}
