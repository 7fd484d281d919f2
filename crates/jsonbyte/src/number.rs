//! Number literals have no closing delimiter of their own: a literal ends at
//! the first byte that cannot belong to it, and that byte still has to be seen
//! by the enclosing container.

use bstr::BString;

use crate::ErrorKind;

/// Bytes that may appear inside a number literal.
pub(crate) fn is_number_byte(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'.' | b'e' | b'E' | b'-' | b'+')
}

/// Bytes that end a number literal without being part of it.
pub(crate) fn is_number_terminator(byte: u8, is_whitespace: bool) -> bool {
    is_whitespace || matches!(byte, b',' | b'}' | b']')
}

/// Converts an accumulated literal into a float.
///
/// Parsing goes through `str::parse`, which does not depend on any locale.
/// Literals that only consist of valid bytes but are not numbers (`--1`,
/// `1e`, `1-2`) are rejected, and so are literals too large for an `f64`,
/// since infinity has no JSON spelling.
pub(crate) fn finalize_number(literal: &[u8]) -> Result<f64, ErrorKind> {
    core::str::from_utf8(literal)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .ok_or_else(|| ErrorKind::NumberConversionFailure(BString::from(literal)))
}
