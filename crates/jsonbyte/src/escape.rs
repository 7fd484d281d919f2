//! Decoding of the byte that follows a backslash inside a string.
//!
//! Only the single-byte escapes are supported. `\u` followed by four hex
//! digits is rejected like any other unknown introducer: the decoder never
//! passes it through undecoded.

use crate::ErrorKind;

/// Maps an escape introducer to the byte it stands for.
pub(crate) fn decode_escape(byte: u8) -> Result<u8, ErrorKind> {
    match byte {
        b'b' => Ok(0x08),
        b'f' => Ok(0x0C),
        b'n' => Ok(b'\n'),
        b'r' => Ok(b'\r'),
        b't' => Ok(b'\t'),
        b'"' | b'\\' | b'/' => Ok(byte),
        _ => Err(ErrorKind::InvalidEscape(byte)),
    }
}
