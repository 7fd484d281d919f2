//! Per-node accumulation of token bytes.
//!
//! Strings, object keys, number literals and keywords arrive one byte at a
//! time. The node that is currently accumulating one of them owns a
//! [`TokenBuffer`]; no buffer is shared between nodes or sessions.

use alloc::vec::Vec;

use bstr::BString;

use crate::ErrorKind;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct TokenBuffer {
    bytes: Vec<u8>,
}

impl TokenBuffer {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Appends one byte, growing the buffer fallibly.
    pub fn push(&mut self, byte: u8, limit: Option<usize>) -> Result<(), ErrorKind> {
        if let Some(limit) = limit {
            if self.bytes.len() >= limit {
                return Err(ErrorKind::TokenTooLong(limit));
            }
        }
        self.bytes
            .try_reserve(1)
            .map_err(|_| ErrorKind::AllocationFailure)?;
        self.bytes.push(byte);
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Hands out the accumulated content and leaves the buffer empty, with
    /// no capacity retained.
    pub fn finish(&mut self) -> BString {
        BString::from(core::mem::take(&mut self.bytes))
    }

    pub fn discard(&mut self) {
        self.bytes = Vec::new();
    }
}
