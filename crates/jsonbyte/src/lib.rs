//! A byte-at-a-time JSON decoder.
//!
//! Every call accepts exactly one input byte and advances an explicit parse
//! state stored in the value tree under construction. Nothing blocks and
//! nothing is shared between sessions, which makes the decoder a fit for
//! input that trickles in over sockets, serial lines or terminals.
//!
//! ```rust
//! use jsonbyte::{Decoder, Kind, Status};
//!
//! let mut decoder = Decoder::default();
//! let mut status = Status::Pending;
//! for &byte in br#"{"id": 7, "tags": ["a", "b"]}"# {
//!     status = decoder.feed(byte).unwrap();
//! }
//! assert_eq!(status, Status::Complete);
//!
//! let tree = decoder.finish().unwrap();
//! assert_eq!(tree.kind(), Some(Kind::Object));
//! assert_eq!(tree.children()[0].number(), Some(7.0));
//! assert_eq!(tree.children()[1].children()[1].as_str(), Some("b"));
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod decoder;
mod error;
mod escape;
mod literal;
mod node;
mod number;
mod options;
mod session;
mod token;

#[cfg(test)]
mod tests;

pub use error::{DecodeError, ErrorKind, Position};
pub use node::{Kind, Node};
pub use options::{DEFAULT_MAX_DEPTH, DecoderOptions};
pub use session::{Decoder, Status, decode, feed};
