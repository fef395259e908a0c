//! JSON encoding and decoding for Tessera value graphs.
//!
//! [`encode`] normalizes a [`Node`] graph (self-describing objects, markup
//! elements and plain objects become mappings) and serializes it with the
//! escaping selected by [`EncodeOptions`]. [`decode`] parses JSON text back
//! into a graph. Every failure on either path surfaces as a single
//! [`CodecError`] carrying a numeric code and a fixed message.
//!
#![deny(missing_docs)]

/// Encode/decode entry points.
pub mod codec;
/// Error kinds and the unified codec error.
pub mod error;
/// Escaping formatter used during serialization.
mod formatter;
/// The in-memory value graph.
pub mod node;
/// Encoder option bitmask.
pub mod options;
/// Pre-processing pass applied before serialization.
pub mod process;

pub use codec::{decode, decode_slice, decode_str, encode, html_encode};
pub use error::{CodecError, ErrorKind};
pub use node::{Element, JsonSerializable, Node, Object};
pub use options::EncodeOptions;
pub use process::{process_data, MAX_DEPTH};
