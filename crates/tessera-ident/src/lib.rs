//! Version-4 identifiers for Tessera.
//!
//! An [`Identifier`] is the canonical 36-character hyphenated form of a random
//! RFC 4122 UUID. Generation pulls 16 bytes from a [`ByteSource`] (the OS
//! CSPRNG by default), stamps the version and variant bits, and formats the
//! result. Nothing is retained between calls.
//!
#![deny(missing_docs)]

/// Error types for identifier parsing and entropy failures.
pub mod error;
/// Stateless identifier generator.
pub mod generator;
/// The identifier newtype and its textual layout.
pub mod identifier;
/// Random byte sources consulted by the generator.
pub mod source;

pub use error::{EntropyError, ValidationError};
pub use generator::{generate, IdentifierGenerator};
pub use identifier::Identifier;
pub use source::{ByteSource, FixedByteSource, OsByteSource};
