//! Stateless version-4 identifier generation.

use crate::error::EntropyError;
use crate::identifier::Identifier;
use crate::source::{ByteSource, OsByteSource};

/// Produces version-4 identifiers from a byte source.
///
/// The generator holds no state of its own; every identifier is built from
/// 16 fresh bytes and nothing is remembered between calls.
#[derive(Debug, Default, Clone)]
pub struct IdentifierGenerator<S = OsByteSource> {
    source: S,
}

impl IdentifierGenerator<OsByteSource> {
    /// Creates a generator backed by the OS CSPRNG.
    pub fn new() -> Self {
        Self {
            source: OsByteSource,
        }
    }
}

impl<S: ByteSource> IdentifierGenerator<S> {
    /// Creates a generator reading from `source`.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Generates one identifier.
    ///
    /// # Errors
    ///
    /// Returns [`EntropyError`] when the byte source cannot supply 16 bytes.
    /// The failure is not retried.
    pub fn generate(&mut self) -> Result<Identifier, EntropyError> {
        let mut bytes = [0u8; 16];
        if let Err(err) = self.source.fill(&mut bytes) {
            tracing::debug!(error = %err, "byte source failed during identifier generation");
            return Err(err);
        }
        Ok(Identifier::from_random_bytes(bytes))
    }

    /// Generates `count` identifiers, stopping at the first entropy failure.
    pub fn generate_many(&mut self, count: usize) -> Result<Vec<Identifier>, EntropyError> {
        (0..count).map(|_| self.generate()).collect()
    }

    /// Consumes the generator and returns its byte source.
    pub fn into_source(self) -> S {
        self.source
    }
}

/// Generates one identifier from the OS CSPRNG.
///
/// # Example
///
/// ```rust
/// let id = tessera_ident::generate()?;
/// assert_eq!(id.as_str().len(), 36);
/// assert_eq!(&id.as_str()[14..15], "4");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generate() -> Result<Identifier, EntropyError> {
    IdentifierGenerator::new().generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FixedByteSource;

    #[test]
    fn test_fixed_source_is_deterministic() {
        let bytes: Vec<u8> = (0u8..32).collect();
        let mut generator = IdentifierGenerator::with_source(FixedByteSource::new(bytes));
        let first = generator.generate().unwrap();
        let second = generator.generate().unwrap();
        assert_eq!(first.as_str(), "00010203-0405-4607-8809-0a0b0c0d0e0f");
        assert_eq!(second.as_str(), "10111213-1415-4617-9819-1a1b1c1d1e1f");
    }

    #[test]
    fn test_exhausted_source_propagates() {
        let mut generator = IdentifierGenerator::with_source(FixedByteSource::new(vec![0u8; 20]));
        assert!(generator.generate().is_ok());
        let err = generator.generate().unwrap_err();
        assert!(matches!(err, EntropyError::Exhausted { requested: 16, available: 4 }));
    }

    #[test]
    fn test_generate_many_stops_at_failure() {
        let mut generator = IdentifierGenerator::with_source(FixedByteSource::new(vec![0u8; 40]));
        assert!(generator.generate_many(3).is_err());
        assert_eq!(generator.into_source().remaining(), 8);
    }
}
