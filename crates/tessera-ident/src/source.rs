//! Byte sources for identifier generation.
//!
//! The generator only needs "N cryptographically random bytes"; this trait is
//! the seam that lets tests and replays substitute a predictable sequence.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::EntropyError;

/// Supplies random bytes to the identifier generator.
pub trait ByteSource {
    /// Fills `buf` completely or fails.
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError>;
}

/// Operating system CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsByteSource;

impl ByteSource for OsByteSource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError> {
        OsRng.try_fill_bytes(buf)?;
        Ok(())
    }
}

/// Finite, pre-recorded byte sequence consumed front to back.
#[derive(Debug, Clone, Default)]
pub struct FixedByteSource {
    bytes: Vec<u8>,
    pos: usize,
}

impl FixedByteSource {
    /// Creates a source that yields exactly `bytes`.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            pos: 0,
        }
    }

    /// Returns the number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}

impl ByteSource for FixedByteSource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError> {
        let available = self.remaining();
        if buf.len() > available {
            return Err(EntropyError::Exhausted {
                requested: buf.len(),
                available,
            });
        }
        buf.copy_from_slice(&self.bytes[self.pos..self.pos + buf.len()]);
        self.pos += buf.len();
        Ok(())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_source_consumes_in_order() {
        let mut source = FixedByteSource::new((0u8..8).collect::<Vec<_>>());
        let mut first = [0u8; 3];
        let mut second = [0u8; 5];
        source.fill(&mut first).unwrap();
        source.fill(&mut second).unwrap();
        assert_eq!(first, [0, 1, 2]);
        assert_eq!(second, [3, 4, 5, 6, 7]);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_fixed_source_exhaustion_leaves_position() {
        let mut source = FixedByteSource::new(vec![1u8; 4]);
        let mut buf = [0u8; 16];
        let err = source.fill(&mut buf).unwrap_err();
        assert!(matches!(
            err,
            EntropyError::Exhausted {
                requested: 16,
                available: 4
            }
        ));
        assert_eq!(source.remaining(), 4);
    }

    #[test]
    fn test_os_source_fills_buffer() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        OsByteSource.fill(&mut a).unwrap();
        OsByteSource.fill(&mut b).unwrap();
        assert_ne!(a, b);
    }
}
