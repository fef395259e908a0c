use thiserror::Error;

/// Validation errors for identifier text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// When a value does not match the version-4 layout.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Failure to obtain random bytes.
///
/// These are never retried: an entropy source that cannot deliver means the
/// runtime environment is unusable.
#[derive(Debug, Error)]
pub enum EntropyError {
    /// The operating system random source reported an error.
    #[error("entropy source failed: {0}")]
    Source(#[from] rand::Error),
    /// A finite byte source ran out of bytes.
    #[error("entropy source exhausted: requested {requested} bytes, {available} available")]
    Exhausted {
        /// Bytes requested by the caller.
        requested: usize,
        /// Bytes left in the source.
        available: usize,
    },
}
