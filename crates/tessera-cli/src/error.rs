use tessera_codec::CodecError;
use tessera_ident::EntropyError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Input could not be read.
    #[error("failed to read {source_name}: {source}")]
    Input {
        source_name: String,
        #[source]
        source: std::io::Error,
    },
    /// Encoding or decoding failed.
    #[error("{} (code {})", .0.message(), .0.code())]
    Codec(#[from] CodecError),
    /// The entropy source failed.
    #[error("{0}")]
    Entropy(#[from] EntropyError),
    /// The failure was already reported on stdout.
    #[error("{0}")]
    Reported(String),
}
