use std::fmt;

/// Closed set of codec fault categories.
///
/// Codes 1 through 8 follow the conventional JSON error numbering, so a
/// caller comparing numeric codes sees the values it expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input shape rejected before any parsing took place.
    InvalidArgument,
    /// Nesting exceeded the supported depth.
    Depth,
    /// Mismatched brackets or an otherwise inconsistent structure.
    StateMismatch,
    /// Unescaped or invalid control character.
    CtrlChar,
    /// Generic syntax fault, also used for formatter failures during encode.
    Syntax,
    /// Invalid UTF-8 or an unpaired surrogate escape.
    Utf8,
    /// A self-describing object appears inside its own representation.
    Recursion,
    /// NaN or an infinity in the value graph.
    InfOrNan,
    /// A value that has no JSON representation.
    UnsupportedType,
    /// Anything the categories above do not cover.
    Unknown,
}

impl ErrorKind {
    const ALL: [ErrorKind; 10] = [
        ErrorKind::InvalidArgument,
        ErrorKind::Depth,
        ErrorKind::StateMismatch,
        ErrorKind::CtrlChar,
        ErrorKind::Syntax,
        ErrorKind::Utf8,
        ErrorKind::Recursion,
        ErrorKind::InfOrNan,
        ErrorKind::UnsupportedType,
        ErrorKind::Unknown,
    ];

    /// Numeric code reported to callers.
    pub fn code(&self) -> i32 {
        match self {
            ErrorKind::InvalidArgument => 0,
            ErrorKind::Depth => 1,
            ErrorKind::StateMismatch => 2,
            ErrorKind::CtrlChar => 3,
            ErrorKind::Syntax => 4,
            ErrorKind::Utf8 => 5,
            ErrorKind::Recursion => 6,
            ErrorKind::InfOrNan => 7,
            ErrorKind::UnsupportedType => 8,
            ErrorKind::Unknown => -1,
        }
    }

    /// Fixed human-readable message.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "Invalid JSON data.",
            ErrorKind::Depth => "The maximum stack depth has been exceeded.",
            ErrorKind::StateMismatch => "Invalid or malformed JSON.",
            ErrorKind::CtrlChar => "Control character error, possibly incorrectly encoded.",
            ErrorKind::Syntax => "Syntax error.",
            ErrorKind::Utf8 => "Malformed UTF-8 characters, possibly incorrectly encoded.",
            ErrorKind::Recursion => "One or more recursive references in the value to be encoded.",
            ErrorKind::InfOrNan => "One or more NAN or INF values in the value to be encoded",
            ErrorKind::UnsupportedType => "A value of a type that cannot be encoded was given",
            ErrorKind::Unknown => "Unknown JSON encoding/decoding error.",
        }
    }

    /// Maps a numeric code back to its kind; unrecognized codes are `Unknown`.
    pub fn from_code(code: i32) -> ErrorKind {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .unwrap_or(ErrorKind::Unknown)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Error returned by every codec operation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CodecError {
    kind: ErrorKind,
    message: String,
}

impl CodecError {
    /// Creates an error carrying the fixed message for `kind`.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
        }
    }

    /// Creates an error from a raw fault code.
    pub fn from_code(code: i32) -> Self {
        Self::new(ErrorKind::from_code(code))
    }

    /// Fault category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Numeric fault code.
    pub fn code(&self) -> i32 {
        self.kind.code()
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ErrorKind> for CodecError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}
