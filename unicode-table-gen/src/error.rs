use std::{fmt, io};

/// Why a `CaseFolding.txt` record was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Fewer than the four `;`-terminated fields.
    MissingField,
    /// A code or mapping field that is not a single hex scalar value.
    InvalidCodepoint(String),
    /// A status other than `C`, `S`, `F` or `T`.
    UnknownStatus(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::MissingField => write!(f, "missing field"),
            ParseErrorKind::InvalidCodepoint(s) => write!(f, "invalid codepoint {s:?}"),
            ParseErrorKind::UnknownStatus(s) => write!(f, "unknown status {s:?}"),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    /// `line` is 1-based.
    Parse { line: usize, kind: ParseErrorKind },
    Config(&'static str),
    /// The UTF-8 record at `index` does not decode back to its codepoint.
    Inconsistent { index: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::Parse { line, kind } => write!(f, "line {line}: {kind}"),
            Error::Config(msg) => write!(f, "invalid header config: {msg}"),
            Error::Inconsistent { index } => {
                write!(f, "table entry {index} does not round-trip through UTF-8")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl Error {
    pub(crate) fn parse(line: usize, kind: ParseErrorKind) -> Self {
        Error::Parse { line, kind }
    }
}
