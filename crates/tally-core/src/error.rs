//! Error types shared by every tally crate.
//!
//! One enum covers allocation, generation, decoding, and file access so
//! callers can match on a single taxonomy regardless of which layer failed.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, TallyError>;

/// Errors that can occur while allocating, encoding, or persisting records.
#[derive(Debug)]
pub enum TallyError {
    /// A count or size handed to an allocator or generator is unusable.
    InvalidArgument {
        /// Human-readable description of what was rejected.
        detail: Cow<'static, str>,
    },
    /// The allocator could not satisfy a request. Any partial allocations
    /// made by the failing operation have already been released.
    OutOfMemory {
        /// Number of `i32` elements requested by the failing allocation.
        requested: usize,
    },
    /// The file to load does not exist.
    NotFound {
        /// Path that was opened.
        path: PathBuf,
    },
    /// The input ended before a complete record was read.
    TruncatedInput {
        /// Bytes the record required.
        expected: usize,
        /// Bytes that were actually available.
        actual: usize,
    },
    /// The input is structurally invalid (negative or oversized length,
    /// trailing bytes after the record).
    CorruptFormat {
        /// Human-readable description of what went wrong.
        detail: Cow<'static, str>,
    },
    /// An I/O error not covered by the variants above.
    Io(io::Error),
}

/// Field-less discriminant of [`TallyError`].
///
/// Useful for callers that only report the kind of failure, and for tests
/// that compare outcomes without caring about the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`TallyError::InvalidArgument`].
    InvalidArgument,
    /// See [`TallyError::OutOfMemory`].
    OutOfMemory,
    /// See [`TallyError::NotFound`].
    NotFound,
    /// See [`TallyError::TruncatedInput`].
    TruncatedInput,
    /// See [`TallyError::CorruptFormat`].
    CorruptFormat,
    /// See [`TallyError::Io`].
    Io,
}

impl TallyError {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::TruncatedInput { .. } => ErrorKind::TruncatedInput,
            Self::CorruptFormat { .. } => ErrorKind::CorruptFormat,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn invalid(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidArgument {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidArgument => "invalid argument",
            Self::OutOfMemory => "out of memory",
            Self::NotFound => "not found",
            Self::TruncatedInput => "truncated input",
            Self::CorruptFormat => "corrupt format",
            Self::Io => "I/O error",
        };
        f.write_str(name)
    }
}

impl fmt::Display for TallyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { detail } => write!(f, "invalid argument: {detail}"),
            Self::OutOfMemory { requested } => {
                write!(f, "out of memory: could not allocate {requested} elements")
            }
            Self::NotFound { path } => write!(f, "record not found: {}", path.display()),
            Self::TruncatedInput { expected, actual } => {
                write!(
                    f,
                    "truncated input: record needs {expected} bytes, got {actual}"
                )
            }
            Self::CorruptFormat { detail } => write!(f, "corrupt record: {detail}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl Error for TallyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TallyError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
