//! Dispatcher error types.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Operation that was being attempted when an error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Dimensions,
    Read,
    ReadRegion,
    Write,
    WriteOverlay,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Dimensions => "dimension query",
            Operation::Read => "read",
            Operation::ReadRegion => "region read",
            Operation::Write => "write",
            Operation::WriteOverlay => "overlay write",
        };
        f.write_str(name)
    }
}

/// Coarse classification of an [`ImageIoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnrecognizedFormat,
    UnsupportedOperation,
    PreconditionViolation,
    Io,
    Codec,
}

/// Image I/O errors.
#[derive(Error, Debug)]
pub enum ImageIoError {
    /// The file name matches no known format pattern.
    #[error("unrecognized image file type for file: {}", file.display())]
    UnrecognizedFormat { file: PathBuf },

    /// The format does not support the operation, or is not available.
    #[error("{operation} not supported for {}: {reason}", file.display())]
    UnsupportedOperation {
        file: PathBuf,
        operation: Operation,
        reason: String,
    },

    /// Caller-supplied dimensions, region or buffer are inconsistent.
    #[error("{operation} precondition violated for {}: {detail}", file.display())]
    PreconditionViolation {
        file: PathBuf,
        operation: Operation,
        detail: String,
    },

    /// Filesystem failure.
    #[error("I/O error on {}: {source}", file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The codec library rejected the file or the data.
    #[error("{operation} failed for {}: {message}", file.display())]
    Codec {
        file: PathBuf,
        operation: Operation,
        message: String,
    },
}

impl ImageIoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImageIoError::UnrecognizedFormat { .. } => ErrorKind::UnrecognizedFormat,
            ImageIoError::UnsupportedOperation { .. } => ErrorKind::UnsupportedOperation,
            ImageIoError::PreconditionViolation { .. } => ErrorKind::PreconditionViolation,
            ImageIoError::Io { .. } => ErrorKind::Io,
            ImageIoError::Codec { .. } => ErrorKind::Codec,
        }
    }

    pub(crate) fn unsupported(
        file: impl Into<PathBuf>,
        operation: Operation,
        reason: impl Into<String>,
    ) -> Self {
        ImageIoError::UnsupportedOperation {
            file: file.into(),
            operation,
            reason: reason.into(),
        }
    }

    pub(crate) fn precondition(
        file: impl Into<PathBuf>,
        operation: Operation,
        detail: impl Into<String>,
    ) -> Self {
        ImageIoError::PreconditionViolation {
            file: file.into(),
            operation,
            detail: detail.into(),
        }
    }

    pub(crate) fn codec(
        file: impl Into<PathBuf>,
        operation: Operation,
        message: impl fmt::Display,
    ) -> Self {
        ImageIoError::Codec {
            file: file.into(),
            operation,
            message: message.to_string(),
        }
    }

    pub(crate) fn io(file: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ImageIoError::Io {
            file: file.into(),
            source,
        }
    }
}

/// Image I/O result type.
pub type Result<T> = std::result::Result<T, ImageIoError>;
