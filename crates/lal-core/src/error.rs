//! Error types for decoding, encoding and document I/O.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LalError {
    /// An empty line was handed to the line decoder.
    #[error("line may not be empty")]
    EmptyLine,
    /// An entry without a login or a password cannot be written out.
    #[error("login must contain at least a login and a password")]
    MissingCredentials,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LalError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LalError>;
