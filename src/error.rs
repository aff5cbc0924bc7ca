use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures that abort processing of a single challenge day.
#[derive(Debug, Error)]
pub enum DayError {
    #[error("invalid day {0:?}: expected a number between 1 and 25")]
    InvalidDay(String),

    #[error("challenge content not found: {0}")]
    ExtractionNotFound(&'static str),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("{}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no recoverable function identifier")]
    NoIdentifier,
}

impl DayError {
    pub fn fs(path: impl AsRef<Path>, source: io::Error) -> Self {
        DayError::FileSystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Attach a path to an `io::Result`.
pub trait FsContext<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T, DayError>;
}

impl<T> FsContext<T> for io::Result<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T, DayError> {
        self.map_err(|e| DayError::fs(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_error_carries_path() {
        let err: Result<(), DayError> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")).at("adventjs-2024/01");
        let msg = err.unwrap_err().to_string();
        assert!(msg.starts_with("adventjs-2024/01"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn parse_error_is_transparent() {
        let err = DayError::from(ParseError::NoIdentifier);
        assert_eq!(err.to_string(), "no recoverable function identifier");
    }
}
