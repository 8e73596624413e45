/*!
# Error System for BOM Fixtures

One error type for the whole library: I/O failures on the source and the
fixtures, decode/encode failures, verification mismatches and config errors.
*/

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::encoding::Codec;

pub type FixtureResult<T> = Result<T, FixtureError>;

/// Errors raised while generating or verifying fixtures
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Source file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid UTF-8 in {} (valid up to byte {valid_up_to})", .path.display())]
    InvalidUtf8 { path: PathBuf, valid_up_to: usize },

    #[error("Code point {code_point:#X} at byte {offset} is not representable in {codec}")]
    UnsupportedCodepoint {
        codec: Codec,
        code_point: u32,
        offset: usize,
    },

    #[error("Malformed {codec} data at byte {offset}")]
    Malformed { codec: Codec, offset: usize },

    #[error("Fixture {} does not match its source: {reason}", .path.display())]
    Mismatch { path: PathBuf, reason: String },

    #[error("Invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("{}", AggregateDisplay(.0))]
    Aggregate(Vec<FixtureError>),
}

impl FixtureError {
    /// Classifies an error from opening/reading the source file
    pub fn from_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            FixtureError::NotFound { path }
        } else {
            FixtureError::ReadFailure { path, source }
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        FixtureError::WriteFailure {
            path: path.into(),
            source,
        }
    }

    /// Number of underlying failures (1 unless aggregated)
    pub fn failure_count(&self) -> usize {
        match self {
            FixtureError::Aggregate(errors) => errors.iter().map(|e| e.failure_count()).sum(),
            _ => 1,
        }
    }
}

struct AggregateDisplay<'a>(&'a [FixtureError]);

impl fmt::Display for AggregateDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fixture(s) failed", self.0.len())?;
        for error in self.0 {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}
