// src/error.rs

//! Error types for module document generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while turning a set of packages into a module document
#[derive(Error, Debug)]
pub enum Error {
    /// Package filename does not decompose into name-epoch:version-release.arch
    #[error("Malformed package identity '{path}': {reason}")]
    MalformedIdentity { path: PathBuf, reason: String },

    /// Package file could not be opened or its header could not be parsed
    #[error("Unreadable package header '{path}': {reason}")]
    UnreadableHeader { path: PathBuf, reason: String },

    /// Packages without a ModularityLabel header, and no override was given
    #[error(
        "All packages need to contain `ModularityLabel` header. To suppress this constraint, use `--force` parameter (offending packages: {})",
        format_offenders(.offenders)
    )]
    ValidationFailure { offenders: Vec<PathBuf> },

    /// The assembled descriptor is rejected by the modulemd schema
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// Malformed N:S:V:C:A or N:S command line value
    #[error("{0}")]
    InputFormatError(String),

    /// Filesystem errors during discovery or output
    #[error("I/O error: {0}")]
    IoError(String),
}

impl Error {
    /// Whether this error is a policy rejection rather than an I/O or parse fault
    pub fn is_policy_rejection(&self) -> bool {
        matches!(self, Self::ValidationFailure { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

fn format_offenders(offenders: &[PathBuf]) -> String {
    offenders
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;
