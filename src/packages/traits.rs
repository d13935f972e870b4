// src/packages/traits.rs

//! Common traits for package header inspection

use crate::error::Result;
use std::path::Path;

/// Header fields a module document needs from one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// License string as declared by the package (may be empty)
    pub license: String,
    /// Whether the package was built as part of a module (`ModularityLabel` set)
    pub has_modularity_marker: bool,
    /// Epoch from the header, if the package declares one
    pub epoch: Option<u32>,
}

impl HeaderInfo {
    /// Create header info without an epoch
    pub fn new(license: impl Into<String>, has_modularity_marker: bool) -> Self {
        Self {
            license: license.into(),
            has_modularity_marker,
            epoch: None,
        }
    }

    /// Set the header epoch
    pub fn with_epoch(mut self, epoch: u32) -> Self {
        self.epoch = Some(epoch);
        self
    }
}

/// Capability to read the structured header of a package file
///
/// Implementations open the file read-only, read the header once and release
/// the file handle before returning, on success and failure alike.
pub trait PackageInspector {
    /// Read license, modularity marker and epoch from the package at `path`
    fn inspect(&self, path: &Path) -> Result<HeaderInfo>;
}
