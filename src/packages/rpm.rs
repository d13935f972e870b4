// src/packages/rpm.rs

//! RPM header inspection
//!
//! Only the lead, signature and main header are read; the payload is never
//! decompressed and signatures and digests are not verified.

use crate::error::{Error, Result};
use crate::packages::traits::{HeaderInfo, PackageInspector};
use rpm::{IndexTag, PackageMetadata};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Reads RPM headers from files on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct RpmInspector;

impl RpmInspector {
    pub fn new() -> Self {
        Self
    }

    /// Extract the fields we care about from parsed RPM metadata
    fn header_info(path: &Path, metadata: &PackageMetadata) -> Result<HeaderInfo> {
        let license = metadata
            .get_license()
            .map_err(|e| Error::UnreadableHeader {
                path: path.to_path_buf(),
                reason: format!("Failed to get package license: {}", e),
            })?
            .to_string();

        // Absent and empty labels both count as "not built in a module"
        let has_modularity_marker = metadata
            .header
            .get_entry_data_as_string(IndexTag::RPMTAG_MODULARITYLABEL)
            .map(|label| !label.trim().is_empty())
            .unwrap_or(false);

        let epoch = metadata.get_epoch().ok();

        Ok(HeaderInfo {
            license,
            has_modularity_marker,
            epoch,
        })
    }
}

impl PackageInspector for RpmInspector {
    fn inspect(&self, path: &Path) -> Result<HeaderInfo> {
        debug!("Reading RPM header: {}", path.display());

        let file = File::open(path).map_err(|e| Error::UnreadableHeader {
            path: path.to_path_buf(),
            reason: format!("Failed to open RPM file: {}", e),
        })?;
        let mut buf_reader = BufReader::new(file);

        let metadata = PackageMetadata::parse(&mut buf_reader).map_err(|e| {
            Error::UnreadableHeader {
                path: path.to_path_buf(),
                reason: format!("Failed to parse RPM header: {}", e),
            }
        })?;

        let info = Self::header_info(path, &metadata)?;

        debug!(
            "Parsed RPM header: {} (license: {:?}, modularity label: {}, epoch: {:?})",
            path.display(),
            info.license,
            info.has_modularity_marker,
            info.epoch
        );

        Ok(info)
    }
}
