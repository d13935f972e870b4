// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use dir2module::{Error, HeaderInfo, PackageInspector, Result};
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// In-memory header reader keyed by file name
#[derive(Debug, Default)]
pub struct FakeInspector {
    headers: HashMap<String, HeaderInfo>,
}

impl FakeInspector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package with its license and modularity label flag
    pub fn with(mut self, filename: &str, license: &str, marker: bool) -> Self {
        self.headers
            .insert(filename.to_string(), HeaderInfo::new(license, marker));
        self
    }

    /// Register a package whose header declares an epoch
    pub fn with_epoch(mut self, filename: &str, license: &str, epoch: u32) -> Self {
        self.headers.insert(
            filename.to_string(),
            HeaderInfo::new(license, true).with_epoch(epoch),
        );
        self
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .headers
            .keys()
            .map(|name| PathBuf::from("/srv/rpms").join(name))
            .collect();
        paths.sort();
        paths
    }
}

impl PackageInspector for FakeInspector {
    fn inspect(&self, path: &Path) -> Result<HeaderInfo> {
        let name = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or_default();
        self.headers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnreadableHeader {
                path: path.to_path_buf(),
                reason: "no such package".to_string(),
            })
    }
}

/// Build a real RPM file named `name-version-release.arch.rpm` inside `dir`
pub fn write_rpm(dir: &Path, name: &str, version: &str, release: &str, arch: &str, license: &str) -> PathBuf {
    let package = rpm::PackageBuilder::new(name, version, license, arch, "Test package")
        .release(release)
        .compression(rpm::CompressionType::Gzip)
        .build()
        .unwrap();

    let path = dir.join(format!("{}-{}-{}.{}.rpm", name, version, release, arch));
    let mut file = File::create(&path).unwrap();
    package.write(&mut file).unwrap();
    path
}
