// src/nevra.rs

//! Package identity (NEVRA) resolution from RPM filenames
//!
//! RPM files are conventionally named `name-version-release.arch.rpm`, and
//! the canonical artifact identity recorded in a module document is
//! `name-epoch:version-release.arch`.
//!
//! Package names may themselves contain hyphens, so a filename stem can be
//! split in more than one way. [`Nevra::candidates`] enumerates every split
//! that yields non-empty fields, ordered by preference:
//!
//! 1. longest name first
//! 2. then shortest release
//!
//! [`Nevra::parse`] takes the first candidate. For well-formed RPM names this
//! is the conventional split, since RPM forbids hyphens in version and
//! release.

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;

/// File extension of binary and source RPM packages
pub const RPM_EXTENSION: &str = ".rpm";

/// Name, epoch, version, release and architecture of a package
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nevra {
    pub name: String,
    pub epoch: u32,
    pub version: String,
    pub release: String,
    pub arch: String,
}

impl Nevra {
    /// Create a new identity
    pub fn new(
        name: impl Into<String>,
        epoch: u32,
        version: impl Into<String>,
        release: impl Into<String>,
        arch: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            epoch,
            version: version.into(),
            release: release.into(),
            arch: arch.into(),
        }
    }

    /// Enumerate every plausible decomposition of `name-[epoch:]version-release.arch`
    ///
    /// The returned list is in tie-break order; an empty list means the string
    /// does not match the naming grammar at all.
    pub fn candidates(s: &str) -> Vec<Candidate> {
        let Some((head, arch)) = s.rsplit_once('.') else {
            return Vec::new();
        };
        if !is_valid_arch(arch) {
            return Vec::new();
        }

        let hyphens: Vec<usize> = head.match_indices('-').map(|(i, _)| i).collect();
        let mut candidates = Vec::new();

        // Outer loop walks the name/version separator right to left so longer
        // names come first; the inner loop does the same for the release.
        for (vi, &v) in hyphens.iter().enumerate().rev() {
            for &r in hyphens[vi + 1..].iter().rev() {
                let name = &head[..v];
                let evr = &head[v + 1..r];
                let release = &head[r + 1..];

                if name.is_empty() || evr.is_empty() || release.is_empty() {
                    continue;
                }
                if name.contains(':') || release.contains(':') {
                    continue;
                }

                let (epoch, version) = match evr.split_once(':') {
                    Some((e, ver)) => {
                        if e.is_empty() || !e.bytes().all(|b| b.is_ascii_digit()) {
                            continue;
                        }
                        match e.parse::<u32>() {
                            Ok(epoch) => (Some(epoch), ver),
                            Err(_) => continue,
                        }
                    }
                    None => (None, evr),
                };
                if version.is_empty() || version.contains(':') {
                    continue;
                }

                candidates.push(Candidate {
                    name: name.to_string(),
                    epoch,
                    version: version.to_string(),
                    release: release.to_string(),
                    arch: arch.to_string(),
                });
            }
        }

        candidates
    }

    /// Parse `name-[epoch:]version-release.arch`, taking the first candidate
    ///
    /// A missing epoch defaults to 0.
    pub fn parse(s: &str) -> Option<Self> {
        Self::candidates(s)
            .into_iter()
            .next()
            .map(|c| c.into_nevra(0))
    }

    /// Resolve the identity of an RPM file from its filename
    ///
    /// `fallback_epoch` is used when the filename does not name an epoch,
    /// which is the normal case for RPM files.
    pub fn from_path(path: &Path, fallback_epoch: Option<u32>) -> Result<Self> {
        let malformed = |reason: &str| Error::MalformedIdentity {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let filename = path
            .file_name()
            .and_then(|f| f.to_str())
            .ok_or_else(|| malformed("filename is missing or not valid UTF-8"))?;

        let stem = filename
            .strip_suffix(RPM_EXTENSION)
            .ok_or_else(|| malformed("missing .rpm extension"))?;

        let candidate = Self::candidates(stem)
            .into_iter()
            .next()
            .ok_or_else(|| malformed("does not match name-[epoch:]version-release.arch"))?;

        Ok(candidate.into_nevra(fallback_epoch.unwrap_or(0)))
    }
}

impl fmt::Display for Nevra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}:{}-{}.{}",
            self.name, self.epoch, self.version, self.release, self.arch
        )
    }
}

/// One possible decomposition produced by [`Nevra::candidates`]
///
/// Unlike [`Nevra`], the epoch stays optional so callers can tell an
/// explicit `0:` apart from an absent epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub epoch: Option<u32>,
    pub version: String,
    pub release: String,
    pub arch: String,
}

impl Candidate {
    /// Convert into a [`Nevra`], substituting `default_epoch` when none was named
    pub fn into_nevra(self, default_epoch: u32) -> Nevra {
        Nevra {
            name: self.name,
            epoch: self.epoch.unwrap_or(default_epoch),
            version: self.version,
            release: self.release,
            arch: self.arch,
        }
    }
}

fn is_valid_arch(arch: &str) -> bool {
    !arch.is_empty() && arch.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
