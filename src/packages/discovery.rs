// src/packages/discovery.rs

//! Locating the RPM files a module is built from
//!
//! Packages come either from a recursive directory walk or from a package
//! list file naming one path per whitespace-separated token. Source RPMs are
//! never part of a module's artifacts and are skipped in both cases.

use crate::error::{Error, Result};
use crate::nevra::RPM_EXTENSION;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

const SOURCE_RPM_EXTENSION: &str = ".src.rpm";

/// Whether the file name of `path` ends in `suffix`, whatever its encoding
fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .is_some_and(|f| f.as_encoded_bytes().ends_with(suffix.as_bytes()))
}

/// Whether a filename names a binary (non-source) RPM
///
/// Names that are not valid UTF-8 still match here; they are rejected later
/// when their identity cannot be resolved.
pub fn is_binary_rpm(path: &Path) -> bool {
    has_suffix(path, RPM_EXTENSION) && !has_suffix(path, SOURCE_RPM_EXTENSION)
}

/// Recursively find binary RPM packages below `root`
///
/// The result is sorted so repeated runs inspect packages in the same order.
pub fn find_packages(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::IoError(format!(
            "Package directory does not exist: {}",
            root.display()
        )));
    }

    let mut packages = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            Error::IoError(format!("Failed to walk {}: {}", root.display(), e))
        })?;
        // Links are not followed, so symlinked packages show up as links;
        // dangling ones fail later at header inspection
        if entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if is_binary_rpm(path) {
            packages.push(path.to_path_buf());
        } else if has_suffix(path, SOURCE_RPM_EXTENSION) {
            debug!("Skipping source package: {}", path.display());
        }
    }

    packages.sort();
    info!("Found {} packages in {}", packages.len(), root.display());
    Ok(packages)
}

/// Read package paths from a package list file
pub fn find_packages_in_file(list: &Path) -> Result<Vec<PathBuf>> {
    let content = fs::read_to_string(list).map_err(|e| {
        Error::IoError(format!("Failed to read package list {}: {}", list.display(), e))
    })?;

    let packages = parse_package_list(&content);
    info!("Read {} packages from {}", packages.len(), list.display());
    Ok(packages)
}

/// Split package list content into paths, dropping source packages
pub fn parse_package_list(content: &str) -> Vec<PathBuf> {
    content
        .split_whitespace()
        .map(PathBuf::from)
        .filter(|path| {
            let keep = !has_suffix(path, SOURCE_RPM_EXTENSION);
            if !keep {
                debug!("Skipping source package: {}", path.display());
            }
            keep
        })
        .collect()
}

/// Expand a leading `~` to the current user's home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_is_binary_rpm() {
        assert!(is_binary_rpm(Path::new("/x/foo-1-1.x86_64.rpm")));
        assert!(!is_binary_rpm(Path::new("/x/foo-1-1.src.rpm")));
        assert!(!is_binary_rpm(Path::new("/x/foo-1-1.x86_64.deb")));
        assert!(!is_binary_rpm(Path::new("/x/rpm")));
    }

    #[test]
    fn test_find_packages_recursive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b-1.0-1.noarch.rpm"));
        touch(&dir.path().join("sub/a-1.0-1.x86_64.rpm"));
        touch(&dir.path().join("sub/deeper/c-1.0-1.x86_64.rpm"));
        touch(&dir.path().join("a-1.0-1.src.rpm"));
        touch(&dir.path().join("README"));

        let packages = find_packages(dir.path()).unwrap();
        let names: Vec<String> = packages
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "b-1.0-1.noarch.rpm",
                "sub/a-1.0-1.x86_64.rpm",
                "sub/deeper/c-1.0-1.x86_64.rpm",
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_find_packages_includes_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("store");
        let repo = dir.path().join("repo");
        touch(&store.join("a-1.0-1.x86_64.rpm"));
        fs::create_dir_all(&repo).unwrap();
        std::os::unix::fs::symlink(store.join("a-1.0-1.x86_64.rpm"), repo.join("a-1.0-1.x86_64.rpm"))
            .unwrap();
        std::os::unix::fs::symlink(store.join("gone-1.0-1.x86_64.rpm"), repo.join("gone-1.0-1.x86_64.rpm"))
            .unwrap();

        let packages = find_packages(&repo).unwrap();
        assert_eq!(
            packages,
            vec![repo.join("a-1.0-1.x86_64.rpm"), repo.join("gone-1.0-1.x86_64.rpm")]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_find_packages_includes_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let name = OsStr::from_bytes(b"caf\xe9-1.0-1.noarch.rpm");
        touch(&dir.path().join(name));

        let packages = find_packages(dir.path()).unwrap();
        assert_eq!(packages, vec![dir.path().join(name)]);

        let err = crate::nevra::Nevra::from_path(&packages[0], None).unwrap_err();
        assert!(matches!(err, Error::MalformedIdentity { .. }));
    }

    #[test]
    fn test_find_packages_missing_dir() {
        let err = find_packages(Path::new("/nonexistent/packages")).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_parse_package_list() {
        let content = "a-1-1.noarch.rpm\n\n  b-1-1.x86_64.rpm c-1-1.src.rpm\n";
        assert_eq!(
            parse_package_list(content),
            vec![PathBuf::from("a-1-1.noarch.rpm"), PathBuf::from("b-1-1.x86_64.rpm")]
        );
    }

    #[test]
    fn test_find_packages_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("pkglist");
        fs::write(&list, "/srv/a-1-1.noarch.rpm\n/srv/b-1-1.noarch.rpm\n").unwrap();

        let packages = find_packages_in_file(&list).unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0], PathBuf::from("/srv/a-1-1.noarch.rpm"));

        let err = find_packages_in_file(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home(Path::new("/abs/path")), PathBuf::from("/abs/path"));
        assert_eq!(expand_home(Path::new("rel/path")), PathBuf::from("rel/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/rpms")), home.join("rpms"));
        }
    }
}
