// src/module/validate.rs

//! Package-level checks that gate document generation

use crate::error::{Error, Result};
use crate::packages::HeaderInfo;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Outcome of a successful validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Packages lacking a modularity label that were let through by `--force`
    pub waived: Vec<PathBuf>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.waived.is_empty()
    }
}

/// Require every package to carry a `ModularityLabel` header
///
/// Without `force` any offender aborts generation with
/// [`Error::ValidationFailure`] listing every offender. With `force` each
/// offender is logged as a warning and returned in the report. Offenders are
/// never removed from the package set either way.
pub fn validate_packages<'a, I>(packages: I, force: bool) -> Result<ValidationReport>
where
    I: IntoIterator<Item = (&'a Path, &'a HeaderInfo)>,
{
    let offenders: Vec<PathBuf> = packages
        .into_iter()
        .filter(|(_, header)| !header.has_modularity_marker)
        .map(|(path, _)| path.to_path_buf())
        .collect();

    if offenders.is_empty() {
        return Ok(ValidationReport::default());
    }

    if !force {
        return Err(Error::ValidationFailure { offenders });
    }

    for path in &offenders {
        warn!(
            "Package {} does not contain `ModularityLabel` header, continuing because of --force",
            path.display()
        );
    }

    Ok(ValidationReport { waived: offenders })
}
