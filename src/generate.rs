// src/generate.rs

//! End-to-end module generation
//!
//! Inspects every package, resolves its identity, gates the set on the
//! modularity label check and aggregates the result into a
//! [`ModuleDescriptor`]. Any failure aborts the whole run; no partial
//! descriptor is ever returned.

use crate::error::Result;
use crate::module::{
    aggregate, parse_dependencies, validate_packages, InspectedPackage, ModuleDescriptor,
    ModuleFields, Nsvca, ValidationReport, DEFAULT_MODULE_LICENSE,
};
use crate::nevra::Nevra;
use crate::packages::PackageInspector;
use std::path::PathBuf;
use tracing::{debug, info};

/// Inputs for one generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Module name, stream, version, context and architecture
    pub nsvca: String,
    pub summary: String,
    pub description: Option<String>,
    pub module_license: String,
    /// Runtime dependencies in `NAME:STREAM` form
    pub requires: Vec<String>,
    /// Let packages without a modularity label through with a warning
    pub force: bool,
}

impl GenerateOptions {
    pub fn new(nsvca: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            nsvca: nsvca.into(),
            summary: summary.into(),
            description: None,
            module_license: DEFAULT_MODULE_LICENSE.to_string(),
            requires: Vec::new(),
            force: false,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct GeneratedModule {
    pub descriptor: ModuleDescriptor,
    pub validation: ValidationReport,
}

/// Inspect a single package and resolve its identity
pub fn inspect_package<I: PackageInspector>(
    inspector: &I,
    path: PathBuf,
) -> Result<InspectedPackage> {
    let header = inspector.inspect(&path)?;
    let nevra = Nevra::from_path(&path, header.epoch)?;
    debug!("Resolved {} as {}", path.display(), nevra);

    Ok(InspectedPackage {
        path,
        nevra,
        header,
    })
}

/// Build the module descriptor for `packages`
///
/// Command line values are parsed before any package is touched, so
/// malformed input fails fast.
pub fn generate<I: PackageInspector>(
    inspector: &I,
    options: &GenerateOptions,
    packages: Vec<PathBuf>,
) -> Result<GeneratedModule> {
    let nsvca = Nsvca::parse(&options.nsvca)?;
    let dependencies = parse_dependencies(&options.requires)?;

    info!("Inspecting {} packages for module {}", packages.len(), nsvca);

    let inspected = packages
        .into_iter()
        .map(|path| inspect_package(inspector, path))
        .collect::<Result<Vec<_>>>()?;

    let validation = validate_packages(
        inspected.iter().map(|p| (p.path.as_path(), &p.header)),
        options.force,
    )?;

    let fields = ModuleFields {
        nsvca,
        summary: options.summary.clone(),
        description: options.description.clone(),
        module_license: options.module_license.clone(),
    };
    let descriptor = aggregate(fields, dependencies, &inspected);

    info!(
        "Module {} has {} packages, {} artifacts, {} licenses",
        descriptor.nsvca(),
        descriptor.package_names.len(),
        descriptor.artifacts.len(),
        descriptor.content_licenses.len()
    );

    Ok(GeneratedModule {
        descriptor,
        validation,
    })
}
