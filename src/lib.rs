// src/lib.rs

//! dir2module
//!
//! Generates modulemd v2 documents describing a set of RPM packages.
//!
//! # Pipeline
//!
//! - Discovery: RPM files come from a directory walk or a package list
//! - Inspection: each RPM header is read once for license and modularity label
//! - Identity: each filename is resolved into a canonical NEVRA
//! - Validation: every package must carry a modularity label unless forced
//! - Aggregation: names, artifacts and licenses are merged into one descriptor
//! - Rendering: the descriptor is written out as modulemd v2 YAML

mod error;
pub mod generate;
pub mod module;
pub mod nevra;
pub mod packages;

pub use error::{Error, Result};
pub use generate::{generate, GenerateOptions, GeneratedModule};
pub use module::{
    dumps_modulemd, module_filename, ModuleDependency, ModuleDescriptor, Nsvca,
    ValidationReport,
};
pub use nevra::Nevra;
pub use packages::{HeaderInfo, PackageInspector, RpmInspector};
