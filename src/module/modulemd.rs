// src/module/modulemd.rs

//! Rendering a module descriptor as a modulemd v2 YAML document
//!
//! The document layout follows the modulemd v2 module stream format:
//!
//! ```yaml
//! ---
//! document: modulemd
//! version: 2
//! data:
//!   name: foo
//!   stream: '1.0'
//!   ...
//! ...
//! ```

use super::{ModuleDescriptor, Nsvca, COMPONENT_RATIONALE};
use crate::error::{Error, Result};
use crate::nevra::Nevra;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// modulemd document type tag
pub const MODULEMD_DOCUMENT: &str = "modulemd";

/// modulemd schema version produced
pub const MODULEMD_VERSION: u32 = 2;

/// Suffix of generated document files
pub const MODULEMD_SUFFIX: &str = ".modulemd.yaml";

/// Longest context accepted by modulemd
pub const MAX_CONTEXT_LEN: usize = 10;

#[derive(Debug, Serialize)]
struct Document<'a> {
    document: &'static str,
    version: u32,
    data: StreamData<'a>,
}

#[derive(Debug, Serialize)]
struct StreamData<'a> {
    name: &'a str,
    stream: &'a str,
    version: u64,
    context: &'a str,
    arch: &'a str,
    summary: &'a str,
    description: &'a str,
    license: Licenses<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dependencies: Vec<Dependencies<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api: Option<RpmList<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<Components<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    artifacts: Option<RpmList<'a>>,
}

#[derive(Debug, Serialize)]
struct Licenses<'a> {
    module: Vec<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    content: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct Dependencies<'a> {
    requires: BTreeMap<&'a str, Vec<&'a str>>,
}

#[derive(Debug, Serialize)]
struct RpmList<'a> {
    rpms: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct Components<'a> {
    rpms: BTreeMap<&'a str, RpmComponent>,
}

#[derive(Debug, Serialize)]
struct RpmComponent {
    rationale: &'static str,
}

fn schema_error(msg: impl Into<String>) -> Error {
    Error::SchemaError(msg.into())
}

/// Reject descriptors the modulemd v2 schema cannot represent
fn check_schema(descriptor: &ModuleDescriptor) -> Result<u64> {
    for (field, value) in [
        ("name", &descriptor.name),
        ("stream", &descriptor.stream),
        ("context", &descriptor.context),
        ("arch", &descriptor.arch),
        ("summary", &descriptor.summary),
        ("description", &descriptor.description),
        ("module license", &descriptor.module_license),
    ] {
        if value.trim().is_empty() {
            return Err(schema_error(format!("module {} must not be empty", field)));
        }
    }

    if descriptor.stream.contains('-') {
        return Err(schema_error(format!(
            "stream '{}' must not contain '-'",
            descriptor.stream
        )));
    }

    if descriptor.context.len() > MAX_CONTEXT_LEN
        || !descriptor
            .context
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
    {
        return Err(schema_error(format!(
            "context '{}' must be at most {} alphanumeric or '_' characters",
            descriptor.context, MAX_CONTEXT_LEN
        )));
    }

    let version = u64::try_from(descriptor.version).map_err(|_| {
        schema_error(format!(
            "version {} must not be negative",
            descriptor.version
        ))
    })?;

    if let Some(bad) = descriptor
        .artifacts
        .iter()
        .find(|artifact| Nevra::parse(artifact).is_none())
    {
        return Err(schema_error(format!("artifact '{}' is not a valid NEVRA", bad)));
    }

    Ok(version)
}

fn build_document(descriptor: &ModuleDescriptor, version: u64) -> Document<'_> {
    let dependencies = if descriptor.dependencies.is_empty() {
        Vec::new()
    } else {
        vec![Dependencies {
            requires: descriptor
                .dependencies
                .iter()
                .map(|(module, stream)| (module.as_str(), vec![stream.as_str()]))
                .collect(),
        }]
    };

    let names: Vec<&str> = descriptor.package_names.iter().map(String::as_str).collect();
    let (api, components) = if names.is_empty() {
        (None, None)
    } else {
        let components = Components {
            rpms: names
                .iter()
                .map(|name| {
                    (
                        *name,
                        RpmComponent {
                            rationale: COMPONENT_RATIONALE,
                        },
                    )
                })
                .collect(),
        };
        (Some(RpmList { rpms: names }), Some(components))
    };

    let artifacts = (!descriptor.artifacts.is_empty()).then(|| RpmList {
        rpms: descriptor.artifacts.iter().map(String::as_str).collect(),
    });

    Document {
        document: MODULEMD_DOCUMENT,
        version: MODULEMD_VERSION,
        data: StreamData {
            name: &descriptor.name,
            stream: &descriptor.stream,
            version,
            context: &descriptor.context,
            arch: &descriptor.arch,
            summary: &descriptor.summary,
            description: &descriptor.description,
            license: Licenses {
                module: vec![descriptor.module_license.as_str()],
                content: descriptor
                    .content_licenses
                    .iter()
                    .map(String::as_str)
                    .collect(),
            },
            dependencies,
            api,
            components,
            artifacts,
        },
    }
}

/// Render the descriptor as a modulemd v2 YAML document
pub fn dumps_modulemd(descriptor: &ModuleDescriptor) -> Result<String> {
    let version = check_schema(descriptor)?;
    let document = build_document(descriptor, version);

    let yaml = serde_yaml::to_string(&document)
        .map_err(|e| schema_error(format!("Failed to serialize modulemd: {}", e)))?;
    let body = yaml.strip_prefix("---\n").unwrap_or(&yaml);

    Ok(format!("---\n{}...\n", body))
}

/// File name for a module document: `N:S:V:C:A.modulemd.yaml`
pub fn module_filename(nsvca: &Nsvca) -> String {
    format!("{}{}", nsvca, MODULEMD_SUFFIX)
}

/// Render the descriptor and write it into `dir` under its canonical file name
pub fn dump_modulemd(descriptor: &ModuleDescriptor, dir: &Path) -> Result<PathBuf> {
    let yaml = dumps_modulemd(descriptor)?;
    let path = dir.join(module_filename(&descriptor.nsvca()));

    fs::write(&path, yaml).map_err(|e| {
        Error::IoError(format!("Failed to write {}: {}", path.display(), e))
    })?;

    info!("Wrote module document to {}", path.display());
    Ok(path)
}
