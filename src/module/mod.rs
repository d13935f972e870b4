// src/module/mod.rs

//! Module stream description
//!
//! A module stream is identified by `NAME:STREAM:VERSION:CONTEXT:ARCH` and
//! groups a set of RPM artifacts together with licensing and runtime
//! dependency information. This module holds the command line level value
//! types, the aggregate [`ModuleDescriptor`] and the builder that merges
//! per-package results into it.

pub mod modulemd;
pub mod validate;

use crate::error::{Error, Result};
use crate::nevra::Nevra;
use crate::packages::HeaderInfo;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

pub use modulemd::{dumps_modulemd, module_filename};
pub use validate::{validate_packages, ValidationReport};

/// Default module license when none is given
pub const DEFAULT_MODULE_LICENSE: &str = "MIT";

/// Rationale recorded for every RPM component
pub const COMPONENT_RATIONALE: &str = "Present in the repository";

/// Module name, stream, version, context and architecture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nsvca {
    pub name: String,
    pub stream: String,
    pub version: i64,
    pub context: String,
    pub arch: String,
}

impl Nsvca {
    /// Parse `NAME:STREAM:VERSION:CONTEXT:ARCH`
    ///
    /// Exactly five colon separated fields are required and the version must
    /// be an integer. Range checks on the version happen at serialization.
    pub fn parse(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split(':').collect();
        if fields.len() != 5 {
            return Err(Error::InputFormatError(format!(
                "N:S:V:C:A in unexpected format: '{}'",
                s
            )));
        }
        if let Some(pos) = fields.iter().position(|f| f.is_empty()) {
            return Err(Error::InputFormatError(format!(
                "N:S:V:C:A has an empty {} field: '{}'",
                ["name", "stream", "version", "context", "arch"][pos],
                s
            )));
        }

        let version = fields[2].parse::<i64>().map_err(|e| {
            Error::InputFormatError(format!(
                "N:S:V:C:A version '{}' is not an integer: {}",
                fields[2], e
            ))
        })?;

        Ok(Self {
            name: fields[0].to_string(),
            stream: fields[1].to_string(),
            version,
            context: fields[3].to_string(),
            arch: fields[4].to_string(),
        })
    }
}

impl fmt::Display for Nsvca {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}:{}",
            self.name, self.stream, self.version, self.context, self.arch
        )
    }
}

/// A runtime dependency on another module stream, given as `NAME:STREAM`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDependency {
    pub module: String,
    pub stream: String,
}

impl ModuleDependency {
    /// Parse `NAME:STREAM`; anything but exactly one colon is rejected
    pub fn parse(s: &str) -> Result<Self> {
        let (module, stream) = s.split_once(':').ok_or_else(|| {
            Error::InputFormatError(format!("Dependency '{}' is not in N:S format", s))
        })?;
        if stream.contains(':') {
            return Err(Error::InputFormatError(format!(
                "Dependency '{}' has more than one ':'",
                s
            )));
        }
        if module.is_empty() || stream.is_empty() {
            return Err(Error::InputFormatError(format!(
                "Dependency '{}' has an empty name or stream",
                s
            )));
        }

        Ok(Self {
            module: module.to_string(),
            stream: stream.to_string(),
        })
    }
}

/// Parse all `--requires` values into a module name -> stream map
///
/// Repeating the same dependency is harmless, but naming one module with two
/// different streams is rejected rather than letting the last one win.
pub fn parse_dependencies<S: AsRef<str>>(deps: &[S]) -> Result<BTreeMap<String, String>> {
    let mut requires = BTreeMap::new();

    for dep in deps {
        let dep = ModuleDependency::parse(dep.as_ref())?;
        match requires.get(&dep.module) {
            Some(existing) if *existing != dep.stream => {
                return Err(Error::InputFormatError(format!(
                    "Conflicting streams for dependency '{}': '{}' and '{}'",
                    dep.module, existing, dep.stream
                )));
            }
            Some(_) => {}
            None => {
                requires.insert(dep.module, dep.stream);
            }
        }
    }

    Ok(requires)
}

/// Default description naming the generating tool
pub fn default_description(tool: &str) -> String {
    format!("This module has been generated using {} tool", tool)
}

/// A package after header inspection and identity resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectedPackage {
    pub path: PathBuf,
    pub nevra: Nevra,
    pub header: HeaderInfo,
}

/// Everything a module document is rendered from
///
/// Sets and maps are ordered containers, so two descriptors built from the
/// same packages in different orders compare and serialize identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub name: String,
    pub stream: String,
    pub version: i64,
    pub context: String,
    pub arch: String,
    pub summary: String,
    pub description: String,
    pub module_license: String,
    pub content_licenses: BTreeSet<String>,
    pub package_names: BTreeSet<String>,
    pub artifacts: BTreeSet<String>,
    pub dependencies: BTreeMap<String, String>,
}

impl ModuleDescriptor {
    /// The N:S:V:C:A tuple this descriptor was built for
    pub fn nsvca(&self) -> Nsvca {
        Nsvca {
            name: self.name.clone(),
            stream: self.stream.clone(),
            version: self.version,
            context: self.context.clone(),
            arch: self.arch.clone(),
        }
    }
}

/// Incrementally merges per-package results into a [`ModuleDescriptor`]
#[derive(Debug, Clone)]
pub struct DescriptorBuilder {
    descriptor: ModuleDescriptor,
}

impl DescriptorBuilder {
    /// Start a descriptor for `nsvca` with the given summary
    pub fn new(nsvca: Nsvca, summary: impl Into<String>) -> Self {
        Self {
            descriptor: ModuleDescriptor {
                name: nsvca.name,
                stream: nsvca.stream,
                version: nsvca.version,
                context: nsvca.context,
                arch: nsvca.arch,
                summary: summary.into(),
                description: default_description(env!("CARGO_PKG_NAME")),
                module_license: DEFAULT_MODULE_LICENSE.to_string(),
                content_licenses: BTreeSet::new(),
                package_names: BTreeSet::new(),
                artifacts: BTreeSet::new(),
                dependencies: BTreeMap::new(),
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.descriptor.description = description.into();
        self
    }

    pub fn module_license(mut self, license: impl Into<String>) -> Self {
        self.descriptor.module_license = license.into();
        self
    }

    pub fn dependencies(mut self, dependencies: BTreeMap<String, String>) -> Self {
        self.descriptor.dependencies = dependencies;
        self
    }

    /// Record one package: its name, canonical identity and license
    pub fn add_package(&mut self, package: &InspectedPackage) -> &mut Self {
        self.descriptor
            .package_names
            .insert(package.nevra.name.clone());
        self.descriptor.artifacts.insert(package.nevra.to_string());
        self.descriptor
            .content_licenses
            .insert(package.header.license.clone());
        self
    }

    pub fn build(self) -> ModuleDescriptor {
        self.descriptor
    }
}

/// Module level fields taken from the command line
#[derive(Debug, Clone)]
pub struct ModuleFields {
    pub nsvca: Nsvca,
    pub summary: String,
    pub description: Option<String>,
    pub module_license: String,
}

/// Merge module fields, dependencies and inspected packages into a descriptor
pub fn aggregate(
    fields: ModuleFields,
    dependencies: BTreeMap<String, String>,
    packages: &[InspectedPackage],
) -> ModuleDescriptor {
    let mut builder = DescriptorBuilder::new(fields.nsvca, fields.summary)
        .module_license(fields.module_license)
        .dependencies(dependencies);
    if let Some(description) = fields.description {
        builder = builder.description(description);
    }

    for package in packages {
        builder.add_package(package);
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nsvca() -> Nsvca {
        Nsvca::parse("foo:1.0:202401010000:abcdef:x86_64").unwrap()
    }

    fn fields() -> ModuleFields {
        ModuleFields {
            nsvca: nsvca(),
            summary: "Foo module".to_string(),
            description: None,
            module_license: DEFAULT_MODULE_LICENSE.to_string(),
        }
    }

    fn package(stem: &str, license: &str) -> InspectedPackage {
        InspectedPackage {
            path: PathBuf::from(format!("{}.rpm", stem)),
            nevra: Nevra::parse(stem).unwrap(),
            header: HeaderInfo::new(license, true),
        }
    }

    #[test]
    fn test_parse_nsvca() {
        let nsvca = nsvca();
        assert_eq!(nsvca.name, "foo");
        assert_eq!(nsvca.stream, "1.0");
        assert_eq!(nsvca.version, 202401010000);
        assert_eq!(nsvca.context, "abcdef");
        assert_eq!(nsvca.arch, "x86_64");
        assert_eq!(nsvca.to_string(), "foo:1.0:202401010000:abcdef:x86_64");
    }

    #[test]
    fn test_parse_nsvca_wrong_field_count() {
        for input in ["foo:1.0:1:abc", "foo:1.0:1:abc:x86_64:extra", "foo"] {
            let err = Nsvca::parse(input).unwrap_err();
            assert!(matches!(err, Error::InputFormatError(_)), "{input}");
        }
    }

    #[test]
    fn test_parse_nsvca_bad_version() {
        let err = Nsvca::parse("foo:1.0:v1:abc:x86_64").unwrap_err();
        assert!(matches!(err, Error::InputFormatError(_)));
    }

    #[test]
    fn test_parse_nsvca_empty_field() {
        let err = Nsvca::parse("foo::1:abc:x86_64").unwrap_err();
        assert!(err.to_string().contains("stream"));
    }

    #[test]
    fn test_parse_dependency() {
        let dep = ModuleDependency::parse("platform:el9").unwrap();
        assert_eq!(dep.module, "platform");
        assert_eq!(dep.stream, "el9");
    }

    #[test]
    fn test_parse_dependency_rejects_bad_colons() {
        for input in ["platform", "platform:el9:extra", ":el9", "platform:"] {
            let err = ModuleDependency::parse(input).unwrap_err();
            assert!(matches!(err, Error::InputFormatError(_)), "{input}");
        }
    }

    #[test]
    fn test_parse_dependencies_collapses_identical_duplicates() {
        let deps = parse_dependencies(&["platform:el9", "nodejs:18", "platform:el9"]).unwrap();
        assert_eq!(deps.len(), 2);
        assert_eq!(deps["platform"], "el9");
        assert_eq!(deps["nodejs"], "18");
    }

    #[test]
    fn test_parse_dependencies_rejects_conflicting_streams() {
        let err = parse_dependencies(&["platform:el8", "platform:el9"]).unwrap_err();
        assert!(matches!(err, Error::InputFormatError(_)));
        assert!(err.to_string().contains("platform"));
    }

    #[test]
    fn test_parse_dependencies_empty() {
        let deps = parse_dependencies::<&str>(&[]).unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_aggregate_defaults() {
        let descriptor = aggregate(fields(), BTreeMap::new(), &[]);
        assert_eq!(descriptor.module_license, "MIT");
        assert_eq!(
            descriptor.description,
            "This module has been generated using dir2module tool"
        );
        assert!(descriptor.artifacts.is_empty());
        assert_eq!(descriptor.nsvca(), nsvca());
    }

    #[test]
    fn test_aggregate_is_idempotent_on_duplicates() {
        let pkg = package("foo-1.0-1.x86_64", "MIT");
        let once = aggregate(fields(), BTreeMap::new(), std::slice::from_ref(&pkg));
        let twice = aggregate(fields(), BTreeMap::new(), &[pkg.clone(), pkg]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_aggregate_ignores_input_order() {
        let a = package("foo-1.0-1.x86_64", "MIT");
        let b = package("bar-2.0-1.noarch", "GPLv2");
        let forward = aggregate(fields(), BTreeMap::new(), &[a.clone(), b.clone()]);
        let backward = aggregate(fields(), BTreeMap::new(), &[b, a]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_aggregate_merges_names_and_artifacts() {
        let packages = [
            package("foo-1.0-1.x86_64", "MIT"),
            package("foo-1.1-1.x86_64", "MIT"),
            package("foo-libs-1.0-1.x86_64", "LGPLv2+"),
        ];
        let descriptor = aggregate(fields(), BTreeMap::new(), &packages);

        assert_eq!(
            descriptor.package_names.iter().collect::<Vec<_>>(),
            vec!["foo", "foo-libs"]
        );
        assert_eq!(descriptor.artifacts.len(), 3);
        assert!(descriptor.artifacts.contains("foo-0:1.1-1.x86_64"));
        assert_eq!(
            descriptor.content_licenses.iter().collect::<Vec<_>>(),
            vec!["LGPLv2+", "MIT"]
        );
    }

    #[test]
    fn test_aggregate_overrides() {
        let mut fields = fields();
        fields.description = Some("Custom".to_string());
        fields.module_license = "Apache-2.0".to_string();
        let deps = parse_dependencies(&["platform:el9"]).unwrap();

        let descriptor = aggregate(fields, deps, &[]);
        assert_eq!(descriptor.description, "Custom");
        assert_eq!(descriptor.module_license, "Apache-2.0");
        assert_eq!(descriptor.dependencies["platform"], "el9");
    }
}
