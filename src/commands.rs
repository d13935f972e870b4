// src/commands.rs
//! Command handler for the dir2module CLI

use crate::cli::Cli;
use anyhow::{Context, Result};
use dir2module::module::modulemd::dump_modulemd;
use dir2module::packages::discovery::{expand_home, find_packages, find_packages_in_file};
use dir2module::{dumps_modulemd, generate, GenerateOptions, RpmInspector};
use std::path::{Path, PathBuf};
use tracing::info;

/// Collect package paths from `--dir` or `--pkglist`
fn collect_packages(cli: &Cli) -> Result<Vec<PathBuf>> {
    match (&cli.dir, &cli.pkglist) {
        (Some(dir), _) => Ok(find_packages(&expand_home(dir))?),
        (None, Some(pkglist)) => Ok(find_packages_in_file(&expand_home(pkglist))?),
        (None, None) => Err(anyhow::anyhow!("Either --dir or --pkglist is required")),
    }
}

/// Generate the module document and print and/or write it
pub fn cmd_generate(cli: Cli) -> Result<()> {
    let options = GenerateOptions {
        nsvca: cli.nsvca.clone(),
        summary: cli.summary.clone(),
        description: cli.description.clone(),
        module_license: cli.license.clone(),
        requires: cli.requires.clone(),
        force: cli.force,
    };

    // `generate` parses these again; checking here first surfaces malformed
    // N:S:V:C:A and N:S values before any directory is walked
    dir2module::Nsvca::parse(&options.nsvca)?;
    dir2module::module::parse_dependencies(&options.requires)?;

    let packages = collect_packages(&cli)?;
    let generated = generate(&RpmInspector::new(), &options, packages).map_err(|e| {
        if e.is_policy_rejection() {
            anyhow::Error::new(e)
        } else {
            anyhow::Error::new(e).context("Failed to generate module")
        }
    })?;

    if !generated.validation.is_clean() {
        info!(
            "{} packages without `ModularityLabel` header were included",
            generated.validation.waived.len()
        );
    }

    if !cli.quiet {
        let yaml = dumps_modulemd(&generated.descriptor)?;
        print!("{}", yaml);
    }

    if cli.write {
        dump_modulemd(&generated.descriptor, Path::new("."))
            .context("Failed to write module document")?;
    }

    Ok(())
}
