// src/cli.rs
//! CLI definitions for dir2module
//!
//! The command implementation lives in the `commands` module.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dir2module")]
#[command(version)]
#[command(
    about = "Generate a N:S:V:C:A.modulemd.yaml describing a set of RPM packages",
    long_about = "Recursively read RPMs from DIR or read them from the specified pkglist. \
If any RPM is missing or unreadable, error out. \
Populate artifacts/rpms with RPM NEVRAs. \
Populate license/content with the list of RPM licenses. \
Print the modulemd v2 document, or write N:S:V:C:A.modulemd.yaml in the current directory."
)]
#[command(group(ArgGroup::new("input").required(true).args(["dir", "pkglist"])))]
pub struct Cli {
    /// Module name, stream, version, context and architecture in a N:S:V:C:A format
    pub nsvca: String,

    /// Module summary
    #[arg(short = 'm', long)]
    pub summary: String,

    /// Module description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Module license
    #[arg(short, long, default_value = "MIT")]
    pub license: String,

    /// Module runtime dependencies in a N:S format; repeat for multiple dependencies
    #[arg(short, long, value_name = "N:S")]
    pub requires: Vec<String>,

    /// Suppress all constraints and hope for the best
    #[arg(long)]
    pub force: bool,

    /// Directory to search recursively for RPM packages
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// File listing RPM packages, separated by whitespace
    #[arg(long)]
    pub pkglist: Option<PathBuf>,

    /// Also write N:S:V:C:A.modulemd.yaml into the current directory
    #[arg(short, long)]
    pub write: bool,

    /// Do not print the document to standard output
    #[arg(short, long, requires = "write")]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
