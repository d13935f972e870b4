// build.rs

use clap::{Arg, ArgAction, ArgGroup, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("dir2module")
        .version(env!("CARGO_PKG_VERSION"))
        .author("dir2module Contributors")
        .about("Generate a N:S:V:C:A.modulemd.yaml describing a set of RPM packages")
        .arg(
            Arg::new("nsvca")
                .required(true)
                .help("Module name, stream, version, context and architecture in a N:S:V:C:A format"),
        )
        .arg(Arg::new("summary").short('m').long("summary").required(true).help("Module summary"))
        .arg(Arg::new("description").short('d').long("description").help("Module description"))
        .arg(
            Arg::new("license")
                .short('l')
                .long("license")
                .default_value("MIT")
                .help("Module license"),
        )
        .arg(
            Arg::new("requires")
                .short('r')
                .long("requires")
                .value_name("N:S")
                .action(ArgAction::Append)
                .help("Module runtime dependencies in a N:S format; repeat for multiple dependencies"),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .action(ArgAction::SetTrue)
                .help("Suppress all constraints and hope for the best"),
        )
        .arg(Arg::new("dir").long("dir").help("Directory to search recursively for RPM packages"))
        .arg(Arg::new("pkglist").long("pkglist").help("File listing RPM packages, separated by whitespace"))
        .group(ArgGroup::new("input").required(true).args(["dir", "pkglist"]))
        .arg(
            Arg::new("write")
                .short('w')
                .long("write")
                .action(ArgAction::SetTrue)
                .help("Also write N:S:V:C:A.modulemd.yaml into the current directory"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Do not print the document to standard output"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug)"),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("dir2module.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
