// src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

/// Log filter for a given `-v` count, unless `RUST_LOG` is set
fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so the document on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_log_level(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    match commands::cmd_generate(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        assert_eq!(default_log_level(0), "warn");
        assert_eq!(default_log_level(1), "info");
        assert_eq!(default_log_level(5), "debug");
    }
}
