//! themegen CLI - themed stylesheet generator.
//!
//! Provides commands for:
//! - `generate`: Render every configured variant of the template (default)
//! - `check`: Validate substitution lists without writing anything

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, GenerateArgs};
use output::Output;

/// themegen - Generate themed stylesheets from one template.
#[derive(Parser)]
#[command(name = "themegen", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the template once per variant (the default command).
    Generate(GenerateArgs),
    /// Parse substitution lists and render in memory without writing.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // Running without a subcommand renders every variant with defaults
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Generate(GenerateArgs::default()));

    let verbose = match &command {
        Commands::Generate(args) => args.target.verbose,
        Commands::Check(args) => args.target.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match command {
        Commands::Generate(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_generate() {
        let cli = Cli::try_parse_from(["themegen"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "themegen",
            "generate",
            "--base-dir",
            "styles",
            "--variant",
            "dark",
            "--dry-run",
            "-v",
        ])
        .unwrap();
        let Some(Commands::Generate(args)) = cli.command else {
            panic!("expected generate command");
        };
        assert!(args.target.verbose);
    }

    #[test]
    fn test_parse_check_flags() {
        let cli = Cli::try_parse_from(["themegen", "check", "--strict", "-c", "themegen.toml"])
            .unwrap();
        assert!(matches!(cli.command, Some(Commands::Check(_))));
    }
}
