//! CLI definition and execution
//!
//! s3cp has a single job, so there are no subcommands: the two positionals
//! drive a copy, and `--completions` is the only alternative mode.

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use s3cp_core::ConfigManager;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod completions;
pub mod cp;

/// s3cp - copy a single file to or from S3
///
/// Exactly one of SOURCE and DESTINATION must be an s3://bucket[/key] URL.
/// Uploading to a bucket or a key ending in '/' appends the local file name.
#[derive(Parser, Debug)]
#[command(name = "s3cp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub cp: cp::CpArgs,

    /// Output format: human-readable or JSON
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL", exclusive = true)]
    pub completions: Option<Shell>,
}

/// One-line usage string for error hints
pub fn usage() -> String {
    Cli::command().render_usage().to_string()
}

/// Execute the CLI and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    if let Some(shell) = cli.completions {
        return completions::execute(shell);
    }

    let mut output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };

    let config = match ConfigManager::new().and_then(|manager| manager.load()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            Formatter::new(output_config).error(&format!("Failed to load configuration: {e}"));
            return ExitCode::from(&e);
        }
    };

    output_config.json |= config.defaults.output == "json";
    let formatter = Formatter::new(output_config);

    cp::execute(cli.cp, &config.defaults, &formatter).await
}
