//! s3cp - copy a single file between the local filesystem and S3
//!
//! The direction is inferred from which argument is an s3://bucket[/key] URL.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use s3cp_cli::commands::{self, Cli};
use s3cp_cli::exit_code::ExitCode;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures
            let code = if e.use_stderr() {
                ExitCode::UsageError
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    // RUST_LOG wins over --debug
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.debug { "debug" } else { "off" }));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
