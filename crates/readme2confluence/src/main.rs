//! readme2confluence CLI.
//!
//! Publishes the project readme to a Confluence page named after the
//! package, creating the page or updating it with the next version.

mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::PublishArgs;
use output::Output;

/// readme2confluence - publish a project readme to Confluence.
#[derive(Parser)]
#[command(name = "readme2confluence", version, about)]
struct Cli {
    #[command(flatten)]
    publish: PublishArgs,

    /// Enable verbose output (show progress logs).
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.publish.execute(&output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
