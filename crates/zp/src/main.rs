//! zp CLI - tabbed code samples to zone pivots.
//!
//! Provides commands for:
//! - `convert`: Rewrite tabbed code-sample groups in markdown files
//! - `classify`: Show the pivot id for a tab header or fence language

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ClassifyArgs, ConvertArgs};
use output::Output;

/// zp - Convert tabbed code samples to zone pivots.
#[derive(Parser)]
#[command(name = "zp", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert tabbed code-sample groups in markdown files.
    Convert(ConvertArgs),
    /// Print the pivot id for a tab header or code fence language.
    Classify(ClassifyArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Convert(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Classify(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
