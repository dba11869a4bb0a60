use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::{Parser, Subcommand};
use commands::{
    batch::{self, BatchArgs},
    queries,
    report::{self, ReportArgs},
};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "strand", about = "Text reports over fiber simulation snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one query against a snapshot.
    Report(ReportArgs),
    /// Run the queries listed in a YAML batch configuration.
    Batch(BatchArgs),
    /// Print every category, subcategory and option key.
    Queries,
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Command::Report(args) => report::run(&args),
        Command::Batch(args) => batch::run(&args),
        Command::Queries => queries::run(),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Buffered sink on `path`, or on standard output.
pub(crate) fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, Box<dyn Error>> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
