use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use strand_report::{run_batch, BatchConfig};
use tracing::info;

use crate::open_output;

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// YAML batch configuration.
    #[arg(long)]
    pub config: PathBuf,
}

pub fn run(args: &BatchArgs) -> Result<(), Box<dyn Error>> {
    let config = BatchConfig::from_path(&args.config)?;
    let mut out = open_output(config.output.as_deref())?;
    let outcome = run_batch(&config, &mut out);
    out.flush()?;
    let written = outcome?;
    info!(config = %args.config.display(), reports = written, "batch complete");
    Ok(())
}
