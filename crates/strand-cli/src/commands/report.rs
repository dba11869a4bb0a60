use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use strand_core::Options;
use strand_report::Reporter;
use strand_state::{load_state, RecordedForces};
use tracing::info;

use crate::open_output;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Snapshot to read; `.json` files are JSON, anything else YAML.
    #[arg(long)]
    pub state: PathBuf,
    /// Query of the form `category[:subcategory]`; repeat to run several.
    #[arg(long = "query", value_name = "WHAT", required = true)]
    pub queries: Vec<String>,
    /// Report option as `key=value`; repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
    /// Destination file instead of standard output.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &ReportArgs) -> Result<(), Box<dyn Error>> {
    let options = Options::from_assignments(&args.set)?;
    let state = load_state(&args.state)?;
    let solver = RecordedForces;
    let reporter = Reporter::new(&state, &solver);

    let mut out = open_output(args.out.as_deref())?;
    let outcome = args
        .queries
        .iter()
        .try_for_each(|query| reporter.report(&mut out, query, &options));
    out.flush()?;
    outcome?;
    info!(
        state = %args.state.display(),
        reports = args.queries.len(),
        "reports written"
    );
    Ok(())
}
