use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strand_core::{ErrorInfo, Options, ReportError};
use strand_state::{load_state, RecordedForces};
use tracing::info;

use crate::dispatch::Reporter;

/// YAML description of a batch of reports over one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Snapshot to load; relative paths resolve against the configuration file.
    pub state: PathBuf,
    /// Destination file; standard output when absent.
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Reports to run, in order.
    #[serde(default)]
    pub queries: Vec<BatchQuery>,
}

/// One report of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchQuery {
    /// `category[:subcategory]`.
    pub query: String,
    /// Options handed to the report.
    #[serde(default)]
    pub options: Options,
}

impl BatchConfig {
    /// Reads a configuration and anchors its relative paths to the file location.
    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let text = fs::read_to_string(path).map_err(|err| {
            ReportError::Io(
                ErrorInfo::new("config_read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        let mut config: BatchConfig = serde_yaml::from_str(&text)
            .map_err(|err| ReportError::serde("config_parse", err))?;
        if let Some(base) = path.parent() {
            config.state = base.join(&config.state);
            config.output = config.output.map(|output| base.join(output));
        }
        Ok(config)
    }
}

/// Loads the snapshot of `config` and writes every report to `out`.
///
/// Returns the number of reports written. Stops at the first failing query.
pub fn run_batch(config: &BatchConfig, out: &mut dyn Write) -> Result<usize, ReportError> {
    let state = load_state(&config.state)?;
    let solver = RecordedForces;
    let reporter = Reporter::new(&state, &solver);
    for (idx, entry) in config.queries.iter().enumerate() {
        reporter.report(out, &entry.query, &entry.options)?;
        info!(index = idx, query = %entry.query, "report written");
    }
    Ok(config.queries.len())
}
