use std::fs;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use strand_core::{ErrorInfo, ReportError};
use tracing::debug;

use crate::simul::SimulationState;

fn io_error(code: &str, path: &Path, err: impl ToString) -> ReportError {
    ReportError::Io(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

/// Serializes a value into pretty printed JSON bytes.
pub fn to_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, ReportError> {
    serde_json::to_vec_pretty(value).map_err(|err| ReportError::serde("json_serialize", err))
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, ReportError> {
    serde_json::from_slice(data).map_err(|err| ReportError::serde("json_deserialize", err))
}

/// Serializes a value into YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, ReportError> {
    serde_yaml::to_string(value).map_err(|err| ReportError::serde("yaml_serialize", err))
}

/// Deserializes a YAML payload into the requested type.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, ReportError> {
    serde_yaml::from_slice(data).map_err(|err| ReportError::serde("yaml_deserialize", err))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Loads and validates a snapshot; `.json` files are JSON, anything else YAML.
pub fn load_state(path: &Path) -> Result<SimulationState, ReportError> {
    let bytes = fs::read(path).map_err(|err| io_error("snapshot_read", path, err))?;
    let state: SimulationState = if is_json(path) {
        from_json_slice(&bytes)?
    } else {
        from_yaml_slice(&bytes)?
    };
    state.validate()?;
    debug!(
        path = %path.display(),
        fibers = state.fibers.len(),
        couples = state.couples.len(),
        singles = state.singles.len(),
        "loaded snapshot"
    );
    Ok(state)
}

/// Writes a snapshot in the format selected by the file extension.
pub fn save_state(state: &SimulationState, path: &Path) -> Result<(), ReportError> {
    let bytes = if is_json(path) {
        to_json_bytes(state)?
    } else {
        to_yaml_string(state)?.into_bytes()
    };
    fs::write(path, bytes).map_err(|err| io_error("snapshot_write", path, err))
}
