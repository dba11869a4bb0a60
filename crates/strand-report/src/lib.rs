#![deny(missing_docs)]
#![doc = "Maps `category[:subcategory]` queries onto text reports over a simulation state."]

/// YAML batch configuration for running several queries.
pub mod config;
/// Two-level query table and the [`Reporter`] entry point.
pub mod dispatch;
/// Query parsing.
pub mod query;
/// Report bodies.
pub mod render;

pub use config::{run_batch, BatchConfig, BatchQuery};
pub use dispatch::{lookup, resolve, CategoryEntry, Report, Reporter, Subcategory, Wildcard};
pub use query::{Category, Query};
