#![deny(missing_docs)]
#![doc = "Shared identifiers, error taxonomy, option bag and deterministic recurrences for the strand reporting crates."]

pub mod errors;
pub mod options;
pub mod rng;
mod ids;

pub use errors::{ErrorInfo, ReportError};
pub use ids::{ObjectKind, ObjectNumber, ObjectRef};
pub use options::{OptionValue, Options};
pub use rng::{derive_substream_seed, lcrng1, lcrng2, unit_interval, RngHandle};

/// Three dimensional vector used for every position, direction and force.
pub type Vector = nalgebra::Vector3<f64>;
