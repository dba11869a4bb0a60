#![deny(missing_docs)]
#![doc = "Object registries, configuration records, force seam and snapshot I/O for the strand reporting crates."]

/// Programmatic construction of simulation states.
pub mod builder;
/// Force recomputation seam.
pub mod forces;
/// Simulation object variants.
pub mod objects;
/// Configuration records shared by objects of one class.
pub mod property;
/// Ordered object registries.
pub mod registry;
/// Aggregate state read by reports.
pub mod simul;
/// JSON and YAML snapshot helpers.
pub mod snapshot;

pub use builder::StateBuilder;
pub use forces::{FiberForces, ForceField, ForceSolver, RecordedForces};
pub use objects::{
    Attachment, Bead, Couple, CoupleState, Fiber, FiberEnd, Hand, Organizer, Single, SingleState,
    Solid, SpaceBoundary, Sphere,
};
pub use property::{Property, PropertyList};
pub use registry::{ObjectSet, SimObject};
pub use simul::SimulationState;
pub use snapshot::{load_state, save_state};
