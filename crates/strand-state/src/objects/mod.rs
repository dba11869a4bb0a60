/// Implements [`SimObject`](crate::registry::SimObject) for a struct with
/// `number` and `property` fields.
macro_rules! sim_object {
    ($ty:ty, $kind:expr) => {
        impl $crate::registry::SimObject for $ty {
            const KIND: strand_core::ObjectKind = $kind;

            fn number(&self) -> strand_core::ObjectNumber {
                self.number
            }

            fn property(&self) -> usize {
                self.property
            }
        }
    };
}

mod bodies;
mod fiber;
mod linkers;

pub use bodies::{Bead, Organizer, Solid, SpaceBoundary, Sphere};
pub use fiber::{Fiber, FiberEnd};
pub use linkers::{Attachment, Couple, CoupleState, Hand, Single, SingleState};
