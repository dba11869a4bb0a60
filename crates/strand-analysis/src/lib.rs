#![deny(missing_docs)]
#![doc = "Read-only analyses over a simulation state: fiber clusters, deterministic speckles and per-class statistics."]

/// Connected components of fibers bridged by couples.
pub mod cluster;
/// Reproducible marker points along fibers.
pub mod speckle;
/// Single pass per-class aggregators.
pub mod stats;

pub use cluster::{analyze_clusters, fiber_clusters, ClusterMap};
pub use speckle::{speckles, Speckles};
pub use stats::{
    bead_single_counts, class_counts, couple_state_counts, dynamic_counts, fiber_lengths,
    segment_summary, single_state_counts, tension_summary, BeadSingleCounts, ClassCounts,
    CoupleStateCounts, DynamicCounts, Histogram, LengthSummary, Plane, SegmentSummary,
    SingleStateCounts, TensionSummary,
};
