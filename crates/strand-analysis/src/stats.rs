use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strand_core::{ObjectKind, ObjectNumber, ReportError, Vector};
use strand_state::{
    CoupleState, Fiber, FiberEnd, ForceField, ObjectSet, SimObject, SimulationState, SingleState,
};

/// Number of dynamic states tallied per fiber end.
pub const DYNAMIC_STATES: usize = 5;

/// Bins of the bead occupancy histogram; the last bin collects the rest.
pub const BEAD_SINGLE_BINS: usize = 12;

/// Upper bound on the number of regular histogram bins.
pub const MAX_BINS: usize = 1 << 20;

/// Object count per class index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    per_class: Vec<usize>,
    total: usize,
}

impl ClassCounts {
    /// Objects whose class has index `class`.
    pub fn count(&self, class: usize) -> usize {
        self.per_class.get(class).copied().unwrap_or(0)
    }

    /// Objects of every class.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Counts in class index order.
    pub fn per_class(&self) -> &[usize] {
        &self.per_class
    }
}

/// Counts the objects of `set` per class, for at least `classes` classes.
pub fn class_counts<T: SimObject>(set: &ObjectSet<T>, classes: usize) -> ClassCounts {
    let mut per_class = vec![0; classes];
    for object in set {
        let class = object.property();
        if class >= per_class.len() {
            per_class.resize(class + 1, 0);
        }
        per_class[class] += 1;
    }
    ClassCounts {
        total: set.len(),
        per_class,
    }
}

/// Count, mean, population standard deviation and sum of a sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LengthSummary {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean; zero for an empty sample.
    pub mean: f64,
    /// Population standard deviation; zero for an empty sample.
    pub std_dev: f64,
    /// Sum of the values.
    pub total: f64,
}

impl LengthSummary {
    /// Summarises `values` in a single pass (Welford update).
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut count = 0usize;
        let mut mean = 0.0;
        let mut m2 = 0.0;
        let mut total = 0.0;
        for value in values {
            count += 1;
            total += value;
            let delta = value - mean;
            mean += delta / count as f64;
            m2 += delta * (value - mean);
        }
        if count == 0 {
            return Self::default();
        }
        Self {
            count,
            mean,
            std_dev: (m2 / count as f64).max(0.0).sqrt(),
            total,
        }
    }
}

/// Length statistics of `fibers`.
pub fn fiber_lengths<'a, I: IntoIterator<Item = &'a Fiber>>(fibers: I) -> LengthSummary {
    LengthSummary::from_values(fibers.into_iter().map(Fiber::length))
}

/// Fixed width histogram `[0, w), [w, 2w), ...` with a trailing overflow bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    width: f64,
    max: f64,
    counts: Vec<u64>,
}

impl Histogram {
    /// Creates `ceil(max / width)` regular bins plus the overflow bin.
    pub fn new(width: f64, max: f64) -> Result<Self, ReportError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ReportError::invalid_parameter(
                "interval",
                format!("bin width must be positive, got {width}"),
            ));
        }
        if !max.is_finite() || max <= 0.0 {
            return Err(ReportError::invalid_parameter(
                "max",
                format!("histogram maximum must be positive, got {max}"),
            ));
        }
        let bins = (max / width).ceil();
        if bins > MAX_BINS as f64 {
            return Err(ReportError::invalid_parameter(
                "interval",
                format!("{bins} bins requested, at most {MAX_BINS} are supported"),
            ));
        }
        Ok(Self {
            width,
            max,
            counts: vec![0; bins as usize + 1],
        })
    }

    /// Number of regular bins.
    pub fn nb_bins(&self) -> usize {
        self.counts.len() - 1
    }

    /// Records one value; values on a boundary go to the upper bin.
    pub fn add(&mut self, value: f64) {
        let overflow = self.nb_bins();
        let bin = if value.is_nan() || value >= self.max {
            overflow
        } else if value <= 0.0 {
            0
        } else {
            ((value / self.width).floor() as usize).min(overflow)
        };
        self.counts[bin] += 1;
    }

    /// Counts per bin, overflow last.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Lower edge of every bin, overflow included.
    pub fn lower_edges(&self) -> Vec<f64> {
        (0..self.counts.len())
            .map(|bin| self.width * bin as f64)
            .collect()
    }

    /// Number of recorded values.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Segment statistics of a group of fibers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummary {
    /// Number of fibers.
    pub fibers: usize,
    /// Interior model points.
    pub joints: usize,
    /// Joints where the fiber folds back (consecutive segments at more than 90 degrees).
    pub kinks: usize,
    /// Shortest segment; zero without fibers.
    pub min_segment: f64,
    /// Longest segment; zero without fibers.
    pub max_segment: f64,
}

/// Segment statistics of `fibers`.
pub fn segment_summary<'a, I: IntoIterator<Item = &'a Fiber>>(fibers: I) -> SegmentSummary {
    let mut summary = SegmentSummary::default();
    let mut range: Option<(f64, f64)> = None;
    for fiber in fibers {
        summary.fibers += 1;
        summary.joints += fiber.nb_points().saturating_sub(2);
        let points = fiber.points();
        for joint in 1..fiber.last_point() {
            let before = points[joint] - points[joint - 1];
            let after = points[joint + 1] - points[joint];
            if before.dot(&after) < 0.0 {
                summary.kinks += 1;
            }
        }
        for length in fiber.segment_lengths() {
            range = Some(match range {
                None => (length, length),
                Some((low, high)) => (low.min(length), high.max(length)),
            });
        }
    }
    if let Some((low, high)) = range {
        summary.min_segment = low;
        summary.max_segment = high;
    }
    summary
}

/// Fibers per dynamic state of one end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicCounts {
    /// Number of fibers, including those in states beyond the tallied range.
    pub total: usize,
    /// Fibers in states `0..DYNAMIC_STATES`.
    pub states: [usize; DYNAMIC_STATES],
}

/// Tallies the dynamic state of `end` over `fibers`.
pub fn dynamic_counts<'a, I: IntoIterator<Item = &'a Fiber>>(
    fibers: I,
    end: FiberEnd,
) -> DynamicCounts {
    let mut counts = DynamicCounts::default();
    for fiber in fibers {
        counts.total += 1;
        if let Some(slot) = counts.states.get_mut(usize::from(fiber.dynamic_state(end))) {
            *slot += 1;
        }
    }
    counts
}

/// Plane `normal . x + offset = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Normal vector.
    pub normal: Vector,
    /// Scalar offset.
    pub offset: f64,
}

impl Plane {
    /// Builds a plane from a normal and an offset.
    pub fn new(normal: Vector, offset: f64) -> Self {
        Self { normal, offset }
    }

    /// Reads `nx ny nz [a]`.
    pub fn from_values(values: &[f64]) -> Result<Self, ReportError> {
        match values {
            [x, y, z] => Ok(Self::new(Vector::new(*x, *y, *z), 0.0)),
            [x, y, z, a] => Ok(Self::new(Vector::new(*x, *y, *z), *a)),
            _ => Err(ReportError::invalid_parameter(
                "plane",
                format!(
                    "plane needs a normal and an optional offset, got {} values",
                    values.len()
                ),
            )),
        }
    }

    /// Signed distance of `pos` scaled by the norm of the normal.
    pub fn side(&self, pos: &Vector) -> f64 {
        self.normal.dot(pos) + self.offset
    }

    /// Whether the segment `[a, b]` has its ends on opposite sides.
    pub fn crosses(&self, a: &Vector, b: &Vector) -> bool {
        (self.side(a) < 0.0) != (self.side(b) < 0.0)
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::new(Vector::x(), 0.0)
    }
}

/// Number of segments and their summed tension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TensionSummary {
    /// Segments included.
    pub count: usize,
    /// Sum of their tensions.
    pub total: f64,
}

/// Sums tensions over the segments crossing `plane`, or over all segments.
pub fn tension_summary(
    state: &SimulationState,
    field: &ForceField,
    plane: Option<&Plane>,
) -> TensionSummary {
    let mut summary = TensionSummary::default();
    for fiber in &state.fibers {
        let points = fiber.points();
        for segment in 0..fiber.last_point() {
            let included = plane
                .map(|plane| plane.crosses(&points[segment], &points[segment + 1]))
                .unwrap_or(true);
            if included {
                summary.count += 1;
                summary.total += field.tension(fiber.number(), segment);
            }
        }
    }
    summary
}

/// Beads per number of attached singles grafted on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeadSingleCounts {
    /// `counts[k]` beads carry `k` attached singles; the last entry also holds larger values.
    pub counts: [usize; BEAD_SINGLE_BINS],
}

/// Classifies beads by the number of their grafted singles bound to a fiber.
pub fn bead_single_counts(state: &SimulationState) -> BeadSingleCounts {
    let mut attached: BTreeMap<ObjectNumber, usize> = BTreeMap::new();
    for single in &state.singles {
        if single.state() != SingleState::Attached {
            continue;
        }
        if let Some(foot) = single.foot() {
            if foot.kind == ObjectKind::Bead {
                *attached.entry(foot.number).or_default() += 1;
            }
        }
    }
    let mut result = BeadSingleCounts::default();
    for bead in &state.beads {
        let count = attached.get(&bead.number()).copied().unwrap_or(0);
        result.counts[count.min(BEAD_SINGLE_BINS - 1)] += 1;
    }
    result
}

/// Couples of one class per attachment state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoupleStateCounts {
    /// All couples of the class.
    pub total: usize,
    /// Counts in FF, AF, FA, AA order.
    pub states: [usize; 4],
}

/// Per-class couple state counts, indexed by class.
pub fn couple_state_counts(state: &SimulationState) -> Vec<CoupleStateCounts> {
    let mut counts = vec![CoupleStateCounts::default(); state.properties.count(ObjectKind::Couple)];
    for couple in &state.couples {
        let Some(entry) = counts.get_mut(couple.property()) else {
            continue;
        };
        let slot = CoupleState::ALL
            .iter()
            .position(|candidate| *candidate == couple.state())
            .unwrap_or(0);
        entry.total += 1;
        entry.states[slot] += 1;
    }
    counts
}

/// Singles of one class per attachment state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleStateCounts {
    /// All singles of the class.
    pub total: usize,
    /// Singles with a free hand.
    pub free: usize,
    /// Singles bound to a fiber.
    pub bound: usize,
}

/// Per-class single state counts, indexed by class.
pub fn single_state_counts(state: &SimulationState) -> Vec<SingleStateCounts> {
    let mut counts = vec![SingleStateCounts::default(); state.properties.count(ObjectKind::Single)];
    for single in &state.singles {
        let Some(entry) = counts.get_mut(single.property()) else {
            continue;
        };
        entry.total += 1;
        match single.state() {
            SingleState::Free => entry.free += 1,
            SingleState::Attached => entry.bound += 1,
        }
    }
    counts
}
