//! Report bodies. Every body starts with at least one `%` comment line
//! describing its columns; the dispatcher appends the closing blank line.

use std::fmt;
use std::io::Write;

use strand_core::{Options, ReportError, Vector};
use strand_state::{ForceSolver, SimulationState};

use crate::dispatch::Report;

mod fiber;
mod linkers;
mod misc;

/// Writes the body of `report`.
pub fn render(
    report: Report,
    state: &SimulationState,
    solver: &dyn ForceSolver,
    out: &mut dyn Write,
    options: &Options,
) -> Result<(), ReportError> {
    match report {
        Report::FiberListing => fiber::listing(state, out),
        Report::FiberEnds => fiber::ends(state, out),
        Report::FiberPoints => fiber::points(state, out),
        Report::FiberSpeckles => fiber::speckles(state, out, options),
        Report::FiberSegments => fiber::segments(state, out),
        Report::FiberLengths => fiber::lengths(state, out),
        Report::FiberLengthDistribution => fiber::length_distribution(state, out, options),
        Report::FiberTensions => fiber::tensions(state, solver, out, options),
        Report::FiberDynamics => fiber::dynamics(state, out),
        Report::FiberForces => fiber::forces(state, solver, out),
        Report::FiberClusters => fiber::clusters(state, out, options),
        Report::BeadPositions => linkers::bead_positions(state, out),
        Report::BeadSingles => linkers::bead_singles(state, out),
        Report::SingleCounts => linkers::single_counts(state, out),
        Report::SinglePositions => linkers::single_positions(state, out, None, false),
        Report::SingleForces => linkers::single_positions(state, out, None, true),
        Report::SingleClass(class) => linkers::single_positions(state, out, Some(class), false),
        Report::CoupleCounts => linkers::couple_counts(state, out),
        Report::CouplePositions => linkers::couple_positions(state, out, None),
        Report::CoupleClass(class) => linkers::couple_positions(state, out, Some(class)),
        Report::Solids => misc::solids(state, out),
        Report::Spheres => misc::spheres(state, out),
        Report::Spaces => misc::spaces(state, out),
        Report::Organizers => misc::organizers(state, out),
        Report::Time => misc::time(state, out),
        Report::Parameters => misc::parameters(state, out),
        Report::Custom => misc::custom(state, out),
    }
}

/// Fixed-point `x y z` with a per-component width.
pub(crate) struct Fixed<'a> {
    vector: &'a Vector,
    width: usize,
    precision: usize,
}

impl fmt::Display for Fixed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, p) = (self.width, self.precision);
        write!(
            f,
            "{:>w$.p$} {:>w$.p$} {:>w$.p$}",
            self.vector.x, self.vector.y, self.vector.z
        )
    }
}

pub(crate) fn fixed(vector: &Vector, width: usize, precision: usize) -> Fixed<'_> {
    Fixed {
        vector,
        width,
        precision,
    }
}

/// Leading `class number` columns shared by object listings.
pub(crate) fn object_prefix(class: usize, number: impl fmt::Display) -> String {
    format!("{class} {number:>8}")
}
