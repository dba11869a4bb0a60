use std::io::Write;

use strand_core::{ObjectKind, Options, ReportError};
use strand_state::{ForceSolver, SimulationState};
use tracing::{debug, warn};

use crate::query::{Category, Query};
use crate::render;

/// Report body selected by a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// Length, center and direction of fibers, grouped by class.
    FiberListing,
    /// State, position and direction of both fiber ends.
    FiberEnds,
    /// Model points of every fiber.
    FiberPoints,
    /// Deterministic speckles along every fiber.
    FiberSpeckles,
    /// Segment lengths and kinks per class.
    FiberSegments,
    /// Length statistics per class.
    FiberLengths,
    /// Length histogram per class.
    FiberLengthDistribution,
    /// Summed tension across a plane.
    FiberTensions,
    /// Fibers per dynamic state of each end.
    FiberDynamics,
    /// Forces on every model point.
    FiberForces,
    /// Clusters of bridged fibers.
    FiberClusters,
    /// Bead positions.
    BeadPositions,
    /// Beads per number of attached grafted singles.
    BeadSingles,
    /// Single state counts per class.
    SingleCounts,
    /// Positions and forces of all singles.
    SinglePositions,
    /// Positions and forces of attached singles.
    SingleForces,
    /// Positions and forces of the singles of one class.
    SingleClass(usize),
    /// Couple state counts per class.
    CoupleCounts,
    /// Positions of all couples.
    CouplePositions,
    /// Positions of the couples of one class.
    CoupleClass(usize),
    /// Solid positions.
    Solids,
    /// Sphere positions.
    Spheres,
    /// Spatial boundaries.
    Spaces,
    /// Organizer positions.
    Organizers,
    /// Simulated time.
    Time,
    /// Every configuration record.
    Parameters,
    /// End-to-end distances of fibers.
    Custom,
}

/// One named entry of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subcategory {
    /// Subcategory token; empty for the default report.
    pub name: &'static str,
    /// Report it selects.
    pub report: Report,
    /// Option keys the report reads.
    pub options: &'static [&'static str],
}

/// Fallback applied to subcategories that are not named in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wildcard {
    /// Unknown names are errors.
    Reject,
    /// Unknown names are class names of this variant.
    ConfigurationClass(ObjectKind),
    /// Every name selects the default report.
    Any,
}

/// Table row of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryEntry {
    /// Category of the row.
    pub category: Category,
    /// Report used without subcategory.
    pub default: Subcategory,
    /// Named subcategories.
    pub named: &'static [Subcategory],
    /// Fallback for other names.
    pub wildcard: Wildcard,
}

impl CategoryEntry {
    /// Names of the named subcategories.
    pub fn subcategory_names(&self) -> Vec<&'static str> {
        self.named.iter().map(|sub| sub.name).collect()
    }
}

const fn sub(name: &'static str, report: Report) -> Subcategory {
    Subcategory {
        name,
        report,
        options: &[],
    }
}

const fn sub_with(
    name: &'static str,
    report: Report,
    options: &'static [&'static str],
) -> Subcategory {
    Subcategory {
        name,
        report,
        options,
    }
}

const fn only(category: Category, report: Report) -> CategoryEntry {
    CategoryEntry {
        category,
        default: sub("", report),
        named: &[],
        wildcard: Wildcard::Reject,
    }
}

const FIBER: &[Subcategory] = &[
    sub("ends", Report::FiberEnds),
    sub("points", Report::FiberPoints),
    sub_with("speckles", Report::FiberSpeckles, &["interval"]),
    sub("segments", Report::FiberSegments),
    sub("dynamics", Report::FiberDynamics),
    sub("lengths", Report::FiberLengths),
    sub_with(
        "length_distribution",
        Report::FiberLengthDistribution,
        &["interval", "max"],
    ),
    sub_with("tensions", Report::FiberTensions, &["plane"]),
    sub("forces", Report::FiberForces),
    sub_with("clusters", Report::FiberClusters, &["details"]),
];

const BEAD: &[Subcategory] = &[
    sub("all", Report::BeadPositions),
    sub("positions", Report::BeadPositions),
    sub("singles", Report::BeadSingles),
];

const SINGLE: &[Subcategory] = &[
    sub("all", Report::SinglePositions),
    sub("positions", Report::SinglePositions),
    sub("forces", Report::SingleForces),
];

const COUPLE: &[Subcategory] = &[
    sub("all", Report::CouplePositions),
    sub("positions", Report::CouplePositions),
];

/// Query table, one row per category in [`Category::ALL`] order.
pub const TABLE: [CategoryEntry; 11] = [
    CategoryEntry {
        category: Category::Fiber,
        default: sub("", Report::FiberListing),
        named: FIBER,
        wildcard: Wildcard::Reject,
    },
    CategoryEntry {
        category: Category::Bead,
        default: sub("", Report::BeadPositions),
        named: BEAD,
        wildcard: Wildcard::Reject,
    },
    only(Category::Solid, Report::Solids),
    only(Category::Space, Report::Spaces),
    only(Category::Sphere, Report::Spheres),
    CategoryEntry {
        category: Category::Single,
        default: sub("", Report::SingleCounts),
        named: SINGLE,
        wildcard: Wildcard::ConfigurationClass(ObjectKind::Single),
    },
    CategoryEntry {
        category: Category::Couple,
        default: sub("", Report::CoupleCounts),
        named: COUPLE,
        wildcard: Wildcard::ConfigurationClass(ObjectKind::Couple),
    },
    only(Category::Organizer, Report::Organizers),
    only(Category::Time, Report::Time),
    only(Category::Parameters, Report::Parameters),
    CategoryEntry {
        category: Category::Custom,
        default: sub("", Report::Custom),
        named: &[],
        wildcard: Wildcard::Any,
    },
];

/// Table row of `category`.
pub fn lookup(category: Category) -> &'static CategoryEntry {
    &TABLE[category.index()]
}

/// Resolves a parsed query to its report and recognised option keys.
///
/// Configuration-class names are checked against the records of `state`.
pub fn resolve(
    query: &Query,
    state: &SimulationState,
) -> Result<(Report, &'static [&'static str]), ReportError> {
    let entry = lookup(query.category);
    let name = query.subcategory.as_str();
    if name.is_empty() {
        return Ok((entry.default.report, entry.default.options));
    }
    if let Some(found) = entry.named.iter().find(|sub| sub.name == name) {
        return Ok((found.report, found.options));
    }
    match entry.wildcard {
        Wildcard::Any => Ok((entry.default.report, entry.default.options)),
        Wildcard::ConfigurationClass(kind) => {
            let prop = state
                .properties
                .find(kind, name)
                .ok_or_else(|| {
                    let allowed: Vec<&str> = state
                        .properties
                        .find_all(kind)
                        .into_iter()
                        .map(|prop| prop.name())
                        .collect();
                    ReportError::unknown_class(kind.as_str(), name, &allowed)
                })?;
            let report = match kind {
                ObjectKind::Couple => Report::CoupleClass(prop.index()),
                _ => Report::SingleClass(prop.index()),
            };
            Ok((report, &[]))
        }
        Wildcard::Reject => Err(ReportError::unknown_subcategory(
            query.category.as_str(),
            name,
            &entry.subcategory_names(),
        )),
    }
}

/// Renders reports of one simulation state.
///
/// The state is only borrowed; force reports obtain a fresh force field from
/// the solver on every call.
pub struct Reporter<'a> {
    state: &'a SimulationState,
    solver: &'a dyn ForceSolver,
}

impl<'a> Reporter<'a> {
    /// Creates a reporter over `state`.
    pub fn new(state: &'a SimulationState, solver: &'a dyn ForceSolver) -> Self {
        Self { state, solver }
    }

    /// State being reported.
    pub fn state(&self) -> &'a SimulationState {
        self.state
    }

    /// Writes the report selected by `query` followed by one blank line.
    ///
    /// Output written before a failure is left in `out`.
    pub fn report(
        &self,
        out: &mut dyn Write,
        query: &str,
        options: &Options,
    ) -> Result<(), ReportError> {
        let parsed = Query::parse(query)?;
        let (report, recognised) = resolve(&parsed, self.state)?;
        for key in options.keys() {
            if !recognised.contains(&key) {
                warn!(query = %parsed, key, "option not used by this report");
            }
        }
        debug!(query = %parsed, ?report, "rendering report");
        render::render(report, self.state, self.solver, out, options)?;
        writeln!(out)?;
        Ok(())
    }
}
