use serde::{Deserialize, Serialize};
use strand_core::{ErrorInfo, ObjectKind, ObjectNumber, ReportError};

use crate::objects::{Bead, Couple, Fiber, Hand, Organizer, Single, Solid, SpaceBoundary, Sphere};
use crate::property::PropertyList;
use crate::registry::{ObjectSet, SimObject};

/// Live state of a simulation as seen by reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Simulated time.
    #[serde(default)]
    pub time: f64,
    /// Configuration records of every class.
    #[serde(default)]
    pub properties: PropertyList,
    /// Spatial boundaries.
    #[serde(default)]
    pub spaces: ObjectSet<SpaceBoundary>,
    /// Fibers.
    #[serde(default)]
    pub fibers: ObjectSet<Fiber>,
    /// Solids.
    #[serde(default)]
    pub solids: ObjectSet<Solid>,
    /// Beads.
    #[serde(default)]
    pub beads: ObjectSet<Bead>,
    /// Spheres.
    #[serde(default)]
    pub spheres: ObjectSet<Sphere>,
    /// Singles.
    #[serde(default)]
    pub singles: ObjectSet<Single>,
    /// Couples.
    #[serde(default)]
    pub couples: ObjectSet<Couple>,
    /// Organizers.
    #[serde(default)]
    pub organizers: ObjectSet<Organizer>,
}

impl SimulationState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the class `index` of `kind`, or `?` when it does not resolve.
    pub fn class_name(&self, kind: ObjectKind, index: usize) -> &str {
        self.properties
            .get(kind, index)
            .map(|prop| prop.name())
            .unwrap_or("?")
    }

    /// First periodic boundary, used to fold positions into the primary cell.
    pub fn modulo(&self) -> Option<&SpaceBoundary> {
        self.spaces.iter().find(|space| space.period().is_some())
    }

    /// Checks the cross references of the whole state.
    pub fn validate(&self) -> Result<(), ReportError> {
        self.properties.validate()?;
        self.validate_set(&self.spaces)?;
        self.validate_set(&self.fibers)?;
        self.validate_set(&self.solids)?;
        self.validate_set(&self.beads)?;
        self.validate_set(&self.spheres)?;
        self.validate_set(&self.singles)?;
        self.validate_set(&self.couples)?;
        self.validate_set(&self.organizers)?;

        for fiber in &self.fibers {
            fiber.validate()?;
        }
        for couple in &self.couples {
            for hand in [Hand::First, Hand::Second] {
                if let Some(attachment) = couple.hand(hand) {
                    self.require_fiber(ObjectKind::Couple, couple.number(), attachment.fiber)?;
                }
            }
        }
        for single in &self.singles {
            if let Some(attachment) = single.hand() {
                self.require_fiber(ObjectKind::Single, single.number(), attachment.fiber)?;
            }
        }
        Ok(())
    }

    fn validate_set<T: SimObject>(&self, set: &ObjectSet<T>) -> Result<(), ReportError> {
        set.validate(self.properties.count(T::KIND))
    }

    fn require_fiber(
        &self,
        kind: ObjectKind,
        owner: ObjectNumber,
        fiber: ObjectNumber,
    ) -> Result<(), ReportError> {
        if self.fibers.get(fiber).is_some() {
            return Ok(());
        }
        Err(ReportError::State(
            ErrorInfo::new(
                "dangling_attachment",
                format!("{kind} {owner} is attached to missing fiber {fiber}"),
            )
            .with_context("kind", kind.as_str())
            .with_context("fiber", fiber.to_string()),
        ))
    }
}
