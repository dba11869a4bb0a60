use std::collections::BTreeMap;

use strand_core::{ObjectNumber, ReportError, Vector};

use crate::registry::SimObject;
use crate::simul::SimulationState;

/// Forces acting on one fiber.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FiberForces {
    /// Net force on every model point.
    pub forces: Vec<Vector>,
    /// Tension of every segment; positive values stretch the fiber.
    pub tensions: Vec<f64>,
}

/// Force field produced by one recomputation.
///
/// The field is owned by the caller of [`ForceSolver::compute_forces`]; the
/// simulation state is never written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForceField {
    fibers: BTreeMap<ObjectNumber, FiberForces>,
}

impl ForceField {
    /// Creates an empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the forces of one fiber.
    pub fn insert(&mut self, fiber: ObjectNumber, forces: FiberForces) {
        self.fibers.insert(fiber, forces);
    }

    /// Forces of one fiber, if computed.
    pub fn fiber(&self, fiber: ObjectNumber) -> Option<&FiberForces> {
        self.fibers.get(&fiber)
    }

    /// Net force on a model point; zero when unknown.
    pub fn point_force(&self, fiber: ObjectNumber, point: usize) -> Vector {
        self.fibers
            .get(&fiber)
            .and_then(|entry| entry.forces.get(point).copied())
            .unwrap_or_else(Vector::zeros)
    }

    /// Tension of a segment; zero when unknown.
    pub fn tension(&self, fiber: ObjectNumber, segment: usize) -> f64 {
        self.fibers
            .get(&fiber)
            .and_then(|entry| entry.tensions.get(segment).copied())
            .unwrap_or(0.0)
    }
}

/// Entry point into the physical solver, called before force reports.
pub trait ForceSolver {
    /// Recomputes the forces of the current configuration.
    fn compute_forces(&self, state: &SimulationState) -> Result<ForceField, ReportError>;
}

/// Solver replaying the forces recorded alongside a snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordedForces;

impl ForceSolver for RecordedForces {
    fn compute_forces(&self, state: &SimulationState) -> Result<ForceField, ReportError> {
        let mut field = ForceField::new();
        for fiber in &state.fibers {
            let forces = if fiber.recorded_forces().is_empty() {
                vec![Vector::zeros(); fiber.nb_points()]
            } else {
                fiber.recorded_forces().to_vec()
            };
            let tensions = if fiber.recorded_tensions().is_empty() {
                vec![0.0; fiber.nb_points() - 1]
            } else {
                fiber.recorded_tensions().to_vec()
            };
            field.insert(fiber.number(), FiberForces { forces, tensions });
        }
        Ok(field)
    }
}
