use std::collections::BTreeMap;

use rand::RngCore;
use strand_core::{ErrorInfo, ObjectKind, ObjectNumber, ObjectRef, ReportError, RngHandle, Vector};

use crate::objects::{
    Attachment, Bead, Couple, Fiber, Hand, Organizer, Single, Solid, SpaceBoundary, Sphere,
};
use crate::simul::SimulationState;

/// Substream of the master seed reserved for fiber signatures.
const SIGNATURE_STREAM: u64 = 0x5167_0001;

/// Incremental construction of a [`SimulationState`].
///
/// Objects receive consecutive numbers starting at 1 within their variant.
/// Fiber signatures are drawn from a dedicated substream of the master seed,
/// so they are reproducible for a given seed yet unrelated to fiber numbers.
#[derive(Debug, Clone)]
pub struct StateBuilder {
    state: SimulationState,
    signatures: RngHandle,
}

fn missing(kind: ObjectKind, number: ObjectNumber) -> ReportError {
    ReportError::State(
        ErrorInfo::new("missing_object", format!("no {kind} with number {number}"))
            .with_context("kind", kind.as_str()),
    )
}

impl StateBuilder {
    /// Creates a builder whose fiber signatures derive from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            state: SimulationState::new(),
            signatures: RngHandle::substream(seed, SIGNATURE_STREAM),
        }
    }

    /// Sets the simulated time.
    pub fn time(&mut self, time: f64) -> &mut Self {
        self.state.time = time;
        self
    }

    /// Defines a class and returns its index.
    pub fn class(&mut self, kind: ObjectKind, name: &str) -> Result<usize, ReportError> {
        self.state.properties.define(kind, name)
    }

    /// Defines a class carrying `key = value` parameters.
    pub fn class_with(
        &mut self,
        kind: ObjectKind,
        name: &str,
        parameters: &[(&str, &str)],
    ) -> Result<usize, ReportError> {
        let parameters: BTreeMap<String, String> = parameters
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        self.state.properties.define_with(kind, name, parameters)
    }

    /// Adds a fiber through `points` with a freshly drawn signature.
    pub fn fiber(&mut self, class: usize, points: Vec<Vector>) -> Result<ObjectNumber, ReportError> {
        let signature = self.signatures.next_u32();
        self.fiber_with_signature(class, signature, points)
    }

    /// Adds a fiber with an explicit signature.
    pub fn fiber_with_signature(
        &mut self,
        class: usize,
        signature: u32,
        points: Vec<Vector>,
    ) -> Result<ObjectNumber, ReportError> {
        let number = self.state.fibers.next_number();
        let fiber = Fiber::new(number, class, signature, points)?;
        self.state.fibers.push(fiber);
        Ok(number)
    }

    /// Adds a straight fiber of `length` split into `segments` equal segments.
    pub fn straight_fiber(
        &mut self,
        class: usize,
        origin: Vector,
        direction: Vector,
        length: f64,
        segments: usize,
    ) -> Result<ObjectNumber, ReportError> {
        let norm = direction.norm();
        let valid = segments > 0 && norm > 0.0 && length.is_finite() && length > 0.0;
        if !valid {
            return Err(ReportError::invalid_parameter(
                "fiber",
                "a straight fiber needs a direction, a positive length and at least one segment",
            ));
        }
        let step = direction / norm * (length / segments as f64);
        let points = (0..=segments).map(|idx| origin + step * idx as f64).collect();
        self.fiber(class, points)
    }

    /// Mutable access to a fiber, e.g. to set its abscissa or recorded forces.
    pub fn fiber_mut(&mut self, number: ObjectNumber) -> Result<&mut Fiber, ReportError> {
        self.state
            .fibers
            .get_mut(number)
            .ok_or_else(|| missing(ObjectKind::Fiber, number))
    }

    /// Adds a bead.
    pub fn bead(&mut self, class: usize, position: Vector) -> ObjectNumber {
        let number = self.state.beads.next_number();
        self.state.beads.push(Bead::new(number, class, position));
        number
    }

    /// Adds a free single.
    pub fn single(&mut self, class: usize, position: Vector) -> ObjectNumber {
        let number = self.state.singles.next_number();
        self.state.singles.push(Single::new(number, class, position));
        number
    }

    /// Grafts a single on a bead.
    pub fn graft_single(
        &mut self,
        single: ObjectNumber,
        bead: ObjectNumber,
    ) -> Result<(), ReportError> {
        let target = self
            .state
            .singles
            .get_mut(single)
            .ok_or_else(|| missing(ObjectKind::Single, single))?;
        target.set_foot(Some(ObjectRef::new(ObjectKind::Bead, bead)));
        Ok(())
    }

    /// Binds the hand of a single to a fiber.
    pub fn attach_single(
        &mut self,
        single: ObjectNumber,
        fiber: ObjectNumber,
        abscissa: f64,
        force: Vector,
    ) -> Result<(), ReportError> {
        let target = self
            .state
            .singles
            .get_mut(single)
            .ok_or_else(|| missing(ObjectKind::Single, single))?;
        target.attach(Attachment::new(fiber, abscissa), force);
        Ok(())
    }

    /// Adds a free couple.
    pub fn couple(&mut self, class: usize, position: Vector) -> ObjectNumber {
        let number = self.state.couples.next_number();
        self.state.couples.push(Couple::new(number, class, position));
        number
    }

    /// Binds one hand of a couple to a fiber.
    pub fn attach_couple(
        &mut self,
        couple: ObjectNumber,
        hand: Hand,
        fiber: ObjectNumber,
        abscissa: f64,
    ) -> Result<(), ReportError> {
        let target = self
            .state
            .couples
            .get_mut(couple)
            .ok_or_else(|| missing(ObjectKind::Couple, couple))?;
        target.set_hand(hand, Some(Attachment::new(fiber, abscissa)));
        Ok(())
    }

    /// Adds a couple bridging two fibers at the given abscissas.
    pub fn bridge(
        &mut self,
        class: usize,
        first: (ObjectNumber, f64),
        second: (ObjectNumber, f64),
    ) -> Result<ObjectNumber, ReportError> {
        let position = match self.state.fibers.get(first.0) {
            Some(fiber) => fiber.pos(first.1),
            None => return Err(missing(ObjectKind::Fiber, first.0)),
        };
        let couple = self.couple(class, position);
        self.attach_couple(couple, Hand::First, first.0, first.1)?;
        self.attach_couple(couple, Hand::Second, second.0, second.1)?;
        Ok(couple)
    }

    /// Adds a solid.
    pub fn solid(&mut self, class: usize, points: Vec<Vector>) -> ObjectNumber {
        let number = self.state.solids.next_number();
        self.state.solids.push(Solid::new(number, class, points));
        number
    }

    /// Adds a sphere given its center and surface points.
    pub fn sphere(&mut self, class: usize, points: Vec<Vector>) -> ObjectNumber {
        let number = self.state.spheres.next_number();
        self.state.spheres.push(Sphere::new(number, class, points));
        number
    }

    /// Adds an organizer.
    pub fn organizer(&mut self, class: usize, position: Vector, organized: usize) -> ObjectNumber {
        let number = self.state.organizers.next_number();
        self.state
            .organizers
            .push(Organizer::new(number, class, position, organized));
        number
    }

    /// Adds a spatial boundary, periodic when `period` is given.
    pub fn space(&mut self, class: usize, period: Option<Vector>) -> ObjectNumber {
        let number = self.state.spaces.next_number();
        self.state
            .spaces
            .push(SpaceBoundary::new(number, class, period));
        number
    }

    /// Validates and returns the state.
    pub fn build(self) -> Result<SimulationState, ReportError> {
        self.state.validate()?;
        Ok(self.state)
    }
}
