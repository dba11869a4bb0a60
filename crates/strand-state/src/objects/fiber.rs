use serde::{Deserialize, Serialize};
use strand_core::{ErrorInfo, ObjectKind, ObjectNumber, ReportError, Vector};

/// Designates a location on a fiber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FiberEnd {
    /// Minus end (first model point).
    Minus,
    /// Plus end (last model point).
    Plus,
    /// Middle of the fiber, by arc length.
    Center,
}

/// Filament described by an ordered list of model points.
///
/// Positions along the fiber are addressed by a signed arc-length coordinate
/// (abscissa). The minus end sits at `abscissa_minus` and the plus end at
/// `abscissa_minus + length()`; the origin of the coordinate moves with the
/// lattice of the fiber, not with its ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fiber {
    number: ObjectNumber,
    property: usize,
    signature: u32,
    points: Vec<Vector>,
    #[serde(default)]
    abscissa_minus: f64,
    #[serde(default)]
    minus_state: u8,
    #[serde(default)]
    plus_state: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    forces: Vec<Vector>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tensions: Vec<f64>,
}

impl Fiber {
    /// Creates a fiber from at least two model points.
    pub fn new(
        number: ObjectNumber,
        property: usize,
        signature: u32,
        points: Vec<Vector>,
    ) -> Result<Self, ReportError> {
        let fiber = Self {
            number,
            property,
            signature,
            points,
            abscissa_minus: 0.0,
            minus_state: 0,
            plus_state: 0,
            forces: Vec::new(),
            tensions: Vec::new(),
        };
        fiber.validate()?;
        Ok(fiber)
    }

    /// Builder style setter for the abscissa of the minus end.
    pub fn with_abscissa_minus(mut self, abscissa: f64) -> Self {
        self.abscissa_minus = abscissa;
        self
    }

    /// Sets the abscissa of the minus end.
    pub fn set_abscissa_minus(&mut self, abscissa: f64) {
        self.abscissa_minus = abscissa;
    }

    /// Sets the dynamic state of both ends.
    pub fn set_dynamic_states(&mut self, minus: u8, plus: u8) {
        self.minus_state = minus;
        self.plus_state = plus;
    }

    /// Stores the net force on every model point and the tension of every segment.
    pub fn set_recorded_forces(
        &mut self,
        forces: Vec<Vector>,
        tensions: Vec<f64>,
    ) -> Result<(), ReportError> {
        let previous = (
            std::mem::replace(&mut self.forces, forces),
            std::mem::replace(&mut self.tensions, tensions),
        );
        if let Err(err) = self.validate() {
            self.forces = previous.0;
            self.tensions = previous.1;
            return Err(err);
        }
        Ok(())
    }

    /// Persistent random seed of the fiber, independent of its number.
    pub fn signature(&self) -> u32 {
        self.signature
    }

    /// Number of model points.
    pub fn nb_points(&self) -> usize {
        self.points.len()
    }

    /// Index of the last model point.
    pub fn last_point(&self) -> usize {
        self.points.len() - 1
    }

    /// Position of model point `index`.
    pub fn pos_point(&self, index: usize) -> Vector {
        self.points[index]
    }

    /// All model points.
    pub fn points(&self) -> &[Vector] {
        &self.points
    }

    /// Net forces recorded with the state, one per model point (may be empty).
    pub fn recorded_forces(&self) -> &[Vector] {
        &self.forces
    }

    /// Tensions recorded with the state, one per segment (may be empty).
    pub fn recorded_tensions(&self) -> &[f64] {
        &self.tensions
    }

    /// Lengths of the segments joining consecutive model points.
    pub fn segment_lengths(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.windows(2).map(|pair| (pair[1] - pair[0]).norm())
    }

    /// Contour length.
    pub fn length(&self) -> f64 {
        self.segment_lengths().sum()
    }

    /// Abscissa of the minus end.
    pub fn abscissa_minus(&self) -> f64 {
        self.abscissa_minus
    }

    /// Abscissa of the plus end.
    pub fn abscissa_plus(&self) -> f64 {
        self.abscissa_minus + self.length()
    }

    /// Abscissa of the given end.
    pub fn abscissa_end(&self, end: FiberEnd) -> f64 {
        match end {
            FiberEnd::Minus => self.abscissa_minus,
            FiberEnd::Plus => self.abscissa_plus(),
            FiberEnd::Center => self.abscissa_minus + 0.5 * self.length(),
        }
    }

    /// Dynamic state of an end (0 for the center).
    pub fn dynamic_state(&self, end: FiberEnd) -> u8 {
        match end {
            FiberEnd::Minus => self.minus_state,
            FiberEnd::Plus => self.plus_state,
            FiberEnd::Center => 0,
        }
    }

    /// Unit vector along segment `segment`, pointing towards the plus end.
    pub fn segment_direction(&self, segment: usize) -> Vector {
        let delta = self.points[segment + 1] - self.points[segment];
        let norm = delta.norm();
        if norm > 0.0 {
            delta / norm
        } else {
            Vector::zeros()
        }
    }

    /// Position at abscissa `a`, extrapolated linearly beyond the ends.
    pub fn pos(&self, a: f64) -> Vector {
        let (segment, offset) = self.locate(a - self.abscissa_minus);
        self.points[segment] + self.segment_direction(segment) * offset
    }

    /// Position of the given end.
    pub fn pos_end(&self, end: FiberEnd) -> Vector {
        match end {
            FiberEnd::Minus => self.points[0],
            FiberEnd::Plus => self.points[self.last_point()],
            FiberEnd::Center => self.pos(self.abscissa_end(FiberEnd::Center)),
        }
    }

    /// Direction of the fiber at the given end.
    pub fn dir_end(&self, end: FiberEnd) -> Vector {
        match end {
            FiberEnd::Minus => self.segment_direction(0),
            FiberEnd::Plus => self.segment_direction(self.last_point() - 1),
            FiberEnd::Center => {
                let (segment, _) = self.locate(0.5 * self.length());
                self.segment_direction(segment)
            }
        }
    }

    /// Maps a distance from the minus end onto `(segment, offset within segment)`.
    fn locate(&self, distance: f64) -> (usize, f64) {
        let last_segment = self.last_point() - 1;
        if distance <= 0.0 {
            return (0, distance);
        }
        let mut start = 0.0;
        for (segment, length) in self.segment_lengths().enumerate() {
            if distance < start + length || segment == last_segment {
                return (segment, distance - start);
            }
            start += length;
        }
        (last_segment, distance - start)
    }

    pub(crate) fn validate(&self) -> Result<(), ReportError> {
        let fail = |code: &str, message: String| {
            Err(ReportError::State(
                ErrorInfo::new(code, message).with_context("fiber", self.number.to_string()),
            ))
        };
        if self.points.len() < 2 {
            return fail(
                "fiber_points",
                format!("fiber {} needs at least two model points", self.number),
            );
        }
        if !self.forces.is_empty() && self.forces.len() != self.points.len() {
            return fail(
                "fiber_forces",
                format!(
                    "fiber {} records {} forces for {} points",
                    self.number,
                    self.forces.len(),
                    self.points.len()
                ),
            );
        }
        if !self.tensions.is_empty() && self.tensions.len() + 1 != self.points.len() {
            return fail(
                "fiber_tensions",
                format!(
                    "fiber {} records {} tensions for {} segments",
                    self.number,
                    self.tensions.len(),
                    self.points.len() - 1
                ),
            );
        }
        Ok(())
    }
}

sim_object!(Fiber, ObjectKind::Fiber);
