use serde::{Deserialize, Serialize};
use strand_core::{ObjectKind, ObjectNumber, Vector};

/// Point-like particle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bead {
    number: ObjectNumber,
    property: usize,
    position: Vector,
}

impl Bead {
    /// Creates a bead at `position`.
    pub fn new(number: ObjectNumber, property: usize, position: Vector) -> Self {
        Self {
            number,
            property,
            position,
        }
    }

    /// Current position.
    pub fn position(&self) -> Vector {
        self.position
    }
}

sim_object!(Bead, ObjectKind::Bead);

/// Rigid cloud of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    number: ObjectNumber,
    property: usize,
    points: Vec<Vector>,
}

impl Solid {
    /// Creates a solid from its points.
    pub fn new(number: ObjectNumber, property: usize, points: Vec<Vector>) -> Self {
        Self {
            number,
            property,
            points,
        }
    }

    /// Points of the solid.
    pub fn points(&self) -> &[Vector] {
        &self.points
    }

    /// Mean of the points.
    pub fn centroid(&self) -> Vector {
        if self.points.is_empty() {
            return Vector::zeros();
        }
        let sum: Vector = self.points.iter().sum();
        sum / self.points.len() as f64
    }
}

sim_object!(Solid, ObjectKind::Solid);

/// Rigid sphere; the first point is the center, the others lie on the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    number: ObjectNumber,
    property: usize,
    points: Vec<Vector>,
}

impl Sphere {
    /// Creates a sphere from its center followed by surface points.
    pub fn new(number: ObjectNumber, property: usize, points: Vec<Vector>) -> Self {
        Self {
            number,
            property,
            points,
        }
    }

    /// Center followed by surface points.
    pub fn points(&self) -> &[Vector] {
        &self.points
    }
}

sim_object!(Sphere, ObjectKind::Sphere);

/// Aster or other assembly of objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organizer {
    number: ObjectNumber,
    property: usize,
    position: Vector,
    #[serde(default)]
    organized: usize,
}

impl Organizer {
    /// Creates an organizer at `position` holding `organized` objects.
    pub fn new(number: ObjectNumber, property: usize, position: Vector, organized: usize) -> Self {
        Self {
            number,
            property,
            position,
            organized,
        }
    }

    /// Center of the organizer.
    pub fn position(&self) -> Vector {
        self.position
    }

    /// Number of organized objects.
    pub fn nb_organized(&self) -> usize {
        self.organized
    }
}

sim_object!(Organizer, ObjectKind::Organizer);

/// Spatial boundary; a periodic boundary carries its period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceBoundary {
    number: ObjectNumber,
    property: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    period: Option<Vector>,
}

impl SpaceBoundary {
    /// Creates a boundary, periodic when `period` is given.
    pub fn new(number: ObjectNumber, property: usize, period: Option<Vector>) -> Self {
        Self {
            number,
            property,
            period,
        }
    }

    /// Period along each axis; zero components are not periodic.
    pub fn period(&self) -> Option<Vector> {
        self.period
    }

    /// Folds `pos` into the periodic cell centered on the origin.
    pub fn fold(&self, pos: Vector) -> Vector {
        let Some(period) = self.period else {
            return pos;
        };
        let mut folded = pos;
        for axis in 0..3 {
            let size = period[axis];
            if size > 0.0 {
                folded[axis] -= size * (folded[axis] / size).round();
            }
        }
        folded
    }
}

sim_object!(SpaceBoundary, ObjectKind::Space);
