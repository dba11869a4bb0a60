use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a simulation object, unique within its [`ObjectKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectNumber(u32);

impl ObjectNumber {
    /// Creates a new identifier from its raw integer representation.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw integer representation of the identifier.
    pub const fn as_raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Variants of simulation objects known to the registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Flexible filament described by model points.
    Fiber,
    /// Spherical particle with a single position.
    Bead,
    /// Cross-linker with two hands.
    Couple,
    /// Linker with a single hand.
    Single,
    /// Rigid cloud of points.
    Solid,
    /// Rigid sphere with surface points.
    Sphere,
    /// Aster or any other assembly of objects.
    Organizer,
    /// Spatial boundary.
    Space,
}

impl ObjectKind {
    /// Every kind in registry order.
    pub const ALL: [ObjectKind; 8] = [
        ObjectKind::Space,
        ObjectKind::Fiber,
        ObjectKind::Solid,
        ObjectKind::Bead,
        ObjectKind::Sphere,
        ObjectKind::Single,
        ObjectKind::Couple,
        ObjectKind::Organizer,
    ];

    /// Lowercase name used in queries and reports.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Fiber => "fiber",
            ObjectKind::Bead => "bead",
            ObjectKind::Couple => "couple",
            ObjectKind::Single => "single",
            ObjectKind::Solid => "solid",
            ObjectKind::Sphere => "sphere",
            ObjectKind::Organizer => "organizer",
            ObjectKind::Space => "space",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Typed reference to an object of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Variant of the referenced object.
    pub kind: ObjectKind,
    /// Number of the referenced object within its variant.
    pub number: ObjectNumber,
}

impl ObjectRef {
    /// Creates a reference to object `number` of the given kind.
    pub const fn new(kind: ObjectKind, number: ObjectNumber) -> Self {
        Self { kind, number }
    }
}
