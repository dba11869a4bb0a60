use serde::{Deserialize, Serialize};
use strand_core::{ObjectKind, ObjectNumber, ObjectRef, Vector};

/// Binding of a hand to a fiber.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Fiber holding the hand.
    pub fiber: ObjectNumber,
    /// Abscissa of the binding site on that fiber.
    pub abscissa: f64,
}

impl Attachment {
    /// Creates an attachment at `abscissa` on `fiber`.
    pub fn new(fiber: ObjectNumber, abscissa: f64) -> Self {
        Self { fiber, abscissa }
    }
}

/// One of the two hands of a [`Couple`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    /// First hand.
    First,
    /// Second hand.
    Second,
}

/// Attachment sub-state of a couple, selecting the registry sub-list it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoupleState {
    /// Neither hand is bound (FF).
    Free,
    /// Exactly one hand is bound (AF when the first, FA when the second).
    AttachedOne(Hand),
    /// Both hands are bound (AA); the couple bridges two fiber sites.
    AttachedBoth,
}

impl CoupleState {
    /// Sub-lists in report order: FF, AF, FA, AA.
    pub const ALL: [CoupleState; 4] = [
        CoupleState::Free,
        CoupleState::AttachedOne(Hand::First),
        CoupleState::AttachedOne(Hand::Second),
        CoupleState::AttachedBoth,
    ];

    /// Attachment flags of the two hands.
    pub fn flags(&self) -> (u8, u8) {
        match self {
            CoupleState::Free => (0, 0),
            CoupleState::AttachedOne(Hand::First) => (1, 0),
            CoupleState::AttachedOne(Hand::Second) => (0, 1),
            CoupleState::AttachedBoth => (1, 1),
        }
    }
}

/// Cross-linker carrying two hands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Couple {
    number: ObjectNumber,
    property: usize,
    position: Vector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hand1: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hand2: Option<Attachment>,
}

impl Couple {
    /// Creates a free couple.
    pub fn new(number: ObjectNumber, property: usize, position: Vector) -> Self {
        Self {
            number,
            property,
            position,
            hand1: None,
            hand2: None,
        }
    }

    /// Binds or unbinds a hand.
    pub fn set_hand(&mut self, hand: Hand, attachment: Option<Attachment>) {
        match hand {
            Hand::First => self.hand1 = attachment,
            Hand::Second => self.hand2 = attachment,
        }
    }

    /// Attachment of a hand, if bound.
    pub fn hand(&self, hand: Hand) -> Option<&Attachment> {
        match hand {
            Hand::First => self.hand1.as_ref(),
            Hand::Second => self.hand2.as_ref(),
        }
    }

    /// Current position.
    pub fn position(&self) -> Vector {
        self.position
    }

    /// Attachment sub-state.
    pub fn state(&self) -> CoupleState {
        match (&self.hand1, &self.hand2) {
            (None, None) => CoupleState::Free,
            (Some(_), None) => CoupleState::AttachedOne(Hand::First),
            (None, Some(_)) => CoupleState::AttachedOne(Hand::Second),
            (Some(_), Some(_)) => CoupleState::AttachedBoth,
        }
    }

    /// Pair of fibers bridged by a doubly attached couple.
    pub fn bridge(&self) -> Option<(ObjectNumber, ObjectNumber)> {
        match (&self.hand1, &self.hand2) {
            (Some(first), Some(second)) => Some((first.fiber, second.fiber)),
            _ => None,
        }
    }
}

sim_object!(Couple, ObjectKind::Couple);

/// Attachment sub-state of a single.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SingleState {
    /// Hand unbound.
    Free,
    /// Hand bound to a fiber.
    Attached,
}

impl SingleState {
    /// Sub-lists in report order.
    pub const ALL: [SingleState; 2] = [SingleState::Free, SingleState::Attached];

    /// Attachment flag printed in reports.
    pub fn flag(&self) -> u8 {
        match self {
            SingleState::Free => 0,
            SingleState::Attached => 1,
        }
    }
}

/// Linker with one hand, optionally grafted on another object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Single {
    number: ObjectNumber,
    property: usize,
    position: Vector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    foot: Option<ObjectRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hand: Option<Attachment>,
    #[serde(default = "Vector::zeros")]
    force: Vector,
}

impl Single {
    /// Creates a free, ungrafted single.
    pub fn new(number: ObjectNumber, property: usize, position: Vector) -> Self {
        Self {
            number,
            property,
            position,
            foot: None,
            hand: None,
            force: Vector::zeros(),
        }
    }

    /// Grafts the single on another object.
    pub fn set_foot(&mut self, foot: Option<ObjectRef>) {
        self.foot = foot;
    }

    /// Binds the hand, recording the force it transmits.
    pub fn attach(&mut self, attachment: Attachment, force: Vector) {
        self.hand = Some(attachment);
        self.force = force;
    }

    /// Unbinds the hand.
    pub fn detach(&mut self) {
        self.hand = None;
        self.force = Vector::zeros();
    }

    /// Object the single is grafted on.
    pub fn foot(&self) -> Option<ObjectRef> {
        self.foot
    }

    /// Attachment of the hand, if bound.
    pub fn hand(&self) -> Option<&Attachment> {
        self.hand.as_ref()
    }

    /// Current position.
    pub fn position(&self) -> Vector {
        self.position
    }

    /// Force transmitted by the hand; zero when free.
    pub fn force(&self) -> Vector {
        if self.hand.is_some() {
            self.force
        } else {
            Vector::zeros()
        }
    }

    /// Attachment sub-state.
    pub fn state(&self) -> SingleState {
        if self.hand.is_some() {
            SingleState::Attached
        } else {
            SingleState::Free
        }
    }
}

sim_object!(Single, ObjectKind::Single);
