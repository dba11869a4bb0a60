use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strand_core::{ErrorInfo, ObjectKind, ObjectNumber, ReportError};

/// Behaviour common to every simulation object held in a registry.
pub trait SimObject {
    /// Variant stored in the registry.
    const KIND: ObjectKind;

    /// Stable number of the object within its variant.
    fn number(&self) -> ObjectNumber;

    /// Index of the configuration record of the object.
    fn property(&self) -> usize;
}

/// Ordered collection of objects of one variant.
///
/// Iteration follows registry order, which is the order reports list objects
/// in unless they ask for the inventory (ascending number) order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectSet<T> {
    objects: Vec<T>,
}

impl<T> Default for ObjectSet<T> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
        }
    }
}

impl<T: SimObject> ObjectSet<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an object at the end of the registry.
    pub fn push(&mut self, object: T) {
        self.objects.push(object);
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true when the registry holds no object.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterates in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.objects.iter()
    }

    /// Objects sorted by ascending number.
    pub fn inventory(&self) -> Vec<&T> {
        let mut sorted: Vec<&T> = self.objects.iter().collect();
        sorted.sort_by_key(|object| object.number());
        sorted
    }

    /// Objects whose configuration record has index `class`, in registry order.
    pub fn of_class(&self, class: usize) -> impl Iterator<Item = &T> + '_ {
        self.objects
            .iter()
            .filter(move |object| object.property() == class)
    }

    /// Looks up an object by number.
    pub fn get(&self, number: ObjectNumber) -> Option<&T> {
        self.objects.iter().find(|object| object.number() == number)
    }

    /// Mutable lookup by number.
    pub fn get_mut(&mut self, number: ObjectNumber) -> Option<&mut T> {
        self.objects
            .iter_mut()
            .find(|object| object.number() == number)
    }

    /// First unused number (numbers start at 1).
    pub fn next_number(&self) -> ObjectNumber {
        let max = self
            .objects
            .iter()
            .map(|object| object.number().as_raw())
            .max()
            .unwrap_or(0);
        ObjectNumber::from_raw(max + 1)
    }

    /// Checks number uniqueness and class resolution against `classes` records.
    pub(crate) fn validate(&self, classes: usize) -> Result<(), ReportError> {
        let mut seen = BTreeSet::new();
        for object in &self.objects {
            let number = object.number();
            if !seen.insert(number) {
                return Err(ReportError::State(
                    ErrorInfo::new(
                        "duplicate_number",
                        format!("{} number {number} is used twice", T::KIND),
                    )
                    .with_context("kind", T::KIND.as_str()),
                ));
            }
            if object.property() >= classes {
                return Err(ReportError::State(
                    ErrorInfo::new(
                        "unknown_class_index",
                        format!(
                            "{} {number} refers to class index {} but only {classes} are defined",
                            T::KIND,
                            object.property()
                        ),
                    )
                    .with_context("kind", T::KIND.as_str()),
                ));
            }
        }
        Ok(())
    }
}

impl<'a, T> IntoIterator for &'a ObjectSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
