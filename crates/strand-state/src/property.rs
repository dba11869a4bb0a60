use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strand_core::{ErrorInfo, ObjectKind, ReportError};

/// Named parameter set shared by every object of one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    kind: ObjectKind,
    index: usize,
    name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    parameters: BTreeMap<String, String>,
}

impl Property {
    /// Variant of the objects using this record.
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Dense index of the record among records of the same kind.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Class name, e.g. `actin`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form parameters in key order.
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }
}

/// Owner of all configuration records of a simulation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyList {
    properties: Vec<Property>,
}

impl PropertyList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a new class of `kind` and returns its index.
    pub fn define(&mut self, kind: ObjectKind, name: &str) -> Result<usize, ReportError> {
        self.define_with(kind, name, BTreeMap::new())
    }

    /// Defines a new class carrying textual parameters.
    pub fn define_with(
        &mut self,
        kind: ObjectKind,
        name: &str,
        parameters: BTreeMap<String, String>,
    ) -> Result<usize, ReportError> {
        if self.find(kind, name).is_some() {
            return Err(ReportError::State(
                ErrorInfo::new("duplicate_class", format!("{kind} class `{name}` defined twice"))
                    .with_context("kind", kind.as_str())
                    .with_context("name", name),
            ));
        }
        let index = self.count(kind);
        self.properties.push(Property {
            kind,
            index,
            name: name.to_string(),
            parameters,
        });
        Ok(index)
    }

    /// Looks up a class by name.
    pub fn find(&self, kind: ObjectKind, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|prop| prop.kind == kind && prop.name == name)
    }

    /// Looks up a class by index.
    pub fn get(&self, kind: ObjectKind, index: usize) -> Option<&Property> {
        self.properties
            .iter()
            .find(|prop| prop.kind == kind && prop.index == index)
    }

    /// All classes of `kind` in ascending index order.
    pub fn find_all(&self, kind: ObjectKind) -> Vec<&Property> {
        let mut found: Vec<&Property> = self
            .properties
            .iter()
            .filter(|prop| prop.kind == kind)
            .collect();
        found.sort_by_key(|prop| prop.index);
        found
    }

    /// Number of classes of `kind`.
    pub fn count(&self, kind: ObjectKind) -> usize {
        self.properties.iter().filter(|prop| prop.kind == kind).count()
    }

    /// All records in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> + '_ {
        self.properties.iter()
    }

    /// Checks that indices are dense and names unique within each kind.
    pub(crate) fn validate(&self) -> Result<(), ReportError> {
        for kind in ObjectKind::ALL {
            let records = self.find_all(kind);
            for (expected, prop) in records.iter().enumerate() {
                if prop.index != expected {
                    return Err(ReportError::State(
                        ErrorInfo::new(
                            "sparse_class_index",
                            format!("{kind} class `{}` has index {}", prop.name, prop.index),
                        )
                        .with_context("expected", expected.to_string()),
                    ));
                }
                if records[..expected].iter().any(|other| other.name == prop.name) {
                    return Err(ReportError::State(
                        ErrorInfo::new(
                            "duplicate_class",
                            format!("{kind} class `{}` defined twice", prop.name),
                        )
                        .with_context("kind", kind.as_str()),
                    ));
                }
            }
        }
        Ok(())
    }
}
