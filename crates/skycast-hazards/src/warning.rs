// ABOUTME: Warning value type and the ordered, one-per-group warning set
// ABOUTME: Serializes to the category-keyed JSON mapping returned by the API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use crate::messages::Condition;
use crate::severity::{HazardCategory, HazardGroup, Severity};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::iter::Flatten;
use std::slice::Iter;

/// A single classified hazard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Category key
    pub category: HazardCategory,
    /// Severity, serialized as `level`
    #[serde(rename = "level")]
    pub severity: Severity,
    /// Rendered message
    pub message: String,
}

impl Warning {
    /// Build a warning from a matched condition
    #[must_use]
    pub fn from_condition(condition: &Condition) -> Self {
        Self {
            category: condition.category(),
            severity: condition.severity(),
            message: condition.render(),
        }
    }

    /// Group the warning belongs to
    #[must_use]
    pub const fn group(&self) -> HazardGroup {
        self.category.group()
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.label(), self.message)
    }
}

/// Returned when inserting into a group that already holds a warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOccupied {
    /// Group that was already filled
    pub group: HazardGroup,
    /// The rejected warning
    pub rejected: Warning,
}

impl fmt::Display for GroupOccupied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hazard group {:?} already holds a warning, rejected {}",
            self.group, self.rejected.category
        )
    }
}

impl Error for GroupOccupied {}

/// Warnings for one observation, at most one per hazard group, kept in evaluation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningSet {
    slots: [Option<Warning>; 8],
}

impl WarningSet {
    /// Empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to its group's slot
    ///
    /// # Errors
    ///
    /// Returns [`GroupOccupied`] if the group already has a warning
    pub fn insert(&mut self, warning: Warning) -> Result<(), GroupOccupied> {
        let group = warning.group();
        let slot = &mut self.slots[group.position()];
        if slot.is_some() {
            return Err(GroupOccupied {
                group,
                rejected: warning,
            });
        }
        *slot = Some(warning);
        Ok(())
    }

    /// Warning held for a group
    #[must_use]
    pub fn get(&self, group: HazardGroup) -> Option<&Warning> {
        self.slots[group.position()].as_ref()
    }

    /// Warning held under a category key
    #[must_use]
    pub fn get_category(&self, category: HazardCategory) -> Option<&Warning> {
        self.get(category.group())
            .filter(|warning| warning.category == category)
    }

    /// Number of warnings
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// True when no hazard matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Warnings in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.slots.iter().flatten()
    }

    /// Category keys in evaluation order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().map(|warning| warning.category.key())
    }

    /// Most severe level present, if any
    #[must_use]
    pub fn highest_severity(&self) -> Option<Severity> {
        self.iter().map(|warning| warning.severity).max()
    }
}

impl<'a> IntoIterator for &'a WarningSet {
    type Item = &'a Warning;
    type IntoIter = Flatten<Iter<'a, Option<Warning>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter().flatten()
    }
}

impl Serialize for WarningSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for warning in self {
            map.serialize_entry(warning.category.key(), warning)?;
        }
        map.end()
    }
}
