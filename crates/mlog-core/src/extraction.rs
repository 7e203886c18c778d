//! Per-day accumulation of recognized foods.
//!
//! Every food text a user submits is scanned for known foods, and the
//! canonical name of each one is appended to that day's set. Sets only grow;
//! the only way to shrink them is [`ExtractionTracker::reset`], which clears
//! every day at once.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classify::Classifier;

/// An insertion-ordered set of canonical food names for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FoodSet(Vec<String>);

impl FoodSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends `name` if absent. Returns whether it was added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.0.push(name);
        true
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for FoodSet {
    fn from(names: Vec<String>) -> Self {
        let mut set = Self::new();
        for name in names {
            set.insert(name);
        }
        set
    }
}

impl From<FoodSet> for Vec<String> {
    fn from(set: FoodSet) -> Self {
        set.0
    }
}

/// Extracted food sets keyed by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractionTracker {
    by_date: BTreeMap<NaiveDate, FoodSet>,
}

impl ExtractionTracker {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            by_date: BTreeMap::new(),
        }
    }

    /// Records the foods recognized in `text` for `date` and returns the
    /// day's accumulated set.
    ///
    /// Submitting the same text twice on one day leaves the set unchanged
    /// the second time.
    pub fn record_user_input(
        &mut self,
        classifier: &Classifier,
        date: NaiveDate,
        text: &str,
    ) -> &FoodSet {
        let foods = self.by_date.entry(date).or_default();
        for name in classifier.extract_foods(text) {
            if foods.insert(name.clone()) {
                tracing::debug!(%date, food = %name, "recorded food");
            }
        }
        foods
    }

    /// The day's set, if anything was ever submitted for that date.
    #[must_use]
    pub fn foods_on(&self, date: NaiveDate) -> Option<&FoodSet> {
        self.by_date.get(&date)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_date.values().all(FoodSet::is_empty)
    }

    /// Clears every date.
    pub fn reset(&mut self) {
        self.by_date.clear();
    }
}
