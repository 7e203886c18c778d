//! Per-day category counts.
//!
//! # Counting Policy
//!
//! - **Staple tags** (grain, soup) count meals: every food entry on the day
//!   that classifies into the tag and mentions one of the day's extracted
//!   foods for that tag counts once. Two bowls of rice logged separately
//!   count as two.
//! - **Ordinary tags** count variety: each distinct extracted food that
//!   classifies into the tag counts once per day, however many entries
//!   mention it.
//!
//! Counts are derived on demand and never stored.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::classify::Classifier;
use crate::entry::LogEntry;
use crate::extraction::FoodSet;
use crate::tag::{CategorySet, CategoryTag};

/// Category counts for a single day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountSnapshot {
    counts: BTreeMap<CategoryTag, u32>,
}

impl CountSnapshot {
    /// Count for `tag`, zero if nothing was counted.
    #[must_use]
    pub fn get(&self, tag: CategoryTag) -> u32 {
        self.counts.get(&tag).copied().unwrap_or(0)
    }

    /// Tags with a non-zero count, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryTag, u32)> + '_ {
        self.counts.iter().map(|(tag, count)| (*tag, *count))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn add(&mut self, tag: CategoryTag, amount: u32) {
        if amount > 0 {
            *self.counts.entry(tag).or_insert(0) += amount;
        }
    }
}

/// A food entry prepared for staple matching.
struct DayFood {
    normalized: String,
    categories: CategorySet,
}

/// Computes the counts for `date` from the log and that day's extracted foods.
///
/// Entries are classified with the current rules rather than their stored
/// categories, so entries recorded before the rules were loaded still count.
pub fn compute_counts(
    classifier: &Classifier,
    entries: &[LogEntry],
    foods: Option<&FoodSet>,
    date: NaiveDate,
) -> CountSnapshot {
    let mut snapshot = CountSnapshot::default();
    let Some(foods) = foods else {
        return snapshot;
    };

    let mut staple_foods: BTreeMap<CategoryTag, Vec<&str>> = BTreeMap::new();
    for name in foods.iter() {
        for tag in &classifier.classify(name) {
            if tag.is_staple() {
                staple_foods.entry(tag).or_default().push(name);
            } else {
                snapshot.add(tag, 1);
            }
        }
    }

    if staple_foods.is_empty() {
        return snapshot;
    }

    let day_foods: Vec<DayFood> = entries
        .iter()
        .filter(|entry| entry.date == date && entry.is_food())
        .map(|entry| DayFood {
            normalized: classifier.normalize(&entry.raw_name),
            categories: classifier.classify(&entry.raw_name),
        })
        .collect();

    for (tag, names) in staple_foods {
        let meals = day_foods
            .iter()
            .filter(|food| food.categories.contains(tag))
            .filter(|food| names.iter().any(|name| food.normalized.contains(name)))
            .count();
        snapshot.add(tag, u32::try_from(meals).unwrap_or(u32::MAX));
    }

    tracing::debug!(%date, ?snapshot, "computed category counts");
    snapshot
}
