//! Rule-based food classification.
//!
//! Input text is split into items on list separators, each item is
//! normalized, and every rule whose pattern is a substring of a normalized
//! item contributes its category. Matching is plain substring containment:
//! a short pattern inside a longer dish name matches too.

use crate::entry::LogEntry;
use crate::normalize::NameNormalizer;
use crate::rules::{CategoryRule, RuleTable};
use crate::tag::CategorySet;

/// Characters that separate food items in free text.
pub const SEPARATORS: [char; 4] = [',', '、', '・', '，'];

/// Splits free text into trimmed, non-empty items.
pub fn split_items(text: &str) -> impl Iterator<Item = &str> {
    text.split(SEPARATORS)
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// Maps food text to category tags using a rule table.
///
/// A classifier starts out pending until a rule table is installed. While
/// pending, or when the installed table is empty, nothing is classified and
/// nothing is extracted.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    normalizer: NameNormalizer,
    rules: Vec<CategoryRule>,
    ready: bool,
}

impl Classifier {
    /// A classifier with no rules yet.
    #[must_use]
    pub fn pending(normalizer: NameNormalizer) -> Self {
        Self {
            normalizer,
            rules: Vec::new(),
            ready: false,
        }
    }

    /// A ready classifier over `table`.
    #[must_use]
    pub fn new(normalizer: NameNormalizer, table: &RuleTable) -> Self {
        let mut classifier = Self::pending(normalizer);
        classifier.install(table);
        classifier
    }

    /// Replaces the rule set and marks the classifier ready.
    ///
    /// Patterns are normalized so they compare against normalized items.
    /// Entries already classified are not touched; see [`Self::reclassify`].
    pub fn install(&mut self, table: &RuleTable) {
        self.rules = table
            .rules()
            .iter()
            .filter_map(|rule| {
                let pattern = self.normalizer.normalize(&rule.pattern);
                if pattern.is_empty() {
                    return None;
                }
                Some(CategoryRule::new(pattern, rule.category))
            })
            .collect();
        self.ready = true;
        tracing::debug!(rules = self.rules.len(), "classifier ready");
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }

    /// Returns the categories of every food mentioned in `text`.
    ///
    /// Tags appear in first-discovery order, scanning items left to right
    /// and rules in table order.
    #[must_use]
    pub fn classify(&self, text: &str) -> CategorySet {
        let mut categories = CategorySet::new();
        for item in split_items(text) {
            let item = self.normalizer.normalize(item);
            for rule in self.matching_rules(&item) {
                categories.insert(rule.category);
            }
        }
        categories
    }

    /// Returns the canonical food names (rule patterns) found in `text`,
    /// without duplicates, in discovery order.
    #[must_use]
    pub fn extract_foods(&self, text: &str) -> Vec<String> {
        let mut foods: Vec<String> = Vec::new();
        for item in split_items(text) {
            let item = self.normalizer.normalize(item);
            for rule in self.matching_rules(&item) {
                if !foods.iter().any(|food| *food == rule.pattern) {
                    foods.push(rule.pattern.clone());
                }
            }
        }
        foods
    }

    /// Returns a copy of `entry` with categories recomputed from its text.
    #[must_use]
    pub fn reclassify(&self, entry: &LogEntry) -> LogEntry {
        let categories = if entry.is_food() {
            self.classify(&entry.raw_name)
        } else {
            CategorySet::new()
        };
        LogEntry {
            categories,
            ..entry.clone()
        }
    }

    fn matching_rules<'a>(&'a self, item: &'a str) -> impl Iterator<Item = &'a CategoryRule> {
        self.rules
            .iter()
            .filter(move |rule| item.contains(rule.pattern.as_str()))
    }
}
