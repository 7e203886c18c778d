//! The complete meal log state.
//!
//! A [`Journal`] owns everything that is persisted between sessions: log
//! entries, extracted food sets, comments and goals. It is plain data;
//! classification rules are passed in by the caller on each operation.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::aggregate::{CountSnapshot, compute_counts};
use crate::classify::Classifier;
use crate::entry::LogEntry;
use crate::extraction::{ExtractionTracker, FoodSet};
use crate::goals::{GoalMap, GoalStatus, evaluate};
use crate::tag::{CategorySet, CategoryTag};
use crate::types::{EntryId, EntryKind, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub entries: Vec<LogEntry>,
    pub extracted: ExtractionTracker,
    pub comments: BTreeMap<NaiveDate, String>,
    pub goals: GoalMap,
}

impl Journal {
    /// Logs a food entry.
    ///
    /// The text is recorded in the day's extracted foods and classified with
    /// the current rules. Blank text is rejected.
    pub fn add_food(
        &mut self,
        classifier: &Classifier,
        date: NaiveDate,
        time: Option<NaiveTime>,
        text: &str,
        amount: Option<&str>,
    ) -> Result<&LogEntry, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::Empty { field: "food name" });
        }
        self.extracted.record_user_input(classifier, date, text);
        let entry = LogEntry {
            id: EntryId::generate(),
            date,
            time,
            raw_name: text.to_string(),
            amount: non_blank(amount),
            categories: classifier.classify(text),
            kind: EntryKind::Food,
        };
        if !classifier.is_ready() {
            tracing::warn!(id = %entry.id, "food logged before category rules were loaded");
        }
        Ok(self.push(entry))
    }

    /// Logs an activity entry. Activities carry no categories.
    pub fn add_activity(
        &mut self,
        date: NaiveDate,
        time: Option<NaiveTime>,
        name: &str,
    ) -> Result<&LogEntry, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::Empty {
                field: "activity name",
            });
        }
        let entry = LogEntry {
            id: EntryId::generate(),
            date,
            time,
            raw_name: name.to_string(),
            amount: None,
            categories: CategorySet::new(),
            kind: EntryKind::Activity,
        };
        Ok(self.push(entry))
    }

    /// Removes an entry. Extracted foods are kept.
    pub fn delete_entry(&mut self, id: &EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != *id);
        let removed = self.entries.len() != before;
        if removed {
            tracing::debug!(%id, "deleted entry");
        }
        removed
    }

    /// Entries for `date` in insertion order.
    pub fn entries_on(&self, date: NaiveDate) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |entry| entry.date == date)
    }

    #[must_use]
    pub fn foods_on(&self, date: NaiveDate) -> Option<&FoodSet> {
        self.extracted.foods_on(date)
    }

    #[must_use]
    pub fn compute_counts(&self, classifier: &Classifier, date: NaiveDate) -> CountSnapshot {
        compute_counts(classifier, &self.entries, self.foods_on(date), date)
    }

    #[must_use]
    pub fn evaluate(
        &self,
        classifier: &Classifier,
        date: NaiveDate,
        order: &[CategoryTag],
    ) -> Vec<GoalStatus> {
        evaluate(&self.compute_counts(classifier, date), &self.goals, order)
    }

    /// Sets the comment for `date`; blank text removes it.
    pub fn set_comment(&mut self, date: NaiveDate, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            self.comments.remove(&date);
        } else {
            self.comments.insert(date, text.to_string());
        }
    }

    #[must_use]
    pub fn comment(&self, date: NaiveDate) -> Option<&str> {
        self.comments.get(&date).map(String::as_str)
    }

    /// Re-tags every entry with the current rules and re-records food text
    /// into the extracted sets. Returns how many entries changed.
    pub fn reclassify_all(&mut self, classifier: &Classifier) -> usize {
        let mut changed = 0;
        for entry in &mut self.entries {
            let updated = classifier.reclassify(entry);
            if updated.categories != entry.categories {
                changed += 1;
                *entry = updated;
            }
            if entry.is_food() {
                self.extracted
                    .record_user_input(classifier, entry.date, &entry.raw_name);
            }
        }
        tracing::info!(changed, total = self.entries.len(), "reclassified entries");
        changed
    }

    /// Clears all entries, comments and extracted foods, and restores the
    /// default goals.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn push(&mut self, entry: LogEntry) -> &LogEntry {
        tracing::debug!(id = %entry.id, date = %entry.date, kind = %entry.kind, "logged entry");
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::normalize::NameNormalizer;
    use crate::rules::RuleTable;

    const RULES: &str = "rice,staple-grain\nmiso soup,staple-soup\nsalmon,seafood\nspinach,vegetable\nshiitake,fungus\n";

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
    }

    fn classifier() -> Classifier {
        Classifier::new(NameNormalizer::builtin(), &RuleTable::parse(RULES))
    }

    #[test]
    fn add_food_classifies_and_extracts() {
        let c = classifier();
        let mut journal = Journal::default();
        let entry = journal
            .add_food(&c, date(15), None, " rice, miso soup ", Some(" 1 bowl "))
            .unwrap()
            .clone();
        assert_eq!(entry.raw_name, "rice, miso soup");
        assert_eq!(entry.amount.as_deref(), Some("1 bowl"));
        assert_eq!(
            entry.categories.as_slice(),
            &[CategoryTag::StapleGrain, CategoryTag::StapleSoup]
        );
        assert_eq!(
            journal.foods_on(date(15)).unwrap().as_slice(),
            &["rice", "miso soup"]
        );
    }

    #[test]
    fn add_food_rejects_blank_text() {
        let mut journal = Journal::default();
        let err = journal
            .add_food(&classifier(), date(15), None, "   ", None)
            .unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "food name" });
        assert!(journal.entries.is_empty());
    }

    #[test]
    fn activity_has_no_categories_and_no_effect_on_counts() {
        let c = classifier();
        let mut journal = Journal::default();
        let entry = journal
            .add_activity(date(15), NaiveTime::from_hms_opt(18, 0, 0), "rice field walk")
            .unwrap();
        assert!(entry.categories.is_empty());
        assert_eq!(entry.kind, EntryKind::Activity);
        assert!(journal.compute_counts(&c, date(15)).is_empty());
        assert!(journal.foods_on(date(15)).is_none());
    }

    #[test]
    fn scenario_two_bowls_of_rice_and_soup() {
        let c = classifier();
        let mut journal = Journal::default();
        journal.add_food(&c, date(15), None, "rice, miso soup", None).unwrap();
        journal.add_food(&c, date(15), None, "rice, miso soup", None).unwrap();

        let status = journal.evaluate(&c, date(15), &[CategoryTag::StapleGrain, CategoryTag::StapleSoup]);
        assert_eq!(status[0].have, 2);
        assert_eq!(status[0].achieved, Some(true));
        assert_eq!(status[1].have, 2);
    }

    #[test]
    fn untracked_fungus_reports_count_only() {
        let c = classifier();
        let mut journal = Journal::default();
        journal.goals.remove(CategoryTag::Fungus);
        journal.add_food(&c, date(15), None, "shiitake", None).unwrap();
        let status = journal.evaluate(&c, date(15), &[CategoryTag::Fungus]);
        assert_eq!(status[0].have, 1);
        assert_eq!(status[0].need, None);
        assert_eq!(status[0].achieved, None);
    }

    #[test]
    fn delete_keeps_extracted_foods() {
        let c = classifier();
        let mut journal = Journal::default();
        let id = journal
            .add_food(&c, date(15), None, "salmon", None)
            .unwrap()
            .id
            .clone();
        assert!(journal.delete_entry(&id));
        assert!(!journal.delete_entry(&id));
        assert_eq!(journal.entries_on(date(15)).count(), 0);
        assert_eq!(journal.compute_counts(&c, date(15)).get(CategoryTag::Seafood), 1);
    }

    #[test]
    fn comments_set_and_clear() {
        let mut journal = Journal::default();
        journal.set_comment(date(15), "  Great variety today ");
        assert_eq!(journal.comment(date(15)), Some("Great variety today"));
        journal.set_comment(date(15), " ");
        assert_eq!(journal.comment(date(15)), None);
    }

    #[test]
    fn reclassify_all_repairs_entries_logged_while_pending() {
        let pending = Classifier::pending(NameNormalizer::builtin());
        let mut journal = Journal::default();
        journal.add_food(&pending, date(15), None, "rice", None).unwrap();
        journal.add_activity(date(15), None, "walk").unwrap();
        assert!(journal.entries[0].categories.is_empty());
        assert_eq!(journal.compute_counts(&classifier(), date(15)).get(CategoryTag::StapleGrain), 0);

        let c = classifier();
        assert_eq!(journal.reclassify_all(&c), 1);
        assert_eq!(journal.entries[0].categories.as_slice(), &[CategoryTag::StapleGrain]);
        assert_eq!(journal.compute_counts(&c, date(15)).get(CategoryTag::StapleGrain), 1);
        assert_eq!(journal.reclassify_all(&c), 0);
    }

    #[test]
    fn reset_clears_everything_and_restores_goals() {
        let c = classifier();
        let mut journal = Journal::default();
        journal.add_food(&c, date(15), None, "rice", None).unwrap();
        journal.set_comment(date(15), "ok");
        journal.goals.set(CategoryTag::Egg, 4);
        journal.reset();
        assert_eq!(journal, Journal::default());
        assert!(journal.extracted.is_empty());
    }
}
