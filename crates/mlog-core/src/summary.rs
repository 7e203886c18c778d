//! Multi-day summaries.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::aggregate::CountSnapshot;
use crate::classify::Classifier;
use crate::entry::LogEntry;
use crate::journal::Journal;

/// Everything recorded on one day.
#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub foods: Vec<LogEntry>,
    pub activities: Vec<LogEntry>,
    pub counts: CountSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl DaySummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty() && self.activities.is_empty() && self.comment.is_none()
    }
}

/// Summarizes `days` days ending at `end` (inclusive), newest first.
pub fn week_summary(
    journal: &Journal,
    classifier: &Classifier,
    end: NaiveDate,
    days: u32,
) -> Vec<DaySummary> {
    (0..days)
        .filter_map(|offset| end.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| {
            let (foods, activities): (Vec<_>, Vec<_>) = journal
                .entries_on(date)
                .cloned()
                .partition(LogEntry::is_food);
            DaySummary {
                date,
                foods,
                activities,
                counts: journal.compute_counts(classifier, date),
                comment: journal.comment(date).map(str::to_string),
            }
        })
        .collect()
}
