//! Meal and activity log entries.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::tag::CategorySet;
use crate::types::{EntryId, EntryKind};

/// A single logged meal or activity.
///
/// Entries are immutable once recorded; `categories` is computed from
/// `raw_name` when the entry is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: EntryId,
    /// Calendar day the entry belongs to.
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    /// Free text exactly as entered.
    pub raw_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(default)]
    pub categories: CategorySet,
    pub kind: EntryKind,
}

impl LogEntry {
    #[must_use]
    pub fn is_food(&self) -> bool {
        self.kind == EntryKind::Food
    }

    /// Clock time formatted as `HH:MM`, or empty.
    #[must_use]
    pub fn time_label(&self) -> String {
        self.time
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default()
    }
}
