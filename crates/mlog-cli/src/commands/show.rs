//! Show command: a day's log, extracted foods and goal progress.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use mlog_core::{CategoryTag, Classifier, GoalStatus, Journal, LogEntry};
use serde::Serialize;

/// Everything shown for one day.
#[derive(Debug, Serialize)]
pub struct DayView<'a> {
    pub date: NaiveDate,
    pub entries: Vec<&'a LogEntry>,
    pub foods: Vec<&'a str>,
    pub goals: Vec<GoalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
}

impl<'a> DayView<'a> {
    pub fn build(journal: &'a Journal, classifier: &Classifier, date: NaiveDate) -> Self {
        Self {
            date,
            entries: journal.entries_on(date).collect(),
            foods: journal
                .foods_on(date)
                .map(|foods| foods.iter().collect())
                .unwrap_or_default(),
            goals: journal.evaluate(classifier, date, &CategoryTag::ALL),
            comment: journal.comment(date),
        }
    }
}

pub fn run<W: Write>(
    writer: &mut W,
    journal: &Journal,
    classifier: &Classifier,
    date: NaiveDate,
    json: bool,
) -> Result<()> {
    let view = DayView::build(journal, classifier, date);
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&view)?)?;
    } else {
        write!(writer, "{}", render(&view))?;
    }
    Ok(())
}

/// Renders a day as human-readable text.
pub fn render(view: &DayView<'_>) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    let _ = writeln!(out, "Log for {}", view.date);
    if view.entries.is_empty() {
        let _ = writeln!(out, "  No entries.");
    }
    for entry in &view.entries {
        let _ = writeln!(out, "  {}", format_entry(entry));
    }

    let foods = if view.foods.is_empty() {
        "-".to_string()
    } else {
        view.foods.join(", ")
    };
    let _ = writeln!(out, "Foods: {foods}");

    let _ = writeln!(out, "Goals:");
    for status in &view.goals {
        let _ = writeln!(out, "  {}", format_goal(status));
    }

    if let Some(comment) = view.comment {
        let _ = writeln!(out, "Comment: {comment}");
    }
    out
}

/// One entry as `[time] name | categories | amount (id)`.
pub fn format_entry(entry: &LogEntry) -> String {
    let time = entry.time_label();
    let time = if time.is_empty() { "--:--".to_string() } else { time };
    if entry.is_food() {
        let amount = entry.amount.as_deref().unwrap_or("-");
        format!(
            "[{time}] {} | {} | {amount} ({})",
            entry.raw_name,
            entry.categories.display_labels(" / "),
            entry.id
        )
    } else {
        format!("[{time}] {} | activity ({})", entry.raw_name, entry.id)
    }
}

/// One goal line, e.g. `Vegetables: 3/5 (2 to go)`.
pub fn format_goal(status: &GoalStatus) -> String {
    let label = status.tag.label();
    match (status.need, status.remaining) {
        (None, _) => format!("{label}: {}", status.have),
        (Some(need), None) => format!("{label}: {}/{need} done", status.have),
        (Some(need), Some(remaining)) => {
            format!("{label}: {}/{need} ({remaining} to go)", status.have)
        }
    }
}
