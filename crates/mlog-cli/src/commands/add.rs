//! Commands that append food and activity entries.

use std::io::Write;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use mlog_core::Classifier;
use mlog_db::Database;

/// A food entry to record.
#[derive(Debug, Clone, Copy)]
pub struct FoodInput<'a> {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub text: &'a str,
    pub amount: Option<&'a str>,
}

/// Logs a food entry and prints its categories and the day's foods.
pub fn food<W: Write>(
    writer: &mut W,
    db: &mut Database,
    classifier: &Classifier,
    input: FoodInput<'_>,
) -> Result<()> {
    let mut journal = db.load_journal()?;
    let entry = journal
        .add_food(classifier, input.date, input.time, input.text, input.amount)?
        .clone();
    db.save_journal(&journal)?;

    writeln!(writer, "Logged {}", entry.id)?;
    writeln!(
        writer,
        "Categories: {}",
        entry.categories.display_labels(" / ")
    )?;
    let foods = journal
        .foods_on(entry.date)
        .map(|foods| foods.as_slice().join(", "))
        .filter(|foods| !foods.is_empty())
        .unwrap_or_else(|| "-".to_string());
    writeln!(writer, "Foods on {}: {foods}", entry.date)?;
    Ok(())
}

/// Logs an activity entry.
pub fn activity<W: Write>(
    writer: &mut W,
    db: &mut Database,
    date: NaiveDate,
    time: Option<NaiveTime>,
    text: &str,
) -> Result<()> {
    let mut journal = db.load_journal()?;
    let id = journal.add_activity(date, time, text)?.id.clone();
    db.save_journal(&journal)?;
    writeln!(writer, "Logged {id}")?;
    Ok(())
}
