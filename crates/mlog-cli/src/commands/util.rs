//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::{Days, Local, NaiveDate, NaiveTime};
use mlog_core::{Classifier, NameNormalizer, RuleTable, SynonymTable};
use regex::Regex;

use crate::Config;

/// Pre-compiled regex for relative day parsing.
static RELATIVE_DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(day|week)s?\s+ago$").unwrap());

/// Conservative bound for relative day parsing (~100 years).
const MAX_RELATIVE_DAYS: u64 = 100 * 366;

/// Returns today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolves an optional `--date` argument, defaulting to today.
pub fn resolve_date(arg: Option<&str>) -> Result<NaiveDate> {
    arg.map_or_else(|| Ok(today()), |s| parse_date(s, today()))
}

/// Parse a day as either ISO 8601 or relative to `today`.
///
/// Supports:
/// - ISO 8601: "2025-10-15"
/// - Keywords: "today", "yesterday"
/// - Relative: "3 days ago", "1 week ago"
pub fn parse_date(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "today" => return Ok(today),
        "yesterday" => return days_before(today, 1),
        _ => {}
    }

    if let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return Ok(date);
    }

    let Some(caps) = RELATIVE_DAY_RE.captures(&s) else {
        anyhow::bail!(
            "Invalid date: {s}. Use YYYY-MM-DD, 'today', 'yesterday' or relative (e.g., '3 days ago')"
        );
    };

    let n: u64 = caps[1]
        .parse()
        .context("failed to parse number in relative date")?;
    let days = match &caps[2] {
        "day" => n,
        "week" => n.saturating_mul(7),
        unit => anyhow::bail!("Unknown date unit: {unit}"),
    };
    if days > MAX_RELATIVE_DAYS {
        anyhow::bail!("Relative date too far back: {s}");
    }
    days_before(today, days)
}

fn days_before(today: NaiveDate, days: u64) -> Result<NaiveDate> {
    today
        .checked_sub_days(Days::new(days))
        .with_context(|| format!("date out of range: {days} days before {today}"))
}

/// Parse an optional `HH:MM` clock time.
pub fn parse_time(s: Option<&str>) -> Result<Option<NaiveTime>> {
    let Some(s) = s.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    NaiveTime::parse_from_str(s, "%H:%M")
        .map(Some)
        .with_context(|| format!("Invalid time: {s}. Use HH:MM (e.g., 07:30)"))
}

/// Builds the classifier from the configured synonyms and rules file.
///
/// A missing or unreadable rules file yields a classifier that recognizes
/// nothing; a synonym that conflicts with the table is a configuration error.
pub fn load_classifier(config: &Config) -> Result<Classifier> {
    let synonyms = SynonymTable::builtin()
        .extended(&config.synonyms)
        .context("invalid synonyms in configuration")?;
    let mut classifier = Classifier::pending(NameNormalizer::new(synonyms));
    classifier.install(&RuleTable::load_or_empty(&config.rules_path));
    Ok(classifier)
}
