//! Multi-day summary command.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use mlog_core::{CategoryTag, Classifier, DaySummary, Journal, week_summary};

pub fn run<W: Write>(
    writer: &mut W,
    journal: &Journal,
    classifier: &Classifier,
    end: NaiveDate,
    days: u32,
    json: bool,
) -> Result<()> {
    let summary = week_summary(journal, classifier, end, days);
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&summary)?)?;
        return Ok(());
    }

    for day in &summary {
        write_day(writer, day)?;
    }
    Ok(())
}

fn write_day<W: Write>(writer: &mut W, day: &DaySummary) -> Result<()> {
    if day.is_empty() {
        writeln!(writer, "{}  (nothing logged)", day.date)?;
        return Ok(());
    }

    let foods: Vec<&str> = day.foods.iter().map(|e| e.raw_name.as_str()).collect();
    writeln!(writer, "{}  {} food, {} activity", day.date, day.foods.len(), day.activities.len())?;
    if !foods.is_empty() {
        writeln!(writer, "  Ate: {}", foods.join("; "))?;
    }
    for activity in &day.activities {
        writeln!(writer, "  Did: {}", activity.raw_name)?;
    }

    let counts: Vec<String> = CategoryTag::ALL
        .iter()
        .filter_map(|&tag| {
            let n = day.counts.get(tag);
            (n > 0).then(|| format!("{} {n}", tag.label()))
        })
        .collect();
    if !counts.is_empty() {
        writeln!(writer, "  Counts: {}", counts.join(", "))?;
    }
    if let Some(comment) = &day.comment {
        writeln!(writer, "  Comment: {comment}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use mlog_core::{NameNormalizer, RuleTable};

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    fn setup() -> (Journal, Classifier) {
        let classifier = Classifier::new(
            NameNormalizer::builtin(),
            &RuleTable::parse("rice,staple-grain\nsalmon,seafood\nspinach,vegetable\n"),
        );
        let mut journal = Journal::default();
        journal
            .add_food(&classifier, day(13), None, "rice, salmon", None)
            .unwrap();
        journal
            .add_food(&classifier, day(15), None, "spinach", None)
            .unwrap();
        journal.add_activity(day(15), None, "yoga").unwrap();
        journal.set_comment(day(15), "light day");
        (journal, classifier)
    }

    #[test]
    fn renders_newest_first() {
        let (journal, classifier) = setup();
        let mut output = Vec::new();
        run(&mut output, &journal, &classifier, day(15), 3, false).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output.trim_end(), @r"
2025-10-15  1 food, 1 activity
  Ate: spinach
  Did: yoga
  Counts: Vegetables 1
  Comment: light day
2025-10-14  (nothing logged)
2025-10-13  1 food, 0 activity
  Ate: rice, salmon
  Counts: Rice 1, Seafood 1
");
    }

    #[test]
    fn json_lists_each_day() {
        let (journal, classifier) = setup();
        let mut output = Vec::new();
        run(&mut output, &journal, &classifier, day(15), 7, true).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let days = value.as_array().unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0]["date"], "2025-10-15");
        assert_eq!(days[2]["counts"]["seafood"], 1);
        assert_eq!(days[1]["foods"], serde_json::json!([]));
    }
}
