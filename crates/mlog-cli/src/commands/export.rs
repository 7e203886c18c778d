//! Export command: writes every entry as CSV.

use std::io::Write;

use anyhow::Result;
use mlog_core::{Journal, LogEntry};

const HEADER: &str = "id,date,time,name,amount,category,kind";

/// Writes all entries, oldest date first, in insertion order within a day.
pub fn run<W: Write>(writer: &mut W, journal: &Journal) -> Result<()> {
    writeln!(writer, "{HEADER}")?;
    let mut entries: Vec<&LogEntry> = journal.entries.iter().collect();
    entries.sort_by_key(|entry| entry.date);
    for entry in entries {
        let fields = [
            entry.id.to_string(),
            entry.date.to_string(),
            entry.time_label(),
            entry.raw_name.clone(),
            entry.amount.clone().unwrap_or_default(),
            entry.categories.join(" / "),
            entry.kind.to_string(),
        ];
        let line: Vec<String> = fields.iter().map(String::as_str).map(escape).collect();
        writeln!(writer, "{}", line.join(","))?;
    }
    Ok(())
}

/// Quotes a field if it contains a delimiter, quote or line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
