//! Day comment command.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use mlog_db::Database;

/// Sets the comment for `date`, or prints it when `text` is `None`.
pub fn run<W: Write>(
    writer: &mut W,
    db: &mut Database,
    date: NaiveDate,
    text: Option<&str>,
) -> Result<()> {
    let mut journal = db.load_journal()?;
    let Some(text) = text else {
        match journal.comment(date) {
            Some(comment) => writeln!(writer, "{comment}")?,
            None => writeln!(writer, "No comment for {date}.")?,
        }
        return Ok(());
    };

    journal.set_comment(date, text);
    db.save_journal(&journal)?;
    if journal.comment(date).is_some() {
        writeln!(writer, "Saved comment for {date}.")?;
    } else {
        writeln!(writer, "Removed comment for {date}.")?;
    }
    Ok(())
}
