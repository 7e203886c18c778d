//! Status command for showing configuration and stored data.

use std::io::Write;

use anyhow::Result;

use mlog_core::Classifier;
use mlog_db::Database;

use crate::Config;

pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    config: &Config,
    classifier: &Classifier,
) -> Result<()> {
    let journal = db.load_journal()?;
    let keys = db.list_keys()?;

    writeln!(writer, "Meal log status")?;
    writeln!(writer, "Database: {}", config.database_path.display())?;
    writeln!(
        writer,
        "Rules: {} ({} rules)",
        config.rules_path.display(),
        classifier.rule_count()
    )?;
    writeln!(writer, "Entries: {}", journal.entries.len())?;
    writeln!(writer, "Days with comments: {}", journal.comments.len())?;

    if keys.is_empty() {
        writeln!(writer, "Nothing stored yet.")?;
        return Ok(());
    }

    writeln!(writer, "Stored keys:")?;
    for (key, updated_at) in keys {
        writeln!(writer, "- {key}: {updated_at}")?;
    }

    Ok(())
}
