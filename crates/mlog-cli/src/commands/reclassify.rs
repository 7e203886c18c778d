//! Reclassify command: re-tags stored entries after the rules change.

use std::io::Write;

use anyhow::Result;
use mlog_core::Classifier;
use mlog_db::Database;

pub fn run<W: Write>(writer: &mut W, db: &mut Database, classifier: &Classifier) -> Result<()> {
    let mut journal = db.load_journal()?;
    let changed = journal.reclassify_all(classifier);
    db.save_journal(&journal)?;
    writeln!(
        writer,
        "Reclassified {} entries ({changed} changed).",
        journal.entries.len()
    )?;
    Ok(())
}
