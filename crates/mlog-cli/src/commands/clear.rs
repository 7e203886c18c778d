//! Clear command: wipes all stored log data.

use std::io::Write;

use anyhow::{Result, bail};
use mlog_db::Database;

pub fn run<W: Write>(writer: &mut W, db: &mut Database, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("Refusing to delete all data without --yes");
    }
    let mut journal = db.load_journal()?;
    let removed = journal.entries.len();
    journal.reset();
    db.save_journal(&journal)?;
    tracing::info!(removed, "cleared journal");
    writeln!(writer, "Deleted {removed} entries. Goals restored to defaults.")?;
    Ok(())
}
