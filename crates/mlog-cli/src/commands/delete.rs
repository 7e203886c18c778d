//! Delete command.

use std::io::Write;

use anyhow::{Result, bail};
use mlog_core::EntryId;
use mlog_db::Database;

pub fn run<W: Write>(writer: &mut W, db: &mut Database, id: &str) -> Result<()> {
    let id = EntryId::new(id.trim())?;
    let mut journal = db.load_journal()?;
    if !journal.delete_entry(&id) {
        bail!("No entry with ID {id}");
    }
    db.save_journal(&journal)?;
    writeln!(writer, "Deleted {id}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mlog_core::{Classifier, NameNormalizer, RuleTable};

    use super::*;

    #[test]
    fn deletes_existing_entry_and_keeps_foods() {
        let classifier = Classifier::new(NameNormalizer::builtin(), &RuleTable::parse("salmon,seafood\n"));
        let date = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        let mut db = Database::open_in_memory().unwrap();
        let mut journal = db.load_journal().unwrap();
        let id = journal
            .add_food(&classifier, date, None, "salmon", None)
            .unwrap()
            .id
            .clone();
        db.save_journal(&journal).unwrap();

        let mut output = Vec::new();
        run(&mut output, &mut db, id.as_str()).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), format!("Deleted {id}\n"));

        let journal = db.load_journal().unwrap();
        assert!(journal.entries.is_empty());
        assert_eq!(journal.foods_on(date).unwrap().as_slice(), &["salmon"]);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        let err = run(&mut output, &mut db, "nope").unwrap_err();
        assert_eq!(err.to_string(), "No entry with ID nope");
        assert!(output.is_empty());
    }

    #[test]
    fn blank_id_is_rejected() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        assert!(run(&mut output, &mut db, "  ").is_err());
    }
}
