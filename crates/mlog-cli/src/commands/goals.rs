//! Goal management commands.

use std::io::Write;

use anyhow::{Context, Result};
use mlog_core::{CategoryTag, GoalMap};
use mlog_db::Database;

use crate::GoalsAction;

pub fn run<W: Write>(writer: &mut W, db: &mut Database, action: &GoalsAction) -> Result<()> {
    let mut journal = db.load_journal()?;
    match action {
        GoalsAction::Show => {
            write_goals(writer, &journal.goals)?;
            return Ok(());
        }
        GoalsAction::Set { tag, value } => {
            let tag = parse_tag(tag)?;
            match journal.goals.set_from_input(tag, value) {
                Some(need) => writeln!(writer, "{}: {need} per day", tag.label())?,
                None => writeln!(writer, "{}: not tracked", tag.label())?,
            }
        }
        GoalsAction::Unset { tag } => {
            let tag = parse_tag(tag)?;
            journal.goals.remove(tag);
            writeln!(writer, "{}: not tracked", tag.label())?;
        }
        GoalsAction::Reset => {
            journal.goals.reset();
            writeln!(writer, "Goals reset to defaults.")?;
        }
    }
    db.save_journal(&journal)?;
    Ok(())
}

fn parse_tag(s: &str) -> Result<CategoryTag> {
    s.parse::<CategoryTag>()
        .with_context(|| format!("expected one of: {}", tag_names()))
}

fn tag_names() -> String {
    CategoryTag::ALL
        .iter()
        .map(|tag| tag.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_goals<W: Write>(writer: &mut W, goals: &GoalMap) -> Result<()> {
    for tag in CategoryTag::ALL {
        match goals.get(tag) {
            Some(need) => writeln!(writer, "{:<12} {need}", tag.label())?,
            None => writeln!(writer, "{:<12} -", tag.label())?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    fn run_action(db: &mut Database, action: &GoalsAction) -> String {
        let mut output = Vec::new();
        run(&mut output, db, action).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn shows_default_goals() {
        let mut db = Database::open_in_memory().unwrap();
        let output = run_action(&mut db, &GoalsAction::Show);
        assert_snapshot!(output.trim_end(), @r"
Rice         2
Miso soup    2
Seafood      1
Seaweed      1
Beans        1
Egg          1
Vegetables   5
Mushrooms    1
");
    }

    #[test]
    fn set_and_unset_are_persisted() {
        let mut db = Database::open_in_memory().unwrap();
        let set = GoalsAction::Set {
            tag: "yasai".to_string(),
            value: "7".to_string(),
        };
        assert_eq!(run_action(&mut db, &set), "Vegetables: 7 per day\n");
        let unset = GoalsAction::Unset {
            tag: "fungus".to_string(),
        };
        assert_eq!(run_action(&mut db, &unset), "Mushrooms: not tracked\n");

        let goals = db.load_journal().unwrap().goals;
        assert_eq!(goals.get(CategoryTag::Vegetable), Some(7));
        assert_eq!(goals.get(CategoryTag::Fungus), None);

        run_action(&mut db, &GoalsAction::Reset);
        assert_eq!(db.load_journal().unwrap().goals, GoalMap::default());
    }

    #[test]
    fn invalid_value_restores_default() {
        let mut db = Database::open_in_memory().unwrap();
        let set = GoalsAction::Set {
            tag: "egg".to_string(),
            value: "3".to_string(),
        };
        run_action(&mut db, &set);
        let set = GoalsAction::Set {
            tag: "egg".to_string(),
            value: "plenty".to_string(),
        };
        assert_eq!(run_action(&mut db, &set), "Egg: 1 per day\n");
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        let action = GoalsAction::Unset {
            tag: "dessert".to_string(),
        };
        let err = run(&mut output, &mut db, &action).unwrap_err();
        assert!(format!("{err:#}").contains("unknown category: dessert"));
    }
}
