//! Classify command: shows how food text would be tagged without logging it.

use std::io::Write;

use anyhow::Result;
use mlog_core::{CategorySet, Classifier};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Classification {
    text: String,
    normalized: String,
    categories: CategorySet,
    foods: Vec<String>,
}

pub fn run<W: Write>(writer: &mut W, classifier: &Classifier, text: &str, json: bool) -> Result<()> {
    let result = Classification {
        text: text.to_string(),
        normalized: classifier.normalize(text),
        categories: classifier.classify(text),
        foods: classifier.extract_foods(text),
    };

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&result)?)?;
        return Ok(());
    }

    writeln!(writer, "Categories: {}", result.categories.display_labels(" / "))?;
    if result.foods.is_empty() {
        writeln!(writer, "Foods: -")?;
    } else {
        writeln!(writer, "Foods: {}", result.foods.join(", "))?;
    }
    if !classifier.is_ready() || classifier.rule_count() == 0 {
        writeln!(writer, "(no category rules loaded)")?;
    }
    Ok(())
}
