//! Category rule table loaded from a line-oriented source.
//!
//! # Format
//!
//! ```text
//! # pattern,category
//! rice,staple-grain
//! miso soup,staple-soup
//! salmon,seafood
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Each remaining line is
//! split on its first comma. Lines without a pattern, without a category, or
//! with an unknown category are dropped.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::tag::CategoryTag;

const COMMENT_MARKER: char = '#';

/// Errors reading a rule source.
#[derive(Debug, Error)]
pub enum RuleLoadError {
    /// The rule file could not be read.
    #[error("failed to read rules from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single `pattern -> category` association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    /// Substring matched against normalized food tokens.
    pub pattern: String,
    pub category: CategoryTag,
}

impl CategoryRule {
    pub fn new(pattern: impl Into<String>, category: CategoryTag) -> Self {
        Self {
            pattern: pattern.into(),
            category,
        }
    }
}

/// Ordered list of category rules. Order is significant for classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<CategoryRule>,
}

impl RuleTable {
    #[must_use]
    pub const fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Parses rule source text. Never fails; malformed lines are skipped.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut rules = Vec::new();
        for (line_num, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(COMMENT_MARKER) {
                continue;
            }
            match parse_line(line) {
                Some(rule) => rules.push(rule),
                None => {
                    tracing::debug!(line = line_num + 1, content = line, "skipping malformed rule");
                }
            }
        }
        Self { rules }
    }

    /// Reads and parses a rule file.
    pub fn load(path: &Path) -> Result<Self, RuleLoadError> {
        let source = fs::read_to_string(path).map_err(|source| RuleLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(&source);
        tracing::debug!(path = %path.display(), rules = table.len(), "loaded category rules");
        Ok(table)
    }

    /// Reads a rule file, falling back to an empty table on any failure.
    pub fn load_or_empty(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "category rules unavailable, nothing will be classified"
            );
            Self::empty()
        })
    }

    #[must_use]
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn parse_line(line: &str) -> Option<CategoryRule> {
    let (pattern, category) = line.split_once(',')?;
    let pattern = pattern.trim();
    let category = category.trim();
    if pattern.is_empty() || category.is_empty() {
        return None;
    }
    let category = category.parse().ok()?;
    Some(CategoryRule::new(pattern, category))
}
