//! Core domain logic for the meal log.
//!
//! This crate contains the classification and aggregation engine:
//! - Rules: loading `pattern,category` tables
//! - Normalization: collapsing spellings of the same food
//! - Classification: mapping free text to category tags
//! - Extraction: accumulating the distinct foods eaten each day
//! - Aggregation: per-day counts under the staple/ordinary policy
//! - Goals: comparing counts against daily targets

mod aggregate;
pub mod classify;
mod entry;
pub mod extraction;
pub mod goals;
mod journal;
pub mod normalize;
pub mod rules;
mod summary;
mod tag;
mod types;

pub use aggregate::{CountSnapshot, compute_counts};
pub use classify::{Classifier, SEPARATORS, split_items};
pub use entry::LogEntry;
pub use extraction::{ExtractionTracker, FoodSet};
pub use goals::{GoalMap, GoalStatus, default_goal, evaluate};
pub use journal::Journal;
pub use normalize::{NameNormalizer, SynonymTable};
pub use rules::{CategoryRule, RuleLoadError, RuleTable};
pub use summary::{DaySummary, week_summary};
pub use tag::{CategorySet, CategoryTag, UnknownCategoryTag};
pub use types::{EntryId, EntryKind, ValidationError};
