//! Food category tags and ordered tag sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical food categories tracked against daily goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryTag {
    StapleGrain,
    StapleSoup,
    Seafood,
    Seaweed,
    Legume,
    Egg,
    Vegetable,
    Fungus,
}

impl CategoryTag {
    /// Every tag in display order.
    pub const ALL: [Self; 8] = [
        Self::StapleGrain,
        Self::StapleSoup,
        Self::Seafood,
        Self::Seaweed,
        Self::Legume,
        Self::Egg,
        Self::Vegetable,
        Self::Fungus,
    ];

    /// Staple tags are counted once per log entry; all others once per
    /// distinct food per day.
    #[must_use]
    pub const fn is_staple(self) -> bool {
        matches!(self, Self::StapleGrain | Self::StapleSoup)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StapleGrain => "staple-grain",
            Self::StapleSoup => "staple-soup",
            Self::Seafood => "seafood",
            Self::Seaweed => "seaweed",
            Self::Legume => "legume",
            Self::Egg => "egg",
            Self::Vegetable => "vegetable",
            Self::Fungus => "fungus",
        }
    }

    /// Human-readable label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StapleGrain => "Rice",
            Self::StapleSoup => "Miso soup",
            Self::Seafood => "Seafood",
            Self::Seaweed => "Seaweed",
            Self::Legume => "Beans",
            Self::Egg => "Egg",
            Self::Vegetable => "Vegetables",
            Self::Fungus => "Mushrooms",
        }
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryTag {
    type Err = UnknownCategoryTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "staple-grain" | "gohan" => Ok(Self::StapleGrain),
            "staple-soup" | "misoshiru" => Ok(Self::StapleSoup),
            "seafood" | "gyokai" => Ok(Self::Seafood),
            "seaweed" | "kaiso" => Ok(Self::Seaweed),
            "legume" | "mame" => Ok(Self::Legume),
            "egg" | "tamago" => Ok(Self::Egg),
            "vegetable" | "yasai" => Ok(Self::Vegetable),
            "fungus" | "kinoko" => Ok(Self::Fungus),
            _ => Err(UnknownCategoryTag(s.to_string())),
        }
    }
}

impl Serialize for CategoryTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown category strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategoryTag(String);

impl fmt::Display for UnknownCategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategoryTag {}

/// An insertion-ordered set of category tags.
///
/// Order reflects first discovery during classification; duplicates are
/// dropped on insert and on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CategoryTag>", into = "Vec<CategoryTag>")]
pub struct CategorySet(Vec<CategoryTag>);

impl CategorySet {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds `tag` if absent. Returns whether it was added.
    pub fn insert(&mut self, tag: CategoryTag) -> bool {
        if self.0.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    #[must_use]
    pub fn contains(&self, tag: CategoryTag) -> bool {
        self.0.contains(&tag)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = CategoryTag> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[CategoryTag] {
        &self.0
    }

    /// Joins tag labels with `sep`, or returns `"-"` when empty.
    #[must_use]
    pub fn display_labels(&self, sep: &str) -> String {
        if self.0.is_empty() {
            return "-".to_string();
        }
        self.0
            .iter()
            .map(|tag| tag.label())
            .collect::<Vec<_>>()
            .join(sep)
    }

    /// Joins tag names with `sep`. Stable across runs for export.
    #[must_use]
    pub fn join(&self, sep: &str) -> String {
        self.0
            .iter()
            .map(|tag| tag.as_str())
            .collect::<Vec<_>>()
            .join(sep)
    }
}

impl From<Vec<CategoryTag>> for CategorySet {
    fn from(tags: Vec<CategoryTag>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<CategorySet> for Vec<CategoryTag> {
    fn from(set: CategorySet) -> Self {
        set.0
    }
}

impl FromIterator<CategoryTag> for CategorySet {
    fn from_iter<I: IntoIterator<Item = CategoryTag>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl<'a> IntoIterator for &'a CategorySet {
    type Item = CategoryTag;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, CategoryTag>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}
