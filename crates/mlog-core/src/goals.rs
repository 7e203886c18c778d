//! Daily category goals and progress evaluation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::CountSnapshot;
use crate::tag::CategoryTag;

/// Built-in daily targets.
const DEFAULT_GOALS: [(CategoryTag, u32); 8] = [
    (CategoryTag::StapleGrain, 2),
    (CategoryTag::StapleSoup, 2),
    (CategoryTag::Seafood, 1),
    (CategoryTag::Seaweed, 1),
    (CategoryTag::Legume, 1),
    (CategoryTag::Egg, 1),
    (CategoryTag::Vegetable, 5),
    (CategoryTag::Fungus, 1),
];

/// Default target for `tag`, if it has one.
#[must_use]
pub fn default_goal(tag: CategoryTag) -> Option<u32> {
    DEFAULT_GOALS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, need)| *need)
}

/// Daily targets per category. Tags without a target are reported as raw counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalMap {
    targets: BTreeMap<CategoryTag, u32>,
}

impl Default for GoalMap {
    fn default() -> Self {
        Self {
            targets: DEFAULT_GOALS.into_iter().collect(),
        }
    }
}

impl GoalMap {
    /// A map with no targets at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            targets: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, tag: CategoryTag) -> Option<u32> {
        self.targets.get(&tag).copied()
    }

    pub fn set(&mut self, tag: CategoryTag, need: u32) {
        self.targets.insert(tag, need);
    }

    /// Sets a target from user input.
    ///
    /// Input that is not a non-negative integer falls back to the default
    /// target for `tag`; a tag without a default becomes untracked.
    /// Returns the target now in effect.
    pub fn set_from_input(&mut self, tag: CategoryTag, input: &str) -> Option<u32> {
        let need = input.trim().parse::<u32>().ok().or_else(|| {
            tracing::debug!(%tag, input, "invalid goal input, using default");
            default_goal(tag)
        });
        match need {
            Some(need) => {
                self.targets.insert(tag, need);
            }
            None => {
                self.targets.remove(&tag);
            }
        }
        need
    }

    /// Stops tracking `tag`. Returns the previous target.
    pub fn remove(&mut self, tag: CategoryTag) -> Option<u32> {
        self.targets.remove(&tag)
    }

    /// Restores the built-in targets.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryTag, u32)> + '_ {
        self.targets.iter().map(|(tag, need)| (*tag, *need))
    }
}

/// Progress of one category against its goal.
///
/// `need`, `achieved` and `remaining` are absent for tags without a goal;
/// `remaining` is present only while the goal is unmet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalStatus {
    pub tag: CategoryTag,
    pub have: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub need: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achieved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u32>,
}

impl GoalStatus {
    fn new(tag: CategoryTag, have: u32, need: Option<u32>) -> Self {
        let Some(need) = need else {
            return Self {
                tag,
                have,
                need: None,
                achieved: None,
                remaining: None,
            };
        };
        let achieved = have >= need;
        Self {
            tag,
            have,
            need: Some(need),
            achieved: Some(achieved),
            remaining: (!achieved).then(|| need - have),
        }
    }
}

/// Evaluates `counts` against `goals` for each tag in `order`.
pub fn evaluate(counts: &CountSnapshot, goals: &GoalMap, order: &[CategoryTag]) -> Vec<GoalStatus> {
    order
        .iter()
        .map(|&tag| GoalStatus::new(tag, counts.get(tag), goals.get(tag)))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    use crate::aggregate::compute_counts;
    use crate::classify::Classifier;
    use crate::extraction::ExtractionTracker;
    use crate::normalize::NameNormalizer;
    use crate::rules::RuleTable;

    fn vegetable_counts(n: usize) -> CountSnapshot {
        let names = ["spinach", "carrot", "onion", "cabbage", "leek", "daikon"];
        let source: String = names.iter().map(|n| format!("{n},vegetable\n")).collect();
        let classifier = Classifier::new(NameNormalizer::builtin(), &RuleTable::parse(&source));
        let date = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        let mut tracker = ExtractionTracker::new();
        tracker.record_user_input(&classifier, date, &names[..n].join(", "));
        compute_counts(&classifier, &[], tracker.foods_on(date), date)
    }

    #[test]
    fn unmet_goal_reports_remaining() {
        let mut goals = GoalMap::empty();
        goals.set(CategoryTag::Vegetable, 5);
        let status = evaluate(&vegetable_counts(3), &goals, &[CategoryTag::Vegetable]);
        assert_eq!(
            status,
            vec![GoalStatus {
                tag: CategoryTag::Vegetable,
                have: 3,
                need: Some(5),
                achieved: Some(false),
                remaining: Some(2),
            }]
        );
    }

    #[test]
    fn met_goal_has_no_remaining() {
        let status = evaluate(&vegetable_counts(6), &GoalMap::default(), &[CategoryTag::Vegetable]);
        assert_eq!(status[0].achieved, Some(true));
        assert_eq!(status[0].remaining, None);
        assert_eq!(status[0].have, 6);
    }

    #[test]
    fn untracked_tag_reports_raw_count_only() {
        let mut goals = GoalMap::default();
        goals.remove(CategoryTag::Vegetable);
        let status = evaluate(&vegetable_counts(2), &goals, &[CategoryTag::Vegetable]);
        assert_eq!(status[0].have, 2);
        assert_eq!(status[0].need, None);
        assert_eq!(status[0].achieved, None);
        assert_eq!(status[0].remaining, None);

        let json = serde_json::to_string(&status[0]).unwrap();
        assert_eq!(json, r#"{"tag":"vegetable","have":2}"#);
    }

    #[test]
    fn follows_caller_order() {
        let order = [CategoryTag::Fungus, CategoryTag::StapleGrain];
        let status = evaluate(&CountSnapshot::default(), &GoalMap::default(), &order);
        let tags: Vec<_> = status.iter().map(|s| s.tag).collect();
        assert_eq!(tags, order);
        assert_eq!(status[1].remaining, Some(2));
    }

    #[test]
    fn achievement_is_monotonic_in_have() {
        let mut goals = GoalMap::empty();
        goals.set(CategoryTag::Vegetable, 4);
        let mut was_achieved = false;
        for n in 0..=6 {
            let status = evaluate(&vegetable_counts(n), &goals, &[CategoryTag::Vegetable]);
            let achieved = status[0].achieved.unwrap();
            assert!(achieved || !was_achieved, "achievement regressed at {n}");
            was_achieved = achieved;
        }
        assert!(was_achieved);
    }

    #[test]
    fn zero_goal_is_always_achieved() {
        let mut goals = GoalMap::empty();
        goals.set(CategoryTag::Egg, 0);
        let status = evaluate(&CountSnapshot::default(), &goals, &[CategoryTag::Egg]);
        assert_eq!(status[0].achieved, Some(true));
    }

    #[test]
    fn invalid_input_falls_back_to_default() {
        let mut goals = GoalMap::default();
        assert_eq!(goals.set_from_input(CategoryTag::Vegetable, "7"), Some(7));
        assert_eq!(goals.get(CategoryTag::Vegetable), Some(7));
        assert_eq!(goals.set_from_input(CategoryTag::Vegetable, "lots"), Some(5));
        assert_eq!(goals.set_from_input(CategoryTag::Seafood, "-1"), Some(1));
        assert_eq!(goals.set_from_input(CategoryTag::Egg, " 3 "), Some(3));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut goals = GoalMap::default();
        goals.set(CategoryTag::Egg, 9);
        goals.remove(CategoryTag::Fungus);
        goals.reset();
        assert_eq!(goals, GoalMap::default());
        assert_eq!(goals.get(CategoryTag::Vegetable), Some(5));
        assert_eq!(goals.iter().count(), 8);
    }

    #[test]
    fn goal_map_serde_roundtrip() {
        let goals = GoalMap::default();
        let json = serde_json::to_string(&goals).unwrap();
        assert!(json.starts_with(r#"{"staple-grain":2,"staple-soup":2,"#));
        let parsed: GoalMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, goals);
    }
}
