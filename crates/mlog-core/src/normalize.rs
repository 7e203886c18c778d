//! Food name canonicalization.
//!
//! Normalization trims, case-folds, then rewrites every known surface form to
//! its canonical spelling, so that different spellings of the same food
//! deduplicate to one name.

use crate::types::ValidationError;

/// Rewrite budget per input character, on top of a fixed allowance.
/// Shrinking rewrites settle within one rewrite per character.
const REWRITES_PER_CHAR: usize = 4;
const MIN_REWRITES: usize = 64;

/// Surface spellings collapsed by default. Identity entries are omitted.
const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("ミニトマト", "トマト"),
    ("マグロ", "まぐろ"),
    ("タラ", "たら"),
    ("鱈", "たら"),
    ("タケノコ", "たけのこ"),
    ("ナス", "なす"),
    ("しいたけ", "椎茸"),
    ("まいたけ", "舞茸"),
    ("タマゴ", "卵"),
    ("たまご", "卵"),
    ("玉子", "卵"),
    ("エッグ", "卵"),
    ("cherry tomato", "tomato"),
    ("aubergine", "eggplant"),
    ("garbanzo", "chickpea"),
];

/// Ordered mapping from surface form to canonical form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynonymTable {
    pairs: Vec<(String, String)>,
}

impl SynonymTable {
    #[must_use]
    pub const fn empty() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Builds a table from `(surface, canonical)` pairs.
    ///
    /// Both sides are trimmed and case-folded. Identity and blank pairs are
    /// ignored. A canonical form that contains any surface form is rejected,
    /// since it would be rewritten again on a second pass.
    pub fn new<I, S, C>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, C)>,
        S: AsRef<str>,
        C: AsRef<str>,
    {
        let mut table = Self::empty();
        for (surface, canonical) in pairs {
            table.push(surface.as_ref(), canonical.as_ref());
        }
        table.validate()?;
        Ok(table)
    }

    /// The built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for (surface, canonical) in DEFAULT_SYNONYMS {
            table.push(surface, canonical);
        }
        table
    }

    /// Appends pairs to a copy of this table.
    pub fn extended<I, S, C>(&self, pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (S, C)>,
        S: AsRef<str>,
        C: AsRef<str>,
    {
        let mut table = self.clone();
        for (surface, canonical) in pairs {
            table.push(surface.as_ref(), canonical.as_ref());
        }
        table.validate()?;
        Ok(table)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn push(&mut self, surface: &str, canonical: &str) {
        let surface = fold(surface);
        let canonical = fold(canonical);
        if surface.is_empty() || canonical.is_empty() || surface == canonical {
            return;
        }
        if self.pairs.iter().any(|(s, _)| *s == surface) {
            return;
        }
        self.pairs.push((surface, canonical));
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for (_, canonical) in &self.pairs {
            let unstable = self
                .pairs
                .iter()
                .find(|(surface, _)| canonical.contains(surface.as_str()));
            if let Some((surface, _)) = unstable {
                return Err(ValidationError::UnstableSynonym {
                    canonical: canonical.clone(),
                    surface: surface.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Canonicalizes food names for matching and deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameNormalizer {
    synonyms: SynonymTable,
}

impl NameNormalizer {
    #[must_use]
    pub const fn new(synonyms: SynonymTable) -> Self {
        Self { synonyms }
    }

    /// A normalizer using the built-in synonym table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(SynonymTable::builtin())
    }

    /// Returns the canonical form of `text`.
    ///
    /// Rewrites repeat until no surface form remains, so the result is
    /// idempotent: `normalize(&normalize(x)) == normalize(x)`.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let mut name = fold(text);
        let mut budget = name.chars().count() * REWRITES_PER_CHAR + MIN_REWRITES;
        loop {
            let mut changed = false;
            for (surface, canonical) in &self.synonyms.pairs {
                while name.contains(surface.as_str()) {
                    if budget == 0 {
                        tracing::warn!(input = text, "synonym rewriting did not settle");
                        return name;
                    }
                    budget -= 1;
                    name = name.replace(surface.as_str(), canonical);
                    changed = true;
                }
            }
            if !changed {
                return name;
            }
        }
    }
}

fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_case_folds() {
        let normalizer = NameNormalizer::default();
        assert_eq!(normalizer.normalize("  Grilled SALMON "), "grilled salmon");
    }

    #[test]
    fn collapses_builtin_synonyms() {
        let normalizer = NameNormalizer::builtin();
        assert_eq!(normalizer.normalize("ミニトマト"), "トマト");
        assert_eq!(normalizer.normalize("鱈の煮付け"), "たらの煮付け");
        assert_eq!(normalizer.normalize("たまご焼き"), "卵焼き");
        assert_eq!(normalizer.normalize("Cherry Tomato salad"), "tomato salad");
    }

    #[test]
    fn replaces_every_occurrence() {
        let normalizer = NameNormalizer::builtin();
        assert_eq!(normalizer.normalize("タマゴとタマゴ"), "卵と卵");
    }

    #[test]
    fn is_idempotent() {
        let normalizer = NameNormalizer::builtin();
        for input in ["ミニトマト", "しいたけ汁", " Aubergine ", "エッグ", "plain rice", ""] {
            let once = normalizer.normalize(input);
            assert_eq!(normalizer.normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn is_idempotent_for_repeated_prefixes() {
        let normalizer = NameNormalizer::builtin();
        let english = format!("{}tomato", "cherry ".repeat(10));
        assert_eq!(normalizer.normalize(&english), "tomato");
        let japanese = format!("{}トマト", "ミニ".repeat(10));
        assert_eq!(normalizer.normalize(&japanese), "トマト");
        for input in [english, japanese, "cherry cherry tomato salad".to_string()] {
            let once = normalizer.normalize(&input);
            assert_eq!(normalizer.normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn reaches_fixpoint_when_replacement_creates_new_match() {
        let table = SynonymTable::new([("xy", "x")]).unwrap();
        let normalizer = NameNormalizer::new(table);
        let once = normalizer.normalize("xyy");
        assert_eq!(once, "x");
        assert_eq!(normalizer.normalize(&once), once);
    }

    #[test]
    fn builtin_table_is_stable() {
        let table = SynonymTable::new(DEFAULT_SYNONYMS.iter().copied()).unwrap();
        assert_eq!(table, SynonymTable::builtin());
    }

    #[test]
    fn rejects_canonical_containing_surface() {
        let err = SynonymTable::new([("tuna", "maguro"), ("guro", "g")]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnstableSynonym {
                canonical: "maguro".to_string(),
                surface: "guro".to_string(),
            }
        );
    }

    #[test]
    fn ignores_identity_and_blank_pairs() {
        let table = SynonymTable::new([("egg", "EGG"), ("", "x"), ("Nasu", "eggplant")]).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn extended_appends_user_pairs() {
        let table = SynonymTable::builtin()
            .extended([("Brown Rice", "rice")])
            .unwrap();
        assert_eq!(table.len(), SynonymTable::builtin().len() + 1);
        let normalizer = NameNormalizer::new(table);
        assert_eq!(normalizer.normalize("brown rice bowl"), "rice bowl");
    }
}
