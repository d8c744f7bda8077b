// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-density lead scoring.
//!
//! `score` is the fraction of configured keywords found as case-insensitive
//! substrings of the trimmed text. `classify` applies the configured
//! [`LeadPolicy`] on top of it. Keywords, threshold, and policy can all be
//! changed at runtime through `&self`.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;
use weliive_config::model::{LeadConfig, LeadPolicy, DEFAULT_KEYWORDS};
use weliive_core::{LeadAssessment, LeadClassifier, WeliiveError};

struct ScorerState {
    /// Lowercased, trimmed, non-empty, distinct; insertion order kept.
    keywords: Vec<String>,
    min_confidence: f64,
    policy: LeadPolicy,
}

/// Heuristic hot-lead scorer driven by a keyword list.
pub struct KeywordScorer {
    state: RwLock<ScorerState>,
}

impl KeywordScorer {
    /// Create a scorer with the 13 default keywords, threshold 0.5, and the
    /// any-match policy.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ScorerState {
                keywords: normalize_keywords(DEFAULT_KEYWORDS),
                min_confidence: 0.5,
                policy: LeadPolicy::AnyMatch,
            }),
        }
    }

    /// Create a scorer from the `[lead]` config section.
    pub fn from_config(config: &LeadConfig) -> Result<Self, WeliiveError> {
        let scorer = Self::new();
        scorer.update_keywords(&config.keywords);
        scorer.set_min_confidence(config.min_confidence)?;
        scorer.set_policy(config.policy);
        Ok(scorer)
    }

    /// Replace the keyword list.
    ///
    /// Entries are lowercased and trimmed; blanks and duplicates are dropped.
    pub fn update_keywords<I, S>(&self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = normalize_keywords(keywords);
        debug!(count = keywords.len(), "lead keywords updated");
        self.write().keywords = keywords;
    }

    /// Set the density threshold. Fails without changing state if `value`
    /// is outside [0, 1] or not a number.
    pub fn set_min_confidence(&self, value: f64) -> Result<(), WeliiveError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(WeliiveError::invalid_argument(
                "min_confidence",
                value,
                "confidence must be between 0 and 1",
            ));
        }
        self.write().min_confidence = value;
        Ok(())
    }

    pub fn set_policy(&self, policy: LeadPolicy) {
        self.write().policy = policy;
    }

    pub fn keywords(&self) -> Vec<String> {
        self.read().keywords.clone()
    }

    pub fn min_confidence(&self) -> f64 {
        self.read().min_confidence
    }

    pub fn policy(&self) -> LeadPolicy {
        self.read().policy
    }

    fn read(&self) -> RwLockReadGuard<'_, ScorerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ScorerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Match `text` against the current keywords under one read lock.
    fn evaluate(&self, text: &str) -> (f64, Vec<String>, bool) {
        let state = self.read();
        let lower = text.trim().to_lowercase();
        if lower.is_empty() || state.keywords.is_empty() {
            return (0.0, Vec::new(), false);
        }

        let matched: Vec<String> = state
            .keywords
            .iter()
            .filter(|k| lower.contains(k.as_str()))
            .cloned()
            .collect();
        let confidence = (matched.len() as f64 / state.keywords.len() as f64).min(1.0);

        // Both policies need at least one hit, so a zero threshold never
        // flags keyword-free text.
        let hot = !matched.is_empty()
            && match state.policy {
                LeadPolicy::AnyMatch => true,
                LeadPolicy::Density => confidence >= state.min_confidence,
            };

        (confidence, matched, hot)
    }
}

impl Default for KeywordScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LeadClassifier for KeywordScorer {
    fn score(&self, text: &str) -> f64 {
        self.evaluate(text).0
    }

    fn classify(&self, text: &str) -> bool {
        self.evaluate(text).2
    }

    fn assess(&self, text: &str) -> LeadAssessment {
        let (confidence, matched, hot) = self.evaluate(text);
        LeadAssessment::from_parts(confidence, matched, hot)
    }
}

fn normalize_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for keyword in keywords {
        let k = keyword.as_ref().trim().to_lowercase();
        if !k.is_empty() && !out.contains(&k) {
            out.push(k);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use weliive_core::LeadStatus;

    #[test]
    fn single_keyword_is_hot_lead() {
        let s = KeywordScorer::new();
        assert!(s.classify("Quel est le prix ?"));
        assert!(s.classify("Je voudrais VISITER demain"));
        assert!(s.classify("Réservation possible ?"));
    }

    #[test]
    fn score_is_match_density() {
        let s = KeywordScorer::new();
        let score = s.score("Quel est le prix ?");
        assert!((score - 1.0 / 13.0).abs() < 1e-9, "got {score}");

        // "visiter" contains "visite", both count.
        let score = s.score("je veux visiter");
        assert!((score - 2.0 / 13.0).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn empty_and_neutral_text_is_not_a_lead() {
        let s = KeywordScorer::new();
        assert!(!s.classify(""));
        assert!(!s.classify("   "));
        assert_eq!(s.score(""), 0.0);
        assert!(!s.classify("Pouvez-vous me parler du quartier ?"));
    }

    #[test]
    fn density_policy_uses_threshold() {
        let s = KeywordScorer::new();
        s.set_policy(LeadPolicy::Density);
        assert!(!s.classify("Quel est le prix ?"), "1/13 is below 0.5");

        s.update_keywords(["prix", "loyer"]);
        assert!(s.classify("Quel est le prix ?"), "1/2 reaches 0.5");
    }

    #[test]
    fn zero_threshold_still_needs_a_match() {
        let s = KeywordScorer::new();
        s.set_policy(LeadPolicy::Density);
        s.set_min_confidence(0.0).unwrap();
        assert!(!s.classify("bonjour"));
    }

    #[test]
    fn set_min_confidence_rejects_out_of_range() {
        let s = KeywordScorer::new();
        let err = s.set_min_confidence(1.5).unwrap_err();
        assert!(matches!(err, WeliiveError::InvalidArgument { ref value, .. } if value == "1.5"));
        assert!(s.set_min_confidence(-0.1).is_err());
        assert!(s.set_min_confidence(f64::NAN).is_err());
        assert_eq!(s.min_confidence(), 0.5, "state unchanged on failure");

        s.set_min_confidence(1.0).unwrap();
        assert_eq!(s.min_confidence(), 1.0);
    }

    #[test]
    fn update_keywords_normalizes() {
        let s = KeywordScorer::new();
        s.update_keywords(["  Garage ", "garage", "", "Jardin"]);
        assert_eq!(s.keywords(), vec!["garage", "jardin"]);
        assert!(s.classify("Il y a un GARAGE ?"));
        assert!(!s.classify("Quel est le prix ?"));
    }

    #[test]
    fn empty_keyword_list_scores_zero() {
        let s = KeywordScorer::new();
        s.update_keywords(Vec::<String>::new());
        assert_eq!(s.score("prix"), 0.0);
        assert!(!s.classify("prix"));
    }

    #[test]
    fn assess_reports_matches_and_status() {
        let s = KeywordScorer::new();
        let a = s.assess("Je suis prêt à acheter si le prix est correct.");
        assert_eq!(a.matched_keywords, vec!["prix", "acheter"]);
        assert_eq!(a.status, LeadStatus::Hot);

        s.set_policy(LeadPolicy::Density);
        let a = s.assess("Quel est le prix ?");
        assert_eq!(a.status, LeadStatus::Potential);

        let a = s.assess("Merci");
        assert_eq!(a.status, LeadStatus::None);
    }

    #[test]
    fn from_config_applies_all_fields() {
        let config = LeadConfig {
            policy: LeadPolicy::Density,
            min_confidence: 0.3,
            keywords: vec!["Prix".into()],
        };
        let s = KeywordScorer::from_config(&config).unwrap();
        assert_eq!(s.policy(), LeadPolicy::Density);
        assert_eq!(s.min_confidence(), 0.3);
        assert_eq!(s.keywords(), vec!["prix"]);
    }

    #[test]
    fn from_config_rejects_bad_threshold() {
        let config = LeadConfig {
            min_confidence: 2.0,
            ..LeadConfig::default()
        };
        assert!(KeywordScorer::from_config(&config).is_err());
    }

    proptest! {
        #[test]
        fn text_with_a_keyword_is_always_hot(
            prefix in "[a-z ]{0,20}",
            idx in 0usize..DEFAULT_KEYWORDS.len(),
            suffix in "[a-z ?]{0,20}",
        ) {
            let s = KeywordScorer::new();
            let text = format!("{prefix}{}{suffix}", DEFAULT_KEYWORDS[idx].to_uppercase());
            prop_assert!(s.classify(&text));
        }

        #[test]
        fn score_stays_in_unit_interval(text in ".{0,80}") {
            let s = KeywordScorer::new();
            let score = s.score(&text);
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn adding_keywords_never_lowers_score(
            base in "[a-z ]{0,20}",
            picks in proptest::collection::vec(0usize..DEFAULT_KEYWORDS.len(), 0..6),
        ) {
            let s = KeywordScorer::new();
            let mut text = base;
            let mut last = s.score(&text);
            for idx in picks {
                text.push(' ');
                text.push_str(DEFAULT_KEYWORDS[idx]);
                let next = s.score(&text);
                prop_assert!(next >= last);
                last = next;
            }
            prop_assert!(last <= 1.0);
        }
    }
}
