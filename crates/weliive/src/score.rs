// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `weliive score` command implementation.

use std::io::IsTerminal;

use weliive_config::model::LeadPolicy;
use weliive_config::WeliiveConfig;
use weliive_core::{LeadAssessment, LeadClassifier, LeadStatus, WeliiveError};
use weliive_lead::KeywordScorer;

/// Score `text` with the configured keywords and policy and print the result.
pub fn run_score(config: &WeliiveConfig, text: &str, plain: bool) -> Result<(), WeliiveError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let scorer = KeywordScorer::from_config(&config.lead)?;
    let assessment = scorer.assess(text);
    println!("{}", format_assessment(&assessment, scorer.policy(), use_color));
    Ok(())
}

pub fn format_assessment(assessment: &LeadAssessment, policy: LeadPolicy, use_color: bool) -> String {
    let matched = if assessment.matched_keywords.is_empty() {
        "-".to_string()
    } else {
        assessment.matched_keywords.join(", ")
    };
    let status = assessment.status.to_string();
    let status = if use_color {
        use colored::Colorize;
        match assessment.status {
            LeadStatus::Hot | LeadStatus::Converted => status.as_str().red().bold().to_string(),
            LeadStatus::Potential => status.as_str().yellow().to_string(),
            LeadStatus::None => status.as_str().dimmed().to_string(),
        }
    } else {
        status
    };
    format!(
        "  status:     {status}\n  confidence: {:.3}\n  matched:    {matched}\n  policy:     {}",
        assessment.confidence,
        policy.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hot_assessment_plain() {
        let scorer = KeywordScorer::new();
        let out = format_assessment(
            &scorer.assess("Je veux acheter, quel prix ?"),
            LeadPolicy::AnyMatch,
            false,
        );
        assert!(out.contains("status:     hot"));
        assert!(out.contains("matched:    prix, acheter"));
        assert!(out.contains("confidence: 0.154"));
        assert!(out.contains("policy:     any_match"));
    }

    #[test]
    fn neutral_text_has_no_matches() {
        let scorer = KeywordScorer::new();
        let out = format_assessment(&scorer.assess("Bonjour"), LeadPolicy::AnyMatch, false);
        assert!(out.contains("status:     none"));
        assert!(out.contains("matched:    -"));
    }

    #[test]
    fn run_score_rejects_invalid_threshold() {
        let mut config = WeliiveConfig::default();
        config.lead.min_confidence = -1.0;
        assert!(run_score(&config, "prix", true).is_err());
    }
}
