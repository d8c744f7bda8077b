// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that serde attributes cannot express:
//! value ranges, non-blank keywords, and the ordering of Q&A delays.

use crate::diagnostic::ConfigError;
use crate::model::WeliiveConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &WeliiveConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` must be one of: {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.simulation.interval_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "simulation.interval_ms must be greater than 0".to_string(),
        });
    }

    let confidence = config.lead.min_confidence;
    if !(0.0..=1.0).contains(&confidence) {
        errors.push(ConfigError::Validation {
            message: format!("lead.min_confidence must be between 0 and 1, got {confidence}"),
        });
    }

    for (i, keyword) in config.lead.keywords.iter().enumerate() {
        if keyword.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("lead.keywords[{i}] must not be blank"),
            });
        }
    }

    if config.qa.acknowledgment_delay_ms > config.qa.answer_delay_ms {
        errors.push(ConfigError::Validation {
            message: format!(
                "qa.acknowledgment_delay_ms ({}) must not exceed qa.answer_delay_ms ({})",
                config.qa.acknowledgment_delay_ms, config.qa.answer_delay_ms
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&WeliiveConfig::default()).is_ok());
        assert!(validate_config(&WeliiveConfig::embedded()).is_ok());
    }

    #[test]
    fn out_of_range_confidence_fails_validation() {
        let mut config = WeliiveConfig::default();
        config.lead.min_confidence = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "min_confidence"));
    }

    #[test]
    fn nan_confidence_fails_validation() {
        let mut config = WeliiveConfig::default();
        config.lead.min_confidence = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn zero_interval_fails_validation() {
        let mut config = WeliiveConfig::default();
        config.simulation.interval_ms = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "interval_ms"));
    }

    #[test]
    fn blank_keyword_fails_validation() {
        let mut config = WeliiveConfig::default();
        config.lead.keywords.push("   ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "lead.keywords[13]"));
    }

    #[test]
    fn acknowledgment_after_answer_fails_validation() {
        let mut config = WeliiveConfig::default();
        config.qa.acknowledgment_delay_ms = 5000;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "acknowledgment_delay_ms"));
    }

    #[test]
    fn errors_are_collected_not_fail_fast() {
        let mut config = WeliiveConfig::default();
        config.app.log_level = "loud".to_string();
        config.simulation.interval_ms = 0;
        config.lead.min_confidence = -0.1;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
