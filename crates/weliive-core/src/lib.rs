// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Weliive live-visit engine.
//!
//! This crate provides the error type, the chat and Q&A domain types, and the
//! trait seams (lead classification, message observation) shared by the rest
//! of the workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::WeliiveError;
pub use traits::{LeadClassifier, MessageObserver};
pub use types::{
    LeadAssessment, LeadStatus, Message, MessageId, QaId, QaItem, QaStatus, Sender,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weliive_error_has_all_variants() {
        let _invalid = WeliiveError::InvalidArgument {
            name: "min_confidence".into(),
            value: "1.5".into(),
            reason: "must be between 0 and 1".into(),
        };
        let _observer = WeliiveError::Observer("render failed".into());
        let _reentrant = WeliiveError::Reentrant;
        let _config = WeliiveError::Config("test".into());
        let _internal = WeliiveError::Internal("test".into());
    }

    #[test]
    fn invalid_argument_names_the_value() {
        let err = WeliiveError::InvalidArgument {
            name: "min_confidence".into(),
            value: "1.5".into(),
            reason: "must be between 0 and 1".into(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("min_confidence"));
        assert!(rendered.contains("1.5"));
    }

    #[test]
    fn sender_display_and_parse() {
        use std::str::FromStr;

        for sender in [Sender::User, Sender::Ai, Sender::System] {
            let s = sender.to_string();
            let parsed = Sender::from_str(&s).expect("should parse back");
            assert_eq!(sender, parsed);
        }
        assert_eq!(Sender::Ai.to_string(), "ai");
    }

    #[test]
    fn all_traits_are_object_safe() {
        fn _assert_classifier(_: &dyn LeadClassifier) {}
        fn _assert_observer(_: &dyn MessageObserver) {}
    }
}
