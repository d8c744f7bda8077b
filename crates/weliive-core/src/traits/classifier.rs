// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lead classification trait.

use crate::types::LeadAssessment;

/// Decides whether a piece of user text shows purchase or rental intent.
///
/// The keyword scorer is the only implementation today. The message store
/// depends on this trait alone, so a remote or model-backed classifier can
/// replace it without touching callers.
pub trait LeadClassifier: Send + Sync {
    /// Confidence in [0, 1] that `text` is a hot lead.
    fn score(&self, text: &str) -> f64;

    /// Whether `text` is a hot lead.
    fn classify(&self, text: &str) -> bool;

    /// Detailed result. The default derives it from `score` and `classify`.
    fn assess(&self, text: &str) -> LeadAssessment {
        let confidence = self.score(text);
        let hot = self.classify(text);
        LeadAssessment::from_parts(confidence, Vec::new(), hot)
    }
}
