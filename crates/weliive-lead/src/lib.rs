// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hot-lead detection for the Weliive engine.
//!
//! [`KeywordScorer`] is a zero-cost heuristic: no model call, no network.
//! It implements [`weliive_core::LeadClassifier`], which is all the message
//! store depends on.

pub mod scorer;

pub use scorer::KeywordScorer;
pub use weliive_config::model::LeadPolicy;
