// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the chat, Q&A, and lead-scoring crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a chat message (`msg-<uuid>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generate a fresh, process-unique message id.
    pub fn generate() -> Self {
        MessageId(format!("msg-{}", uuid::Uuid::new_v4()))
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a Q&A item (`qa-<uuid>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QaId(pub String);

impl QaId {
    /// Generate a fresh, process-unique Q&A id.
    pub fn generate() -> Self {
        QaId(format!("qa-{}", uuid::Uuid::new_v4()))
    }
}

impl std::fmt::Display for QaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who authored a chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The visitor (buyer or tenant). Only these messages are scored.
    User,
    /// The seller side or an automated reply.
    Ai,
    /// Platform notices such as "offer sent".
    System,
}

/// A single chat message. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    /// Trimmed message text.
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    /// Computed once at creation; always false for non-user senders.
    pub is_hot_lead: bool,
}

/// Lifecycle status of a Q&A item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QaStatus {
    /// Question received, nothing sent back yet.
    Pending,
    /// An interim confirmation was shown.
    Acknowledged,
    /// An answer is attached.
    Answered,
}

/// A question with its optional acknowledgment and answer.
///
/// `Answered` implies a non-empty `answer`. `Acknowledged` implies a
/// non-empty `acknowledgment` and no `answer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaItem {
    pub id: QaId,
    pub question: String,
    pub answer: Option<String>,
    pub acknowledgment: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub status: QaStatus,
}

/// Commercial temperature of a visitor.
///
/// Ordered: a session's lead status only ever moves forward.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    None,
    /// Some intent keywords matched, below the hot-lead bar.
    Potential,
    Hot,
    /// The visitor submitted an offer.
    Converted,
}

/// Detailed result of scoring one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadAssessment {
    /// Match density in [0, 1].
    pub confidence: f64,
    /// Matched keywords, in keyword-list order.
    pub matched_keywords: Vec<String>,
    pub status: LeadStatus,
}

impl LeadAssessment {
    /// Build an assessment, deriving the status from the match data.
    pub fn from_parts(confidence: f64, matched_keywords: Vec<String>, hot: bool) -> Self {
        let status = if hot {
            LeadStatus::Hot
        } else if confidence > 0.0 || !matched_keywords.is_empty() {
            LeadStatus::Potential
        } else {
            LeadStatus::None
        };
        Self {
            confidence,
            matched_keywords,
            status,
        }
    }

    /// Whether this assessment marks a hot lead.
    pub fn is_hot(&self) -> bool {
        self.status == LeadStatus::Hot
    }
}
