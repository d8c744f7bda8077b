// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Weliive engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level Weliive configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to the values of the standalone demo.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WeliiveConfig {
    /// Process-level settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Scripted conversation replay.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Chat pacing.
    #[serde(default)]
    pub chat: ChatConfig,

    /// Hot-lead detection.
    #[serde(default)]
    pub lead: LeadConfig,

    /// Live Q&A panel.
    #[serde(default)]
    pub qa: QaConfig,
}

impl WeliiveConfig {
    /// Defaults for a host page that embeds the widget: the simulation stays
    /// off until the visitor explicitly enters the live view.
    pub fn embedded() -> Self {
        let mut config = Self::default();
        config.simulation.enabled = false;
        config
    }
}

/// Process-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name, used in log lines.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "weliive".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Conversation simulator configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Whether the simulator may start. `true` standalone, `false` embedded.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Delay between `start()` and the beginning of the replay.
    #[serde(default = "default_startup_delay_ms")]
    pub startup_delay_ms: u64,

    /// Delay between two scripted messages.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl SimulationConfig {
    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            startup_delay_ms: default_startup_delay_ms(),
            interval_ms: default_interval_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_startup_delay_ms() -> u64 {
    3000
}

fn default_interval_ms() -> u64 {
    2000
}

/// Chat configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Delay before the automatic reply to a visitor message.
    #[serde(default = "default_auto_response_delay_ms")]
    pub auto_response_delay_ms: u64,
}

impl ChatConfig {
    pub fn auto_response_delay(&self) -> Duration {
        Duration::from_millis(self.auto_response_delay_ms)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            auto_response_delay_ms: default_auto_response_delay_ms(),
        }
    }
}

fn default_auto_response_delay_ms() -> u64 {
    1000
}

/// How the lead scorer turns keyword matches into a hot-lead decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadPolicy {
    /// One matching keyword is enough.
    #[default]
    AnyMatch,
    /// Legacy: match density must reach `min_confidence`.
    Density,
}

impl LeadPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadPolicy::AnyMatch => "any_match",
            LeadPolicy::Density => "density",
        }
    }
}

/// Hot-lead detection configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LeadConfig {
    #[serde(default)]
    pub policy: LeadPolicy,

    /// Threshold for the density policy, in [0, 1].
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// Intent keywords, matched as case-insensitive substrings.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

impl Default for LeadConfig {
    fn default() -> Self {
        Self {
            policy: LeadPolicy::default(),
            min_confidence: default_min_confidence(),
            keywords: default_keywords(),
        }
    }
}

fn default_min_confidence() -> f64 {
    0.5
}

/// The 13 purchase/rental intent keywords of the demo.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "prix",
    "acheter",
    "achat",
    "loyer",
    "montant",
    "disponible",
    "dispo",
    "visite",
    "visiter",
    "signer",
    "contrat",
    "réservation",
    "réserver",
];

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

/// How an automatic answer is picked among the candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSelection {
    #[default]
    RoundRobin,
    Random,
}

/// Live Q&A configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QaConfig {
    /// Delay before a submitted question is acknowledged.
    #[serde(default = "default_acknowledgment_delay_ms")]
    pub acknowledgment_delay_ms: u64,

    /// Delay before a submitted question is auto-answered, from submission.
    #[serde(default = "default_answer_delay_ms")]
    pub answer_delay_ms: u64,

    #[serde(default)]
    pub answer_selection: AnswerSelection,

    /// Seed the panel with the sample questions on startup.
    #[serde(default = "default_true")]
    pub seed_samples: bool,
}

impl QaConfig {
    pub fn acknowledgment_delay(&self) -> Duration {
        Duration::from_millis(self.acknowledgment_delay_ms)
    }

    pub fn answer_delay(&self) -> Duration {
        Duration::from_millis(self.answer_delay_ms)
    }
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            acknowledgment_delay_ms: default_acknowledgment_delay_ms(),
            answer_delay_ms: default_answer_delay_ms(),
            answer_selection: AnswerSelection::default(),
            seed_samples: true,
        }
    }
}

fn default_acknowledgment_delay_ms() -> u64 {
    300
}

fn default_answer_delay_ms() -> u64 {
    3000
}
