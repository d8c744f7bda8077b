// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end session tests.
//!
//! `TestHarness` builds a [`LiveSession`] and attaches a
//! [`RecordingObserver`] to its store and a receiver to its Q&A events, so
//! tests can drive the session and assert on everything it produced.

use std::sync::Arc;

use tokio::sync::broadcast;
use weliive_config::WeliiveConfig;
use weliive_core::WeliiveError;
use weliive_qa::QaEvent;
use weliive_session::LiveSession;

use crate::observers::RecordingObserver;

/// Short delays so paused-time tests stay readable: simulation starts after
/// 100 ms and posts every 50 ms, replies come after 10 ms, Q&A items are
/// acknowledged at 5 ms and answered at 20 ms.
pub fn fast_config() -> WeliiveConfig {
    let mut config = WeliiveConfig::default();
    config.simulation.startup_delay_ms = 100;
    config.simulation.interval_ms = 50;
    config.chat.auto_response_delay_ms = 10;
    config.qa.acknowledgment_delay_ms = 5;
    config.qa.answer_delay_ms = 20;
    config
}

/// Builder for [`TestHarness`].
pub struct TestHarnessBuilder {
    config: WeliiveConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            config: fast_config(),
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: WeliiveConfig) -> Self {
        self.config = config;
        self
    }

    /// Start with the simulation disabled, as an embedding host would.
    pub fn without_simulation(mut self) -> Self {
        self.config.simulation.enabled = false;
        self
    }

    /// Start with an empty Q&A panel.
    pub fn without_samples(mut self) -> Self {
        self.config.qa.seed_samples = false;
        self
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.config.lead.keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn build(self) -> Result<TestHarness, WeliiveError> {
        let session = LiveSession::new(self.config)?;
        let recorder = Arc::new(RecordingObserver::new());
        session.store().subscribe(recorder.clone());
        let qa_events = session.qa().subscribe();
        Ok(TestHarness {
            session,
            recorder,
            qa_events,
        })
    }
}

/// A session plus the probes attached to it.
pub struct TestHarness {
    pub session: LiveSession,
    /// Every message the store delivered since the harness was built.
    pub recorder: Arc<RecordingObserver>,
    /// Q&A changes since the harness was built.
    pub qa_events: broadcast::Receiver<QaEvent>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Harness with [`fast_config`].
    pub fn new() -> Result<Self, WeliiveError> {
        Self::builder().build()
    }

    /// Drain the Q&A events received so far.
    pub fn drain_qa_events(&mut self) -> Vec<QaEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.qa_events.try_recv() {
            events.push(event);
        }
        events
    }

    pub async fn shutdown(&self) {
        self.session.shutdown().await;
    }
}
