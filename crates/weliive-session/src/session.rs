// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The live-visit session controller.
//!
//! A [`LiveSession`] owns everything one visitor interacts with: the lead
//! scorer, the chat log, the scripted simulator, and the Q&A panel. It is
//! built explicitly from a [`WeliiveConfig`] and passed to whoever drives it.
//!
//! Delayed work (automatic replies, Q&A progression, the simulator's replay)
//! runs on a shared [`TaskTracker`] and stops when the session's
//! [`CancellationToken`] fires or the simulator is stopped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};
use weliive_chat::script::{default_script, GREETING, HOT_LEAD_HANDLED, OFFER_SENT};
use weliive_chat::{ConversationSimulator, MessageStore};
use weliive_config::validation::validate_config;
use weliive_config::WeliiveConfig;
use weliive_core::{LeadClassifier, LeadStatus, Message, QaItem, Sender, WeliiveError};
use weliive_lead::KeywordScorer;
use weliive_qa::{QaProgression, QaRegistry};

use crate::lead::LeadTracker;

/// Which screen the visitor is on. Only entering and leaving the live view
/// affect the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveView {
    Launcher,
    Live,
}

impl std::fmt::Display for LiveView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiveView::Launcher => write!(f, "launcher"),
            LiveView::Live => write!(f, "live"),
        }
    }
}

pub struct LiveSession {
    config: WeliiveConfig,
    scorer: Arc<KeywordScorer>,
    store: Arc<MessageStore>,
    simulator: ConversationSimulator,
    qa: Arc<QaRegistry>,
    progression: QaProgression,
    lead: Arc<LeadTracker>,
    view: Mutex<LiveView>,
    greeted: AtomicBool,
    tracker: TaskTracker,
    cancel: CancellationToken,
}

impl LiveSession {
    /// Build a session. Fails with [`WeliiveError::Config`] if `config` does
    /// not validate.
    pub fn new(config: WeliiveConfig) -> Result<Self, WeliiveError> {
        if let Err(errors) = validate_config(&config) {
            let joined = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(WeliiveError::Config(joined));
        }

        let scorer = Arc::new(KeywordScorer::from_config(&config.lead)?);
        let store = Arc::new(MessageStore::new(scorer.clone()));
        let qa = Arc::new(QaRegistry::from_config(&config.qa));

        let tracker = TaskTracker::new();
        let simulator = ConversationSimulator::with_tracker(
            store.clone(),
            default_script(),
            &config.simulation,
            tracker.clone(),
        );
        let cancel = CancellationToken::new();
        let progression = QaProgression::with_tracker(
            qa.clone(),
            &config.qa,
            tracker.clone(),
            cancel.child_token(),
        );

        let lead = Arc::new(LeadTracker::new());
        {
            let lead = lead.clone();
            let scorer = scorer.clone();
            store.on_message(move |message: &Message| {
                if message.sender == Sender::User {
                    let status = if message.is_hot_lead {
                        LeadStatus::Hot
                    } else {
                        scorer.assess(&message.text).status
                    };
                    lead.raise(status);
                }
                Ok(())
            });
        }

        info!(
            name = %config.app.name,
            simulation = config.simulation.enabled,
            policy = config.lead.policy.as_str(),
            "live session created"
        );

        Ok(Self {
            config,
            scorer,
            store,
            simulator,
            qa,
            progression,
            lead,
            view: Mutex::new(LiveView::Launcher),
            greeted: AtomicBool::new(false),
            tracker,
            cancel,
        })
    }

    /// Open the live view. The first entry posts the greeting into an empty
    /// chat; every entry (re)starts the simulation.
    pub fn enter_live(&self) -> Result<(), WeliiveError> {
        self.set_view(LiveView::Live);
        if !self.greeted.swap(true, Ordering::SeqCst) && self.store.is_empty() {
            self.store.add_message(GREETING, Sender::Ai)?;
        }
        self.simulator.set_enabled(true);
        Ok(())
    }

    /// Leave the live view and stop the simulation.
    pub fn leave_live(&self) {
        self.set_view(LiveView::Launcher);
        self.simulator.stop();
    }

    /// Post a visitor message.
    ///
    /// Blank input is ignored. Otherwise the simulation stops (the visitor
    /// took over), the message is stored and scored, and an automatic reply
    /// is scheduled.
    pub fn send_message(&self, text: &str) -> Result<Option<Message>, WeliiveError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        self.simulator.stop();
        let message = self.store.add_message(text, Sender::User)?;
        self.schedule_auto_response();
        Ok(Some(message))
    }

    fn schedule_auto_response(&self) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, "no tokio runtime, automatic reply skipped");
                return;
            }
        };
        let store = self.store.clone();
        let cancel = self.cancel.clone();
        let delay = self.config.chat.auto_response_delay();
        self.tracker.spawn_on(
            async move {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {}
                    _ = tokio::time::sleep(delay) => {
                        if let Err(e) = store.generate_auto_response() {
                            warn!(error = %e, "automatic reply failed");
                        }
                    }
                }
            },
            &handle,
        );
    }

    /// The seller handled the hot-lead alert.
    pub fn acknowledge_hot_lead(&self) -> Result<Message, WeliiveError> {
        self.store.add_message(HOT_LEAD_HANDLED, Sender::Ai)
    }

    /// The visitor sent an offer. Marks the lead converted.
    pub fn submit_offer(&self) -> Result<Message, WeliiveError> {
        let message = self.store.add_message(OFFER_SENT, Sender::System)?;
        self.lead.raise(LeadStatus::Converted);
        Ok(message)
    }

    /// Ask a question in the Q&A panel and schedule its acknowledgment and
    /// answer. Blank questions are ignored.
    pub fn submit_question(&self, text: &str) -> Option<QaItem> {
        if text.trim().is_empty() {
            return None;
        }
        let item = self.qa.add_question(text);
        if !self.progression.schedule(item.id.clone()) {
            debug!(id = %item.id, "question stored without progression");
        }
        Some(item)
    }

    pub fn lead_status(&self) -> LeadStatus {
        self.lead.status()
    }

    pub fn view(&self) -> LiveView {
        *self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_view(&self, view: LiveView) {
        let mut current = self.view.lock().unwrap_or_else(PoisonError::into_inner);
        if *current != view {
            debug!(from = %*current, to = %view, "view changed");
            *current = view;
        }
    }

    pub fn config(&self) -> &WeliiveConfig {
        &self.config
    }

    pub fn scorer(&self) -> &Arc<KeywordScorer> {
        &self.scorer
    }

    pub fn store(&self) -> &Arc<MessageStore> {
        &self.store
    }

    pub fn simulator(&self) -> &ConversationSimulator {
        &self.simulator
    }

    pub fn qa(&self) -> &Arc<QaRegistry> {
        &self.qa
    }

    /// Cancel pending replies and Q&A progression, stop the simulator, and
    /// wait for every tracked task, the replay tick in flight included.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        self.simulator.stop();
        self.tracker.close();
        self.tracker.wait().await;
        info!(
            messages = self.store.len(),
            questions = self.qa.len(),
            lead = %self.lead_status(),
            "live session shut down"
        );
    }
}

impl Drop for LiveSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
