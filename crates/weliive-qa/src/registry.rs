// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered store of Q&A items.
//!
//! Items move `pending -> acknowledged -> answered`, or straight from
//! `pending` to `answered`. Unknown ids are not errors: id-keyed operations
//! return `false` or `None`. Every change is published on a broadcast
//! channel; having no subscriber is fine.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use weliive_config::model::{AnswerSelection, QaConfig};
use weliive_core::{QaId, QaItem, QaStatus};

use crate::responses::{AnswerPicker, SAMPLE_QA};

const EVENT_CAPACITY: usize = 64;

/// Change notification for the Q&A panel. Carries the item after the change.
#[derive(Debug, Clone, PartialEq)]
pub enum QaEvent {
    Added(QaItem),
    Acknowledged(QaItem),
    Answered(QaItem),
}

impl QaEvent {
    pub fn item(&self) -> &QaItem {
        match self {
            QaEvent::Added(item) | QaEvent::Acknowledged(item) | QaEvent::Answered(item) => item,
        }
    }
}

pub struct QaRegistry {
    items: RwLock<Vec<QaItem>>,
    picker: AnswerPicker,
    events: broadcast::Sender<QaEvent>,
}

impl QaRegistry {
    /// Empty registry with round-robin auto answers.
    pub fn new() -> Self {
        Self::with_selection(AnswerSelection::default())
    }

    pub fn with_selection(selection: AnswerSelection) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            items: RwLock::new(Vec::new()),
            picker: AnswerPicker::new(selection),
            events,
        }
    }

    /// Registry seeded with the three answered sample questions.
    pub fn with_sample_data() -> Self {
        let registry = Self::new();
        registry.seed_samples();
        registry
    }

    /// Build from the `[qa]` config section, seeding samples if enabled.
    pub fn from_config(config: &QaConfig) -> Self {
        let registry = Self::with_selection(config.answer_selection);
        if config.seed_samples {
            registry.seed_samples();
        }
        registry
    }

    fn seed_samples(&self) {
        for (question, answer) in SAMPLE_QA {
            self.add_qa(question, answer);
        }
    }

    /// Add an unanswered question.
    pub fn add_question(&self, question: &str) -> QaItem {
        self.insert(question, None)
    }

    /// Add a question together with its answer. A blank answer yields a
    /// pending item.
    pub fn add_qa(&self, question: &str, answer: &str) -> QaItem {
        let answer = answer.trim();
        if answer.is_empty() {
            warn!("blank answer in add_qa, item stays pending");
            return self.insert(question, None);
        }
        self.insert(question, Some(answer.to_string()))
    }

    fn insert(&self, question: &str, answer: Option<String>) -> QaItem {
        let status = if answer.is_some() {
            QaStatus::Answered
        } else {
            QaStatus::Pending
        };
        let item = QaItem {
            id: QaId::generate(),
            question: question.trim().to_string(),
            answer,
            acknowledgment: None,
            timestamp: Utc::now(),
            status,
        };
        self.write().push(item.clone());
        debug!(id = %item.id, %status, "qa item added");
        self.publish(QaEvent::Added(item.clone()));
        item
    }

    /// Attach an interim acknowledgment. An already answered item keeps its
    /// answer and status; only the acknowledgment text changes.
    pub fn add_acknowledgment(&self, id: &QaId, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let updated = self.update(id, |item| {
            item.acknowledgment = Some(text.to_string());
            if item.status != QaStatus::Answered {
                item.status = QaStatus::Acknowledged;
            }
        });
        match updated {
            Some(item) => {
                debug!(%id, status = %item.status, "qa item acknowledged");
                self.publish(QaEvent::Acknowledged(item));
                true
            }
            None => false,
        }
    }

    /// Attach an answer and mark the item answered.
    pub fn add_answer(&self, id: &QaId, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        let updated = self.update(id, |item| {
            item.answer = Some(text.to_string());
            item.status = QaStatus::Answered;
        });
        match updated {
            Some(item) => {
                debug!(%id, "qa item answered");
                self.publish(QaEvent::Answered(item));
                true
            }
            None => false,
        }
    }

    /// Answer `id` with one of the canned answers and return the text used.
    pub fn generate_auto_answer(&self, id: &QaId) -> Option<String> {
        if self.get(id).is_none() {
            return None;
        }
        let answer = self.picker.pick();
        self.add_answer(id, answer).then(|| answer.to_string())
    }

    /// Snapshot of all items in insertion order.
    pub fn all(&self) -> Vec<QaItem> {
        self.read().clone()
    }

    pub fn get(&self, id: &QaId) -> Option<QaItem> {
        self.read().iter().find(|item| &item.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Receive every future change.
    pub fn subscribe(&self) -> broadcast::Receiver<QaEvent> {
        self.events.subscribe()
    }

    fn update(&self, id: &QaId, apply: impl FnOnce(&mut QaItem)) -> Option<QaItem> {
        let mut items = self.write();
        let item = items.iter_mut().find(|item| &item.id == id)?;
        apply(item);
        Some(item.clone())
    }

    fn publish(&self, event: QaEvent) {
        // Err only means nobody is listening.
        let _ = self.events.send(event);
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<QaItem>> {
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<QaItem>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for QaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
