// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message observers for assertions in tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use weliive_core::{Message, MessageObserver, Sender, WeliiveError};

/// Captures every delivered message.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    messages: Mutex<Vec<Message>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages received so far, in delivery order.
    pub fn messages(&self) -> Vec<Message> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.messages().into_iter().map(|m| m.text).collect()
    }

    /// Messages from one sender.
    pub fn from_sender(&self, sender: Sender) -> Vec<Message> {
        self.messages()
            .into_iter()
            .filter(|m| m.sender == sender)
            .collect()
    }

    pub fn hot_leads(&self) -> usize {
        self.messages().iter().filter(|m| m.is_hot_lead).count()
    }

    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl MessageObserver for RecordingObserver {
    fn on_message(&self, message: &Message) -> Result<(), WeliiveError> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());
        Ok(())
    }
}

/// Always fails with [`WeliiveError::Observer`].
#[derive(Debug, Default)]
pub struct FailingObserver {
    calls: AtomicUsize,
}

impl FailingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MessageObserver for FailingObserver {
    fn on_message(&self, message: &Message) -> Result<(), WeliiveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(WeliiveError::Observer(format!(
            "render failed for {}",
            message.id
        )))
    }
}
