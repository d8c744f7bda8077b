// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only message log with synchronous observer notification.
//!
//! `add_message` trims the text, scores user messages with the injected
//! [`LeadClassifier`], appends, and then calls every observer in
//! registration order before returning. Each observer runs behind its own
//! error boundary: an `Err` or a panic is logged and the next observer still
//! runs. Writers are serialized; an observer that calls back into
//! `add_message` on the same thread gets [`WeliiveError::Reentrant`].

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, ThreadId};

use chrono::Utc;
use tracing::{debug, info, warn};
use weliive_core::{LeadClassifier, Message, MessageId, MessageObserver, Sender, WeliiveError};

use crate::script::AUTO_RESPONSES;

/// Handle returned by [`MessageStore::on_message`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// The chat log of one live session.
pub struct MessageStore {
    classifier: Arc<dyn LeadClassifier>,
    messages: RwLock<Vec<Message>>,
    observers: RwLock<Vec<(ObserverId, Arc<dyn MessageObserver>)>>,
    next_observer_id: AtomicU64,
    /// Held for the whole append + notify sequence.
    write_lock: Mutex<()>,
    /// Thread currently running observers, if any.
    notifying: Mutex<Option<ThreadId>>,
    auto_response_cursor: AtomicUsize,
}

impl MessageStore {
    /// Create an empty store that scores user messages with `classifier`.
    pub fn new(classifier: Arc<dyn LeadClassifier>) -> Self {
        Self {
            classifier,
            messages: RwLock::new(Vec::new()),
            observers: RwLock::new(Vec::new()),
            next_observer_id: AtomicU64::new(1),
            write_lock: Mutex::new(()),
            notifying: Mutex::new(None),
            auto_response_cursor: AtomicUsize::new(0),
        }
    }

    /// Append a message and notify observers.
    ///
    /// Only `Sender::User` messages are scored; AI and system messages are
    /// never hot leads.
    pub fn add_message(&self, text: &str, sender: Sender) -> Result<Message, WeliiveError> {
        let current = thread::current().id();
        if *self.notifying.lock().unwrap_or_else(PoisonError::into_inner) == Some(current) {
            warn!(%sender, "add_message called from inside a message observer");
            return Err(WeliiveError::Reentrant);
        }

        let _write = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let text = text.trim().to_string();
        let is_hot_lead = sender == Sender::User && self.classifier.classify(&text);
        let message = Message {
            id: MessageId::generate(),
            text,
            sender,
            timestamp: Utc::now(),
            is_hot_lead,
        };

        self.messages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());

        if is_hot_lead {
            info!(id = %message.id, "hot lead detected");
        } else {
            debug!(id = %message.id, %sender, "message added");
        }

        self.notify(current, &message);
        Ok(message)
    }

    /// Deliver `message` to a snapshot of the observer list.
    fn notify(&self, current: ThreadId, message: &Message) {
        let observers = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if observers.is_empty() {
            return;
        }

        let _guard = NotifyGuard::enter(&self.notifying, current);
        for (id, observer) in observers {
            match catch_unwind(AssertUnwindSafe(|| observer.on_message(message))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!(observer = id.0, message_id = %message.id, error = %e, "message observer failed (non-fatal)");
                }
                Err(panic) => {
                    warn!(
                        observer = id.0,
                        message_id = %message.id,
                        panic = panic_message(panic.as_ref()),
                        "message observer panicked (non-fatal)"
                    );
                }
            }
        }
    }

    /// Register a callback for every future message.
    pub fn on_message<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(&Message) -> Result<(), WeliiveError> + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(callback))
    }

    /// Register a shared observer for every future message.
    pub fn subscribe(&self, observer: Arc<dyn MessageObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, observer));
        id
    }

    /// Unregister an observer. Returns `false` if it was not registered.
    ///
    /// An observer removed while a notification is in flight may still
    /// receive that one message.
    pub fn remove_observer(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(oid, _)| *oid != id);
        observers.len() != before
    }

    /// Snapshot of the log in insertion order.
    pub fn messages(&self) -> Vec<Message> {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_message(&self) -> Option<Message> {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn is_last_message_hot_lead(&self) -> bool {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .is_some_and(|m| m.is_hot_lead)
    }

    pub fn len(&self) -> usize {
        self.messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Post the next seller-side automatic reply (round-robin).
    pub fn generate_auto_response(&self) -> Result<Message, WeliiveError> {
        let idx = self.auto_response_cursor.fetch_add(1, Ordering::Relaxed) % AUTO_RESPONSES.len();
        self.add_message(AUTO_RESPONSES[idx], Sender::Ai)
    }

    pub fn classifier(&self) -> &Arc<dyn LeadClassifier> {
        &self.classifier
    }
}

/// Marks the current thread as notifying until dropped.
struct NotifyGuard<'a> {
    slot: &'a Mutex<Option<ThreadId>>,
}

impl<'a> NotifyGuard<'a> {
    fn enter(slot: &'a Mutex<Option<ThreadId>>, thread: ThreadId) -> Self {
        *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(thread);
        Self { slot }
    }
}

impl Drop for NotifyGuard<'_> {
    fn drop(&mut self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
