// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Timed progression of submitted questions.
//!
//! Each scheduled question gets one task: acknowledge after the
//! acknowledgment delay, then auto-answer once the answer delay (counted from
//! scheduling) has elapsed. A question the seller already answered keeps that
//! answer. All tasks share one [`CancellationToken`].

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};
use weliive_config::model::QaConfig;
use weliive_core::{QaId, QaStatus};

use crate::registry::QaRegistry;
use crate::responses::ACKNOWLEDGMENT;

pub struct QaProgression {
    registry: Arc<QaRegistry>,
    acknowledgment_delay: Duration,
    answer_delay: Duration,
    tracker: TaskTracker,
    cancel: CancellationToken,
}

impl QaProgression {
    pub fn new(registry: Arc<QaRegistry>, config: &QaConfig) -> Self {
        Self::with_tracker(registry, config, TaskTracker::new(), CancellationToken::new())
    }

    /// Run progression tasks on a caller-owned tracker and token, so they are
    /// cancelled and awaited together with the caller's other tasks.
    pub fn with_tracker(
        registry: Arc<QaRegistry>,
        config: &QaConfig,
        tracker: TaskTracker,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            registry,
            acknowledgment_delay: config.acknowledgment_delay(),
            answer_delay: config.answer_delay(),
            tracker,
            cancel,
        }
    }

    /// Schedule acknowledgment and auto-answer for `id`.
    ///
    /// Returns `false` when no tokio runtime is available or progression was
    /// cancelled.
    pub fn schedule(&self, id: QaId) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(%id, error = %e, "no tokio runtime, qa progression skipped");
                return false;
            }
        };

        let start = Instant::now();
        let ack_at = start + self.acknowledgment_delay;
        let answer_at = start + self.answer_delay;
        let registry = self.registry.clone();
        let cancel = self.cancel.clone();

        debug!(%id, "qa progression scheduled");
        self.tracker.spawn_on(
            async move {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return,
                    _ = sleep_until(ack_at) => {}
                }
                if !registry.add_acknowledgment(&id, ACKNOWLEDGMENT) {
                    debug!(%id, "qa item vanished before acknowledgment");
                    return;
                }

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return,
                    _ = sleep_until(answer_at) => {}
                }
                let answered = registry
                    .get(&id)
                    .is_some_and(|item| item.status == QaStatus::Answered);
                if answered {
                    debug!(%id, "qa item answered manually, auto-answer skipped");
                    return;
                }
                if registry.generate_auto_answer(&id).is_some() {
                    debug!(%id, "qa item auto-answered");
                }
            },
            &handle,
        );
        true
    }

    /// Progression tasks still waiting.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Cancel every scheduled progression. Items keep their current state.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Cancel and wait for all progression tasks to finish.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        self.tracker.close();
        self.tracker.wait().await;
    }
}
