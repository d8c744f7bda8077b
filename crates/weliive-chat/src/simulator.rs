// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted conversation replay.
//!
//! The simulator stands in for a live counterpart: after a startup delay it
//! posts one scripted message per interval into the [`MessageStore`],
//! cycling through the script forever. States go
//! Idle -> Scheduled -> Running -> Idle. There is at most one replay task per
//! simulator; `stop()` cancels it through its [`CancellationToken`].
//! Replay tasks run on a [`TaskTracker`] so an owner can wait for the tick in
//! flight after stopping.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};
use weliive_config::model::SimulationConfig;

use crate::script::ScriptedMessage;
use crate::store::MessageStore;

/// Lifecycle of the replay task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorState {
    /// No replay task.
    Idle,
    /// Task spawned, waiting out the startup delay.
    Scheduled,
    /// Posting one message per interval.
    Running,
}

impl std::fmt::Display for SimulatorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorState::Idle => write!(f, "idle"),
            SimulatorState::Scheduled => write!(f, "scheduled"),
            SimulatorState::Running => write!(f, "running"),
        }
    }
}

struct Control {
    state: SimulatorState,
    enabled: bool,
    /// Token of the in-flight replay task, if any.
    cancel: Option<CancellationToken>,
}

struct Shared {
    store: Arc<MessageStore>,
    script: Vec<ScriptedMessage>,
    startup_delay: Duration,
    interval: Duration,
    control: Mutex<Control>,
    /// Next script index. Survives stop/start.
    cursor: AtomicUsize,
    emitted: AtomicU64,
    tracker: TaskTracker,
}

impl Shared {
    fn control(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move to `Running` unless `token` was cancelled meanwhile.
    fn mark_running(&self, token: &CancellationToken) -> bool {
        let mut control = self.control();
        if token.is_cancelled() {
            return false;
        }
        control.state = SimulatorState::Running;
        true
    }

    fn emit_next(&self) {
        let len = self.script.len();
        let idx = match self
            .cursor
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |c| Some((c + 1) % len))
        {
            Ok(prev) | Err(prev) => prev % len,
        };
        let entry = &self.script[idx];
        match self.store.add_message(&entry.text, entry.sender) {
            Ok(_) => {
                self.emitted.fetch_add(1, Ordering::Relaxed);
                debug!(index = idx, "scripted message emitted");
            }
            Err(e) => warn!(index = idx, error = %e, "scripted message rejected"),
        }
    }
}

/// Timer-driven producer of scripted messages.
pub struct ConversationSimulator {
    shared: Arc<Shared>,
}

impl ConversationSimulator {
    pub fn new(
        store: Arc<MessageStore>,
        script: Vec<ScriptedMessage>,
        config: &SimulationConfig,
    ) -> Self {
        Self::with_tracker(store, script, config, TaskTracker::new())
    }

    /// Like [`new`](Self::new), spawning replay tasks on `tracker`.
    pub fn with_tracker(
        store: Arc<MessageStore>,
        script: Vec<ScriptedMessage>,
        config: &SimulationConfig,
        tracker: TaskTracker,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                store,
                script,
                startup_delay: config.startup_delay(),
                interval: config.interval(),
                control: Mutex::new(Control {
                    state: SimulatorState::Idle,
                    enabled: config.enabled,
                    cancel: None,
                }),
                cursor: AtomicUsize::new(0),
                emitted: AtomicU64::new(0),
                tracker,
            }),
        }
    }

    /// Schedule the replay. No-op when disabled, already scheduled or
    /// running, when the script is empty or the interval is zero, or outside
    /// a tokio runtime.
    pub fn start(&self) {
        let mut control = self.shared.control();
        if !control.enabled {
            debug!("simulation disabled, start ignored");
            return;
        }
        if control.state != SimulatorState::Idle {
            return;
        }
        if self.shared.script.is_empty() {
            warn!("simulation script is empty, nothing to replay");
            return;
        }
        if self.shared.interval.is_zero() {
            warn!("simulation interval is zero, replay not started");
            return;
        }
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, "no tokio runtime, simulation not started");
                return;
            }
        };

        let token = CancellationToken::new();
        control.state = SimulatorState::Scheduled;
        control.cancel = Some(token.clone());
        drop(control);

        info!(
            startup_delay_ms = self.shared.startup_delay.as_millis() as u64,
            interval_ms = self.shared.interval.as_millis() as u64,
            "simulation scheduled"
        );
        self.shared
            .tracker
            .spawn_on(replay(self.shared.clone(), token), &handle);
    }

    /// Cancel any pending or running replay and return to `Idle`.
    pub fn stop(&self) {
        let mut control = self.shared.control();
        if let Some(token) = control.cancel.take() {
            token.cancel();
            info!(emitted = self.emitted(), "simulation stopped");
        }
        control.state = SimulatorState::Idle;
    }

    /// `false` forces a stop; `true` triggers a start.
    pub fn set_enabled(&self, enabled: bool) {
        self.shared.control().enabled = enabled;
        if enabled {
            self.start();
        } else {
            self.stop();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.control().enabled
    }

    pub fn state(&self) -> SimulatorState {
        self.shared.control().state
    }

    /// Scripted messages successfully posted by this simulator.
    pub fn emitted(&self) -> u64 {
        self.shared.emitted.load(Ordering::Relaxed)
    }
}

impl Drop for ConversationSimulator {
    fn drop(&mut self) {
        if let Some(token) = self.shared.control().cancel.take() {
            token.cancel();
        }
    }
}

async fn replay(shared: Arc<Shared>, token: CancellationToken) {
    tokio::select! {
        biased;
        _ = token.cancelled() => return,
        _ = tokio::time::sleep(shared.startup_delay) => {}
    }

    if !shared.mark_running(&token) {
        return;
    }
    debug!("simulation running");

    let mut ticker = interval_at(Instant::now() + shared.interval, shared.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => shared.emit_next(),
        }
    }
}
