// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat stream for the Weliive live view.
//!
//! This crate provides:
//! - [`MessageStore`]: append-only message log with synchronous observers
//! - [`ConversationSimulator`]: timer-driven replay of a scripted conversation
//! - [`script`]: the default buyer script and automatic reply texts

pub mod script;
pub mod simulator;
pub mod store;

pub use script::ScriptedMessage;
pub use simulator::{ConversationSimulator, SimulatorState};
pub use store::{MessageStore, ObserverId};
