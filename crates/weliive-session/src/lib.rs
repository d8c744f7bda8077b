// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session controller for the Weliive live view.
//!
//! [`LiveSession`] wires the lead scorer, message store, conversation
//! simulator, and Q&A panel of one visitor together and decides when the
//! simulation runs.

pub mod lead;
pub mod session;

pub use lead::LeadTracker;
pub use session::{LiveSession, LiveView};
