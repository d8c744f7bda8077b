// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Weliive integration tests.
//!
//! # Components
//!
//! - [`RecordingObserver`] - captures every message delivered by a store
//! - [`FailingObserver`] - always returns an error, counting its calls
//! - [`TestHarness`] - a [`LiveSession`](weliive_session::LiveSession) with a
//!   recorder and a Q&A event receiver attached

pub mod harness;
pub mod observers;

pub use harness::{fast_config, TestHarness, TestHarnessBuilder};
pub use observers::{FailingObserver, RecordingObserver};
