// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Live Q&A panel for Weliive.
//!
//! - [`QaRegistry`]: ordered Q&A items with a pending/acknowledged/answered
//!   lifecycle and broadcast change events
//! - [`QaProgression`]: timed acknowledgment and auto-answer of submitted
//!   questions
//! - [`responses`]: canned acknowledgment, answers, and sample data

pub mod progression;
pub mod registry;
pub mod responses;

pub use progression::QaProgression;
pub use registry::{QaEvent, QaRegistry};
pub use responses::{AnswerPicker, ACKNOWLEDGMENT, AUTO_ANSWERS};
