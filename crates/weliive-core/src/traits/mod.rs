// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the engine components.

pub mod classifier;
pub mod observer;

pub use classifier::LeadClassifier;
pub use observer::MessageObserver;
