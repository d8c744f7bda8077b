// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Weliive engine.
//!
//! Lookups by id never fail: they report absence with `false` or `None`.
//! The variants below cover everything else.

use thiserror::Error;

/// The primary error type used across the Weliive crates.
#[derive(Debug, Error)]
pub enum WeliiveError {
    /// A setter or constructor received a value outside its valid domain.
    #[error("invalid argument `{name}` = {value}: {reason}")]
    InvalidArgument {
        name: String,
        value: String,
        reason: String,
    },

    /// A message observer failed while handling a notification.
    #[error("observer error: {0}")]
    Observer(String),

    /// `add_message` was invoked from inside one of its own notifications.
    #[error("message store re-entered from an observer")]
    Reentrant,

    /// Configuration errors (invalid TOML, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl WeliiveError {
    /// Shorthand for an [`WeliiveError::InvalidArgument`].
    pub fn invalid_argument(
        name: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        WeliiveError::InvalidArgument {
            name: name.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}
