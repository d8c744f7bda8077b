// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message observer trait.

use crate::error::WeliiveError;
use crate::types::Message;

/// Receives every message appended to a message store.
///
/// Called synchronously, in registration order, before `add_message`
/// returns. Errors are logged by the store and never propagated.
pub trait MessageObserver: Send + Sync {
    fn on_message(&self, message: &Message) -> Result<(), WeliiveError>;
}

impl<F> MessageObserver for F
where
    F: Fn(&Message) -> Result<(), WeliiveError> + Send + Sync,
{
    fn on_message(&self, message: &Message) -> Result<(), WeliiveError> {
        self(message)
    }
}
