// SPDX-FileCopyrightText: 2026 Weliive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Forward-only lead status of a session.

use std::sync::{Mutex, PoisonError};

use tracing::info;
use weliive_core::LeadStatus;

#[derive(Debug, Default)]
pub struct LeadTracker {
    status: Mutex<LeadStatus>,
}

impl LeadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> LeadStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move to `to` if it is ahead of the current status. Returns whether
    /// the status changed.
    pub fn raise(&self, to: LeadStatus) -> bool {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        if to <= *status {
            return false;
        }
        info!(from = %*status, to = %to, "lead status raised");
        *status = to;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_only_moves_forward() {
        let t = LeadTracker::new();
        assert_eq!(t.status(), LeadStatus::None);
        assert!(t.raise(LeadStatus::Hot));
        assert!(!t.raise(LeadStatus::Potential));
        assert!(!t.raise(LeadStatus::Hot));
        assert_eq!(t.status(), LeadStatus::Hot);
        assert!(t.raise(LeadStatus::Converted));
        assert!(!t.raise(LeadStatus::None));
        assert_eq!(t.status(), LeadStatus::Converted);
    }
}
