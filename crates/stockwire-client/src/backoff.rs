// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reconnection policy.
//!
//! Transport-level failures get a bounded number of full re-establish
//! attempts (a reconnect yields a new socket id, so authorization must be
//! redone) with exponential delays. Authorization and configuration
//! failures never retry; the next opportunity is the next session change.

use std::time::Duration;

/// Bounded exponential backoff for rebuilding a dropped link.
#[derive(Debug, Clone)]
pub struct ReconnectPolicy {
    /// Attempts after the initial failure before parking in error.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles each attempt.
    pub base_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl ReconnectPolicy {
    /// Delay before retry number `attempt` (counting from 1).
    pub fn delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let factor = 1u32 << exponent;
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}
