// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Link lifecycle states.

/// States of the broker link.
///
/// Driven only by session changes and process shutdown. `Error` persists
/// until the next session change rebuilds the link; `TornDown` is the
/// explicit cleanup state reached on logout, role/account change, or
/// shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// No connection exists.
    Idle,
    /// Connection created, handshake in flight.
    Connecting,
    /// Handshake succeeded; authorization and subscription in flight.
    Connected,
    /// Subscription acknowledged; event delivery active.
    Subscribed,
    /// Handshake, authorization, or subscription failed.
    Error,
    /// Handlers unbound, channel unsubscribed, socket closed.
    TornDown,
}

impl std::fmt::Display for LinkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkState::Idle => write!(f, "idle"),
            LinkState::Connecting => write!(f, "connecting"),
            LinkState::Connected => write!(f, "connected"),
            LinkState::Subscribed => write!(f, "subscribed"),
            LinkState::Error => write!(f, "error"),
            LinkState::TornDown => write!(f, "torn_down"),
        }
    }
}
