// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fan-out store for normalized notifications.
//!
//! One mutable slot holds the most recently normalized event plus the
//! current connection status. Any number of consumers observe the slot;
//! publishing replaces the previous value. Not a queue, not a history:
//! consumers re-fetch authoritative state from the backend and use the live
//! event only as a "something changed, refresh now" signal.

pub mod hub;

pub use hub::{NotificationFeed, NotificationHub};
