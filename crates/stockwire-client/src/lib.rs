// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Realtime client for the Stockwire notification subsystem.
//!
//! Owns exactly one broker connection and one channel subscription, kept in
//! sync with the authenticated session: login establishes the link, logout
//! (or a role/account change) tears it down before anything else can run,
//! and every failure is folded into the fan-out hub's connection status
//! instead of crossing the public boundary.

pub mod backoff;
pub mod client;
pub mod session;
pub mod state;

pub use backoff::ReconnectPolicy;
pub use client::RealtimeClient;
pub use session::SessionHandle;
pub use state::LinkState;
