// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pusher-protocol adapter for the Stockwire notification subsystem.
//!
//! Implements the two seams the realtime client needs against a live
//! broker: [`PusherTransport`] (one WebSocket connection speaking the
//! broker wire protocol) and [`HttpChannelAuthorizer`] (the backend token
//! exchange that grants private-channel access).

pub mod auth;
pub mod transport;
pub mod wire;

pub use auth::HttpChannelAuthorizer;
pub use transport::{BrokerEndpoint, PusherTransport};
