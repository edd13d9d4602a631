// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Broker transport trait: the single connection and channel subscription.

use async_trait::async_trait;

use crate::error::StockwireError;
use crate::types::{AuthSignature, ChannelId, SocketId, TransportEvent};

/// One connection to the pub/sub broker.
///
/// The realtime client is the exclusive owner of the transport; no other
/// component may create a second connection. Implementations keep the
/// broker's own lifecycle traffic (handshake, heartbeat, reserved system
/// events) internal -- `next_event` yields application events only.
#[async_trait]
pub trait BrokerTransport: Send + Sync + 'static {
    /// Establishes the connection and completes the broker handshake.
    ///
    /// Returns the socket id the broker assigned, which the authorization
    /// exchange needs. Reconnecting yields a fresh socket id, so any prior
    /// auth signature is invalid after a reconnect.
    async fn connect(&mut self) -> Result<SocketId, StockwireError>;

    /// Subscribes to a private channel using a backend-issued signature.
    ///
    /// Resolves once the broker acknowledges the subscription; events for
    /// the channel flow only after that.
    async fn subscribe(
        &mut self,
        channel: &ChannelId,
        auth: &AuthSignature,
    ) -> Result<(), StockwireError>;

    /// Waits for the next application event or a connection drop.
    async fn next_event(&mut self) -> Result<TransportEvent, StockwireError>;

    /// Unsubscribes from the channel. Best-effort; safe when not subscribed.
    async fn unsubscribe(&mut self, channel: &ChannelId) -> Result<(), StockwireError>;

    /// Closes the connection. Idempotent; safe on a never-connected transport.
    async fn disconnect(&mut self);
}
