// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel authorization trait: the backend vouches for the local session.

use async_trait::async_trait;

use crate::error::StockwireError;
use crate::types::{AuthSignature, ChannelId, SocketId};

/// Exchanges a socket id and channel name for an auth signature the broker
/// accepts on private-channel subscription.
///
/// One attempt per session-change event: the caller must not retry a failed
/// authorization until the session changes again.
#[async_trait]
pub trait ChannelAuthorizer: Send + Sync + 'static {
    async fn authorize(
        &self,
        socket_id: &SocketId,
        channel: &ChannelId,
    ) -> Result<AuthSignature, StockwireError>;
}
