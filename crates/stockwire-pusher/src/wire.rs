// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Broker wire frames.
//!
//! Every message on the socket is a JSON object with `event`, an optional
//! `channel`, and an optional `data` field. The broker reserves the
//! `pusher:` and `pusher_internal:` event prefixes for its own connection
//! lifecycle; those frames are handled inside the transport and never reach
//! consumers.

use serde::{Deserialize, Serialize};

use stockwire_core::types::{AuthSignature, ChannelId};
use stockwire_core::StockwireError;

pub const EVENT_CONNECTION_ESTABLISHED: &str = "pusher:connection_established";
pub const EVENT_SUBSCRIBE: &str = "pusher:subscribe";
pub const EVENT_UNSUBSCRIBE: &str = "pusher:unsubscribe";
pub const EVENT_SUBSCRIPTION_SUCCEEDED: &str = "pusher_internal:subscription_succeeded";
pub const EVENT_ERROR: &str = "pusher:error";
pub const EVENT_PING: &str = "pusher:ping";
pub const EVENT_PONG: &str = "pusher:pong";

/// Event name prefixes reserved for the broker's own lifecycle traffic.
pub const SYSTEM_PREFIXES: [&str; 2] = ["pusher:", "pusher_internal:"];

/// Whether an event name belongs to the broker's reserved namespace.
pub fn is_system_event(name: &str) -> bool {
    SYSTEM_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// One frame on the broker socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Frame {
    pub fn parse(text: &str) -> Result<Self, StockwireError> {
        serde_json::from_str(text)
            .map_err(|e| StockwireError::Protocol(format!("malformed broker frame: {e}")))
    }

    pub fn to_json(&self) -> String {
        // Frames contain only Strings and Values; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// The private-channel subscribe frame.
    pub fn subscribe(channel: &ChannelId, auth: &AuthSignature) -> Self {
        Self {
            event: EVENT_SUBSCRIBE.to_string(),
            channel: None,
            data: Some(serde_json::json!({
                "channel": channel.as_str(),
                "auth": auth.0,
            })),
        }
    }

    pub fn unsubscribe(channel: &ChannelId) -> Self {
        Self {
            event: EVENT_UNSUBSCRIBE.to_string(),
            channel: None,
            data: Some(serde_json::json!({ "channel": channel.as_str() })),
        }
    }

    pub fn pong() -> Self {
        Self {
            event: EVENT_PONG.to_string(),
            channel: None,
            data: None,
        }
    }

    pub fn is_system(&self) -> bool {
        is_system_event(&self.event)
    }

    /// The frame payload as structured JSON.
    ///
    /// The broker double-encodes event payloads: `data` usually arrives as a
    /// JSON-encoded string. Unwrap it when it parses; otherwise keep the
    /// value as delivered (fail open -- consumers still see something).
    pub fn decoded_data(&self) -> serde_json::Value {
        match &self.data {
            None => serde_json::Value::Null,
            Some(serde_json::Value::String(inner)) => serde_json::from_str(inner)
                .unwrap_or_else(|_| serde_json::Value::String(inner.clone())),
            Some(value) => value.clone(),
        }
    }

    /// Human-readable message out of a broker error frame.
    pub fn error_message(&self) -> String {
        self.decoded_data()
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("broker error frame: {}", self.to_json()))
    }
}

/// Payload of the broker's connection handshake event.
#[derive(Debug, Deserialize)]
pub struct ConnectionEstablished {
    pub socket_id: String,
    #[serde(default)]
    pub activity_timeout: Option<u64>,
}
