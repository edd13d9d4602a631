// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Stockwire workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier of the authenticated account, as issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Socket identifier assigned by the broker during the connection handshake.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketId(pub String);

impl std::fmt::Display for SocketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a broker-side delivery scope. Clients subscribed to a channel
/// receive only events published to that scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl ChannelId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque signature returned by the authorization endpoint, passed back to
/// the broker to grant access to a private channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSignature(pub String);

/// The fixed set of warehouse roles. `Staff` is the per-account role: its
/// notification channel is scoped to one individual.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Role {
    Admin,
    Manager,
    Staff,
}

impl Role {
    /// Whether this role's channel is scoped per account rather than shared.
    pub fn is_per_account(&self) -> bool {
        matches!(self, Role::Staff)
    }
}

/// Read-only view of the authenticated session, owned outside this
/// subsystem and observed through a `watch` channel.
///
/// The role is kept as the backend's raw string: an unrecognized role is a
/// configuration error surfaced at channel resolution, not a parse panic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub account_id: Option<AccountId>,
    pub role: Option<String>,
    pub logged_in: bool,
    pub logging_out: bool,
}

impl SessionSnapshot {
    /// The client may hold a broker connection only while this is true.
    pub fn wants_connection(&self) -> bool {
        self.logged_in && !self.logging_out
    }
}

/// An event as delivered by the broker, before normalization. Ephemeral:
/// exists only for the duration of one dispatch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub name: String,
    pub channel: Option<String>,
    pub payload: serde_json::Value,
}

/// What a transport yields from its event loop: either an application event
/// or notice that the underlying connection was lost.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    Raw(RawEvent),
    Dropped(String),
}

/// Classification of an event name against the known tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    /// Matched a fixed name exactly.
    Fixed,
    /// Matched a known prefix followed by `-<entityId>`.
    Prefix,
    /// Matched neither table. Still delivered -- never lose an event.
    Unclassified,
}

/// A normalized notification, the unit published to the fan-out hub.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationEvent {
    /// The original event name, used as the display/classification key.
    pub event_type: String,
    pub category: EventCategory,
    /// Payload as delivered; shape depends on `event_type`.
    pub data: serde_json::Value,
    /// Capture time at the client, not the broker. Non-decreasing within a
    /// client session.
    pub received_at: DateTime<Utc>,
}

/// Consumer-visible connection state. Mutated only by the realtime client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connected,
    Error(String),
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }

    /// The human-readable error message, if the status is an error.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            ConnectionStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }
}
