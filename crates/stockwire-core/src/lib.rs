// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Stockwire notification subsystem.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Stockwire workspace. The realtime client
//! is generic over the traits defined here, so broker transports and channel
//! authorizers can be swapped for mocks in tests.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::StockwireError;
pub use types::{
    AccountId, AuthSignature, ChannelId, ConnectionStatus, EventCategory, NotificationEvent,
    RawEvent, Role, SessionSnapshot, SocketId, TransportEvent,
};

pub use traits::{BrokerTransport, ChannelAuthorizer};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn stockwire_error_has_all_variants() {
        // Verify all 6 error variants exist and can be constructed.
        let _config = StockwireError::Config("test".into());
        let _transport = StockwireError::Transport {
            message: "test".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let _auth = StockwireError::Authorization {
            message: "test".into(),
            source: None,
        };
        let _protocol = StockwireError::Protocol("test".into());
        let _unresolved = StockwireError::ChannelUnresolved {
            role: "INTERN".into(),
        };
        let _internal = StockwireError::Internal("test".into());
    }

    #[test]
    fn role_display_is_uppercase() {
        assert_eq!(Role::Admin.to_string(), "ADMIN");
        assert_eq!(Role::Manager.to_string(), "MANAGER");
        assert_eq!(Role::Staff.to_string(), "STAFF");
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!(Role::from_str("STAFF").unwrap(), Role::Staff);
        assert_eq!(Role::from_str("staff").unwrap(), Role::Staff);
        assert_eq!(Role::from_str("Admin").unwrap(), Role::Admin);
        assert!(Role::from_str("INTERN").is_err());
    }

    #[test]
    fn only_staff_is_per_account() {
        assert!(Role::Staff.is_per_account());
        assert!(!Role::Admin.is_per_account());
        assert!(!Role::Manager.is_per_account());
    }

    #[test]
    fn session_snapshot_connection_eligibility() {
        let mut snap = SessionSnapshot {
            account_id: Some(AccountId("42".into())),
            role: Some("STAFF".into()),
            logged_in: true,
            logging_out: false,
        };
        assert!(snap.wants_connection());

        snap.logging_out = true;
        assert!(!snap.wants_connection());

        snap.logging_out = false;
        snap.logged_in = false;
        assert!(!snap.wants_connection());

        assert!(!SessionSnapshot::default().wants_connection());
    }

    #[test]
    fn connection_status_accessors() {
        assert!(ConnectionStatus::Connected.is_connected());
        assert!(!ConnectionStatus::Disconnected.is_connected());

        let err = ConnectionStatus::Error("broker unreachable".into());
        assert!(!err.is_connected());
        assert_eq!(err.error_message(), Some("broker unreachable"));
        assert_eq!(ConnectionStatus::Connected.error_message(), None);
    }

    #[test]
    fn event_category_serializes_lowercase() {
        let json = serde_json::to_string(&EventCategory::Unclassified).unwrap();
        assert_eq!(json, "\"unclassified\"");
        assert_eq!(EventCategory::Prefix.to_string(), "prefix");
    }
}
