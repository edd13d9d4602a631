// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the Stockwire workspace.
//!
//! Deterministic mock implementations of the core traits, with injectable
//! behavior and recorded calls for assertions.

pub mod mock_authorizer;
pub mod mock_transport;

pub use mock_authorizer::MockAuthorizer;
pub use mock_transport::{MockCall, MockTransport, MockTransportHandle};

use stockwire_core::types::RawEvent;

/// A raw application event fixture.
pub fn raw_event(name: &str, payload: serde_json::Value) -> RawEvent {
    RawEvent {
        name: name.to_string(),
        channel: Some("private-notifications-STAFF-42".to_string()),
        payload,
    }
}
