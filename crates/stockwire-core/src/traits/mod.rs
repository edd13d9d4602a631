// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for the pluggable seams of the notification subsystem.
//!
//! Both traits use `#[async_trait]` for dynamic dispatch compatibility, so
//! the realtime client can be driven by mock implementations in tests.

pub mod authorizer;
pub mod transport;

pub use authorizer::ChannelAuthorizer;
pub use transport::BrokerTransport;
