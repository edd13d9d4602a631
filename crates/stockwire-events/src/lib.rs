// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event classification and normalization.
//!
//! Inbound broker events carry heterogeneous names: fixed names matched
//! exactly, and names parameterized by a business entity
//! (`<prefix>-<entityId>`). This crate classifies each name against the two
//! known tables and produces the uniform [`NotificationEvent`] record the
//! fan-out hub publishes.
//!
//! [`NotificationEvent`]: stockwire_core::NotificationEvent

pub mod normalizer;
pub mod table;

pub use normalizer::Normalizer;
pub use table::{EventTable, Matcher, WAREHOUSE_MATCHERS};
