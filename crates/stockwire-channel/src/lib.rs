// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel resolution for the Stockwire notification subsystem.
//!
//! A pure lookup from `(role, account id)` to the private channel the
//! session must subscribe to. No state, no side effects.

pub mod resolver;

pub use resolver::{resolve, resolve_raw, resolve_session, CHANNEL_PREFIX};
