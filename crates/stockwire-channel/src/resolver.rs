// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Role-to-channel lookup.
//!
//! Every role has one reserved channel shared by all its members, except the
//! per-account `Staff` role, whose channel is suffixed with the account id so
//! delivery is scoped to one individual.

use std::str::FromStr;

use stockwire_core::types::{AccountId, ChannelId, Role, SessionSnapshot};
use stockwire_core::StockwireError;

/// Common prefix of every notification channel. The `private-` part marks
/// the channel as requiring authorization on the broker side.
pub const CHANNEL_PREFIX: &str = "private-notifications";

/// Resolves the notification channel for a known role.
///
/// The account id only participates for the per-account role; for shared
/// roles the same channel is returned regardless of account.
pub fn resolve(role: Role, account_id: &AccountId) -> ChannelId {
    if role.is_per_account() {
        ChannelId(format!("{CHANNEL_PREFIX}-{role}-{account_id}"))
    } else {
        ChannelId(format!("{CHANNEL_PREFIX}-{role}"))
    }
}

/// Resolves from the backend's raw role string.
///
/// Returns `None` for unrecognized roles. The caller must treat this as
/// "no subscription possible" and surface a descriptive error, not retry.
pub fn resolve_raw(role: &str, account_id: &AccountId) -> Option<ChannelId> {
    let role = Role::from_str(role.trim()).ok()?;
    Some(resolve(role, account_id))
}

/// Resolves the channel a session must subscribe to.
///
/// Fails with a descriptive error when the role is missing or unrecognized,
/// or when the per-account role has no account id to scope by.
pub fn resolve_session(session: &SessionSnapshot) -> Result<ChannelId, StockwireError> {
    let raw_role = session
        .role
        .as_deref()
        .ok_or_else(|| StockwireError::Config("session has no role".into()))?;

    let role = Role::from_str(raw_role.trim()).map_err(|_| StockwireError::ChannelUnresolved {
        role: raw_role.to_string(),
    })?;

    match &session.account_id {
        Some(account_id) => Ok(resolve(role, account_id)),
        None if role.is_per_account() => Err(StockwireError::Config(format!(
            "role {role} requires an account id to resolve its channel"
        ))),
        // Shared channels do not depend on the account.
        None => Ok(resolve(role, &AccountId(String::new()))),
    }
}
