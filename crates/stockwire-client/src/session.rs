// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session glue for the embedding application.
//!
//! The session itself is owned outside this subsystem; [`SessionHandle`]
//! wraps the `watch` sender the application mutates on authentication
//! transitions, and the realtime client observes the receiver side.

use tokio::sync::watch;
use tracing::info;

use stockwire_core::types::{AccountId, SessionSnapshot};

/// Write side of the session state observed by the realtime client.
#[derive(Debug)]
pub struct SessionHandle {
    tx: watch::Sender<SessionSnapshot>,
}

impl SessionHandle {
    /// Creates a logged-out session and the receiver the client observes.
    pub fn new() -> (Self, watch::Receiver<SessionSnapshot>) {
        let (tx, rx) = watch::channel(SessionSnapshot::default());
        (Self { tx }, rx)
    }

    /// Additional observer, e.g. for diagnostic UI.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    /// Successful authentication: identity set, flags cleared.
    pub fn login(&self, account_id: AccountId, role: impl Into<String>) {
        let role = role.into();
        info!(account = %account_id, role = %role, "session logged in");
        self.tx.send_replace(SessionSnapshot {
            account_id: Some(account_id),
            role: Some(role),
            logged_in: true,
            logging_out: false,
        });
    }

    /// Role changed (e.g. token refresh); triggers resubscription.
    pub fn set_role(&self, role: impl Into<String>) {
        let role = role.into();
        self.tx.send_modify(|session| {
            session.role = Some(role);
        });
    }

    /// Account changed; triggers resubscription for per-account roles.
    pub fn set_account(&self, account_id: AccountId) {
        self.tx.send_modify(|session| {
            session.account_id = Some(account_id);
        });
    }

    /// Logout has started: the client must disconnect before the
    /// credentials disappear.
    pub fn begin_logout(&self) {
        self.tx.send_modify(|session| {
            session.logging_out = true;
        });
    }

    /// Logout completed: identity destroyed.
    pub fn complete_logout(&self) {
        info!("session logged out");
        self.tx.send_replace(SessionSnapshot::default());
    }
}
