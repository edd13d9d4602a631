// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The notification hub and its consumer feeds.
//!
//! The hub is the write side, owned exclusively by the realtime client.
//! Consumers hold cloneable [`NotificationFeed`] handles and may only
//! observe. Built on `tokio::sync::watch`: a single slot where the latest
//! value wins, and every receiver subscribed at publish time observes the
//! new value exactly once.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use stockwire_core::types::{ConnectionStatus, NotificationEvent};

/// Write side of the fan-out store.
///
/// Holds the latest normalized event and the connection status. Move the hub
/// into the realtime client after taking the feeds you need; nothing else
/// should be able to publish.
#[derive(Debug)]
pub struct NotificationHub {
    event_tx: watch::Sender<Option<Arc<NotificationEvent>>>,
    status_tx: watch::Sender<ConnectionStatus>,
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationHub {
    pub fn new() -> Self {
        let (event_tx, _) = watch::channel(None);
        let (status_tx, _) = watch::channel(ConnectionStatus::Disconnected);
        Self {
            event_tx,
            status_tx,
        }
    }

    /// Publishes a normalized event, replacing the previous one.
    ///
    /// If events arrive faster than a consumer's observation cycle, the
    /// earlier one is legitimately skipped by that consumer (latest wins).
    pub fn publish(&self, event: NotificationEvent) {
        debug!(event = %event.event_type, category = %event.category, "publishing notification");
        self.event_tx.send_replace(Some(Arc::new(event)));
    }

    /// Updates the connection status. No-op (and no consumer wakeup) when
    /// the status is unchanged, which keeps repeated teardowns silent.
    pub fn set_status(&self, status: ConnectionStatus) {
        self.status_tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                debug!(from = ?current, to = ?status, "connection status changed");
                *current = status;
                true
            }
        });
    }

    /// Current connection status.
    pub fn status(&self) -> ConnectionStatus {
        self.status_tx.borrow().clone()
    }

    /// The most recently published event, if any.
    pub fn latest(&self) -> Option<Arc<NotificationEvent>> {
        self.event_tx.borrow().clone()
    }

    /// Creates a new consumer feed observing this hub.
    pub fn subscribe(&self) -> NotificationFeed {
        NotificationFeed {
            event_rx: self.event_tx.subscribe(),
            status_rx: self.status_tx.subscribe(),
        }
    }
}

/// Read-only consumer handle. Cheap to clone; each clone observes
/// independently.
#[derive(Debug, Clone)]
pub struct NotificationFeed {
    event_rx: watch::Receiver<Option<Arc<NotificationEvent>>>,
    status_rx: watch::Receiver<ConnectionStatus>,
}

impl NotificationFeed {
    /// The most recently published event, if any. Does not consume the
    /// pending change notification.
    pub fn latest(&self) -> Option<Arc<NotificationEvent>> {
        self.event_rx.borrow().clone()
    }

    /// Waits for the next publish and returns the new latest event.
    ///
    /// Returns `None` only when the hub has been dropped: the slot is never
    /// cleared once an event has been published.
    pub async fn changed(&mut self) -> Option<Arc<NotificationEvent>> {
        match self.event_rx.changed().await {
            Ok(()) => self.event_rx.borrow_and_update().clone(),
            Err(_) => None,
        }
    }

    /// Waits for the next connection status transition.
    ///
    /// Returns `None` when the hub has been dropped.
    pub async fn status_changed(&mut self) -> Option<ConnectionStatus> {
        match self.status_rx.changed().await {
            Ok(()) => Some(self.status_rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }

    /// Current connection status.
    pub fn status(&self) -> ConnectionStatus {
        self.status_rx.borrow().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.status_rx.borrow().is_connected()
    }

    /// The current connection error message, if the status is an error.
    pub fn connection_error(&self) -> Option<String> {
        self.status_rx.borrow().error_message().map(str::to_string)
    }
}
