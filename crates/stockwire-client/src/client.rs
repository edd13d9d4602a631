// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The realtime client: one broker link kept in lock-step with the session.
//!
//! The supervisor loop reacts to exactly two external triggers: session
//! snapshots and process shutdown. Establishing a link (connect, authorize,
//! subscribe, pump) runs as one cancellable future raced against both
//! triggers, so a session change mid-flight drops an in-flight
//! authorization before it can mutate state, and explicit teardown always
//! completes before the next snapshot is acted on.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use stockwire_channel::resolve_session;
use stockwire_core::types::{ChannelId, ConnectionStatus, SessionSnapshot, TransportEvent};
use stockwire_core::{BrokerTransport, ChannelAuthorizer, StockwireError};
use stockwire_events::Normalizer;
use stockwire_store::NotificationHub;

use crate::backoff::ReconnectPolicy;
use crate::state::LinkState;

/// Outcome of racing the link future against the external triggers.
enum Supervision {
    Shutdown,
    SessionChanged,
    Settled,
}

/// Owns the broker connection and keeps it aligned with the session.
///
/// All collaborators are injected; the hub is moved in, making the client
/// the exclusive writer of notifications and connection status.
pub struct RealtimeClient {
    session: watch::Receiver<SessionSnapshot>,
    shutdown: CancellationToken,
    link: Link,
}

impl RealtimeClient {
    pub fn new(
        session: watch::Receiver<SessionSnapshot>,
        transport: Box<dyn BrokerTransport>,
        authorizer: Arc<dyn ChannelAuthorizer>,
        hub: NotificationHub,
        normalizer: Normalizer,
        policy: ReconnectPolicy,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            session,
            shutdown,
            link: Link {
                transport,
                authorizer,
                hub,
                normalizer,
                policy,
                state: LinkState::Idle,
                active_channel: None,
            },
        }
    }

    /// Runs the supervisor loop on a background task.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs the supervisor loop until shutdown.
    pub async fn run(mut self) {
        info!("realtime client started");

        loop {
            let snapshot = self.session.borrow_and_update().clone();

            if !snapshot.wants_connection() {
                self.link.teardown().await;
                tokio::select! {
                    _ = self.shutdown.cancelled() => break,
                    changed = self.session.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        continue;
                    }
                }
            }

            // Drive the link for this snapshot, racing against the two
            // external triggers. Dropping the drive future cancels any
            // in-flight connect or authorization round-trip.
            let outcome = {
                let drive = self.link.drive(snapshot);
                tokio::pin!(drive);
                tokio::select! {
                    _ = self.shutdown.cancelled() => Supervision::Shutdown,
                    changed = self.session.changed() => {
                        if changed.is_err() {
                            Supervision::Shutdown
                        } else {
                            Supervision::SessionChanged
                        }
                    }
                    _ = &mut drive => Supervision::Settled,
                }
            };

            match outcome {
                Supervision::Shutdown => break,
                Supervision::SessionChanged => {
                    self.link.teardown().await;
                }
                Supervision::Settled => {
                    // Terminal for this session: error persists until the
                    // next session change rebuilds the link.
                    tokio::select! {
                        _ = self.shutdown.cancelled() => break,
                        changed = self.session.changed() => {
                            if changed.is_err() {
                                break;
                            }
                            self.link.teardown().await;
                        }
                    }
                }
            }
        }

        self.link.teardown().await;
        info!("realtime client torn down");
    }
}

/// The link itself: transport, authorizer, normalizer, and the hub they
/// feed. Split from the supervisor so driving and observing the session
/// borrow disjoint state.
struct Link {
    transport: Box<dyn BrokerTransport>,
    authorizer: Arc<dyn ChannelAuthorizer>,
    hub: NotificationHub,
    normalizer: Normalizer,
    policy: ReconnectPolicy,
    state: LinkState,
    active_channel: Option<ChannelId>,
}

impl Link {
    /// Drives one session's link to a terminal state: resolve the channel,
    /// establish, pump events, and retry transport failures within the
    /// reconnect budget. Returns when the session attempt is settled.
    async fn drive(&mut self, snapshot: SessionSnapshot) {
        let channel = match resolve_session(&snapshot) {
            Ok(channel) => channel,
            Err(e) => {
                // Configuration error: no subscription possible, no retry.
                warn!(error = %e, "cannot resolve notification channel");
                self.fail(e.to_string());
                return;
            }
        };

        let mut attempt: u32 = 0;
        loop {
            match self.establish(&channel).await {
                Ok(()) => {
                    attempt = 0;
                    self.hub.set_status(ConnectionStatus::Connected);
                    let reason = self.pump().await;
                    warn!(channel = %channel, reason = %reason, "broker link lost");
                    self.active_channel = None;
                    self.transport.disconnect().await;
                    self.fail(format!("connection lost: {reason}"));
                }
                Err(e @ StockwireError::Authorization { .. }) => {
                    // One authorization attempt per session change.
                    warn!(error = %e, channel = %channel, "channel authorization failed");
                    self.transport.disconnect().await;
                    self.fail(e.to_string());
                    return;
                }
                Err(e) => {
                    warn!(error = %e, attempt, channel = %channel, "link establishment failed");
                    self.transport.disconnect().await;
                    self.fail(e.to_string());
                }
            }

            attempt += 1;
            if attempt > self.policy.max_attempts {
                warn!(
                    attempts = self.policy.max_attempts,
                    "reconnect budget exhausted, waiting for next session change"
                );
                return;
            }
            let delay = self.policy.delay(attempt);
            debug!(attempt, delay_ms = delay.as_millis() as u64, "scheduling reconnect");
            tokio::time::sleep(delay).await;
        }
    }

    /// Connect, authorize, subscribe.
    async fn establish(&mut self, channel: &ChannelId) -> Result<(), StockwireError> {
        self.state = LinkState::Connecting;
        debug!(channel = %channel, "connecting to broker");
        let socket_id = self.transport.connect().await?;

        self.state = LinkState::Connected;
        let auth = self.authorizer.authorize(&socket_id, channel).await?;

        self.transport.subscribe(channel, &auth).await?;
        self.state = LinkState::Subscribed;
        self.active_channel = Some(channel.clone());
        info!(channel = %channel, "live notifications active");
        Ok(())
    }

    /// Pumps application events into the hub until the connection drops.
    /// Returns the drop reason.
    async fn pump(&mut self) -> String {
        loop {
            match self.transport.next_event().await {
                Ok(TransportEvent::Raw(raw)) => {
                    let event = self.normalizer.normalize(raw);
                    self.hub.publish(event);
                }
                Ok(TransportEvent::Dropped(reason)) => return reason,
                Err(e) => return e.to_string(),
            }
        }
    }

    fn fail(&mut self, message: String) {
        self.state = LinkState::Error;
        self.hub.set_status(ConnectionStatus::Error(message));
    }

    /// Unbinds, unsubscribes, and disconnects. Idempotent: safe to invoke
    /// any number of times, from any state.
    async fn teardown(&mut self) {
        if let Some(channel) = self.active_channel.take() {
            if let Err(e) = self.transport.unsubscribe(&channel).await {
                debug!(error = %e, channel = %channel, "unsubscribe during teardown failed");
            }
        }
        self.transport.disconnect().await;
        if self.state != LinkState::TornDown {
            debug!(from = %self.state, "link torn down");
            self.state = LinkState::TornDown;
        }
        self.hub.set_status(ConnectionStatus::Disconnected);
    }
}
