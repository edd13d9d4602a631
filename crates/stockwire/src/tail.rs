// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `stockwire tail` command implementation.
//!
//! Builds the full stack from configuration (broker transport, HTTP channel
//! authorizer, fan-out hub, realtime client), logs in a synthetic session
//! for the given role, and prints each notification as it arrives until
//! Ctrl+C.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::info;

use stockwire_client::{RealtimeClient, ReconnectPolicy, SessionHandle};
use stockwire_config::StockwireConfig;
use stockwire_core::types::{AccountId, Role};
use stockwire_core::StockwireError;
use stockwire_events::Normalizer;
use stockwire_pusher::{BrokerEndpoint, HttpChannelAuthorizer, PusherTransport};
use stockwire_store::NotificationHub;

/// Runs the `stockwire tail` command.
pub async fn run_tail(
    config: StockwireConfig,
    role: String,
    account_id: Option<String>,
) -> Result<(), StockwireError> {
    let app_key = config
        .broker
        .app_key
        .clone()
        .ok_or_else(|| StockwireError::Config("broker.app_key is not configured".into()))?;

    let account_id = account_id.unwrap_or_default();
    let per_account = Role::from_str(role.trim())
        .map(|r| r.is_per_account())
        .unwrap_or(false);
    if per_account && account_id.is_empty() {
        return Err(StockwireError::Config(format!(
            "--account-id is required for role {role}"
        )));
    }

    let transport = PusherTransport::new(BrokerEndpoint {
        host: config.broker.host.clone(),
        port: config.broker.port,
        use_tls: config.broker.use_tls,
        app_key,
    });
    let authorizer = HttpChannelAuthorizer::new(
        config.auth.endpoint.clone(),
        config.auth.bearer_token.clone(),
    )?;

    let hub = NotificationHub::new();
    let mut events = hub.subscribe();
    let mut statuses = hub.subscribe();

    let (session, session_rx) = SessionHandle::new();
    let shutdown = CancellationToken::new();

    let client = RealtimeClient::new(
        session_rx,
        Box::new(transport),
        Arc::new(authorizer),
        hub,
        Normalizer::warehouse(),
        ReconnectPolicy {
            max_attempts: config.reconnect.max_attempts,
            base_delay: Duration::from_millis(config.reconnect.base_delay_ms),
            max_delay: Duration::from_millis(config.reconnect.max_delay_ms),
        },
        shutdown.clone(),
    );
    let join = client.spawn();

    // Ctrl+C cancels the same token the client observes.
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down");
            signal_token.cancel();
        }
    });

    session.login(AccountId(account_id), role);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            event = events.changed() => {
                match event {
                    Some(event) => {
                        let data = serde_json::to_string(&event.data)
                            .unwrap_or_else(|_| "<unprintable>".to_string());
                        println!(
                            "{} {:<12} {} {}",
                            event.received_at.to_rfc3339(),
                            event.category,
                            event.event_type,
                            data
                        );
                    }
                    None => break,
                }
            }
            status = statuses.status_changed() => {
                match status {
                    Some(status) => eprintln!("# connection: {status:?}"),
                    None => break,
                }
            }
        }
    }

    session.begin_logout();
    shutdown.cancel();
    let _ = join.await;
    session.complete_logout();
    Ok(())
}
