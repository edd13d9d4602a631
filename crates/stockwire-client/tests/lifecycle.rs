// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle tests for the realtime client against mock collaborators:
//! session transitions drive the link, failures surface as connection
//! status, and no event ever reaches a consumer after logout.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use stockwire_client::{RealtimeClient, ReconnectPolicy, SessionHandle};
use stockwire_core::types::{AccountId, ConnectionStatus};
use stockwire_core::ChannelAuthorizer;
use stockwire_events::Normalizer;
use stockwire_store::{NotificationFeed, NotificationHub};
use stockwire_test_utils::{raw_event, MockAuthorizer, MockTransport, MockTransportHandle};

const WAIT: Duration = Duration::from_secs(5);

struct Harness {
    session: SessionHandle,
    transport: MockTransportHandle,
    authorizer: Arc<MockAuthorizer>,
    feed: NotificationFeed,
    shutdown: CancellationToken,
    join: JoinHandle<()>,
}

impl Harness {
    fn spawn() -> Self {
        Self::spawn_with_policy(ReconnectPolicy {
            max_attempts: 2,
            base_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(20),
        })
    }

    fn spawn_with_policy(policy: ReconnectPolicy) -> Self {
        let (session, session_rx) = SessionHandle::new();
        let (transport, transport_handle) = MockTransport::new();
        let authorizer = MockAuthorizer::ok();

        let hub = NotificationHub::new();
        let feed = hub.subscribe();
        let shutdown = CancellationToken::new();

        let client = RealtimeClient::new(
            session_rx,
            Box::new(transport),
            Arc::clone(&authorizer) as Arc<dyn ChannelAuthorizer>,
            hub,
            Normalizer::warehouse(),
            policy,
            shutdown.clone(),
        );
        let join = client.spawn();

        Self {
            session,
            transport: transport_handle,
            authorizer,
            feed,
            shutdown,
            join,
        }
    }

    async fn stop(self) {
        self.shutdown.cancel();
        self.join.await.expect("client task panicked");
    }
}

/// Polls until `condition` holds, failing the test after a bounded wait.
async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(WAIT, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[tokio::test]
async fn login_subscribes_and_events_reach_consumers() {
    let mut harness = Harness::spawn();
    harness.session.login(AccountId("42".into()), "STAFF");

    wait_until(|| harness.feed.is_connected()).await;

    // The resolved channel went through authorization and subscription.
    assert_eq!(
        harness
            .transport
            .subscribed_channels()
            .first()
            .map(|c| c.as_str().to_string()),
        Some("private-notifications-STAFF-42".to_string())
    );
    let auth_calls = harness.authorizer.calls();
    assert_eq!(auth_calls[0].1.as_str(), "private-notifications-STAFF-42");

    // A fixed event flows through normalization to the feed.
    harness
        .transport
        .inject_event(raw_event("import-order-assigned", serde_json::json!({"id": 7})));
    let event = tokio::time::timeout(WAIT, harness.feed.changed())
        .await
        .expect("no event published")
        .unwrap();
    assert_eq!(event.event_type, "import-order-assigned");
    assert_eq!(event.data["id"], 7);

    // Fail-open: an unknown name is still published, tagged unclassified.
    harness
        .transport
        .inject_event(raw_event("some-future-event-xyz", serde_json::json!({})));
    let event = tokio::time::timeout(WAIT, harness.feed.changed())
        .await
        .expect("unclassified event was dropped")
        .unwrap();
    assert_eq!(event.event_type, "some-future-event-xyz");
    assert_eq!(
        event.category,
        stockwire_core::types::EventCategory::Unclassified
    );

    harness.stop().await;
}

#[tokio::test]
async fn logout_tears_down_before_any_further_event() {
    let mut harness = Harness::spawn();
    harness.session.login(AccountId("42".into()), "STAFF");
    wait_until(|| harness.feed.is_connected()).await;

    harness.session.begin_logout();
    wait_until(|| harness.feed.status() == ConnectionStatus::Disconnected).await;
    assert!(harness.transport.disconnect_count() >= 1);

    // An event arriving after teardown must never reach the hub.
    harness
        .transport
        .inject_event(raw_event("import-order-assigned", serde_json::json!({})));
    let published = tokio::time::timeout(Duration::from_millis(100), harness.feed.changed()).await;
    assert!(
        published.is_err(),
        "event was published after logout: {published:?}"
    );
    assert!(harness.feed.latest().is_none());

    harness.session.complete_logout();
    harness.stop().await;
}

#[tokio::test]
async fn authorization_rejection_surfaces_error_and_never_publishes() {
    let harness = Harness::spawn();
    harness
        .authorizer
        .fail_next("authorization endpoint returned 401 Unauthorized: token expired");

    harness.session.login(AccountId("42".into()), "STAFF");
    wait_until(|| harness.feed.connection_error().is_some()).await;

    let error = harness.feed.connection_error().unwrap();
    assert!(error.contains("401"), "got: {error}");
    assert!(!harness.feed.is_connected());
    assert!(harness.feed.latest().is_none());

    // One attempt per session change, despite the reconnect budget.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(harness.authorizer.call_count(), 1);
    assert_eq!(harness.transport.subscribe_count(), 0);

    harness.stop().await;
}

#[tokio::test]
async fn unrecognized_role_reports_config_error_without_connecting() {
    let harness = Harness::spawn();
    harness.session.login(AccountId("42".into()), "INTERN");

    wait_until(|| harness.feed.connection_error().is_some()).await;
    assert!(harness.feed.connection_error().unwrap().contains("INTERN"));
    assert_eq!(harness.transport.connect_count(), 0);

    harness.stop().await;
}

#[tokio::test]
async fn role_change_resubscribes_to_the_new_channel() {
    let harness = Harness::spawn();
    harness.session.login(AccountId("42".into()), "STAFF");
    wait_until(|| harness.transport.subscribe_count() == 1).await;

    harness.session.set_role("MANAGER");
    wait_until(|| harness.transport.subscribe_count() == 2).await;

    let channels: Vec<String> = harness
        .transport
        .subscribed_channels()
        .iter()
        .map(|c| c.as_str().to_string())
        .collect();
    assert_eq!(
        channels,
        vec![
            "private-notifications-STAFF-42".to_string(),
            "private-notifications-MANAGER".to_string(),
        ]
    );
    // The old channel was unsubscribed during teardown.
    assert_eq!(harness.transport.unsubscribe_count(), 1);

    harness.stop().await;
}

#[tokio::test]
async fn transport_drop_reconnects_within_budget() {
    let mut harness = Harness::spawn();
    harness.session.login(AccountId("42".into()), "STAFF");
    wait_until(|| harness.feed.is_connected()).await;

    harness.transport.inject_drop("broker restarting");
    wait_until(|| harness.transport.connect_count() == 2).await;
    wait_until(|| harness.feed.is_connected()).await;

    // Events flow again after the rebuild.
    harness
        .transport
        .inject_event(raw_event("export-order-done", serde_json::json!({})));
    let event = tokio::time::timeout(WAIT, harness.feed.changed())
        .await
        .expect("no event after reconnect")
        .unwrap();
    assert_eq!(event.event_type, "export-order-done");

    harness.stop().await;
}

#[tokio::test]
async fn connect_failures_park_in_error_after_budget() {
    let harness = Harness::spawn();
    harness.transport.fail_connect_times(10, "broker unreachable");
    harness.session.login(AccountId("42".into()), "STAFF");

    // Initial attempt + 2 retries from the policy, then parked.
    wait_until(|| harness.transport.connect_count() == 3).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(harness.transport.connect_count(), 3);
    assert!(
        harness
            .feed
            .connection_error()
            .unwrap()
            .contains("unreachable")
    );

    harness.stop().await;
}
