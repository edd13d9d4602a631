// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock broker transport for deterministic testing.
//!
//! `MockTransport` implements `BrokerTransport` with injectable events and
//! scripted connect failures. The paired [`MockTransportHandle`] stays with
//! the test after the transport is moved into the client, for injection and
//! call assertions.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use stockwire_core::traits::BrokerTransport;
use stockwire_core::types::{AuthSignature, ChannelId, RawEvent, SocketId, TransportEvent};
use stockwire_core::StockwireError;

/// One recorded interaction with the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Connect,
    Subscribe {
        channel: ChannelId,
        auth: AuthSignature,
    },
    Unsubscribe {
        channel: ChannelId,
    },
    Disconnect,
}

#[derive(Default)]
struct MockState {
    events: Mutex<VecDeque<TransportEvent>>,
    notify: Notify,
    connect_failures: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<MockCall>>,
    socket_counter: AtomicU32,
}

/// The transport half, moved into the client under test.
pub struct MockTransport {
    state: Arc<MockState>,
}

/// The test's half: inject events, script failures, assert calls.
#[derive(Clone)]
pub struct MockTransportHandle {
    state: Arc<MockState>,
}

impl MockTransport {
    pub fn new() -> (Self, MockTransportHandle) {
        let state = Arc::new(MockState::default());
        (
            Self {
                state: Arc::clone(&state),
            },
            MockTransportHandle { state },
        )
    }
}

impl MockTransportHandle {
    /// Queues an application event; the next `next_event` call returns it.
    pub fn inject_event(&self, event: RawEvent) {
        self.state
            .events
            .lock()
            .expect("mock state poisoned")
            .push_back(TransportEvent::Raw(event));
        self.state.notify.notify_one();
    }

    /// Queues a connection drop.
    pub fn inject_drop(&self, reason: &str) {
        self.state
            .events
            .lock()
            .expect("mock state poisoned")
            .push_back(TransportEvent::Dropped(reason.to_string()));
        self.state.notify.notify_one();
    }

    /// Makes the next `count` connect attempts fail with `message`.
    pub fn fail_connect_times(&self, count: usize, message: &str) {
        let mut failures = self
            .state
            .connect_failures
            .lock()
            .expect("mock state poisoned");
        for _ in 0..count {
            failures.push_back(message.to_string());
        }
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.calls.lock().expect("mock state poisoned").clone()
    }

    pub fn connect_count(&self) -> usize {
        self.count(|c| matches!(c, MockCall::Connect))
    }

    pub fn subscribe_count(&self) -> usize {
        self.count(|c| matches!(c, MockCall::Subscribe { .. }))
    }

    pub fn unsubscribe_count(&self) -> usize {
        self.count(|c| matches!(c, MockCall::Unsubscribe { .. }))
    }

    pub fn disconnect_count(&self) -> usize {
        self.count(|c| matches!(c, MockCall::Disconnect))
    }

    /// Channels subscribed to, in order.
    pub fn subscribed_channels(&self) -> Vec<ChannelId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::Subscribe { channel, .. } => Some(channel),
                _ => None,
            })
            .collect()
    }

    fn count(&self, predicate: impl Fn(&MockCall) -> bool) -> usize {
        self.state
            .calls
            .lock()
            .expect("mock state poisoned")
            .iter()
            .filter(|c| predicate(c))
            .count()
    }
}

impl MockState {
    fn record(&self, call: MockCall) {
        self.calls.lock().expect("mock state poisoned").push(call);
    }
}

#[async_trait]
impl BrokerTransport for MockTransport {
    async fn connect(&mut self) -> Result<SocketId, StockwireError> {
        self.state.record(MockCall::Connect);

        let failure = self
            .state
            .connect_failures
            .lock()
            .expect("mock state poisoned")
            .pop_front();
        if let Some(message) = failure {
            return Err(StockwireError::Transport {
                message,
                source: None,
            });
        }

        let n = self.state.socket_counter.fetch_add(1, Ordering::Relaxed);
        Ok(SocketId(format!("mock-socket-{n}")))
    }

    async fn subscribe(
        &mut self,
        channel: &ChannelId,
        auth: &AuthSignature,
    ) -> Result<(), StockwireError> {
        self.state.record(MockCall::Subscribe {
            channel: channel.clone(),
            auth: auth.clone(),
        });
        Ok(())
    }

    async fn next_event(&mut self) -> Result<TransportEvent, StockwireError> {
        loop {
            {
                let mut events = self.state.events.lock().expect("mock state poisoned");
                if let Some(event) = events.pop_front() {
                    return Ok(event);
                }
            }
            self.state.notify.notified().await;
        }
    }

    async fn unsubscribe(&mut self, channel: &ChannelId) -> Result<(), StockwireError> {
        self.state.record(MockCall::Unsubscribe {
            channel: channel.clone(),
        });
        Ok(())
    }

    async fn disconnect(&mut self) {
        self.state.record(MockCall::Disconnect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_event;

    #[tokio::test]
    async fn next_event_returns_injected_events_in_order() {
        let (mut transport, handle) = MockTransport::new();
        handle.inject_event(raw_event("import-order-assigned", serde_json::json!({})));
        handle.inject_drop("scripted drop");

        match transport.next_event().await.unwrap() {
            TransportEvent::Raw(event) => assert_eq!(event.name, "import-order-assigned"),
            other => panic!("expected raw, got {other:?}"),
        }
        match transport.next_event().await.unwrap() {
            TransportEvent::Dropped(reason) => assert_eq!(reason, "scripted drop"),
            other => panic!("expected drop, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn next_event_waits_for_injection() {
        let (mut transport, handle) = MockTransport::new();

        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            handle.inject_event(raw_event("export-order-done", serde_json::json!({})));
        });

        let event = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            transport.next_event(),
        )
        .await
        .expect("next_event timed out")
        .unwrap();
        assert!(matches!(event, TransportEvent::Raw(_)));
    }

    #[tokio::test]
    async fn scripted_connect_failures_then_success() {
        let (mut transport, handle) = MockTransport::new();
        handle.fail_connect_times(2, "broker unreachable");

        assert!(transport.connect().await.is_err());
        assert!(transport.connect().await.is_err());
        let socket_id = transport.connect().await.unwrap();
        assert!(socket_id.0.starts_with("mock-socket-"));
        assert_eq!(handle.connect_count(), 3);
    }

    #[tokio::test]
    async fn calls_are_recorded_in_order() {
        let (mut transport, handle) = MockTransport::new();
        let channel = ChannelId("private-notifications-ADMIN".into());

        transport.connect().await.unwrap();
        transport
            .subscribe(&channel, &AuthSignature("k:s".into()))
            .await
            .unwrap();
        transport.unsubscribe(&channel).await.unwrap();
        transport.disconnect().await;

        let calls = handle.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], MockCall::Connect);
        assert!(matches!(calls[1], MockCall::Subscribe { .. }));
        assert_eq!(handle.subscribed_channels(), vec![channel.clone()]);
        assert_eq!(calls[3], MockCall::Disconnect);
    }
}
