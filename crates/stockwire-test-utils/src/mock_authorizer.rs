// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel authorizer with canned responses and call recording.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use stockwire_core::traits::ChannelAuthorizer;
use stockwire_core::types::{AuthSignature, ChannelId, SocketId};
use stockwire_core::StockwireError;

/// A mock authorizer. Succeeds with a fixed signature unless a failure has
/// been scripted with [`fail_next`](MockAuthorizer::fail_next).
pub struct MockAuthorizer {
    signature: AuthSignature,
    failures: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<(SocketId, ChannelId)>>,
}

impl MockAuthorizer {
    /// An always-succeeding authorizer with a default signature.
    pub fn ok() -> Arc<Self> {
        Arc::new(Self::with_signature("mockkey:signature"))
    }

    pub fn with_signature(signature: &str) -> Self {
        Self {
            signature: AuthSignature(signature.to_string()),
            failures: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Makes the next authorize call fail with `message`.
    pub fn fail_next(&self, message: &str) {
        self.failures
            .lock()
            .expect("mock state poisoned")
            .push_back(message.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock state poisoned").len()
    }

    /// All recorded `(socket_id, channel)` pairs, in order.
    pub fn calls(&self) -> Vec<(SocketId, ChannelId)> {
        self.calls.lock().expect("mock state poisoned").clone()
    }
}

#[async_trait]
impl ChannelAuthorizer for MockAuthorizer {
    async fn authorize(
        &self,
        socket_id: &SocketId,
        channel: &ChannelId,
    ) -> Result<AuthSignature, StockwireError> {
        self.calls
            .lock()
            .expect("mock state poisoned")
            .push((socket_id.clone(), channel.clone()));

        let failure = self
            .failures
            .lock()
            .expect("mock state poisoned")
            .pop_front();
        match failure {
            Some(message) => Err(StockwireError::Authorization {
                message,
                source: None,
            }),
            None => Ok(self.signature.clone()),
        }
    }
}
