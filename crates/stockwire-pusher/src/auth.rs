// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP channel authorizer.
//!
//! Asks the backend to vouch for the local session on a channel: the broker
//! only delivers private-channel events after this signature is presented
//! on subscribe. Non-2xx responses and malformed bodies are authorization
//! failures; the caller surfaces them and does not retry until the session
//! changes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use stockwire_core::traits::ChannelAuthorizer;
use stockwire_core::types::{AuthSignature, ChannelId, SocketId};
use stockwire_core::StockwireError;

/// Request body of the authorization exchange.
#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    socket_id: &'a str,
    channel_name: &'a str,
}

/// Expected response body.
#[derive(Debug, Deserialize)]
struct AuthResponse {
    auth: String,
}

/// `ChannelAuthorizer` backed by the backend's authorization endpoint.
pub struct HttpChannelAuthorizer {
    client: reqwest::Client,
    endpoint: String,
    bearer_token: Option<String>,
}

impl std::fmt::Debug for HttpChannelAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpChannelAuthorizer")
            .field("endpoint", &self.endpoint)
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

impl HttpChannelAuthorizer {
    pub fn new(endpoint: String, bearer_token: Option<String>) -> Result<Self, StockwireError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| StockwireError::Authorization {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            endpoint,
            bearer_token,
        })
    }
}

#[async_trait]
impl ChannelAuthorizer for HttpChannelAuthorizer {
    async fn authorize(
        &self,
        socket_id: &SocketId,
        channel: &ChannelId,
    ) -> Result<AuthSignature, StockwireError> {
        let body = AuthRequest {
            socket_id: &socket_id.0,
            channel_name: channel.as_str(),
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(ref token) = self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StockwireError::Authorization {
                message: format!("authorization request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, channel = %channel, "authorization response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StockwireError::Authorization {
                message: format!("authorization endpoint returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: AuthResponse =
            response
                .json()
                .await
                .map_err(|e| StockwireError::Authorization {
                    message: format!("malformed authorization response: {e}"),
                    source: Some(Box::new(e)),
                })?;

        Ok(AuthSignature(parsed.auth))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn socket_id() -> SocketId {
        SocketId("81.15".into())
    }

    fn channel() -> ChannelId {
        ChannelId("private-notifications-STAFF-42".into())
    }

    #[tokio::test]
    async fn authorize_success_returns_signature() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/broadcasting/auth"))
            .and(body_json(serde_json::json!({
                "socket_id": "81.15",
                "channel_name": "private-notifications-STAFF-42",
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "auth": "appkey:cafe" })),
            )
            .mount(&server)
            .await;

        let authorizer =
            HttpChannelAuthorizer::new(format!("{}/broadcasting/auth", server.uri()), None)
                .unwrap();
        let signature = authorizer
            .authorize(&socket_id(), &channel())
            .await
            .unwrap();
        assert_eq!(signature, AuthSignature("appkey:cafe".into()));
    }

    #[tokio::test]
    async fn authorize_sends_bearer_token_when_configured() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/broadcasting/auth"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "auth": "appkey:beef" })),
            )
            .mount(&server)
            .await;

        let authorizer = HttpChannelAuthorizer::new(
            format!("{}/broadcasting/auth", server.uri()),
            Some("secret-token".into()),
        )
        .unwrap();
        let result = authorizer.authorize(&socket_id(), &channel()).await;
        assert!(result.is_ok(), "bearer header should match: {result:?}");
    }

    #[tokio::test]
    async fn authorize_401_is_an_authorization_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/broadcasting/auth"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let authorizer =
            HttpChannelAuthorizer::new(format!("{}/broadcasting/auth", server.uri()), None)
                .unwrap();
        let err = authorizer
            .authorize(&socket_id(), &channel())
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("401"), "got: {msg}");
        assert!(matches!(err, StockwireError::Authorization { .. }));
    }

    #[tokio::test]
    async fn authorize_malformed_body_is_an_authorization_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/broadcasting/auth"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "nope": true })),
            )
            .mount(&server)
            .await;

        let authorizer =
            HttpChannelAuthorizer::new(format!("{}/broadcasting/auth", server.uri()), None)
                .unwrap();
        let err = authorizer
            .authorize(&socket_id(), &channel())
            .await
            .unwrap_err();
        assert!(matches!(err, StockwireError::Authorization { .. }));
    }

    #[test]
    fn debug_redacts_bearer_token() {
        let authorizer = HttpChannelAuthorizer::new(
            "http://localhost/broadcasting/auth".into(),
            Some("secret-token".into()),
        )
        .unwrap();
        let output = format!("{authorizer:?}");
        assert!(!output.contains("secret-token"));
        assert!(output.contains("[redacted]"));
    }
}
