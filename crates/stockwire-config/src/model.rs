// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Stockwire notification subsystem.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Stockwire configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StockwireConfig {
    /// Client identity and logging settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Broker connection settings.
    #[serde(default)]
    pub broker: BrokerConfig,

    /// Channel authorization endpoint settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Reconnection policy settings.
    #[serde(default)]
    pub reconnect: ReconnectConfig,
}

/// Client identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Name reported to the broker in the connection handshake.
    #[serde(default = "default_client_name")]
    pub client_name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            client_name: default_client_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_client_name() -> String {
    "stockwire".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Broker connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BrokerConfig {
    /// Application key identifying this app to the broker. `None` means the
    /// broker connection cannot be established.
    #[serde(default)]
    pub app_key: Option<String>,

    /// Broker host.
    #[serde(default = "default_broker_host")]
    pub host: String,

    /// Broker port.
    #[serde(default = "default_broker_port")]
    pub port: u16,

    /// Connect over TLS.
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            app_key: None,
            host: default_broker_host(),
            port: default_broker_port(),
            use_tls: default_use_tls(),
        }
    }
}

fn default_broker_host() -> String {
    "localhost".to_string()
}

fn default_broker_port() -> u16 {
    443
}

fn default_use_tls() -> bool {
    true
}

/// Channel authorization endpoint configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// URL of the backend authorization endpoint.
    #[serde(default = "default_auth_endpoint")]
    pub endpoint: String,

    /// Bearer token sent with authorization requests.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            endpoint: default_auth_endpoint(),
            bearer_token: None,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("endpoint", &self.endpoint)
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

fn default_auth_endpoint() -> String {
    "http://localhost:8000/broadcasting/auth".to_string()
}

/// Reconnection policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReconnectConfig {
    /// Retry attempts after a transport failure before parking in error.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry, in milliseconds. Doubles per attempt.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Upper bound on any single retry delay, in milliseconds.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    6
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30_000
}
