// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Stockwire notification subsystem.

use thiserror::Error;

/// The primary error type used across all Stockwire traits and core operations.
///
/// Errors never cross the public consumer boundary: the realtime client folds
/// every failure into a descriptive `ConnectionStatus::Error` string on the
/// fan-out hub. This type exists for the seams between components.
#[derive(Debug, Error)]
pub enum StockwireError {
    /// Configuration errors (invalid TOML, missing required fields, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Broker transport errors (connect failure, socket drop, send failure).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Channel authorization errors (endpoint rejected, malformed response).
    #[error("authorization error: {message}")]
    Authorization {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed broker frames or handshake violations.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// No channel can be resolved for the session's role.
    #[error("no notification channel for role `{role}`")]
    ChannelUnresolved { role: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
