// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration error diagnostics.
//!
//! Figment deserialization errors and semantic validation failures are
//! collected into [`ConfigError`] values and rendered with miette codes and
//! help text.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error with diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The configuration failed to parse or deserialize.
    #[error("configuration parse error: {message}")]
    #[diagnostic(
        code(stockwire::config::parse),
        help("check stockwire.toml against the documented sections: client, broker, auth, reconnect")
    )]
    Parse {
        /// Figment's description of the failure.
        message: String,
    },

    /// A configuration value failed semantic validation.
    #[error("validation error: {message}")]
    #[diagnostic(code(stockwire::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },
}

/// Converts a figment error into per-failure diagnostics.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::Parse {
            message: e.to_string(),
        })
        .collect()
}

/// Renders collected errors to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprintln!("stockwire: {error}");
        if let Some(help) = error.help() {
            eprintln!("  help: {help}");
        }
    }
}
