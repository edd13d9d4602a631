// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Collects all failures rather than failing fast.

use crate::diagnostic::ConfigError;
use crate::model::StockwireConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors.
pub fn validate_config(config: &StockwireConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.client.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "client.log_level `{}` is not one of: {}",
                config.client.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.broker.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "broker.host must not be empty".to_string(),
        });
    }

    if config.broker.port == 0 {
        errors.push(ConfigError::Validation {
            message: "broker.port must not be 0".to_string(),
        });
    }

    let endpoint = config.auth.endpoint.trim();
    let scheme_ok = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"))
        .is_some_and(|rest| !rest.is_empty());
    if !scheme_ok {
        errors.push(ConfigError::Validation {
            message: format!(
                "auth.endpoint `{endpoint}` must be an http:// or https:// URL"
            ),
        });
    }

    if config.reconnect.base_delay_ms == 0 {
        errors.push(ConfigError::Validation {
            message: "reconnect.base_delay_ms must be at least 1".to_string(),
        });
    }

    if config.reconnect.base_delay_ms > config.reconnect.max_delay_ms {
        errors.push(ConfigError::Validation {
            message: format!(
                "reconnect.base_delay_ms ({}) must not exceed reconnect.max_delay_ms ({})",
                config.reconnect.base_delay_ms, config.reconnect.max_delay_ms
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&StockwireConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_failures() {
        let mut config = StockwireConfig::default();
        config.client.log_level = "verbose".into();
        config.broker.host = "  ".into();
        config.auth.endpoint = "ftp://example.com".into();
        config.reconnect.base_delay_ms = 60_000;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn bare_scheme_endpoint_is_rejected() {
        let mut config = StockwireConfig::default();
        config.auth.endpoint = "https://".into();
        assert!(validate_config(&config).is_err());
    }
}
