// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./stockwire.toml` > `~/.config/stockwire/stockwire.toml`
//! > `/etc/stockwire/stockwire.toml` with environment variable overrides via
//! the `STOCKWIRE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::StockwireConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/stockwire/stockwire.toml` (system-wide)
/// 3. `~/.config/stockwire/stockwire.toml` (user XDG config)
/// 4. `./stockwire.toml` (local directory)
/// 5. `STOCKWIRE_*` environment variables
pub fn load_config() -> Result<StockwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StockwireConfig::default()))
        .merge(Toml::file("/etc/stockwire/stockwire.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("stockwire/stockwire.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("stockwire.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from TOML content only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<StockwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StockwireConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<StockwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StockwireConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `STOCKWIRE_BROKER_APP_KEY` must map to
/// `broker.app_key`, not `broker.app.key`.
fn env_provider() -> Env {
    Env::prefixed("STOCKWIRE_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("client_", "client.", 1)
            .replacen("broker_", "broker.", 1)
            .replacen("auth_", "auth.", 1)
            .replacen("reconnect_", "reconnect.", 1);
        mapped.into()
    })
}
