// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `stockwire doctor` command implementation.
//!
//! Prints the resolved configuration, the channel each role would subscribe
//! to, and probes the authorization endpoint. The probe uses placeholder
//! credentials, so a 401/403/422 still proves the endpoint is reachable.

use stockwire_channel::resolve;
use stockwire_config::model::AuthConfig;
use stockwire_config::StockwireConfig;
use stockwire_core::types::{AccountId, Role};

/// Runs the `stockwire doctor` command.
pub async fn run_doctor(config: &StockwireConfig) {
    println!("stockwire doctor");
    println!();

    println!("broker");
    println!(
        "  endpoint:  {}:{} (tls: {})",
        config.broker.host, config.broker.port, config.broker.use_tls
    );
    match &config.broker.app_key {
        Some(_) => println!("  app_key:   configured"),
        None => println!("  app_key:   MISSING -- set broker.app_key or STOCKWIRE_BROKER_APP_KEY"),
    }
    println!();

    println!("channel resolution");
    let placeholder = AccountId("<account-id>".into());
    for role in [Role::Admin, Role::Manager, Role::Staff] {
        println!("  {:<8} -> {}", role.to_string(), resolve(role, &placeholder));
    }
    println!();

    println!("authorization");
    println!("  endpoint:  {}", config.auth.endpoint);
    println!(
        "  bearer:    {}",
        if config.auth.bearer_token.is_some() {
            "configured"
        } else {
            "none"
        }
    );
    match probe_auth_endpoint(&config.auth).await {
        Ok(status) => println!("  probe:     reachable (HTTP {status})"),
        Err(e) => println!("  probe:     UNREACHABLE ({e})"),
    }
}

/// Sends a placeholder authorization request to check reachability.
async fn probe_auth_endpoint(auth: &AuthConfig) -> Result<reqwest::StatusCode, reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    let mut request = client.post(&auth.endpoint).json(&serde_json::json!({
        "socket_id": "0.0",
        "channel_name": "private-notifications-ADMIN",
    }));
    if let Some(ref token) = auth.bearer_token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await?;
    Ok(response.status())
}
