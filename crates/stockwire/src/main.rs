// SPDX-FileCopyrightText: 2026 Stockwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stockwire - live warehouse notifications on the command line.
//!
//! This is the binary entry point for the Stockwire client.

use clap::{Parser, Subcommand};

mod doctor;
mod tail;

/// Stockwire - live warehouse notifications on the command line.
#[derive(Parser, Debug)]
#[command(name = "stockwire", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Follow live notifications for a warehouse session.
    Tail {
        /// Warehouse role (ADMIN, MANAGER, STAFF).
        #[arg(long)]
        role: String,
        /// Account id; required for the per-account STAFF role.
        #[arg(long)]
        account_id: Option<String>,
    },
    /// Check configuration, channel resolution, and connectivity.
    Doctor,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match stockwire_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            stockwire_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.client.log_level);

    match cli.command {
        Some(Commands::Tail { role, account_id }) => {
            if let Err(e) = tail::run_tail(config, role, account_id).await {
                eprintln!("stockwire tail: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Doctor) => {
            doctor::run_doctor(&config).await;
        }
        None => {
            println!("stockwire: use --help for available commands");
        }
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("stockwire={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
