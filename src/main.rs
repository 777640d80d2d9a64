//! Gaia credits reward claimer.
//!
//! # Architecture Overview
//!
//! ```text
//!   keys.json / CLAIMER_PRIVATE_KEYS ──▶ wallets
//!                                          │
//!   ┌───────────┐   run_cycle   ┌──────────▼─────────┐   HTTPS   ┌──────────────┐
//!   │ scheduler │──────────────▶│    orchestrator    │──────────▶│ rewards API  │
//!   │ countdown │◀──────────────│ (one wallet at a   │           └──────────────┘
//!   └─────┬─────┘  CycleReport  │  time, in order)   │  JSON-RPC ┌──────────────┐
//!         │                     └────────────────────┘──────────▶│ redeem       │
//!         ▼                                                      │ contract     │
//!   countdown.json                                               └──────────────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use credit_claimer::config::keys::load_wallets;
use credit_claimer::config::loader::load_config_or_default;
use credit_claimer::lifecycle::spawn_signal_handler;
use credit_claimer::observability::{logging, metrics};
use credit_claimer::{Orchestrator, RedeemSubmitter, RewardClient, Scheduler, Shutdown};

#[derive(Parser)]
#[command(name = "credit-claimer")]
#[command(about = "Claim daily Gaia credits for a list of wallets", long_about = None)]
struct Cli {
    /// Configuration file. Defaults are used when it does not exist.
    #[arg(short, long, default_value = "credit-claimer.toml")]
    config: PathBuf,

    /// Private keys file, overriding `wallets.keys_path`.
    #[arg(short, long)]
    keys: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Claim for every wallet, then repeat on the configured interval (default)
    Run,
    /// Run a single claim cycle and exit
    Once,
    /// List the configured wallet addresses
    Wallets,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config_or_default(&cli.config)?;
    if let Some(keys) = &cli.keys {
        config.wallets.keys_path = keys.to_string_lossy().into_owned();
    }

    logging::init_logging(&config.observability.log_level)?;

    let wallets = load_wallets(&config.wallets)?;

    if let Some(Commands::Wallets) = cli.command {
        for (i, wallet) in wallets.iter().enumerate() {
            println!("{}. {}", i + 1, wallet.address_string());
        }
        return Ok(());
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        wallets = wallets.len(),
        api = %config.api.base_url,
        rpc = %config.chain.rpc_url,
        contract = %config.chain.contract_address,
        "credit-claimer starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let api = RewardClient::new(&config.api)?;
    let chain = RedeemSubmitter::new(&config.chain)?;
    let orchestrator = Orchestrator::new(wallets, api, chain);
    let scheduler = Scheduler::new(&config.schedule);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Once => {
            let report = scheduler.run_once(&orchestrator).await;
            tracing::info!(
                succeeded = report.succeeded(),
                failed = report.failed(),
                skipped = report.skipped(),
                "Single cycle finished"
            );
        }
        _ => {
            let shutdown = Shutdown::new();
            let rx = shutdown.subscribe();
            spawn_signal_handler(shutdown);

            let cycles = scheduler.run(&orchestrator, rx).await;
            tracing::info!(cycles, "Shutdown complete");
        }
    }

    Ok(())
}
