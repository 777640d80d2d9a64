//! Metrics collection and exposition.
//!
//! # Metrics
//! - `claimer_wallet_outcomes_total` (counter): wallets processed, by `outcome`
//!   (`SUCCESS`, `FAIL`, `SKIPPED`, `ERROR`)
//! - `claimer_cycles_total` (counter): completed claim cycles
//! - `claimer_last_cycle_timestamp` (gauge): unix time the last cycle finished
//! - `claimer_last_cycle_wallets` (gauge): last cycle's wallets, by `result`
//!   (`succeeded`, `failed`, `skipped`)

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::blockchain::wallet::unix_timestamp;
use crate::claim::outcome::{CycleReport, WalletOutcome};

/// Serve a Prometheus scrape endpoint on `addr`. Must run inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    ::metrics::describe_counter!(
        "claimer_wallet_outcomes_total",
        "Wallets processed, by outcome"
    );
    ::metrics::describe_counter!("claimer_cycles_total", "Completed claim cycles");
    ::metrics::describe_gauge!(
        "claimer_last_cycle_timestamp",
        "Unix time the last claim cycle finished"
    );
    ::metrics::describe_gauge!("claimer_last_cycle_wallets", "Last cycle's wallets, by result");

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_wallet_outcome(outcome: &WalletOutcome) {
    ::metrics::counter!("claimer_wallet_outcomes_total", "outcome" => outcome.label()).increment(1);
}

pub fn record_cycle(report: &CycleReport) {
    ::metrics::counter!("claimer_cycles_total").increment(1);
    ::metrics::gauge!("claimer_last_cycle_timestamp").set(unix_timestamp() as f64);

    for (result, count) in [
        ("succeeded", report.succeeded()),
        ("failed", report.failed()),
        ("skipped", report.skipped()),
    ] {
        ::metrics::gauge!("claimer_last_cycle_wallets", "result" => result).set(count as f64);
    }
}
