//! Insights report binary
//!
//! Loads the transaction history from the configured store and prints
//! the dashboard report as JSON on stdout.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin insights-report -- [--wallet <address>]
//! ```
//!
//! ## Environment Variables
//!
//! - INSIGHTS_STORE_URL - REST gateway base URL (takes precedence)
//! - INSIGHTS_STORE_FILE - JSON export of the wallet collection
//! - INSIGHTS_UTC_OFFSET_MINUTES - display timezone offset (default: 0)
//! - INSIGHTS_TIMELINE_LEN - timeline size (default: 8)
//! - RUST_LOG - Logging level (optional, default: info)

use defi_insights_core::models::settings::Settings;
use defi_insights_core::TransactionInsights;
use std::env;

fn parse_wallet_from_args() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|arg| arg == "--wallet")
        .and_then(|idx| args.get(idx + 1))
        .cloned()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let settings = Settings::from_env()?;
    let insights = TransactionInsights::from_settings(settings)?;

    let report = match parse_wallet_from_args() {
        Some(wallet) => {
            log::info!("Building report for wallet {wallet}");
            insights.report_for_wallet(&wallet).await
        }
        None => {
            log::info!("Building report across all wallets");
            insights.report().await
        }
    };

    let report = match report {
        Ok(report) => report,
        Err(e) => {
            log::error!("Failed to load transactions: {e}");
            return Err(e.into());
        }
    };

    log::info!(
        "Report ready: {} transactions, {} tokens",
        report.transactions.len(),
        report.balances_now.len()
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
