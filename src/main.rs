//! Aether Climate Core
//!
//! Serves the carbon-accounting dashboard: activity inputs in, scope totals
//! and a chart out, plus the license-gated 7-page compliance dossier.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use aether_core::config::AetherConfig;
use aether_core::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    println!("\n{}", "═".repeat(60));
    println!("💎 Aether Climate Core v0.3.6 Enterprise Edition");
    println!("{}", "═".repeat(60));
    println!("Compliance: CA SB 253 | Factors: EPA Emission Factors Hub v4.2");
    println!("{}\n", "═".repeat(60));

    let config = AetherConfig::from_env();
    info!(addr = %config.addr, "starting dashboard server");

    server::run_server(config).await
}
