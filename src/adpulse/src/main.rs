//! AdPulse — campaign performance analysis service.
//!
//! Main entry point that wires configuration, the snapshot provider, the
//! analysis engine, and the HTTP server together.

use adpulse_analysis::CampaignAnalyzer;
use adpulse_api::ApiServer;
use adpulse_core::config::AppConfig;
use adpulse_insights::SnapshotProvider;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "adpulse")]
#[command(about = "Campaign performance analysis service")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "ADPULSE__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "ADPULSE__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// JSON snapshot fixture to load at startup
    #[arg(long, env = "ADPULSE__FIXTURE")]
    fixture: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adpulse=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("AdPulse starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        good_roas = config.thresholds.good_roas,
        "Configuration resolved"
    );

    let provider = Arc::new(SnapshotProvider::new());
    if let Some(path) = &cli.fixture {
        let accounts = provider.load_fixture(path)?;
        info!(path = %path.display(), accounts, "Snapshot fixture loaded");
    }

    let analyzer = Arc::new(CampaignAnalyzer::new(config.thresholds));

    let server = ApiServer::new(config, provider, analyzer);
    server.start_http().await
}
