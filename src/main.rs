use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trust_firewall_server::firewall::FirewallMode;
use trust_firewall_server::server::TrustFirewallServer;
use trust_firewall_server::ServerConfig;

#[derive(Debug, Parser)]
#[command(name = "trust-firewall-server", version, about = "Trust score engine and hallucination firewall")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,

    /// Override the default firewall mode (strict, balanced, permissive)
    #[arg(long)]
    mode: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging before anything else; level is env-driven
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    info!("🚀 Starting Trust Firewall server...");

    // Explicit --config wins; otherwise probe the conventional location
    let config_path = cli
        .config
        .or_else(|| ServerConfig::default_config_path().filter(|path| path.exists()));
    let mut config = ServerConfig::load(config_path.as_deref())?;

    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(mode) = cli.mode.as_deref() {
        config.firewall.default_mode = FirewallMode::parse_or(mode, config.firewall.default_mode);
    }

    config.validate()?;
    info!("✅ Configuration loaded");
    info!("Default firewall mode: {}", config.firewall.default_mode);

    let server = TrustFirewallServer::new(config);
    server.run().await?;

    Ok(())
}
