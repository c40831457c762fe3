use anyhow::Result;
use clap::Parser;
use pv_exporter::{config::Config, server};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// Inverter status page URL (overrides config)
    #[arg(long, env = "INVERTER_URL")]
    inverter_url: Option<String>,

    /// Port to listen on for metrics (overrides config, default 3001)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Address to bind to (overrides config, default 0.0.0.0)
    #[arg(short, long, env = "EXPORTER_ADDR")]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PV Prometheus Exporter v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let mut config = Config::load(&args.config)?;

    if let Some(url) = args.inverter_url {
        config.inverter.url = url;
    }
    config.override_server(args.addr, args.port);

    info!("Configuration loaded successfully");
    info!("Inverter page: {}", config.inverter.url);
    info!(
        "Metrics endpoint: http://{}:{}/metrics",
        config.server.addr, config.server.port
    );

    // Any poll failure ends up here; exit non-zero so the supervisor restarts us
    if let Err(e) = server::start(config).await {
        error!("Exporter stopped: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
