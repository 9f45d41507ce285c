//! Item service entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use item_store::api::{create_router, AppState};
use item_store::config::Config;
use item_store::error::ServiceError;
use item_store::metrics;
use item_store::store::ItemStore;
use item_store::utils::{shutdown_signal, RUSTC_VERSION};

/// In-memory item CRUD service.
#[derive(Parser, Debug)]
#[command(name = "item-store")]
#[command(about = "Minimal HTTP service exposing CRUD over an in-memory item collection")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration drives the log format, so load it first
    let loaded = Config::load();
    let json_logs = loaded.as_ref().map(Config::json_logs).unwrap_or(false);
    let default_filter = loaded
        .as_ref()
        .map(|c| c.rust_log.clone())
        .unwrap_or_else(|_| "info".to_string());

    init_logging(args.verbose, json_logs, &default_filter);

    let config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        ServiceError::from(e)
    })?;

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Serve { port }) => cmd_serve(config, port.or(args.port)).await,
        None => cmd_serve(config, args.port).await,
    }
}

/// Initialize the tracing subscriber.
fn init_logging(verbose: bool, json: bool, default_filter: &str) {
    let filter = if verbose {
        EnvFilter::new("item_store=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
    };

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Check configuration validity.
fn cmd_check_config(config: Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("ITEM STORE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(ServiceError::InvalidConfig(e).into());
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Port:         {}", config.port);
    println!("  Environment:  {}", config.node_env);
    println!("  Version:      {}", config.app_version);
    println!("  Application:  {}", config.app_name);
    println!("  Seed items:   {}", config.seed_sample_items);
    println!("  Log filter:   {}", config.rust_log);
    println!("  Log format:   {}", config.log_format);
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(mut config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port_override {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(ServiceError::InvalidConfig(e).into());
    }

    let prometheus = metrics::install_recorder()?;

    let store = if config.seed_sample_items {
        ItemStore::with_sample_items()
    } else {
        ItemStore::new()
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    log_banner(&config);

    let app_state = AppState::new(store, config).with_metrics(prometheus);
    let router = create_router(app_state);

    let listener = TcpListener::bind(addr).await.map_err(ServiceError::from)?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServiceError::from)?;

    info!("HTTP server closed");
    Ok(())
}

fn log_banner(config: &Config) {
    info!("========================================");
    info!("{}", config.app_name);
    info!("========================================");
    info!("Environment: {}", config.node_env);
    info!("Version:     {}", config.app_version);
    info!("Port:        {}", config.port);
    info!("Runtime:     {}", RUSTC_VERSION);
    info!("Endpoints:");
    for endpoint in [
        "GET    /health",
        "GET    /api/info",
        "GET    /api/items",
        "GET    /api/items/:id",
        "POST   /api/items",
        "PUT    /api/items/:id",
        "DELETE /api/items/:id",
        "GET    /metrics",
    ] {
        info!("  - {}", endpoint);
    }
}
