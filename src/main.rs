//! Warehouse Requisition Relay
//!
//! Receives requisition forms and relays them to the warehouse.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │               REQUISITION RELAY              │
//!                         │                                              │
//!   POST /api/solicitacao │  ┌──────────┐    ┌─────────────┐             │
//!   ──────────────────────┼─▶│   http   │───▶│ requisition │             │
//!   multipart/form-data   │  │ handlers │    │  extractor  │             │
//!                         │  └──────────┘    └──────┬──────┘             │
//!                         │                         ▼                    │
//!                         │                  ┌─────────────┐             │
//!                         │                  │   compose   │             │
//!                         │                  │ email + chat│             │
//!                         │                  └──────┬──────┘             │
//!                         │                         ▼                    │
//!                         │                  ┌─────────────┐   SMTP      │
//!                         │                  │  delivery   │────────────┼──▶ Mail relay
//!                         │                  │ dispatcher  │────────────┼──▶ Chat webhook
//!                         │                  └─────────────┘   HTTPS     │
//!                         │                                              │
//!                         │  config · observability · lifecycle         │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use requisition_relay::config::loader::load_startup_config;
use requisition_relay::config::schema::ObservabilityConfig;
use requisition_relay::observability::{logging, metrics};
use requisition_relay::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "requisition-relay")]
#[command(about = "Warehouse requisition intake service", long_about = None)]
struct Args {
    /// TOML configuration file. Environment variables override its values.
    #[arg(short, long, env = "REQUISITION_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match load_startup_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    logging::init_logging(&config.observability);

    tracing::info!("requisition-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mail_host = %config.mail.host,
        mail_port = config.mail.port,
        to = %config.mail.to_address,
        webhook_enabled = config.webhook.enabled(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    let server = HttpServer::from_config(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
