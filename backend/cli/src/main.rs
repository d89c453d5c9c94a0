mod api;
mod config;
mod show_cmd;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use billscan_extract::{BillExtractor, GeminiVision};
use billscan_inventory::{InventoryService, InventoryStore};

use api::AppState;
use config::Config;

#[derive(Parser)]
#[command(name = "billscan")]
#[command(about = "billscan: bill ingestion and inventory viewing service")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the inventory HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Query the health endpoint of a running instance
    Status,
    /// Fetch the inventory and print each bill
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client.get(format!("{}/", config.api_url)).send().await {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("billscan is not running at {}", config.api_url);
                }
            }
        }
        Commands::Show => {
            show_cmd::run(&config.api_url).await?;
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        port = config.port,
        bind = %config.bind_address,
        model = %config.gemini_model,
        "Starting billscan inventory service"
    );

    // Fail fast on a missing credential rather than deferring to the first upload.
    let api_key = config
        .gemini_api_key
        .clone()
        .context("GEMINI_API_KEY must be set to start the server")?;
    let vision = GeminiVision::new(api_key)?.with_model(config.gemini_model.clone());

    let store = Arc::new(InventoryStore::new());
    let service = InventoryService::new(BillExtractor::new(Arc::new(vision)), store);
    let state = Arc::new(AppState { service });

    // The dashboard is served from another origin.
    let app = api::build_router(state).layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.bind_address, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "billscan HTTP server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
