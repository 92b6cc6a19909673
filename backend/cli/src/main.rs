mod api;
mod config;
mod storage;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use defectscan_analyzer::providers::catalog::CatalogProvider;
use defectscan_analyzer::providers::gemini::GeminiProvider;
use defectscan_analyzer::providers::openai::OpenAiProvider;
use defectscan_analyzer::{DefectAssembler, FallbackAnalyzer, ProviderRegistry};

use api::AppState;
use config::Config;
use storage::UploadStore;

#[derive(Parser)]
#[command(name = "defectscan")]
#[command(about = "DefectScan — AI-explained defect analysis for inspection images")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the DefectScan HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
        /// Answer from the built-in defect catalog instead of hosted providers
        #[arg(long)]
        offline: bool,
    },
    /// Analyze a local image file and print the result as JSON
    Analyze {
        /// Path to the image
        file: PathBuf,
        /// Answer from the built-in defect catalog instead of hosted providers
        #[arg(long)]
        offline: bool,
    },
    /// Check whether a server is running
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();
    let cli = Cli::parse();

    let _log_guard = defectscan_logging::init_logger(&config.log_dir, &config.log_level);

    match cli.command {
        Commands::Serve { port, offline } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                offline: offline || config.offline,
                ..config
            };
            run_server(config).await?;
        }
        Commands::Analyze { file, offline } => {
            let config = Config {
                offline: offline || config.offline,
                ..config
            };
            // The analyzer never reads the image; only confirm it exists.
            tokio::fs::metadata(&file)
                .await
                .with_context(|| format!("Cannot read {}", file.display()))?;

            let assembler = build_assembler(&config);
            let result = tokio::time::timeout(
                config.request_timeout(),
                assembler.assemble_analysis(&file.to_string_lossy()),
            )
            .await
            .context("Analysis timed out")?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("DefectScan is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

/// Wire providers into a fallback chain, in configured order.
///
/// Hosted providers without an API key stay in the chain as unavailable
/// adapters, so their slot is skipped at call time.
fn build_analyzer(config: &Config) -> FallbackAnalyzer {
    if config.offline {
        info!("Offline mode: answering from the built-in catalog");
        return FallbackAnalyzer::new(Arc::new(CatalogProvider::new()));
    }

    let mut registry = ProviderRegistry::new();
    registry.register(GeminiProvider::from_config(&config.gemini));
    registry.register(OpenAiProvider::from_config(&config.openai));
    registry.register(Arc::new(CatalogProvider::new()));
    info!(registered = ?registry.list(), order = ?config.provider_order, "Providers registered");

    FallbackAnalyzer::from_registry(&registry, &config.provider_order)
}

fn build_assembler(config: &Config) -> Arc<DefectAssembler> {
    let analyzer = build_analyzer(config);
    info!(providers = ?analyzer.provider_names(), "Provider chain ready");
    Arc::new(DefectAssembler::new(Arc::new(analyzer)))
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        port = config.port,
        bind = %config.bind_address,
        upload_dir = %config.upload_dir,
        "Starting DefectScan server"
    );

    let store = UploadStore::open(&config.upload_dir).await?;
    let app_state = Arc::new(AppState {
        assembler: build_assembler(&config),
        store,
        analysis_timeout: config.request_timeout(),
    });

    let app = api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());
    let addr = format!("{}:{}", config.bind_address, config.port);

    info!(addr = %addr, "HTTP API listening");
    info!("Health check available at http://localhost:{}/api/health", config.port);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
