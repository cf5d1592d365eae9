//! arbor-analysis command line.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────────┐
//!                 │                   AnalysisClient                     │
//!   image(s)      │  ┌────────┐   ┌───────────────┐   ┌──────────────┐   │
//!   ──────────────┼─▶│ image  │──▶│ HealthTracker │──▶│   remote     │───┼──▶ inference
//!                 │  │resolve │   │    probe      │   │ POST analyze │   │    service
//!                 │  └───┬────┘   └──────┬────────┘   └──────┬───────┘   │
//!                 │      │ invalid       │ unavailable       │ failure   │
//!                 │      ▼               ▼                   ▼           │
//!   result        │  ┌──────────────────────────────────────────────┐    │
//!   ◀─────────────┼──│            FallbackAnalyzer (offline)        │    │
//!   (mode-tagged) │  └──────────────────────────────────────────────┘    │
//!                 └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use arbor_analysis::analysis::{AnalysisRequest, FallbackAnalyzer, ImageHandle};
use arbor_analysis::config::{self, AnalysisConfig};
use arbor_analysis::health::HealthMonitor;
use arbor_analysis::lifecycle::{build_client, signals, Shutdown};
use arbor_analysis::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "arbor-analysis")]
#[command(about = "Tree image analysis with offline fallback", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults plus env overrides when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the remote service once
    Health,
    /// Analyse a single image
    Analyze {
        image: PathBuf,
        #[arg(long)]
        tree_type: Option<String>,
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Analyse several images in one remote call
    Batch {
        #[arg(required = true)]
        images: Vec<PathBuf>,
        #[arg(long)]
        tree_type: Option<String>,
    },
    /// Print the offline analysis for an identifier
    Fallback { identifier: String },
    /// Probe the remote service periodically until Ctrl-C
    Watch,
}

fn load(cli: &Cli) -> Result<AnalysisConfig, config::ConfigError> {
    match &cli.config {
        Some(path) => config::load_config(path),
        None => config::from_env(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load(&cli)?;

    logging::init_logging(config.observability.log_format)?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    match cli.command {
        Commands::Fallback { identifier } => {
            let analyzer = FallbackAnalyzer::from_config(&config.fallback);
            print_json(&analyzer.analyze(&identifier))?;
        }
        Commands::Health => {
            let client = build_client(&config).await?;
            print_json(&client.health().status())?;
        }
        Commands::Analyze {
            image,
            tree_type,
            lat,
            lon,
        } => {
            let client = build_client(&config).await?;
            let mut request = AnalysisRequest::new(ImageHandle::Path(image));
            request.tree_type_hint = tree_type;
            if let (Some(lat), Some(lon)) = (lat, lon) {
                request = request.with_location(lat, lon);
            }
            let result = client.analyze(request).await?;
            tracing::info!(mode = %result.mode(), "Analysis finished");
            print_json(&result)?;
        }
        Commands::Batch { images, tree_type } => {
            let client = build_client(&config).await?;
            let requests = images
                .into_iter()
                .map(|path| AnalysisRequest {
                    image: ImageHandle::Path(path),
                    tree_type_hint: tree_type.clone(),
                    location_hint: None,
                })
                .collect();
            let results = client.batch_analyze(requests).await?;
            let degraded = results.iter().filter(|r| r.is_fallback()).count();
            tracing::info!(total = results.len(), degraded, "Batch analysis finished");
            print_json(&results)?;
        }
        Commands::Watch => {
            let client = build_client(&config).await?;
            let interval = match config.health.monitor_interval_secs {
                0 => Duration::from_secs(10),
                secs => Duration::from_secs(secs),
            };
            let shutdown = Shutdown::new();
            let monitor = HealthMonitor::new(Arc::clone(client.health()), interval);
            let receiver = shutdown.subscribe();
            tokio::spawn(signals::shutdown_on_ctrl_c(shutdown));
            monitor.run(receiver).await;
            print_json(&client.health().status())?;
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
