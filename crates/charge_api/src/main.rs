use charge_api::{AppState, create_app};
use charge_core::CalculatorConfig;
use charge_engine::{DEFAULT_HISTORY_LIMIT, Engine, SessionHistory, VisitorCounter};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

/// Command line arguments for the charge calculator server
#[derive(Parser, Debug)]
#[command(name = "charge-calculator")]
#[command(about = "EV charge time, cost and CO2 calculator")]
struct Args {
    /// Path to a calculator configuration JSON file, built-in tables when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Number of saved sessions kept, the oldest are dropped first
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

async fn load_config(path: &Path) -> Result<CalculatorConfig, Box<dyn std::error::Error>> {
    let config_content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

    let config = serde_json::from_str(&config_content)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match args.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }

    let config = match &args.config {
        Some(path) => {
            let config = load_config(path).await?;
            tracing::info!("Loaded calculator config from {}", path.display());
            config
        }
        None => {
            tracing::info!("No config file given, using the built-in tables");
            CalculatorConfig::default()
        }
    };

    let (catalog, estimator) = config
        .build()
        .map_err(|e| format!("Invalid calculator config: {}", e))?;
    tracing::info!(
        "Catalog has {} vehicles, default is {}",
        catalog.len(),
        catalog.default_vehicle().id
    );

    // Create application state
    let app_state = AppState::new(
        Engine::new(catalog, estimator),
        config.session_defaults,
        SessionHistory::with_limit(args.history_limit),
        VisitorCounter::default(),
    );

    // Build our application with routes
    let app = create_app(app_state);

    let bind_addr = format!("0.0.0.0:{}", args.port);
    tracing::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", bind_addr, e))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
